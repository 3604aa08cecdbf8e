//! Job application workflow: posting lifecycle, apply/withdraw, and the
//! employer review pipeline.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use vetlink_core::error::AppError;
use vetlink_core::result::AppResult;
use vetlink_core::types::pagination::{PageRequest, PageResponse};
use vetlink_database::repositories::job::JobRepository;
use vetlink_entity::job::application::ApplicationStatus;
use vetlink_entity::job::model::{CreateJob, JobFilter};
use vetlink_entity::job::{Job, JobApplication, JobStatus};

use crate::context::RequestContext;

/// Manages job postings and applications.
#[derive(Debug, Clone)]
pub struct JobService {
    /// Job repository.
    job_repo: Arc<JobRepository>,
}

impl JobService {
    /// Create a new job service.
    pub fn new(job_repo: Arc<JobRepository>) -> Self {
        Self { job_repo }
    }

    /// Create a new active job posting owned by the current user.
    pub async fn create_job(&self, ctx: &RequestContext, data: CreateJob) -> AppResult<Job> {
        let job = self.job_repo.create(ctx.user_id, &data).await?;
        info!(job_id = %job.id, company_id = %ctx.user_id, "Job posting created");
        Ok(job)
    }

    /// Fetch a job by ID, bumping the best-effort view counter.
    pub async fn get_job(&self, job_id: Uuid) -> AppResult<Job> {
        let job = self.require_job(job_id).await?;
        if let Err(e) = self.job_repo.increment_views(job_id).await {
            tracing::warn!(job_id = %job_id, error = %e, "Failed to bump job views");
        }
        Ok(job)
    }

    /// List active jobs, sponsored first then newest.
    pub async fn list_jobs(
        &self,
        filter: JobFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<Job>> {
        self.job_repo.find_active(&filter, &page).await
    }

    /// Apply to a job as the current user.
    ///
    /// The job must be active and not owned by the applicant, and the
    /// applicant must not already hold an application (withdrawal does
    /// not free the slot). The unique constraint is the authoritative
    /// duplicate guard.
    pub async fn apply(
        &self,
        ctx: &RequestContext,
        job_id: Uuid,
        cover_letter: Option<String>,
    ) -> AppResult<JobApplication> {
        let job = self.require_job(job_id).await?;

        if job.status != JobStatus::Active {
            return Err(AppError::conflict("Job is not open for applications"));
        }
        if job.company_id == ctx.user_id {
            return Err(AppError::conflict("You cannot apply to your own job posting"));
        }
        if self
            .job_repo
            .find_application(job_id, ctx.user_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("You have already applied to this job"));
        }

        let application = self
            .job_repo
            .apply(job_id, ctx.user_id, cover_letter.as_deref())
            .await?;

        info!(
            job_id = %job_id,
            applicant_id = %ctx.user_id,
            application_id = %application.id,
            "Job application submitted"
        );
        Ok(application)
    }

    /// Withdraw the current user's application.
    ///
    /// Withdrawal is a status value, not a deletion; the (job, applicant)
    /// slot stays consumed.
    pub async fn withdraw(&self, ctx: &RequestContext, job_id: Uuid) -> AppResult<JobApplication> {
        let application = self
            .job_repo
            .find_application(job_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Application not found"))?;

        if application.status.is_terminal() {
            return Err(AppError::conflict("Application is already closed"));
        }

        let withdrawn = self
            .job_repo
            .update_application_status(application.id, ApplicationStatus::Withdrawn, false)
            .await?;

        info!(application_id = %withdrawn.id, "Job application withdrawn");
        Ok(withdrawn)
    }

    /// Move an application through the review pipeline. Job owner only.
    ///
    /// Allowed moves are forward pipeline steps and rejection from any
    /// non-terminal state; the first move away from `applied` stamps
    /// `viewed_at`.
    pub async fn update_application_status(
        &self,
        ctx: &RequestContext,
        application_id: Uuid,
        status: ApplicationStatus,
    ) -> AppResult<JobApplication> {
        let application = self
            .job_repo
            .find_application_by_id(application_id)
            .await?
            .ok_or_else(|| AppError::not_found("Application not found"))?;

        let job = self.require_job(application.job_id).await?;
        if job.company_id != ctx.user_id {
            return Err(AppError::forbidden(
                "Only the posting company can manage applications",
            ));
        }

        if !application.status.employer_can_transition_to(status) {
            return Err(AppError::conflict(
                "Invalid application status transition",
            ));
        }

        let updated = self
            .job_repo
            .update_application_status(application_id, status, true)
            .await?;

        info!(
            application_id = %updated.id,
            status = ?status,
            "Job application status updated"
        );
        Ok(updated)
    }

    /// List applications for a job. Job owner only.
    pub async fn list_applications(
        &self,
        ctx: &RequestContext,
        job_id: Uuid,
        page: PageRequest,
    ) -> AppResult<PageResponse<JobApplication>> {
        let job = self.require_job(job_id).await?;
        if job.company_id != ctx.user_id {
            return Err(AppError::forbidden(
                "Only the posting company can list applications",
            ));
        }
        self.job_repo.find_applications_by_job(job_id, &page).await
    }

    /// List the current user's own applications, newest first.
    pub async fn my_applications(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<JobApplication>> {
        self.job_repo
            .find_applications_by_applicant(ctx.user_id, &page)
            .await
    }

    async fn require_job(&self, job_id: Uuid) -> AppResult<Job> {
        self.job_repo
            .find_by_id(job_id)
            .await?
            .ok_or_else(|| AppError::not_found("Job not found"))
    }
}
