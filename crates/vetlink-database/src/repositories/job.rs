//! Job and application repository implementation.
//!
//! Application creation runs as one transaction so the cached counter on
//! the job row stays consistent with the application rows. The unique
//! index on `(job_id, applicant_id)` is the duplicate guard.

use sqlx::PgPool;
use uuid::Uuid;

use vetlink_core::error::{AppError, ErrorKind};
use vetlink_core::result::AppResult;
use vetlink_core::types::pagination::{PageRequest, PageResponse};
use vetlink_entity::job::application::ApplicationStatus;
use vetlink_entity::job::model::{CreateJob, JobFilter};
use vetlink_entity::job::{Job, JobApplication};

use super::conflict_on_unique;

/// Repository for job postings and applications.
#[derive(Debug, Clone)]
pub struct JobRepository {
    pool: PgPool,
}

impl JobRepository {
    /// Create a new job repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a job by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Job>> {
        sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find job", e))
    }

    /// Create a new active job posting.
    pub async fn create(&self, company_id: Uuid, data: &CreateJob) -> AppResult<Job> {
        sqlx::query_as::<_, Job>(
            "INSERT INTO jobs (company_id, title, description, location, employment_type, \
             salary_range, is_sponsored, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, 'active') RETURNING *",
        )
        .bind(company_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.location)
        .bind(&data.employment_type)
        .bind(&data.salary_range)
        .bind(data.is_sponsored)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create job", e))
    }

    /// List active jobs with optional filters. Sponsored postings come
    /// first, then newest first.
    pub async fn find_active(
        &self,
        filter: &JobFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Job>> {
        let keyword = filter.keyword.as_ref().map(|k| format!("%{k}%"));
        let location = filter.location.as_ref().map(|l| format!("%{l}%"));

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM jobs WHERE status = 'active' \
             AND ($1::text IS NULL OR title ILIKE $1 OR description ILIKE $1) \
             AND ($2::text IS NULL OR location ILIKE $2) \
             AND ($3::text IS NULL OR employment_type = $3) \
             AND ($4::uuid IS NULL OR company_id = $4)",
        )
        .bind(&keyword)
        .bind(&location)
        .bind(&filter.employment_type)
        .bind(filter.company_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count jobs", e))?;

        let jobs = sqlx::query_as::<_, Job>(
            "SELECT * FROM jobs WHERE status = 'active' \
             AND ($1::text IS NULL OR title ILIKE $1 OR description ILIKE $1) \
             AND ($2::text IS NULL OR location ILIKE $2) \
             AND ($3::text IS NULL OR employment_type = $3) \
             AND ($4::uuid IS NULL OR company_id = $4) \
             ORDER BY is_sponsored DESC, created_at DESC LIMIT $5 OFFSET $6",
        )
        .bind(&keyword)
        .bind(&location)
        .bind(&filter.employment_type)
        .bind(filter.company_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list jobs", e))?;

        Ok(PageResponse::new(
            jobs,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Best-effort detail view counter. Not transactional by design.
    pub async fn increment_views(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE jobs SET views_count = views_count + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to bump views", e))?;
        Ok(())
    }

    /// Atomically create an application and bump the job's counter.
    pub async fn apply(
        &self,
        job_id: Uuid,
        applicant_id: Uuid,
        cover_letter: Option<&str>,
    ) -> AppResult<JobApplication> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let application = sqlx::query_as::<_, JobApplication>(
            "INSERT INTO job_applications (job_id, applicant_id, cover_letter) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(job_id)
        .bind(applicant_id)
        .bind(cover_letter)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            conflict_on_unique(
                e,
                "You have already applied to this job",
                "Failed to create application",
            )
        })?;

        sqlx::query("UPDATE jobs SET applications_count = applications_count + 1 WHERE id = $1")
            .bind(job_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to bump application count", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit application", e)
        })?;

        Ok(application)
    }

    /// Find the application for a (job, applicant) pair, any status.
    pub async fn find_application(
        &self,
        job_id: Uuid,
        applicant_id: Uuid,
    ) -> AppResult<Option<JobApplication>> {
        sqlx::query_as::<_, JobApplication>(
            "SELECT * FROM job_applications WHERE job_id = $1 AND applicant_id = $2",
        )
        .bind(job_id)
        .bind(applicant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find application", e))
    }

    /// Find an application by primary key.
    pub async fn find_application_by_id(&self, id: Uuid) -> AppResult<Option<JobApplication>> {
        sqlx::query_as::<_, JobApplication>("SELECT * FROM job_applications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find application", e)
            })
    }

    /// Overwrite an application's status, stamping `viewed_at` on the
    /// first employer-driven change.
    pub async fn update_application_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
        mark_viewed: bool,
    ) -> AppResult<JobApplication> {
        sqlx::query_as::<_, JobApplication>(
            "UPDATE job_applications SET status = $2, \
             viewed_at = CASE WHEN $3 AND viewed_at IS NULL THEN NOW() ELSE viewed_at END, \
             updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(mark_viewed)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update application status", e)
        })
    }

    /// List applications for a job, newest first (employer view).
    pub async fn find_applications_by_job(
        &self,
        job_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<JobApplication>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM job_applications WHERE job_id = $1")
                .bind(job_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count applications", e)
                })?;

        let rows = sqlx::query_as::<_, JobApplication>(
            "SELECT * FROM job_applications WHERE job_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(job_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list applications", e))?;

        Ok(PageResponse::new(
            rows,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List a user's own applications, newest first.
    pub async fn find_applications_by_applicant(
        &self,
        applicant_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<JobApplication>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM job_applications WHERE applicant_id = $1")
                .bind(applicant_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count applications", e)
                })?;

        let rows = sqlx::query_as::<_, JobApplication>(
            "SELECT * FROM job_applications WHERE applicant_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(applicant_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list applications", e))?;

        Ok(PageResponse::new(
            rows,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}
