//! Job posting entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Publication status of a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Not yet visible; applications closed.
    Draft,
    /// Open for applications.
    Active,
    /// Closed by the posting company.
    Closed,
}

/// A job posting by a company profile.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    /// Unique job identifier.
    pub id: Uuid,
    /// The posting company's user ID.
    pub company_id: Uuid,
    /// Job title.
    pub title: String,
    /// Job description.
    pub description: String,
    /// Work location.
    pub location: String,
    /// Employment type label (e.g. "full_time", "part_time", "internship").
    pub employment_type: String,
    /// Salary range as free text.
    pub salary_range: Option<String>,
    /// Sponsored postings sort before organic ones.
    pub is_sponsored: bool,
    /// Publication status.
    pub status: JobStatus,
    /// Cached count of applications (advisory).
    pub applications_count: i32,
    /// Best-effort detail view counter.
    pub views_count: i32,
    /// When the posting was created.
    pub created_at: DateTime<Utc>,
    /// When the posting was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new job posting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJob {
    /// Job title.
    pub title: String,
    /// Job description.
    pub description: String,
    /// Work location.
    pub location: String,
    /// Employment type label.
    pub employment_type: String,
    /// Salary range as free text.
    pub salary_range: Option<String>,
    /// Whether the posting is sponsored.
    pub is_sponsored: bool,
}

/// Optional predicates for job listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobFilter {
    /// Case-insensitive substring match over title and description.
    pub keyword: Option<String>,
    /// Case-insensitive substring match over location.
    pub location: Option<String>,
    /// Exact match on employment type.
    pub employment_type: Option<String>,
    /// Restrict to a posting company.
    pub company_id: Option<Uuid>,
}
