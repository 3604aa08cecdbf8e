//! Job entity: postings and applications.

pub mod application;
pub mod model;

pub use application::{ApplicationStatus, JobApplication};
pub use model::{CreateJob, Job, JobFilter, JobStatus};
