//! Job application entity model and review pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Status of a job application.
///
/// The review pipeline moves forward only:
/// `applied → reviewed → shortlisted → interview → offered → hired`.
/// `rejected` (employer) and `withdrawn` (applicant) are terminal
/// side-branches reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    /// Submitted, not yet reviewed.
    Applied,
    /// Seen by the employer.
    Reviewed,
    /// Shortlisted for interviews.
    Shortlisted,
    /// Interview stage.
    Interview,
    /// Offer extended.
    Offered,
    /// Hired.
    Hired,
    /// Rejected by the employer.
    Rejected,
    /// Withdrawn by the applicant.
    Withdrawn,
}

impl ApplicationStatus {
    /// Check whether no further transitions are allowed from this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Hired | Self::Rejected | Self::Withdrawn)
    }

    /// Position in the forward review pipeline (terminal side-branches
    /// have no position).
    fn pipeline_rank(&self) -> Option<u8> {
        match self {
            Self::Applied => Some(0),
            Self::Reviewed => Some(1),
            Self::Shortlisted => Some(2),
            Self::Interview => Some(3),
            Self::Offered => Some(4),
            Self::Hired => Some(5),
            Self::Rejected | Self::Withdrawn => None,
        }
    }

    /// Check whether the employer may move an application from `self` to
    /// `next`. Forward pipeline moves and rejection are allowed; moving
    /// backward, re-opening a terminal application, and withdrawing on the
    /// applicant's behalf are not.
    pub fn employer_can_transition_to(&self, next: ApplicationStatus) -> bool {
        if self.is_terminal() || next == Self::Withdrawn || next == Self::Applied {
            return false;
        }
        if next == Self::Rejected {
            return true;
        }
        match (self.pipeline_rank(), next.pipeline_rank()) {
            (Some(from), Some(to)) => to > from,
            _ => false,
        }
    }
}

/// A user's application against a job posting. Unique per
/// (job, applicant); withdrawal is a status value, not a deletion.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobApplication {
    /// Unique application identifier.
    pub id: Uuid,
    /// The job posting.
    pub job_id: Uuid,
    /// The applying user.
    pub applicant_id: Uuid,
    /// Review pipeline status.
    pub status: ApplicationStatus,
    /// Optional cover letter.
    pub cover_letter: Option<String>,
    /// Set once the employer first moves the application out of `applied`;
    /// distinguishes "new" from "seen" applications.
    pub viewed_at: Option<DateTime<Utc>>,
    /// When the application was submitted.
    pub created_at: DateTime<Utc>,
    /// When the application was last updated.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::ApplicationStatus::*;

    #[test]
    fn test_forward_pipeline_moves_allowed() {
        assert!(Applied.employer_can_transition_to(Reviewed));
        assert!(Applied.employer_can_transition_to(Interview));
        assert!(Reviewed.employer_can_transition_to(Shortlisted));
        assert!(Offered.employer_can_transition_to(Hired));
    }

    #[test]
    fn test_backward_moves_rejected() {
        assert!(!Shortlisted.employer_can_transition_to(Reviewed));
        assert!(!Interview.employer_can_transition_to(Applied));
    }

    #[test]
    fn test_rejection_from_any_non_terminal() {
        assert!(Applied.employer_can_transition_to(Rejected));
        assert!(Offered.employer_can_transition_to(Rejected));
        assert!(!Hired.employer_can_transition_to(Rejected));
    }

    #[test]
    fn test_terminal_states_frozen() {
        assert!(!Hired.employer_can_transition_to(Offered));
        assert!(!Rejected.employer_can_transition_to(Reviewed));
        assert!(!Withdrawn.employer_can_transition_to(Reviewed));
    }

    #[test]
    fn test_employer_cannot_withdraw() {
        assert!(!Applied.employer_can_transition_to(Withdrawn));
        assert!(!Interview.employer_can_transition_to(Withdrawn));
    }
}
