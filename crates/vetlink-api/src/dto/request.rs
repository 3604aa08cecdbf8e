//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use vetlink_entity::event::RegistrationStatus;
use vetlink_entity::job::ApplicationStatus;
use vetlink_entity::user::ProfileType;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Profile kind.
    pub profile_type: ProfileType,
    /// First name (individual profiles).
    pub first_name: Option<String>,
    /// Last name (individual profiles).
    pub last_name: Option<String>,
    /// Organization name (company and shelter profiles).
    pub company_name: Option<String>,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Profile update request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// New first name.
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    /// New last name.
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    /// New organization name.
    #[validate(length(max = 200))]
    pub company_name: Option<String>,
    /// New headline.
    #[validate(length(max = 200))]
    pub headline: Option<String>,
    /// New biography.
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    /// New avatar URL.
    pub avatar_url: Option<String>,
}

/// Connection request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendConnectionRequest {
    /// The user to connect with.
    pub target_id: Uuid,
    /// Optional message.
    #[validate(length(max = 500, message = "Message is too long"))]
    pub message: Option<String>,
}

/// Event creation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEventRequest {
    /// Event title.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Event description.
    #[validate(length(min = 1, max = 5000))]
    pub description: String,
    /// Venue or "online".
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    /// When the event starts.
    pub starts_at: DateTime<Utc>,
    /// When the event ends.
    pub ends_at: Option<DateTime<Utc>>,
    /// Registration deadline.
    pub registration_deadline: Option<DateTime<Utc>>,
    /// Capacity limit.
    #[validate(range(min = 1, message = "Capacity must be positive"))]
    pub max_attendees: Option<i32>,
    /// Whether registrations require organizer approval.
    #[serde(default)]
    pub requires_approval: bool,
}

/// Registration status update request (organizer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRegistrationStatusRequest {
    /// New registration status.
    pub status: RegistrationStatus,
}

/// Job creation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateJobRequest {
    /// Job title.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Job description.
    #[validate(length(min = 1, max = 10000))]
    pub description: String,
    /// Work location.
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    /// Employment type label.
    #[validate(length(min = 1, max = 50))]
    pub employment_type: String,
    /// Salary range as free text.
    pub salary_range: Option<String>,
    /// Whether the posting is sponsored.
    #[serde(default)]
    pub is_sponsored: bool,
}

/// Job application request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApplyJobRequest {
    /// Optional cover letter.
    #[validate(length(max = 4000, message = "Cover letter is too long"))]
    pub cover_letter: Option<String>,
}

/// Application status update request (employer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateApplicationStatusRequest {
    /// New application status.
    pub status: ApplicationStatus,
}

/// Post creation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePostRequest {
    /// Post body.
    #[validate(length(min = 1, max = 5000, message = "Post content is required"))]
    pub content: String,
    /// Attached image URL.
    pub image_url: Option<String>,
}

/// Comment creation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCommentRequest {
    /// Comment body.
    #[validate(length(min = 1, max = 2000, message = "Comment content is required"))]
    pub content: String,
}
