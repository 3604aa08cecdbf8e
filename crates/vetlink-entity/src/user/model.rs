//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;
use super::status::UserStatus;

/// Fallback display name when a profile has no usable name fields.
const DISPLAY_NAME_FALLBACK: &str = "Usuario";

/// Kind of profile behind an account.
///
/// Individuals carry first/last name; companies and shelters carry an
/// organization name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "profile_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProfileType {
    /// An individual professional (vet, technician, student).
    Individual,
    /// A company (clinic, laboratory, supplier).
    Company,
    /// An animal shelter or rescue organization.
    Shelter,
}

/// A registered user in the VetLink network.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Email address (unique, case-insensitive).
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// User role.
    pub role: UserRole,
    /// Account status.
    pub status: UserStatus,
    /// Profile kind.
    pub profile_type: ProfileType,
    /// First name (individual profiles).
    pub first_name: Option<String>,
    /// Last name (individual profiles).
    pub last_name: Option<String>,
    /// Organization name (company and shelter profiles).
    pub company_name: Option<String>,
    /// Short professional headline.
    pub headline: Option<String>,
    /// Free-form biography.
    pub bio: Option<String>,
    /// Avatar image URL (opaque string; media storage is external).
    pub avatar_url: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
    /// When the account was soft-deleted (status `deactivated`).
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Resolve the human-readable display name for this profile.
    ///
    /// Company and shelter profiles use the organization name, individual
    /// profiles use "first last". Missing fields fall back to a defined
    /// default rather than an empty string.
    pub fn display_name(&self) -> String {
        resolve_display_name(
            self.profile_type,
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            self.company_name.as_deref(),
        )
    }

    /// Check if this account can act in the network.
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Build the compact public projection of this user.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            display_name: self.display_name(),
            profile_type: self.profile_type,
            headline: self.headline.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

/// Resolve a display name from profile-kind-specific name fields.
pub fn resolve_display_name(
    profile_type: ProfileType,
    first_name: Option<&str>,
    last_name: Option<&str>,
    company_name: Option<&str>,
) -> String {
    match profile_type {
        ProfileType::Company | ProfileType::Shelter => company_name
            .filter(|n| !n.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| DISPLAY_NAME_FALLBACK.to_string()),
        ProfileType::Individual => {
            let full = match (first_name, last_name) {
                (Some(f), Some(l)) => format!("{f} {l}"),
                (Some(f), None) => f.to_string(),
                (None, Some(l)) => l.to_string(),
                (None, None) => String::new(),
            };
            if full.trim().is_empty() {
                DISPLAY_NAME_FALLBACK.to_string()
            } else {
                full
            }
        }
    }
}

/// Compact public projection of a user, used wherever another party is
/// shown (connection lists, suggestions, organizer info).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    /// User ID.
    pub id: Uuid,
    /// Resolved display name.
    pub display_name: String,
    /// Profile kind.
    pub profile_type: ProfileType,
    /// Professional headline.
    pub headline: Option<String>,
    /// Avatar URL.
    pub avatar_url: Option<String>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Profile kind.
    pub profile_type: ProfileType,
    /// First name (individual profiles).
    pub first_name: Option<String>,
    /// Last name (individual profiles).
    pub last_name: Option<String>,
    /// Organization name (company and shelter profiles).
    pub company_name: Option<String>,
}

/// Data for updating an existing user's profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfile {
    /// New first name.
    pub first_name: Option<String>,
    /// New last name.
    pub last_name: Option<String>,
    /// New organization name.
    pub company_name: Option<String>,
    /// New headline.
    pub headline: Option<String>,
    /// New biography.
    pub bio: Option<String>,
    /// New avatar URL.
    pub avatar_url: Option<String>,
}

/// Optional predicates for user listing and search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserFilter {
    /// Case-insensitive substring match over name fields and headline.
    pub keyword: Option<String>,
    /// Restrict to a profile kind.
    pub profile_type: Option<ProfileType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_company_uses_company_name() {
        let name = resolve_display_name(ProfileType::Company, None, None, Some("VetCare SL"));
        assert_eq!(name, "VetCare SL");
    }

    #[test]
    fn test_display_name_individual_joins_names() {
        let name =
            resolve_display_name(ProfileType::Individual, Some("Ana"), Some("García"), None);
        assert_eq!(name, "Ana García");
    }

    #[test]
    fn test_display_name_individual_partial() {
        let name = resolve_display_name(ProfileType::Individual, Some("Ana"), None, None);
        assert_eq!(name, "Ana");
    }

    #[test]
    fn test_display_name_fallback() {
        assert_eq!(
            resolve_display_name(ProfileType::Individual, None, None, None),
            "Usuario"
        );
        assert_eq!(
            resolve_display_name(ProfileType::Shelter, None, None, Some("  ")),
            "Usuario"
        );
    }
}
