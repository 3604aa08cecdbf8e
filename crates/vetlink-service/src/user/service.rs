//! Account lifecycle: registration, login, token refresh, profiles,
//! search, and self-service deactivation.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use vetlink_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use vetlink_auth::password::PasswordHasher;
use vetlink_core::error::AppError;
use vetlink_core::result::AppResult;
use vetlink_core::types::pagination::{PageRequest, PageResponse};
use vetlink_database::repositories::user::UserRepository;
use vetlink_entity::user::model::{CreateUser, UpdateProfile, UserFilter};
use vetlink_entity::user::{ProfileType, User, UserStatus};

use crate::context::RequestContext;

/// Data collected at registration time.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterData {
    /// Email address.
    pub email: String,
    /// Plaintext password.
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

/// Manages accounts: registration, authentication, and profiles.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// JWT encoder for issuing token pairs.
    encoder: Arc<JwtEncoder>,
    /// JWT decoder for refresh validation.
    decoder: Arc<JwtDecoder>,
    /// Minimum password length from configuration.
    password_min_length: usize,
}

impl UserService {
    /// Create a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        password_min_length: usize,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            encoder,
            decoder,
            password_min_length,
        }
    }

    /// Register a new account and issue its first token pair.
    pub async fn register(&self, data: RegisterData) -> AppResult<(User, TokenPair)> {
        guard_password_length(&data.password, self.password_min_length)?;
        guard_profile_fields(
            data.profile_type,
            data.first_name.as_deref(),
            data.last_name.as_deref(),
            data.company_name.as_deref(),
        )?;

        let password_hash = self.hasher.hash_password(&data.password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                email: data.email.trim().to_lowercase(),
                password_hash,
                profile_type: data.profile_type,
                first_name: data.first_name,
                last_name: data.last_name,
                company_name: data.company_name,
            })
            .await?;

        info!(user_id = %user.id, "Account registered");

        let tokens = self
            .encoder
            .generate_token_pair(user.id, user.role, &user.email)?;
        Ok((user, tokens))
    }

    /// Authenticate with email and password, issuing a token pair.
    ///
    /// A missing account and a wrong password produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(User, TokenPair)> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }
        if !user.status.can_login() {
            return Err(AppError::forbidden("Account is not active"));
        }

        self.user_repo
            .record_login(user.id, chrono::Utc::now())
            .await?;

        info!(user_id = %user.id, "User logged in");

        let tokens = self
            .encoder
            .generate_token_pair(user.id, user.role, &user.email)?;
        Ok((user, tokens))
    }

    /// Exchange a refresh token for a fresh token pair.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;

        let user = self
            .user_repo
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::unauthorized("Account no longer exists"))?;
        if !user.status.can_login() {
            return Err(AppError::forbidden("Account is not active"));
        }

        self.encoder
            .generate_token_pair(user.id, user.role, &user.email)
    }

    /// The current user's own account.
    pub async fn me(&self, ctx: &RequestContext) -> AppResult<User> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// A user's public profile. Inactive accounts read as absent.
    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .filter(User::is_active)
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Update the current user's profile fields.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        data: UpdateProfile,
    ) -> AppResult<User> {
        let user = self.user_repo.update_profile(ctx.user_id, &data).await?;
        info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }

    /// Search active users.
    pub async fn search(
        &self,
        filter: UserFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<User>> {
        self.user_repo.search(&filter, &page).await
    }

    /// Self-service account deactivation (soft delete).
    pub async fn deactivate(&self, ctx: &RequestContext) -> AppResult<()> {
        let changed = self
            .user_repo
            .set_status(ctx.user_id, UserStatus::Deactivated)
            .await?;
        if !changed {
            return Err(AppError::not_found("User not found"));
        }
        info!(user_id = %ctx.user_id, "Account deactivated");
        Ok(())
    }
}

fn guard_password_length(password: &str, min: usize) -> AppResult<()> {
    if password.chars().count() < min {
        return Err(AppError::validation(format!(
            "Password must be at least {min} characters long"
        )));
    }
    Ok(())
}

/// Check that the name fields required by the profile kind are present.
fn guard_profile_fields(
    profile_type: ProfileType,
    first_name: Option<&str>,
    last_name: Option<&str>,
    company_name: Option<&str>,
) -> AppResult<()> {
    let filled = |v: Option<&str>| v.is_some_and(|s| !s.trim().is_empty());
    match profile_type {
        ProfileType::Individual => {
            if !filled(first_name) && !filled(last_name) {
                return Err(AppError::validation(
                    "Individual profiles require a first or last name",
                ));
            }
        }
        ProfileType::Company | ProfileType::Shelter => {
            if !filled(company_name) {
                return Err(AppError::validation(
                    "Company and shelter profiles require an organization name",
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vetlink_core::error::ErrorKind;

    #[test]
    fn test_password_length_guard() {
        assert!(guard_password_length("12345678", 8).is_ok());
        let err = guard_password_length("1234567", 8).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_individual_requires_a_name() {
        assert!(guard_profile_fields(ProfileType::Individual, Some("Ana"), None, None).is_ok());
        assert!(guard_profile_fields(ProfileType::Individual, None, Some("García"), None).is_ok());
        assert!(guard_profile_fields(ProfileType::Individual, None, None, Some("ACME")).is_err());
    }

    #[test]
    fn test_organizations_require_company_name() {
        assert!(
            guard_profile_fields(ProfileType::Company, None, None, Some("VetCare SL")).is_ok()
        );
        assert!(guard_profile_fields(ProfileType::Shelter, None, None, Some(" ")).is_err());
        assert!(guard_profile_fields(ProfileType::Company, Some("Ana"), None, None).is_err());
    }
}
