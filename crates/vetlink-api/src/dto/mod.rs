//! Request and response DTOs.

pub mod request;
pub mod response;

use validator::Validate;

use vetlink_core::error::AppError;
use vetlink_core::result::AppResult;

/// Run `validator` checks on a request body, mapping failures to a
/// Validation error with the field messages.
pub fn validate_request(req: &impl Validate) -> AppResult<()> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))
}
