//! API handlers for Shelfmark REST endpoints

pub mod books;
pub mod health;
pub mod isbn;
pub mod openapi;

use validator::Validate;

use crate::error::{AppError, AppResult};

/// Run `validator` checks on a request payload, mapping failures to a 400
/// with the field messages.
pub fn validate_request<T: Validate>(payload: &T) -> AppResult<()> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))
}
