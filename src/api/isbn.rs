//! ISBN validation endpoint.
//!
//! Surfaces the codec's ordered classification so clients get a single,
//! most-relevant diagnostic for a malformed code.

use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::isbn;

#[derive(Deserialize, IntoParams)]
pub struct ValidateIsbnQuery {
    /// The ISBN-13 candidate to check
    pub isbn: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ValidateIsbnResponse {
    pub valid: bool,
    pub message: String,
}

/// Validate an ISBN-13 string.
///
/// Always 200: an invalid code is a normal answer, not an error.
#[utoipa::path(
    get,
    path = "/isbn/validate",
    tag = "isbn",
    params(ValidateIsbnQuery),
    responses(
        (status = 200, description = "Classification result", body = ValidateIsbnResponse)
    )
)]
pub async fn validate_isbn(Query(query): Query<ValidateIsbnQuery>) -> Json<ValidateIsbnResponse> {
    let outcome = isbn::validate_format(query.isbn.as_deref());
    Json(ValidateIsbnResponse {
        valid: outcome.valid,
        message: outcome.message,
    })
}
