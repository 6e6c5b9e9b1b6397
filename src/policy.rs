//! The fixed outcome-to-status-code policy table.
//!
//! The match is exhaustive with no wildcard arm, so adding an [`Outcome`]
//! variant without a policy entry is a compile error rather than a runtime
//! gap.

use crate::outcome::Outcome;
use axum::http::StatusCode;

/// A classified HTTP status: numeric code plus canonical reason symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub code: StatusCode,
    pub reason: &'static str,
}

/// Maps a domain outcome to its HTTP status per the fixed policy table.
///
/// Pure and total; no outcome can fail to classify.
///
/// | Outcome variant   | Code | Reason               |
/// |-------------------|------|----------------------|
/// | Success           | 200  | ok                   |
/// | Created           | 201  | created              |
/// | NoContent         | 204  | no_content           |
/// | BadRequest        | 400  | bad_request          |
/// | Unauthorized      | 401  | unauthorized         |
/// | Forbidden         | 403  | forbidden            |
/// | NotFound          | 404  | not_found            |
/// | ValidationFailure | 422  | unprocessable_entity |
pub fn classify(outcome: &Outcome) -> Status {
    let (code, reason) = match outcome {
        Outcome::Success(_) => (StatusCode::OK, "ok"),
        Outcome::Created(_) => (StatusCode::CREATED, "created"),
        Outcome::NoContent => (StatusCode::NO_CONTENT, "no_content"),
        Outcome::BadRequest => (StatusCode::BAD_REQUEST, "bad_request"),
        Outcome::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
        Outcome::Forbidden => (StatusCode::FORBIDDEN, "forbidden"),
        Outcome::NotFound => (StatusCode::NOT_FOUND, "not_found"),
        Outcome::ValidationFailure(_) => (StatusCode::UNPROCESSABLE_ENTITY, "unprocessable_entity"),
    };

    Status { code, reason }
}
