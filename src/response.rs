//! Axum integration: one value carrying both the classified status and the
//! built envelope, so a handler cannot emit a body that skips the policy.

use crate::envelope::{build, Envelope, ResourceKey};
use crate::outcome::Outcome;
use crate::policy::{classify, Status};
use axum::{
    response::{IntoResponse, Response},
    Json,
};

/// A fully shaped HTTP response: status per the policy table, body per the
/// envelope rules.
///
/// The transport (axum's `Json`) assigns the `application/json` content type;
/// a 204 is written with no body at all.
#[derive(Debug)]
pub struct ApiResponse {
    status: Status,
    envelope: Envelope,
}

impl ApiResponse {
    /// Classifies the outcome, then builds its envelope.
    pub fn new(outcome: Outcome, key: &ResourceKey) -> Self {
        let status = classify(&outcome);
        let envelope = build(outcome, key);
        Self { status, envelope }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        match self.envelope {
            Envelope::Empty => self.status.code.into_response(),
            envelope => (self.status.code, Json(envelope)).into_response(),
        }
    }
}
