//! Wire-level response body shaping.
//!
//! Success payloads are wrapped under a validated resource key
//! (`{ "user": {...} }`); failures carry an `errors` object
//! (`{ "errors": { "email": ["is invalid"] } }`). The two shapes are never
//! mixed in one response.

use crate::error::FacadeError;
use crate::outcome::{FieldErrors, Outcome};
use crate::policy::classify;
use regex::Regex;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use std::sync::LazyLock;

/// Compiled regex for resource key validation.
static RESOURCE_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").unwrap());

/// The JSON key success payloads are wrapped under.
///
/// Validated at construction so that [`build`] is total: a missing or
/// malformed key is a configuration error in the caller, never a runtime
/// failure in the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceKey(String);

impl ResourceKey {
    /// Validates and wraps a resource key.
    ///
    /// # Rules
    ///
    /// - Starts with a lowercase letter
    /// - Contains only lowercase letters, digits, and underscores
    ///
    /// # Errors
    ///
    /// Returns [`FacadeError::Configuration`] when the key violates the rules.
    pub fn new(key: impl Into<String>) -> Result<Self, FacadeError> {
        let key = key.into();
        if !RESOURCE_KEY_REGEX.is_match(&key) {
            return Err(FacadeError::configuration(
                "Resource key must match ^[a-z][a-z0-9_]*$",
                json!({ "key": key }),
            ));
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The top-level JSON structure returned to the client.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// Success body: `{ "<key>": <payload> }`.
    Resource { key: String, payload: Value },
    /// Failure body: `{ "errors": { "<field>": ["msg", ...] } }`.
    Errors(FieldErrors),
    /// A 204 body. Serialized as `null` if forced through serde; the Axum
    /// renderer writes no body at all for this variant.
    Empty,
}

impl Serialize for Envelope {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Envelope::Resource { key, payload } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(key, payload)?;
                map.end()
            }
            Envelope::Errors(errors) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("errors", errors)?;
                map.end()
            }
            Envelope::Empty => serializer.serialize_unit(),
        }
    }
}

/// Shapes an outcome into its wire envelope.
///
/// Total over all outcomes and idempotent: equal inputs always produce
/// structurally equal envelopes.
///
/// # Shaping Rules
///
/// 1. **Success/Created**: payload wrapped under `key`, passed through
///    untouched; nesting inside the payload is the caller's business
/// 2. **ValidationFailure**: field errors in insertion order, never re-sorted
/// 3. **NoContent**: [`Envelope::Empty`]
/// 4. **Unit failures** (400/401/403/404): `{ "errors": { "base": [<reason>] } }`
///    with the policy table's reason symbol, so failure bodies keep the
///    errors shape with a deterministic message
pub fn build(outcome: Outcome, key: &ResourceKey) -> Envelope {
    let status = classify(&outcome);
    match outcome {
        Outcome::Success(payload) | Outcome::Created(payload) => Envelope::Resource {
            key: key.as_str().to_owned(),
            payload,
        },
        Outcome::NoContent => Envelope::Empty,
        Outcome::ValidationFailure(errors) => Envelope::Errors(errors),
        Outcome::BadRequest | Outcome::Unauthorized | Outcome::Forbidden | Outcome::NotFound => {
            let mut errors = FieldErrors::new();
            errors.push("base", status.reason);
            Envelope::Errors(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member_key() -> ResourceKey {
        ResourceKey::new("member").unwrap()
    }

    #[test]
    fn test_resource_key_accepts_snake_case() {
        assert!(ResourceKey::new("member").is_ok());
        assert!(ResourceKey::new("line_item2").is_ok());
    }

    #[test]
    fn test_resource_key_rejects_invalid() {
        for key in ["", "Member", "2fast", "line-item", "line item", "_private"] {
            let result = ResourceKey::new(key);
            assert!(
                matches!(result, Err(FacadeError::Configuration { .. })),
                "key {key:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_build_wraps_success_payload() {
        let envelope = build(Outcome::Success(json!({ "id": 1 })), &member_key());
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "member": { "id": 1 } })
        );
    }

    #[test]
    fn test_build_does_not_restructure_nested_payload() {
        let payload = json!({ "id": 1, "brand": { "id": 7, "name": "acme" } });
        let envelope = build(Outcome::Created(payload.clone()), &member_key());
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "member": payload })
        );
    }

    #[test]
    fn test_build_validation_failure_shape() {
        let mut errors = FieldErrors::new();
        errors.push("email", "is invalid");
        let envelope = build(Outcome::ValidationFailure(errors), &member_key());
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "errors": { "email": ["is invalid"] } })
        );
    }

    #[test]
    fn test_build_no_content_is_empty() {
        assert_eq!(build(Outcome::NoContent, &member_key()), Envelope::Empty);
    }

    #[test]
    fn test_build_unit_failures_use_base_field() {
        let cases = [
            (Outcome::BadRequest, "bad_request"),
            (Outcome::Unauthorized, "unauthorized"),
            (Outcome::Forbidden, "forbidden"),
            (Outcome::NotFound, "not_found"),
        ];
        for (outcome, reason) in cases {
            let envelope = build(outcome, &member_key());
            assert_eq!(
                serde_json::to_value(&envelope).unwrap(),
                json!({ "errors": { "base": [reason] } })
            );
        }
    }

    #[test]
    fn test_build_is_idempotent() {
        let outcome = Outcome::Success(json!({ "id": 42 }));
        let first = build(outcome.clone(), &member_key());
        let second = build(outcome, &member_key());
        assert_eq!(first, second);
    }
}
