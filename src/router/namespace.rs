//! Versioned namespace prefixes.

use crate::error::FacadeError;
use regex::Regex;
use serde_json::json;
use std::fmt;
use std::sync::LazyLock;

/// Compiled regex for path segment validation.
static SEGMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9_-]*$").unwrap());

/// An ordered pair of path prefix segments, e.g. `("api", "v1")`.
///
/// Fixed at configuration time and immutable thereafter. Equality is by
/// value, so two namespaces constructed independently from equal segments
/// are the same namespace and share one route table entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteNamespace {
    namespace: String,
    version: String,
}

impl RouteNamespace {
    /// Validates and builds a namespace from its two segments.
    ///
    /// # Errors
    ///
    /// Returns [`FacadeError::Configuration`] when a segment is empty or
    /// contains characters outside `[a-z0-9_-]`.
    pub fn new(namespace: impl Into<String>, version: impl Into<String>) -> Result<Self, FacadeError> {
        let namespace = namespace.into();
        let version = version.into();
        for segment in [&namespace, &version] {
            if !SEGMENT_REGEX.is_match(segment) {
                return Err(FacadeError::configuration(
                    "Namespace segment must match ^[a-z0-9][a-z0-9_-]*$",
                    json!({ "segment": segment }),
                ));
            }
        }
        Ok(Self { namespace, version })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// The URL prefix this namespace matches, e.g. `/api/v1`.
    pub fn prefix(&self) -> String {
        format!("/{}/{}", self.namespace, self.version)
    }
}

impl fmt::Display for RouteNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.version)
    }
}

/// Validates a resource name against the same segment rules.
pub(crate) fn validate_segment(segment: &str) -> Result<(), FacadeError> {
    if !SEGMENT_REGEX.is_match(segment) {
        return Err(FacadeError::configuration(
            "Resource segment must match ^[a-z0-9][a-z0-9_-]*$",
            json!({ "segment": segment }),
        ));
    }
    Ok(())
}

/// Matches raw path segments without allocating a validated namespace.
pub(crate) fn segment_is_valid(segment: &str) -> bool {
    SEGMENT_REGEX.is_match(segment)
}
