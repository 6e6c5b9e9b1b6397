//! # REST Façade
//!
//! A small conformance layer sitting between application handlers and the
//! HTTP transport. It makes a REST style guide's conventions enforceable at
//! runtime instead of aspirational prose.
//!
//! ## Architecture
//!
//! - **Outcome model** ([`outcome`]) - Domain-level request results, prior to
//!   HTTP translation
//! - **Status policy** ([`policy`]) - The fixed outcome-to-status-code table
//! - **Envelope builder** ([`envelope`]) - Success/error JSON body shaping
//! - **Date normalizer** ([`timestamp`]) - Canonical ISO 8601 formatting
//! - **Version router** ([`router`]) - URL-namespace route registration and
//!   resolution over capability slots
//! - **Axum renderer** ([`response`]) - `IntoResponse` glue so handlers
//!   cannot emit a response that skips the policy
//!
//! ## What this crate does not do
//!
//! Authentication, persistence, routing framework internals, template
//! rendering, and business logic are external collaborators. The façade
//! receives an [`outcome::Outcome`] from handler code and returns a status
//! code plus an [`envelope::Envelope`]; the transport performs the socket
//! write and header assignment.
//!
//! ## Quick Start
//!
//! ```ignore
//! let mut router = ApiRouter::new();
//! router.register(
//!     RouteNamespace::new("api", "v1")?,
//!     "member",
//!     Capability::new().index(list_members),
//! )?;
//! router.freeze();
//!
//! let key = ResourceKey::new("member")?;
//! let resolution = router.resolve(&Method::GET, "/api/v1/member")?;
//! let outcome = (resolution.handler)(resolution.id.as_deref());
//! let response = ApiResponse::new(outcome, &key);
//! ```

pub mod envelope;
pub mod error;
pub mod outcome;
pub mod policy;
pub mod response;
pub mod router;
pub mod timestamp;

pub use error::FacadeError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::envelope::{Envelope, ResourceKey, build};
    pub use crate::error::FacadeError;
    pub use crate::outcome::{FieldErrors, Outcome};
    pub use crate::policy::{Status, classify};
    pub use crate::response::ApiResponse;
    pub use crate::router::{Action, ApiRouter, Capability, Resolution, RouteNamespace};
    pub use crate::timestamp::{Granularity, Timestamp, normalize};
}
