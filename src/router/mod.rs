//! URL-namespace route registration and resolution.
//!
//! Versioning is URL-based only (`/api/v1/...`); header-based version
//! negotiation is deliberately not modeled. Resources expose capability
//! slots (index/show/create/update/destroy), each independently optional.

mod capability;
mod namespace;
mod registry;

pub use capability::{Action, Capability};
pub use namespace::RouteNamespace;
pub use registry::{ApiRouter, Resolution};
