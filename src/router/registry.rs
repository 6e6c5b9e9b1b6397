//! The route table: registration at startup, immutable resolution after.

use crate::error::FacadeError;
use crate::router::capability::{Action, Capability};
use crate::router::namespace::{self, RouteNamespace};
use axum::http::Method;
use serde_json::json;
use std::collections::HashMap;

/// Table key: one registered resource inside one namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ResourcePath {
    namespace: RouteNamespace,
    resource: String,
}

/// A successful route resolution.
#[derive(Debug)]
pub struct Resolution<'a, H> {
    pub namespace: &'a RouteNamespace,
    pub resource: &'a str,
    pub action: Action,
    /// The captured member id segment, when the path addressed a member.
    pub id: Option<String>,
    pub handler: &'a H,
}

/// Version-namespaced route table over capability slots.
///
/// Registration happens once during application bootstrap, then the table is
/// frozen and treated as immutable; after that point it is safe for
/// unsynchronized concurrent reads. Registration is `&mut self`, so the type
/// system already rules out concurrent mutation; [`ApiRouter::freeze`] rules
/// out late mutation as well.
#[derive(Debug)]
pub struct ApiRouter<H> {
    table: HashMap<ResourcePath, HashMap<Action, H>>,
    frozen: bool,
}

impl<H> ApiRouter<H> {
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
            frozen: false,
        }
    }

    /// Merges a capability's slots into the table entry for
    /// (`namespace`, `resource`).
    ///
    /// A slot that is already occupied is replaced - last registration wins -
    /// and each replacement is logged as a configuration warning, since a
    /// silent override is a likely source of production bugs.
    ///
    /// # Errors
    ///
    /// Returns [`FacadeError::Configuration`] when called after
    /// [`ApiRouter::freeze`], when `resource` is not a valid path segment,
    /// or when `capability` exposes no actions.
    pub fn register(
        &mut self,
        namespace: RouteNamespace,
        resource: &str,
        capability: Capability<H>,
    ) -> Result<(), FacadeError> {
        if self.frozen {
            return Err(FacadeError::configuration(
                "Route registration after freeze",
                json!({ "namespace": namespace.to_string(), "resource": resource }),
            ));
        }

        namespace::validate_segment(resource)?;

        if capability.is_empty() {
            return Err(FacadeError::configuration(
                "Capability exposes no actions",
                json!({ "namespace": namespace.to_string(), "resource": resource }),
            ));
        }

        let namespace_label = namespace.to_string();
        let key = ResourcePath {
            namespace,
            resource: resource.to_owned(),
        };
        let slots = self.table.entry(key).or_default();

        for (action, handler) in capability.into_slots() {
            if slots.insert(action, handler).is_some() {
                tracing::warn!(
                    namespace = %namespace_label,
                    resource,
                    action = action.as_str(),
                    "route registration overrides an existing handler"
                );
            }
        }

        Ok(())
    }

    /// Marks the table read-only before the transport starts accepting
    /// traffic. Idempotent.
    pub fn freeze(&mut self) {
        if self.frozen {
            return;
        }
        self.frozen = true;
        tracing::info!(resources = self.table.len(), "route table frozen");
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Number of registered (namespace, resource) entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Resolves a request path against the table by strict prefix match.
    ///
    /// Paths have the shape `/{namespace}/{version}/{resource}` (collection)
    /// or `/{namespace}/{version}/{resource}/{id}` (member). There is no
    /// header-based version negotiation and no trailing-slash tolerance;
    /// trailing slashes are a transport normalization concern.
    ///
    /// # Method Mapping
    ///
    /// - Collection: `GET` → index, `POST` → create
    /// - Member: `GET` → show, `PUT`/`PATCH` → update, `DELETE` → destroy
    ///
    /// # Errors
    ///
    /// Returns [`FacadeError::RouteNotFound`] when the namespace, resource,
    /// method mapping, or capability slot is missing. The caller converts
    /// this to an `Outcome::NotFound`.
    pub fn resolve(&self, method: &Method, path: &str) -> Result<Resolution<'_, H>, FacadeError> {
        let not_found = || FacadeError::route_not_found(method.as_str(), path);

        let rest = path.strip_prefix('/').ok_or_else(not_found)?;
        let segments: Vec<&str> = rest.split('/').collect();
        let (ns, version, resource, id) = match segments.as_slice() {
            [ns, version, resource] => (*ns, *version, *resource, None),
            [ns, version, resource, id] => (*ns, *version, *resource, Some(*id)),
            _ => return Err(not_found()),
        };

        if !namespace::segment_is_valid(ns)
            || !namespace::segment_is_valid(version)
            || !namespace::segment_is_valid(resource)
            || id.is_some_and(str::is_empty)
        {
            return Err(not_found());
        }

        let action = match (method, id.is_some()) {
            (m, false) if m == Method::GET => Action::Index,
            (m, false) if m == Method::POST => Action::Create,
            (m, true) if m == Method::GET => Action::Show,
            (m, true) if m == Method::PUT || m == Method::PATCH => Action::Update,
            (m, true) if m == Method::DELETE => Action::Destroy,
            _ => return Err(not_found()),
        };

        let key = ResourcePath {
            // Segments already validated above, so construction cannot fail.
            namespace: RouteNamespace::new(ns, version).map_err(|_| not_found())?,
            resource: resource.to_owned(),
        };
        let (entry, slots) = self.table.get_key_value(&key).ok_or_else(not_found)?;
        let handler = slots.get(&action).ok_or_else(not_found)?;

        Ok(Resolution {
            namespace: &entry.namespace,
            resource: &entry.resource,
            action,
            id: id.map(str::to_owned),
            handler,
        })
    }
}

impl<H> Default for ApiRouter<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_v1() -> RouteNamespace {
        RouteNamespace::new("api", "v1").unwrap()
    }

    fn member_router() -> ApiRouter<&'static str> {
        let mut router = ApiRouter::new();
        router
            .register(api_v1(), "member", Capability::new().index("list"))
            .unwrap();
        router
    }

    #[test]
    fn test_resolve_registered_collection_action() {
        let router = member_router();
        let resolution = router.resolve(&Method::GET, "/api/v1/member").unwrap();
        assert_eq!(resolution.namespace, &api_v1());
        assert_eq!(resolution.resource, "member");
        assert_eq!(resolution.action, Action::Index);
        assert_eq!(resolution.id, None);
        assert_eq!(*resolution.handler, "list");
    }

    #[test]
    fn test_resolve_unregistered_capability_is_not_found() {
        let router = member_router();
        let result = router.resolve(&Method::POST, "/api/v1/member");
        assert!(matches!(result, Err(FacadeError::RouteNotFound { .. })));
    }

    #[test]
    fn test_resolve_member_actions() {
        let mut router = ApiRouter::new();
        router
            .register(
                api_v1(),
                "member",
                Capability::new()
                    .show("show")
                    .update("update")
                    .destroy("destroy"),
            )
            .unwrap();

        let show = router.resolve(&Method::GET, "/api/v1/member/42").unwrap();
        assert_eq!(show.action, Action::Show);
        assert_eq!(show.id.as_deref(), Some("42"));

        for method in [Method::PUT, Method::PATCH] {
            let update = router.resolve(&method, "/api/v1/member/42").unwrap();
            assert_eq!(update.action, Action::Update);
        }

        let destroy = router.resolve(&Method::DELETE, "/api/v1/member/42").unwrap();
        assert_eq!(destroy.action, Action::Destroy);
    }

    #[test]
    fn test_resolve_unmapped_method_is_not_found() {
        let router = member_router();
        assert!(router.resolve(&Method::HEAD, "/api/v1/member").is_err());
        assert!(router.resolve(&Method::DELETE, "/api/v1/member").is_err());
        assert!(router.resolve(&Method::POST, "/api/v1/member/42").is_err());
    }

    #[test]
    fn test_resolve_is_strict_about_path_shape() {
        let router = member_router();
        for path in [
            "api/v1/member",
            "/api/v1",
            "/api/v1/member/",
            "/api/v1/member/42/extra",
            "/api//member",
            "/API/v1/member",
        ] {
            assert!(
                matches!(
                    router.resolve(&Method::GET, path),
                    Err(FacadeError::RouteNotFound { .. })
                ),
                "path {path:?} should not resolve"
            );
        }
    }

    #[test]
    fn test_independent_namespaces_do_not_collide() {
        let mut router = ApiRouter::new();
        router
            .register(api_v1(), "member", Capability::new().index("v1"))
            .unwrap();
        router
            .register(
                RouteNamespace::new("api", "v2").unwrap(),
                "member",
                Capability::new().index("v2"),
            )
            .unwrap();

        let v1 = router.resolve(&Method::GET, "/api/v1/member").unwrap();
        let v2 = router.resolve(&Method::GET, "/api/v2/member").unwrap();
        assert_eq!(*v1.handler, "v1");
        assert_eq!(*v2.handler, "v2");
    }

    #[test]
    fn test_duplicate_slot_last_registration_wins() {
        let mut router = ApiRouter::new();
        router
            .register(api_v1(), "member", Capability::new().index("first"))
            .unwrap();
        router
            .register(api_v1(), "member", Capability::new().index("second"))
            .unwrap();

        let resolution = router.resolve(&Method::GET, "/api/v1/member").unwrap();
        assert_eq!(*resolution.handler, "second");
        assert_eq!(router.len(), 1);
    }

    #[test]
    fn test_merge_keeps_existing_slots() {
        let mut router = ApiRouter::new();
        router
            .register(api_v1(), "member", Capability::new().index("list"))
            .unwrap();
        router
            .register(api_v1(), "member", Capability::new().show("show"))
            .unwrap();

        assert!(router.resolve(&Method::GET, "/api/v1/member").is_ok());
        assert!(router.resolve(&Method::GET, "/api/v1/member/1").is_ok());
    }

    #[test]
    fn test_register_empty_capability_is_configuration_error() {
        let mut router: ApiRouter<&'static str> = ApiRouter::new();
        let result = router.register(api_v1(), "member", Capability::new());
        assert!(matches!(result, Err(FacadeError::Configuration { .. })));
    }

    #[test]
    fn test_register_invalid_resource_is_configuration_error() {
        let mut router = ApiRouter::new();
        let result = router.register(api_v1(), "Member!", Capability::new().index("list"));
        assert!(matches!(result, Err(FacadeError::Configuration { .. })));
    }

    #[test]
    fn test_register_after_freeze_fails_fast() {
        let mut router = member_router();
        router.freeze();
        assert!(router.is_frozen());

        let result = router.register(api_v1(), "brand", Capability::new().index("list"));
        assert!(matches!(result, Err(FacadeError::Configuration { .. })));

        // Resolution still works on the frozen table.
        assert!(router.resolve(&Method::GET, "/api/v1/member").is_ok());
    }

    #[test]
    fn test_freeze_is_idempotent() {
        let mut router = member_router();
        router.freeze();
        router.freeze();
        assert!(router.is_frozen());
    }
}
