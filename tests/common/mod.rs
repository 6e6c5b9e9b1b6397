#![allow(dead_code)]

use rest_facade::prelude::*;
use serde_json::json;

/// Handler shape used by the integration tests: takes the captured member
/// id, returns a domain outcome.
pub type Handler = fn(Option<&str>) -> Outcome;

pub fn member_key() -> ResourceKey {
    ResourceKey::new("member").unwrap()
}

pub fn api_v1() -> RouteNamespace {
    RouteNamespace::new("api", "v1").unwrap()
}

pub fn list_members(_id: Option<&str>) -> Outcome {
    Outcome::Success(json!([
        { "id": 1, "name": "Ada" },
        { "id": 2, "name": "Grace" }
    ]))
}

pub fn show_member(id: Option<&str>) -> Outcome {
    match id {
        Some("1") => Outcome::Success(json!({ "id": 1, "name": "Ada" })),
        _ => Outcome::NotFound,
    }
}

pub fn create_member(_id: Option<&str>) -> Outcome {
    Outcome::Created(json!({ "id": 3, "name": "Edsger" }))
}

pub fn create_member_invalid(_id: Option<&str>) -> Outcome {
    let mut errors = FieldErrors::new();
    errors.push("email", "is invalid");
    Outcome::ValidationFailure(errors)
}

pub fn destroy_member(_id: Option<&str>) -> Outcome {
    Outcome::no_content(None).unwrap()
}

pub fn show_brand(_id: Option<&str>) -> Outcome {
    Outcome::Success(json!({ "id": 7, "name": "acme" }))
}

/// A frozen table with a full-capability `member` resource and a show-only
/// `brand` resource under `/api/v1`.
pub fn sample_router() -> ApiRouter<Handler> {
    let mut router = ApiRouter::new();
    router
        .register(
            api_v1(),
            "member",
            Capability::new()
                .index(list_members as Handler)
                .show(show_member)
                .create(create_member)
                .destroy(destroy_member),
        )
        .unwrap();
    router
        .register(api_v1(), "brand", Capability::new().show(show_brand as Handler))
        .unwrap();
    router.freeze();
    router
}
