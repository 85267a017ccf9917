use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::marketplace::marketplace_router;
use crate::marketplace::site::ContactForm;
use crate::marketplace::store::CONTACTS_COLLECTION;

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

#[tokio::test]
async fn listings_route_applies_query_filters() {
    let router = marketplace_router(marketplace(
        MemoryProvider::default(),
        Arc::new(MemoryStore::default()),
    ));

    let response = router
        .oneshot(get("/api/v1/listings?max_price=100000&type=shared"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["count"], 1);
    assert_eq!(payload["headline"], "Showing 1 Matching Listings");
    assert_eq!(payload["matches"][0]["id"], "b2");
    assert_eq!(payload["matches"][0]["type"], "shared");
}

#[tokio::test]
async fn listings_route_tolerates_garbage_numbers() {
    let router = marketplace_router(marketplace(
        MemoryProvider::default(),
        Arc::new(MemoryStore::default()),
    ));

    let response = router
        .oneshot(get("/api/v1/listings?max_price=abc&min_beds=&q="))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["count"], 5);
}

#[tokio::test]
async fn detail_route_formats_price_and_contact() {
    let router = marketplace_router(marketplace(
        MemoryProvider::default(),
        Arc::new(MemoryStore::default()),
    ));

    let response = router
        .clone()
        .oneshot(get("/api/v1/listings/c3"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["price_label"], "₦300,000");
    assert_eq!(payload["contact"]["call_link"], "tel:08012345678");

    let missing = router
        .oneshot(get("/api/v1/listings/zz9"))
        .await
        .expect("route executes");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn session_route_reports_destination_and_delay() {
    let router = marketplace_router(marketplace(
        MemoryProvider::default(),
        Arc::new(MemoryStore::default()),
    ));

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/session/route",
            json!({ "user": { "id": "1", "name": "Test User", "role": "agent" } }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["transition"]["screen"], "AgentDashboard");
    assert_eq!(payload["transition"]["user"]["name"], "Test User");
    assert_eq!(payload["delay_ms"], 1000);
    assert_eq!(payload["loading_message"], "Directing you to your dashboard...");

    let anonymous = router
        .oneshot(json_request("POST", "/api/v1/session/route", json!({})))
        .await
        .expect("route executes");
    let payload = read_json_body(anonymous).await;
    assert_eq!(payload["transition"]["destination"], "login");
    assert!(payload["transition"].get("user").is_none());
}

#[tokio::test]
async fn session_route_accepts_loosely_typed_users() {
    let router = marketplace_router(marketplace(
        MemoryProvider::default(),
        Arc::new(MemoryStore::default()),
    ));

    let cases = [
        (
            json!({ "user": { "id": 1, "name": "Test User", "role": "student" } }),
            "StudentDashboard",
        ),
        (json!({ "user": { "id": "1", "role": "agent" } }), "AgentDashboard"),
        (
            json!({ "user": { "id": "1", "name": "X", "role": null } }),
            "StudentDashboard",
        ),
        (json!({ "user": { "role": "landlord" } }), "StudentDashboard"),
    ];

    for (body, screen) in cases {
        let response = router
            .clone()
            .oneshot(json_request("POST", "/api/v1/session/route", body))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["transition"]["screen"], screen);
    }
}

#[tokio::test]
async fn auth_route_maps_failures_to_statuses() {
    let router = marketplace_router(marketplace(
        MemoryProvider::with_account("ada@agency.ng", "secret123"),
        Arc::new(MemoryStore::default()),
    ));

    let cases = [
        (json!({ "mode": "login", "email": "ada@agency.ng", "password": "wrong-one" }), StatusCode::UNAUTHORIZED),
        (json!({ "mode": "register", "email": "ada@agency.ng", "password": "secret123" }), StatusCode::CONFLICT),
        (json!({ "mode": "register", "email": "new@agency.ng", "password": "123" }), StatusCode::UNPROCESSABLE_ENTITY),
        (json!({ "email": "ada@agency.ng", "password": "secret123" }), StatusCode::OK),
    ];

    for (body, expected) in cases {
        let response = router
            .clone()
            .oneshot(json_request("POST", "/api/v1/agents/auth", body))
            .await
            .expect("route executes");
        assert_eq!(response.status(), expected);
    }
}

#[tokio::test]
async fn registration_response_switches_form_to_login() {
    let router = marketplace_router(marketplace(
        MemoryProvider::default(),
        Arc::new(MemoryStore::default()),
    ));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/agents/auth",
            json!({ "mode": "register", "email": "ada@agency.ng", "password": "secret123" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["outcome"], "registered");
    assert_eq!(payload["form"]["mode"], "login");
    assert_eq!(payload["form"]["notice"]["kind"], "success");
}

#[tokio::test]
async fn property_routes_cover_submit_list_review_delete() {
    let router = marketplace_router(marketplace(
        MemoryProvider::default(),
        Arc::new(MemoryStore::default()),
    ));

    let created = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/agents/agent-1/properties",
            json!({
                "title": "Two-bed flat by the stadium",
                "price": "220000",
                "description": "Borehole water",
                "location": "Stadium Road",
                "bedrooms": "2",
                "property_type": "apartment",
                "image_uri": "https://cdn.example.com/flat.webp",
            }),
        ))
        .await
        .expect("route executes");
    assert_eq!(created.status(), StatusCode::CREATED);
    let payload = read_json_body(created).await;
    let id = payload["submission"]["id"]
        .as_str()
        .expect("submission id")
        .to_string();

    let reviewed = router
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/agents/agent-1/properties/{id}/review"),
            json!({ "status": "approved" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(reviewed.status(), StatusCode::OK);

    let listed = router
        .clone()
        .oneshot(get("/api/v1/agents/agent-1/properties"))
        .await
        .expect("route executes");
    let payload = read_json_body(listed).await;
    assert_eq!(payload["summary"]["approved"], 1);
    assert_eq!(payload["listings"][0]["status_label"], "Approved");

    let deleted = router
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/api/v1/agents/agent-1/properties/{id}"),
            json!({}),
        ))
        .await
        .expect("route executes");
    assert_eq!(deleted.status(), StatusCode::OK);

    let again = router
        .oneshot(json_request(
            "DELETE",
            &format!("/api/v1/agents/agent-1/properties/{id}"),
            json!({}),
        ))
        .await
        .expect("route executes");
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn numeric_price_and_bedrooms_reach_validation() {
    let router = marketplace_router(marketplace(
        MemoryProvider::default(),
        Arc::new(MemoryStore::default()),
    ));

    let draft = |price: Value| {
        json!({
            "title": "Room and parlour",
            "price": price,
            "description": "Close to the shuttle stop",
            "location": "Okpara Square",
            "bedrooms": 3,
            "image_uri": "file:///photos/parlour.png",
        })
    };

    let created = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/agents/agent-7/properties",
            draft(json!(250000)),
        ))
        .await
        .expect("route executes");
    assert_eq!(created.status(), StatusCode::CREATED);
    let payload = read_json_body(created).await;
    assert_eq!(payload["submission"]["price"], 250000);
    assert_eq!(payload["submission"]["bedrooms"], 3);

    let fractional = router
        .oneshot(json_request(
            "POST",
            "/api/v1/agents/agent-7/properties",
            draft(json!(99.5)),
        ))
        .await
        .expect("route executes");
    assert_eq!(fractional.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(fractional).await;
    assert_eq!(payload["error"], "price '99.5' is not a whole naira amount");
}

#[tokio::test]
async fn incomplete_property_is_unprocessable() {
    let router = marketplace_router(marketplace(
        MemoryProvider::default(),
        Arc::new(MemoryStore::default()),
    ));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/agents/agent-1/properties",
            json!({ "title": "No photo", "price": "90000" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["error"],
        "Please fill in all required fields and upload at least one image."
    );
}

#[tokio::test]
async fn contact_handler_writes_to_contacts_collection() {
    let store = Arc::new(MemoryStore::default());
    let service = marketplace(MemoryProvider::default(), store.clone());

    let response = crate::marketplace::router::contact_handler::<MemoryProvider, MemoryStore>(
        State(service),
        axum::Json(ContactForm {
            name: "Ngozi".to_string(),
            email: "ngozi@example.com".to_string(),
            message: "Any hostels under ₦100k?".to_string(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let writes = store.in_collection(CONTACTS_COLLECTION);
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].fields["name"], "Ngozi");
}

#[tokio::test]
async fn contact_handler_returns_internal_error_when_store_is_down() {
    let service = marketplace(MemoryProvider::default(), Arc::new(UnavailableStore));

    let response = crate::marketplace::router::contact_handler::<MemoryProvider, UnavailableStore>(
        State(service),
        axum::Json(ContactForm {
            name: "Ngozi".to_string(),
            email: "ngozi@example.com".to_string(),
            message: "Hello".to_string(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn presets_and_site_search_respond() {
    let router = marketplace_router(marketplace(
        MemoryProvider::default(),
        Arc::new(MemoryStore::default()),
    ));

    let presets = router
        .clone()
        .oneshot(get("/api/v1/listing-filters"))
        .await
        .expect("route executes");
    let payload = read_json_body(presets).await;
    assert_eq!(payload["type"][0]["value"], "all");

    let search = router
        .oneshot(json_request(
            "POST",
            "/api/v1/site/search",
            json!({ "term": "Hostel", "max_price": "50000", "max_distance": "5" }),
        ))
        .await
        .expect("route executes");
    let payload = read_json_body(search).await;
    assert_eq!(payload["term"], "hostel");
    assert_eq!(payload["scroll_to"], "Features");
}
