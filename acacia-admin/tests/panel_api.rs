//! End-to-end tests for the admin panel API
//!
//! Drives the real router through tower's `oneshot`, with principals
//! injected into request extensions the way the host auth middleware
//! would.

use acacia_admin::prelude::*;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    panel_router(&AppState::default())
}

fn admin() -> Principal {
    Principal::new("admin@example.com").with_role("admin")
}

fn viewer() -> Principal {
    Principal::new("viewer@example.com")
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    principal: Option<Principal>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(principal) = principal {
        builder = builder.extension(principal);
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn store_then_show_round_trips_sanitized_fields() {
    let app = app();

    let (status, created) = send(
        &app,
        "POST",
        "/acacia/menus",
        Some(viewer()),
        Some(json!({"title": "Dashboard", "icon": "home", "sort_order": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["status"], "success");
    assert_eq!(created["message"], "Record created successfully");

    let id = created["payload"]["id"].as_i64().expect("assigned id");
    let (status, shown) = send(
        &app,
        "GET",
        &format!("/acacia/menus/{id}"),
        Some(viewer()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shown["message"], "Single record fetched");
    assert_eq!(shown["payload"]["title"], "Dashboard");
    assert_eq!(shown["payload"]["icon"], "home");
    assert_eq!(shown["payload"]["sort_order"], 2);
}

#[tokio::test]
async fn store_schematic_assigns_id_and_echoes_table_name() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/acacia/schematics",
        Some(admin()),
        Some(json!({"table_name": "orders"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Record created successfully");
    assert_eq!(body["payload"]["table_name"], "orders");
    assert_eq!(body["payload"]["id"], 1);
}

#[tokio::test]
async fn partial_update_leaves_omitted_fields_unchanged_and_is_idempotent() {
    let app = app();

    let (_, created) = send(
        &app,
        "POST",
        "/acacia/menus",
        Some(viewer()),
        Some(json!({"title": "Dashboard", "icon": "home"})),
    )
    .await;
    let id = created["payload"]["id"].as_i64().expect("id");

    let patch = json!({"sort_order": 5});
    let (status, first) = send(
        &app,
        "PUT",
        &format!("/acacia/menus/{id}"),
        Some(viewer()),
        Some(patch.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["message"], "Record updated successfully");
    assert_eq!(first["payload"]["title"], "Dashboard");
    assert_eq!(first["payload"]["icon"], "home");
    assert_eq!(first["payload"]["sort_order"], 5);

    let (_, second) = send(
        &app,
        "PATCH",
        &format!("/acacia/menus/{id}"),
        Some(viewer()),
        Some(patch),
    )
    .await;
    assert_eq!(second["payload"]["title"], first["payload"]["title"]);
    assert_eq!(second["payload"]["icon"], first["payload"]["icon"]);
    assert_eq!(second["payload"]["sort_order"], first["payload"]["sort_order"]);
}

#[tokio::test]
async fn update_with_explicit_null_clears_nullable_field() {
    let app = app();

    let (_, created) = send(
        &app,
        "POST",
        "/acacia/menus",
        Some(viewer()),
        Some(json!({"title": "Dashboard", "icon": "home"})),
    )
    .await;
    let id = created["payload"]["id"].as_i64().expect("id");

    let (status, updated) = send(
        &app,
        "PATCH",
        &format!("/acacia/menus/{id}"),
        Some(viewer()),
        Some(json!({"icon": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["payload"]["icon"], Value::Null);
    assert_eq!(updated["payload"]["title"], "Dashboard");
}

#[tokio::test]
async fn destroy_then_show_signals_not_found() {
    let app = app();

    let (_, created) = send(
        &app,
        "POST",
        "/acacia/menus",
        Some(viewer()),
        Some(json!({"title": "Dashboard"})),
    )
    .await;
    let id = created["payload"]["id"].as_i64().expect("id");

    let (status, deleted) = send(
        &app,
        "DELETE",
        &format!("/acacia/menus/{id}"),
        Some(viewer()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "Record deleted successfully");
    assert_eq!(deleted["payload"]["title"], "Dashboard");

    let (status, missing) = send(
        &app,
        "GET",
        &format!("/acacia/menus/{id}"),
        Some(viewer()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["status"], "failed");
    assert_eq!(missing["code"], 404);
    assert_eq!(missing["message"], format!("Menu not found: {id}"));
}

#[tokio::test]
async fn validation_failure_precedes_any_repository_call() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/acacia/schematics",
        Some(admin()),
        Some(json!({"table_name": "orders", "generated_at": "not-a-date"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], "failed");
    assert_eq!(body["code"], 422);
    assert!(body["message"]
        .as_str()
        .expect("message")
        .contains("generated_at must be a date"));

    // Nothing was persisted
    let (_, listed) = send(&app, "GET", "/acacia/schematics", Some(admin()), None).await;
    assert_eq!(listed["payload"], json!([]));
}

#[tokio::test]
async fn missing_required_field_is_reported_per_field() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/acacia/relationships",
        Some(viewer()),
        Some(json!({"relation_type": "has_many"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["message"]
        .as_str()
        .expect("message")
        .contains("schematic_id is required"));
}

#[tokio::test]
async fn dt_returns_requested_page_with_total_count() {
    let app = app();

    for title in ["a", "b", "c", "d", "e"] {
        let (status, _) = send(
            &app,
            "POST",
            "/acacia/menus",
            Some(viewer()),
            Some(json!({"title": title})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, page) = send(
        &app,
        "GET",
        "/acacia/menus/dt?page=1&per_page=2",
        Some(viewer()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // The page is returned directly, not enveloped
    assert!(page.get("status").is_none());
    assert_eq!(page["data"].as_array().expect("rows").len(), 2);
    assert_eq!(page["pagination"]["total"], 5);
    assert_eq!(page["pagination"]["per_page"], 2);
    assert_eq!(page["pagination"]["total_pages"], 3);
    assert_eq!(page["pagination"]["has_next"], true);
}

#[tokio::test]
async fn dt_honors_sort_and_search_parameters() {
    let app = app();

    for title in ["banana", "apple", "cherry"] {
        send(
            &app,
            "POST",
            "/acacia/menus",
            Some(viewer()),
            Some(json!({"title": title})),
        )
        .await;
    }

    let (_, sorted) = send(
        &app,
        "GET",
        "/acacia/menus/dt?sort=title&order=desc",
        Some(viewer()),
        None,
    )
    .await;
    let titles: Vec<&str> = sorted["data"]
        .as_array()
        .expect("rows")
        .iter()
        .map(|row| row["title"].as_str().expect("title"))
        .collect();
    assert_eq!(titles, vec!["cherry", "banana", "apple"]);

    let (_, searched) = send(
        &app,
        "GET",
        "/acacia/menus/dt?search=APP",
        Some(viewer()),
        None,
    )
    .await;
    assert_eq!(searched["data"].as_array().expect("rows").len(), 1);
    assert_eq!(searched["data"][0]["title"], "apple");
}

#[tokio::test]
async fn denied_update_never_reaches_the_repository() {
    let app = app();

    let (_, created) = send(
        &app,
        "POST",
        "/acacia/schematics",
        Some(admin()),
        Some(json!({"table_name": "orders"})),
    )
    .await;
    let id = created["payload"]["id"].as_i64().expect("id");

    // A viewer may read schematics but not mutate them
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/acacia/schematics/{id}"),
        Some(viewer()),
        Some(json!({"table_name": "changed"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["status"], "failed");
    assert_eq!(body["code"], 403);
    assert_eq!(body["message"], "This action is unauthorized.");

    let (_, shown) = send(
        &app,
        "GET",
        &format!("/acacia/schematics/{id}"),
        Some(viewer()),
        None,
    )
    .await;
    assert_eq!(shown["payload"]["table_name"], "orders");
}

#[tokio::test]
async fn anonymous_requests_fail_closed() {
    let app = app();

    let (status, body) = send(&app, "GET", "/acacia/menus", None, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["status"], "failed");
    assert_eq!(body["message"], "This action is unauthorized.");
}

#[tokio::test]
async fn index_wraps_collection_in_success_envelope() {
    let app = app();

    send(
        &app,
        "POST",
        "/acacia/menus",
        Some(viewer()),
        Some(json!({"title": "Dashboard"})),
    )
    .await;

    let (status, body) = send(&app, "GET", "/acacia/menus", Some(viewer()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "List of Menus");
    assert_eq!(body["payload"].as_array().expect("list").len(), 1);
}

#[tokio::test]
async fn update_of_unknown_record_is_not_found() {
    let app = app();

    let (status, body) = send(
        &app,
        "PUT",
        "/acacia/relationships/41",
        Some(viewer()),
        Some(json!({"relation_type": "belongs_to"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Relationship not found: 41");
}

#[tokio::test]
async fn route_prefix_is_configurable() {
    let mut config = Config::default();
    config.panel.route_prefix = "panel".to_string();
    let state = AppState::new(config);
    let app = panel_router(&state);

    let (status, body) = send(&app, "GET", "/panel/menus", Some(viewer()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "List of Menus");

    let (status, _) = send(&app, "GET", "/acacia/menus", Some(viewer()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn relationship_crud_round_trip() {
    let app = app();

    let (status, created) = send(
        &app,
        "POST",
        "/acacia/relationships",
        Some(viewer()),
        Some(json!({
            "schematic_id": 1,
            "relation_type": "has_many",
            "method_name": "orders"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["payload"]["id"].as_i64().expect("id");
    assert_eq!(created["payload"]["relation_type"], "has_many");

    let (_, updated) = send(
        &app,
        "PATCH",
        &format!("/acacia/relationships/{id}"),
        Some(viewer()),
        Some(json!({"relation_type": "belongs_to", "method_name": null})),
    )
    .await;
    assert_eq!(updated["payload"]["relation_type"], "belongs_to");
    assert_eq!(updated["payload"]["method_name"], Value::Null);
    assert_eq!(updated["payload"]["schematic_id"], 1);
}
