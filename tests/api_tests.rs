//! HTTP endpoint tests

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use order_flow::api::{create_router, AppState};
use order_flow::broadcast::EventBroadcaster;
use order_flow::types::MenuItem;
use order_flow::{JsonlOrderStore, LifecycleConfig, MenuCatalog, OrderEvent};

fn menu() -> MenuCatalog {
    MenuCatalog::new(vec![
        MenuItem {
            id: 1,
            name: "Oolong Tea".to_string(),
            price: 2.4,
            description: None,
            category: "drink".to_string(),
            available: true,
        },
        MenuItem {
            id: 2,
            name: "Seasonal Soup".to_string(),
            price: 6.0,
            description: Some("sold out".to_string()),
            category: "main".to_string(),
            available: false,
        },
    ])
}

fn app() -> (Router, Arc<EventBroadcaster>) {
    let broadcaster = Arc::new(EventBroadcaster::default());
    let state = Arc::new(AppState::new(
        Arc::new(JsonlOrderStore::in_memory()),
        broadcaster.clone(),
        menu(),
        LifecycleConfig::default(),
    ));
    (create_router(state), broadcaster)
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn order_body() -> Value {
    json!({
        "items": [
            {"name": "Beef Noodles", "category": "main", "price": 12.5, "quantity": 2},
            {"name": "Oolong Tea", "category": "drink", "unit_price": 2.4, "quantity": 1}
        ],
        "notes": "no scallions"
    })
}

#[tokio::test]
async fn test_create_and_list_orders() {
    let (app, _) = app();

    let (status, created) = call(&app, Method::POST, "/api/orders", Some(order_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    let order = &created["order"];
    assert_eq!(order["status"], "pending");
    assert_eq!(order["total_amount"], 27.4);
    assert_eq!(order["notes"], "no scallions");
    assert_eq!(order["items"][0]["unit_price"], 12.5);
    assert!(order["created_at"].as_str().unwrap().ends_with('Z'));

    let (status, listed) = call(&app, Method::GET, "/api/orders", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (_, completed) = call(&app, Method::GET, "/api/orders?filter=completed", None).await;
    assert!(completed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_order_is_bad_request() {
    let (app, _) = app();

    let (status, body) = call(&app, Method::POST, "/api/orders", Some(json!({"items": []}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_fractional_quantity_is_bad_request() {
    let (app, _) = app();
    let body = json!({
        "items": [{"name": "Tea", "category": "drink", "price": 2.0, "quantity": 0.5}]
    });

    let (status, body) = call(&app, Method::POST, "/api/orders", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_status_update_and_delete() {
    let (app, broadcaster) = app();
    let mut rx = broadcaster.subscribe();
    let (_, created) = call(&app, Method::POST, "/api/orders", Some(order_body())).await;
    let id = created["order"]["id"].as_u64().unwrap();

    let uri = format!("/api/orders/{id}/status");
    let preparing = Some(json!({"status": "preparing"}));
    let (status, updated) = call(&app, Method::PUT, &uri, preparing).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "preparing");

    let (status, body) = call(&app, Method::PUT, &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, deleted) = call(&app, Method::DELETE, &format!("/api/orders/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["order_id"], id);

    let (status, body) = call(&app, Method::PUT, &uri, Some(json!({"status": "completed"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let names: Vec<&str> = [
        rx.recv().await.unwrap(),
        rx.recv().await.unwrap(),
        rx.recv().await.unwrap(),
    ]
    .iter()
    .map(|msg| msg.event.name())
    .collect();
    assert_eq!(names, vec!["new_order", "order_updated", "order_deleted"]);
}

#[tokio::test]
async fn test_delete_missing_order_is_not_found() {
    let (app, _) = app();

    let (status, body) = call(&app, Method::DELETE, "/api/orders/404", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_non_numeric_order_id_is_json_bad_request() {
    let (app, _) = app();

    let (status, body) = call(&app, Method::DELETE, "/api/orders/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let update = Some(json!({"status": "completed"}));
    let (status, body) = call(&app, Method::PUT, "/api/orders/-1/status", update).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_out_of_range_inputs_are_bad_requests() {
    let (app, _) = app();

    let (status, body) = call(&app, Method::GET, "/api/analytics?date=%2B262142-12-31", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let gold = json!({"items": [
        {"name": "Gold", "category": "main", "price": 5e28, "quantity": 1},
        {"name": "Gold", "category": "main", "price": 5e28, "quantity": 1}
    ]});
    let (status, body) = call(&app, Method::POST, "/api/orders", Some(gold)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_analytics_endpoint() {
    let (app, _) = app();
    let (_, created) = call(&app, Method::POST, "/api/orders", Some(order_body())).await;
    let id = created["order"]["id"].as_u64().unwrap();

    let (status, empty) = call(&app, Method::GET, "/api/analytics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty, json!({"total_orders": 0, "total_revenue": 0.0, "items": []}));

    let uri = format!("/api/orders/{id}/status");
    call(&app, Method::PUT, &uri, Some(json!({"status": "completed"}))).await;

    let uri = "/api/analytics?date=today&category=drink";
    let (status, result) = call(&app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["total_orders"], 1);
    assert_eq!(result["total_revenue"], 27.4);
    assert_eq!(result["items"].as_array().unwrap().len(), 1);
    assert_eq!(result["items"][0]["name"], "Oolong Tea");
    assert_eq!(result["items"][0]["total_price"], 2.4);

    let (status, body) = call(&app, Method::GET, "/api/analytics?date=not-a-date", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_menu_lists_available_items_only() {
    let (app, _) = app();

    let (status, items) = call(&app, Method::GET, "/api/menu", None).await;

    assert_eq!(status, StatusCode::OK);
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Oolong Tea");
}

#[test]
fn test_order_event_wire_names() {
    let event = OrderEvent::OrderDeleted { order_id: 3 };
    assert_eq!(serde_json::to_value(&event).unwrap()["event"], "order_deleted");
}
