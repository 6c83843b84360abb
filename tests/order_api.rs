mod common;

use axum::http::StatusCode;
use common::{assert_problem, get, ids, seeded_app, send};
use serde_json::json;

#[tokio::test]
async fn lists_seeded_orders() {
    let (status, orders) = get(seeded_app(), "/api/orders").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&orders), vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn order_is_returned_with_its_items() {
    let (status, body) = get(seeded_app(), "/api/orders/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order"]["customerName"], "Alice Johnson");
    assert_eq!(body["order"]["orderDate"], "2024-01-15T08:30:00");
    assert_eq!(body["order"]["totalAmount"], "13.75");
    assert_eq!(body["order"]["status"], "DELIVERED");
    assert_eq!(body["items"].as_array().map(Vec::len), Some(3));
    assert_eq!(body["items"][2]["unitPrice"], "2.50");
}

#[tokio::test]
async fn unknown_order_is_not_found() {
    let (status, problem) = get(seeded_app(), "/api/orders/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_problem(&problem, 404, "Not found");
}

#[tokio::test]
async fn orders_by_customer_name() {
    let (status, orders) = get(seeded_app(), "/api/orders/customer/Alice%20Johnson").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&orders), vec![1, 3]);
}

#[tokio::test]
async fn recent_orders_by_status() {
    let app = seeded_app();

    let (status, orders) = get(
        app.clone(),
        "/api/orders/recent?status=PENDING&since=2024-01-01T00:00:00",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&orders), vec![3]);

    let (status, problem) = get(app, "/api/orders/recent?status=PENDING&since=yesterday").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_problem(&problem, 400, "Validation failed");
}

#[tokio::test]
async fn orders_by_coffee_name_newest_first() {
    let (status, orders) = get(seeded_app(), "/api/orders/by-coffee?coffeeName=Cappuccino").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&orders), vec![4, 1]);
}

#[tokio::test]
async fn create_order_prices_items_from_the_menu() {
    let app = seeded_app();

    let (status, created) = send(
        app.clone(),
        "POST",
        "/api/orders",
        Some(json!({
            "customerId": 105,
            "customerName": "Erin Green",
            "items": [
                { "coffeeId": 1, "quantity": 2 },
                { "coffeeId": 8, "quantity": 1 }
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["order"]["id"], 6);
    assert_eq!(created["order"]["status"], "PENDING");
    assert_eq!(created["order"]["totalAmount"], "10.75");
    assert_eq!(created["items"][0]["orderId"], 6);
    assert_eq!(created["items"][0]["unitPrice"], "2.50");
    assert_eq!(created["items"][1]["unitPrice"], "5.75");

    let (status, stored) = get(app, "/api/orders/6").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["items"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn order_with_unknown_coffee_is_rejected_without_side_effects() {
    let app = seeded_app();

    let (status, problem) = send(
        app.clone(),
        "POST",
        "/api/orders",
        Some(json!({
            "customerId": 105,
            "customerName": "Erin Green",
            "items": [
                { "coffeeId": 1, "quantity": 1 },
                { "coffeeId": 999, "quantity": 1 }
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_problem(&problem, 400, "Validation failed");
    assert_eq!(problem["detail"], "Coffee not found: 999");

    let (_, orders) = get(app, "/api/orders").await;
    assert_eq!(ids(&orders).len(), 5);
}

#[tokio::test]
async fn update_order_status() {
    let app = seeded_app();

    let (status, updated) = send(app.clone(), "PATCH", "/api/orders/3/status?status=READY", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "READY");
    assert_eq!(updated["totalAmount"], "12.50");
    assert_eq!(updated["orderDate"], "2024-02-01T07:45:00");

    let (status, _) = send(app.clone(), "PATCH", "/api/orders/999/status?status=READY", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, problem) = send(app, "PATCH", "/api/orders/3/status?status=LOST", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_problem(&problem, 400, "Validation failed");
}

#[tokio::test]
async fn delete_order_removes_its_items() {
    let app = seeded_app();

    let (status, _) = send(app.clone(), "DELETE", "/api/orders/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = get(app.clone(), "/api/orders/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, orders) = get(app.clone(), "/api/orders/by-coffee?coffeeName=Cappuccino").await;
    assert_eq!(ids(&orders), vec![4]);

    let (status, _) = send(app, "DELETE", "/api/orders/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
