// src/application/commands/order_commands.rs
//
// Order handlers (`/api/orders`)

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};

use super::run_blocking;
use crate::application::dto::{ByCoffeeQuery, OrderDto, RecentOrdersQuery, StatusQuery};
use crate::application::error_handling::{request_correlation_id, ApiResult};
use crate::application::extract::{ApiJson, ApiPath, ApiQuery};
use crate::application::state::AppState;
use crate::domain::Order;
use crate::error::AppError;
use crate::services::OrderWithItems;

pub async fn list_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<Order>>> {
    let service = state.order_service.clone();
    let orders =
        run_blocking(request_correlation_id(&headers), move || service.list_orders()).await?;

    Ok(Json(orders))
}

/// Order with its items
pub async fn get_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<OrderWithItems>> {
    let service = state.order_service.clone();
    let order = run_blocking(request_correlation_id(&headers), move || {
        service
            .get_order(id)?
            .ok_or_else(|| AppError::not_found(format!("Order {}", id)))
    })
    .await?;

    Ok(Json(order))
}

/// `GET /api/orders/customer/Alice%20Johnson`
pub async fn orders_by_customer(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(customer_name): ApiPath<String>,
) -> ApiResult<Json<Vec<Order>>> {
    let service = state.order_service.clone();
    let orders = run_blocking(request_correlation_id(&headers), move || {
        service.orders_for_customer(&customer_name)
    })
    .await?;

    Ok(Json(orders))
}

/// `GET /api/orders/recent?status=PENDING&since=2024-01-01T00:00:00`
pub async fn recent_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiQuery(query): ApiQuery<RecentOrdersQuery>,
) -> ApiResult<Json<Vec<Order>>> {
    let service = state.order_service.clone();
    let orders = run_blocking(request_correlation_id(&headers), move || {
        service.recent_orders(query.status, query.since)
    })
    .await?;

    Ok(Json(orders))
}

/// `GET /api/orders/by-coffee?coffeeName=Cappuccino`
pub async fn orders_by_coffee(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiQuery(query): ApiQuery<ByCoffeeQuery>,
) -> ApiResult<Json<Vec<Order>>> {
    let service = state.order_service.clone();
    let orders = run_blocking(request_correlation_id(&headers), move || {
        service.orders_containing(&query.coffee_name)
    })
    .await?;

    Ok(Json(orders))
}

pub async fn create_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(dto): ApiJson<OrderDto>,
) -> ApiResult<(StatusCode, Json<OrderWithItems>)> {
    let service = state.order_service.clone();
    let created = run_blocking(request_correlation_id(&headers), move || {
        service.create_order(dto.into())
    })
    .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// `PATCH /api/orders/{id}/status?status=READY`
pub async fn update_order_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<StatusQuery>,
) -> ApiResult<Json<Order>> {
    let service = state.order_service.clone();
    let updated = run_blocking(request_correlation_id(&headers), move || {
        service.update_status(id, query.status)
    })
    .await?;

    Ok(Json(updated))
}

pub async fn delete_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    let service = state.order_service.clone();
    run_blocking(request_correlation_id(&headers), move || service.delete_order(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}
