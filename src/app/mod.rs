// src/app/mod.rs
//
// HTTP application wiring: routes and middleware

use axum::{
    http::{HeaderName, Method},
    routing::{get, patch},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::application::commands::{
    affordable_coffees, create_coffee, create_order, delete_coffee, delete_order,
    filter_coffees, get_coffee, get_order, healthcheck, list_coffees, list_orders,
    orders_by_coffee, orders_by_customer, recent_orders, search_coffees, update_coffee,
    update_order_status,
};
use crate::application::error_handling::REQUEST_ID_HEADER;
use crate::application::AppState;

pub fn build_router(state: AppState) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/health", get(healthcheck))
        .route("/api/coffees", get(list_coffees).post(create_coffee))
        .route("/api/coffees/search", get(search_coffees))
        .route("/api/coffees/filter", get(filter_coffees))
        .route("/api/coffees/affordable", get(affordable_coffees))
        .route(
            "/api/coffees/{id}",
            get(get_coffee).put(update_coffee).delete(delete_coffee),
        )
        .route("/api/orders", get(list_orders).post(create_order))
        .route("/api/orders/customer/{customer_name}", get(orders_by_customer))
        .route("/api/orders/recent", get(recent_orders))
        .route("/api/orders/by-coffee", get(orders_by_coffee))
        .route("/api/orders/{id}", get(get_order).delete(delete_order))
        .route("/api/orders/{id}/status", patch(update_order_status))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ]),
        )
        .with_state(state)
}
