// src/application/state.rs

use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::repositories::{SqliteCoffeeRepository, SqliteOrderItemRepository, SqliteOrderRepository};
use crate::services::{CoffeeService, OrderService};

/// Shared state handed to every HTTP handler.
/// All fields are Arc-wrapped; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub coffee_service: Arc<CoffeeService>,
    pub order_service: Arc<OrderService>,
}

impl AppState {
    pub fn new(coffee_service: Arc<CoffeeService>, order_service: Arc<OrderService>) -> Self {
        Self {
            coffee_service,
            order_service,
        }
    }

    /// Wire the SQLite repositories and services over one pool
    pub fn from_pool(pool: Arc<ConnectionPool>) -> Self {
        let coffee_repo = Arc::new(SqliteCoffeeRepository::new(pool.clone()));
        let order_repo = Arc::new(SqliteOrderRepository::new(pool.clone()));
        let item_repo = Arc::new(SqliteOrderItemRepository::new(pool));

        let coffee_service = Arc::new(CoffeeService::new(coffee_repo.clone()));
        let order_service = Arc::new(OrderService::new(order_repo, item_repo, coffee_repo));

        Self::new(coffee_service, order_service)
    }
}
