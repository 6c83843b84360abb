// src/repositories/mod.rs
//
// Repository layer
//
// RULES:
// - Repositories are plain data mappers
// - NO business logic
// - NO cross-repository calls
// - Explicit SQL only
// - Every query method is listed in the module's CONTRACT

pub mod coffee_repository;
pub mod order_item_repository;
pub mod order_repository;
mod sql_types;

pub use coffee_repository::{CoffeeRepository, SqliteCoffeeRepository};
pub use order_item_repository::{OrderItemRepository, SqliteOrderItemRepository};
pub use order_repository::{OrderRepository, SqliteOrderRepository};

use crate::aot::RepositoryContract;

/// Every repository contract the query metadata must cover
pub const CONTRACTS: &[RepositoryContract] = &[
    coffee_repository::CONTRACT,
    order_repository::CONTRACT,
    order_item_repository::CONTRACT,
];
