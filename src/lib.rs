// src/lib.rs
// Coffeehouse - coffee shop data access with query metadata verification
//
// Architecture:
// - Domain: entities and invariants, no I/O
// - Repositories: explicit SQL over SQLite, one CONTRACT table per repository
// - AOT: checks that generated query metadata covers every declared method
// - Services: orchestration and logging
// - Application: HTTP boundary (axum)

pub mod aot;
pub mod app;
pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use app::build_router;
pub use application::AppState;
pub use config::AppConfig;
pub use db::{open_database, ConnectionPool, IN_MEMORY};
pub use domain::{Coffee, Order, OrderItem, OrderStatus, Size};
pub use error::{AppError, AppResult};
pub use repositories::CONTRACTS;
pub use services::{CoffeeService, OrderService, OrderWithItems};
