// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod coffee_service;
pub mod order_service;

pub use coffee_service::{CoffeeRequest, CoffeeService};

pub use order_service::{CreateOrderRequest, OrderLineRequest, OrderService, OrderWithItems};
