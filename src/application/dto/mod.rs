// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// PRINCIPLES:
// - Request bodies and query strings only; responses reuse the domain entities
// - JSON field names are camelCase
// - Conversion TO service requests happens here

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{OrderStatus, Size};
use crate::services::{CoffeeRequest, CreateOrderRequest, OrderLineRequest};

// ============================================================================
// COFFEE DTOs
// ============================================================================

/// Body of `POST /api/coffees` and `PUT /api/coffees/{id}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoffeeDto {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: BigDecimal,
    pub size: Size,
}

impl From<CoffeeDto> for CoffeeRequest {
    fn from(dto: CoffeeDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            price: dto.price,
            size: dto.size,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub pattern: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    pub size: Size,
    pub min_price: BigDecimal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffordableQuery {
    pub size: Size,
    pub max_price: BigDecimal,
}

// ============================================================================
// ORDER DTOs
// ============================================================================

/// Body of `POST /api/orders`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub customer_id: i64,
    pub customer_name: String,
    pub items: Vec<OrderItemDto>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub coffee_id: i64,
    pub quantity: i32,
}

impl From<OrderDto> for CreateOrderRequest {
    fn from(dto: OrderDto) -> Self {
        Self {
            customer_id: dto.customer_id,
            customer_name: dto.customer_name,
            items: dto
                .items
                .into_iter()
                .map(|item| OrderLineRequest {
                    coffee_id: item.coffee_id,
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}

/// `?status=PENDING&since=2024-01-01T00:00:00`
#[derive(Debug, Clone, Deserialize)]
pub struct RecentOrdersQuery {
    pub status: OrderStatus,
    pub since: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ByCoffeeQuery {
    pub coffee_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusQuery {
    pub status: OrderStatus,
}

// ============================================================================
// MISC
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
