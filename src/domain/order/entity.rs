use bigdecimal::BigDecimal;
use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::{to_money, DomainError};

/// A customer order. Line items live in `OrderItem` and reference the order by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Option<i64>,
    pub customer_id: i64,
    pub customer_name: String,

    /// Local wall-clock time the order was placed, second precision
    pub order_date: NaiveDateTime,

    /// Sum of item price * quantity at the time of ordering
    pub total_amount: BigDecimal,

    pub status: OrderStatus,
}

/// Lifecycle of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

/// One line of an order. `unit_price` is the coffee price captured when ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Option<i64>,
    pub order_id: i64,
    pub coffee_id: i64,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

impl Order {
    /// Create an unsaved order placed now
    pub fn new(
        customer_id: i64,
        customer_name: impl Into<String>,
        total_amount: BigDecimal,
        status: OrderStatus,
    ) -> Self {
        Self::placed_at(
            customer_id,
            customer_name,
            Local::now().naive_local(),
            total_amount,
            status,
        )
    }

    /// Create an unsaved order with an explicit order date
    pub fn placed_at(
        customer_id: i64,
        customer_name: impl Into<String>,
        order_date: NaiveDateTime,
        total_amount: BigDecimal,
        status: OrderStatus,
    ) -> Self {
        Self {
            id: None,
            customer_id,
            customer_name: customer_name.into(),
            order_date: order_date.with_nanosecond(0).unwrap_or(order_date),
            total_amount: to_money(total_amount),
            status,
        }
    }

    /// Copy of this order in a different status; identity and totals are preserved
    pub fn with_status(&self, status: OrderStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

impl OrderItem {
    pub fn new(order_id: i64, coffee_id: i64, quantity: i32, unit_price: BigDecimal) -> Self {
        Self {
            id: None,
            order_id,
            coffee_id,
            quantity,
            unit_price: to_money(unit_price),
        }
    }

    /// unit_price * quantity
    pub fn line_total(&self) -> BigDecimal {
        &self.unit_price * &BigDecimal::from(self.quantity)
    }
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "PREPARING" => Ok(OrderStatus::Preparing),
            "READY" => Ok(OrderStatus::Ready),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::UnknownValue {
                kind: "order status",
                value: other.to_string(),
            }),
        }
    }
}
