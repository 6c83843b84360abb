use super::entity::{Order, OrderItem};
use crate::domain::{DomainError, DomainResult};
use bigdecimal::BigDecimal;

/// Validates all Order invariants
pub fn validate_order(order: &Order) -> DomainResult<()> {
    if order.customer_name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Customer name cannot be empty".to_string(),
        ));
    }
    if order.total_amount < BigDecimal::from(0) {
        return Err(DomainError::InvariantViolation(format!(
            "Order total {} cannot be negative",
            order.total_amount
        )));
    }
    Ok(())
}

/// Validates all OrderItem invariants
pub fn validate_order_item(item: &OrderItem) -> DomainResult<()> {
    if item.quantity <= 0 {
        return Err(DomainError::InvariantViolation(format!(
            "Quantity must be positive, got {}",
            item.quantity
        )));
    }
    if item.unit_price < BigDecimal::from(0) {
        return Err(DomainError::InvariantViolation(format!(
            "Unit price {} cannot be negative",
            item.unit_price
        )));
    }
    Ok(())
}

/// Order invariants:
///
/// 1. An order belongs to one customer (id + display name)
/// 2. Total is fixed when the order is placed; later price changes do not touch it
/// 3. Items reference an existing order and coffee (enforced by foreign keys)
/// 4. Deleting an order deletes its items
