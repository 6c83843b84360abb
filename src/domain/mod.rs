// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod coffee;
pub mod order;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Coffee Domain
pub use coffee::{validate_coffee, Coffee, Size};

// Order Domain
pub use order::{validate_order, validate_order_item, Order, OrderItem, OrderStatus};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Unknown {kind} '{value}'")]
    UnknownValue { kind: &'static str, value: String },
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

/// Money values carry exactly two decimal places.
pub(crate) fn to_money(value: bigdecimal::BigDecimal) -> bigdecimal::BigDecimal {
    value.with_scale_round(2, bigdecimal::RoundingMode::HalfUp)
}
