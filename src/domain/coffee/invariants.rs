use super::entity::Coffee;
use crate::domain::{DomainError, DomainResult};
use bigdecimal::BigDecimal;

/// Validates all Coffee invariants
pub fn validate_coffee(coffee: &Coffee) -> DomainResult<()> {
    validate_name(&coffee.name)?;
    validate_price(&coffee.price)?;
    Ok(())
}

/// Name cannot be empty
fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Coffee name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Price cannot be negative
fn validate_price(price: &BigDecimal) -> DomainResult<()> {
    if *price < BigDecimal::from(0) {
        return Err(DomainError::InvariantViolation(format!(
            "Coffee price {} cannot be negative",
            price
        )));
    }
    Ok(())
}
