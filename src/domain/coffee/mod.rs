pub mod entity;
pub mod invariants;

pub use entity::{Coffee, Size};
pub use invariants::validate_coffee;
