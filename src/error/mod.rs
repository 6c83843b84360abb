// src/error/mod.rs
//
// Application-level error types

pub mod types;

pub use types::{AppError, AppResult};
