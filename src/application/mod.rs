// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - The boundary between HTTP and the services
// - Translates DTOs to service requests and errors to problem documents
// - Owns no business rules

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod extract;
pub mod state;

pub use error_handling::{ApiProblem, ApiResult};
pub use state::AppState;
