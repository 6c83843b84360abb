// src/application/commands/mod.rs
//
// HTTP handlers
//
// RULES:
// - Accept DTOs
// - Call services off the async runtime (SQLite access blocks)
// - Return domain entities as JSON
// - Never contain business logic

pub mod coffee_commands;
pub mod order_commands;

pub use coffee_commands::*;
pub use order_commands::*;

use axum::Json;

use crate::application::dto::HealthResponse;
use crate::application::error_handling::{ApiProblem, ApiResult};
use crate::error::AppResult;

pub async fn healthcheck() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Run a service call on the blocking pool and map its error to a problem
pub(crate) async fn run_blocking<T, F>(correlation_id: Option<String>, call: F) -> ApiResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(call).await {
        Ok(result) => result.map_err(|error| ApiProblem::from_app_error(error, correlation_id)),
        Err(join_error) => {
            tracing::error!(error = %join_error, "service task failed");
            Err(ApiProblem::internal(correlation_id))
        }
    }
}
