// src/db/seed.rs
//
// Demo data loading

use rusqlite::Connection;

use crate::error::{AppError, AppResult};

/// Load the embedded data.sql into an empty database.
///
/// Returns `true` when rows were inserted, `false` when the coffee table
/// already had data and seeding was skipped.
pub fn seed_database(conn: &Connection) -> AppResult<bool> {
    let existing: i64 = conn.query_row("SELECT COUNT(*) FROM coffee", [], |row| row.get(0))?;
    if existing > 0 {
        tracing::debug!(existing, "coffee table not empty, skipping seed data");
        return Ok(false);
    }

    conn.execute_batch(include_str!("../../data.sql"))
        .map_err(|e| AppError::Other(format!("Failed to load seed data: {}", e)))?;

    tracing::info!("loaded seed data");
    Ok(true)
}
