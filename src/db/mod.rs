// src/db/mod.rs
//
// Database module
//
// Provides:
// - Connection pooling
// - Schema migrations
// - Seed data

pub mod connection;
pub mod migrations;
pub mod seed;

pub use connection::{create_connection_pool, get_connection, ConnectionPool, PooledConn, IN_MEMORY};

pub use migrations::{
    get_database_stats, initialize_database, verify_database_integrity, DatabaseStats,
};

pub use seed::seed_database;

use crate::error::AppResult;

/// Open (and if needed create) the database: pool, schema, optional seed data.
pub fn open_database(
    database_url: &str,
    max_connections: u32,
    seed: bool,
) -> AppResult<ConnectionPool> {
    let pool = create_connection_pool(database_url, max_connections)?;

    {
        let conn = get_connection(&pool)?;
        initialize_database(&conn)?;
        if seed {
            seed_database(&conn)?;
        }
    }

    Ok(pool)
}
