// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Explicit connection pooling
// - No hidden connection creation
// - Clear error propagation
// - Thread-safe access

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Database URL selecting a private in-memory database
pub const IN_MEMORY: &str = ":memory:";

/// Create a connection pool
///
/// `database_url` is a file path, or `:memory:` for a database that lives
/// as long as the pool does. Every pooled connection of an in-memory pool
/// shares one database (named shared-cache URI), so writes made through one
/// connection are visible through the others.
///
/// Pool configuration:
/// - Foreign keys enabled (not default in SQLite)
/// - WAL journal for file databases
/// - Busy timeout set to avoid immediate errors
pub fn create_connection_pool(database_url: &str, max_size: u32) -> AppResult<ConnectionPool> {
    let manager = if database_url == IN_MEMORY {
        let uri = format!("file:coffeehouse-{}?mode=memory&cache=shared", Uuid::new_v4());
        SqliteConnectionManager::file(uri).with_init(|conn| {
            conn.execute_batch(
                "PRAGMA foreign_keys = ON;
                 PRAGMA busy_timeout = 5000;",
            )?;
            Ok(())
        })
    } else {
        SqliteConnectionManager::file(database_url).with_init(|conn| {
            conn.execute_batch(
                "PRAGMA foreign_keys = ON;
                 PRAGMA journal_mode = WAL;
                 PRAGMA synchronous = NORMAL;
                 PRAGMA busy_timeout = 5000;",
            )?;
            Ok(())
        })
    };

    let pool = Pool::builder()
        .max_size(max_size.max(1))
        .build(manager)
        .map_err(|e| AppError::Pool(format!("Failed to create connection pool: {}", e)))?;

    Ok(pool)
}

/// Get a connection from the pool
///
/// This is a convenience wrapper that provides better error messages.
pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get()
        .map_err(|e| AppError::Pool(format!("Failed to get database connection: {}", e)))
}
