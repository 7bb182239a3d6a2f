//! # crossdesk-db
//!
//! PostgreSQL connection pool initialization.

use std::env;

/// Initializes the PostgreSQL connection pool from `DATABASE_URL`.
///
/// Called once at startup; the pool is cheaply cloneable and lives in the
/// application state.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is unset or the connection cannot be
/// established — there is nothing to serve without a database.
pub async fn init_db_pool() -> sqlx::PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    sqlx::PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

pub use sqlx::PgPool;
