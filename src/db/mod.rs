//! Database module: pool bootstrap and schema for persistent storage.
//!
//! Layout:
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `spawn`: connect, enable FK enforcement, run the bundled DDL

pub mod schema;

use crate::error::JobforgeError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

pub use schema::SQLITE_INIT;

pub type SqlitePool = Pool<Sqlite>;

/// Open (creating if missing) the database and initialize the schema.
pub async fn spawn(database_url: &str) -> Result<SqlitePool, JobforgeError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
    init_schema(&pool).await?;
    Ok(pool)
}

/// Initialize the schema by executing the bundled DDL.
async fn init_schema(pool: &SqlitePool) -> Result<(), JobforgeError> {
    // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
