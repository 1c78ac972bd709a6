use crate::db::SqlitePool;
use crate::error::JobforgeError;
use crate::query::table::TableSpec;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Sqlite};

/// Fetch a single row from a table by its id and decode it into a
/// response model. Zero rows is a structured not-found error naming the
/// table and id; a decode failure propagates as-is, since it indicates a
/// schema mismatch rather than a user error.
pub async fn fetch_instance<T>(
    pool: &SqlitePool,
    table: &TableSpec,
    id: i64,
) -> Result<T, JobforgeError>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    let sql = format!("SELECT * FROM {} WHERE id = ?", table.name);
    sqlx::query_as::<Sqlite, T>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(JobforgeError::NotFound {
            table: table.name,
            id,
        })
}
