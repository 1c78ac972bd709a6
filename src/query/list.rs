use crate::db::SqlitePool;
use crate::error::JobforgeError;
use crate::query::search::{SqlFragment, search_clause};
use crate::query::sort::sort_clause;
use crate::query::table::TableSpec;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Sqlite};

/// Standard listing parameters shared by every resource. `all` and
/// `user` are visibility filters interpreted by the handlers; the rest
/// drive the generic search/sort/paginate pipeline.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub all: Option<bool>,
    pub user: Option<bool>,
    pub search: Option<String>,
    pub sort_field: Option<String>,
    pub sort_ascending: Option<bool>,
    pub start: Option<i64>,
    pub limit: Option<i64>,
}

/// `total` counts the matching rows before pagination is applied.
/// `start`/`limit` echo the applied window: both present or both absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub total: i64,
    pub start: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ListPage<T> {
    pub results: Vec<T>,
    pub pagination: Pagination,
}

/// Run a filtered, sorted, paginated listing over `table`, decoding each
/// row into `T`. `filters` are handler-supplied predicates ANDed in front
/// of the free-text search clause.
pub async fn list_instances<T>(
    pool: &SqlitePool,
    table: &TableSpec,
    filters: &[SqlFragment],
    params: &ListParams,
) -> Result<ListPage<T>, JobforgeError>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    let (count_sql, select_sql, binds, window) = build_list_sql(table, filters, params)?;

    let mut count_query = sqlx::query_scalar::<Sqlite, i64>(&count_sql);
    for bind in &binds {
        count_query = count_query.bind(bind);
    }
    let total = count_query.fetch_one(pool).await?;

    let mut select_query = sqlx::query_as::<Sqlite, T>(&select_sql);
    for bind in &binds {
        select_query = select_query.bind(bind);
    }
    if let Some((start, limit)) = window {
        select_query = select_query.bind(limit).bind(start);
    }
    let results = select_query.fetch_all(pool).await?;

    Ok(ListPage {
        results,
        pagination: Pagination {
            total,
            start: window.map(|w| w.0),
            limit: window.map(|w| w.1),
        },
    })
}

type ListSql = (String, String, Vec<String>, Option<(i64, i64)>);

/// Assemble the count and select statements plus their shared bind
/// values. The pagination window is returned separately so its integer
/// binds go only on the select.
fn build_list_sql(
    table: &TableSpec,
    filters: &[SqlFragment],
    params: &ListParams,
) -> Result<ListSql, JobforgeError> {
    let mut where_parts: Vec<String> = Vec::new();
    let mut binds: Vec<String> = Vec::new();

    for filter in filters {
        where_parts.push(filter.sql.clone());
        binds.extend(filter.binds.iter().cloned());
    }
    if let Some(search) = params.search.as_deref() {
        let clause = search_clause(search, table.searchable);
        where_parts.push(clause.sql);
        binds.extend(clause.binds);
    }

    let where_sql = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };

    let order_sql = match params.sort_field.as_deref() {
        Some(field) => sort_clause(field, table.sortable, params.sort_ascending.unwrap_or(true))?,
        // keep listings deterministic when no sort is requested
        None => "id ASC".to_string(),
    };

    let window = match (params.start, params.limit) {
        (Some(start), Some(limit)) => {
            if start < 0 {
                return Err(JobforgeError::BadRequest(
                    "start must be non-negative".to_string(),
                ));
            }
            if limit <= 0 {
                return Err(JobforgeError::BadRequest(
                    "limit must be positive".to_string(),
                ));
            }
            Some((start, limit))
        }
        _ => None,
    };

    let count_sql = format!("SELECT COUNT(*) FROM {}{}", table.name, where_sql);
    let mut select_sql = format!(
        "SELECT * FROM {}{} ORDER BY {}",
        table.name, where_sql, order_sql
    );
    if window.is_some() {
        select_sql.push_str(" LIMIT ? OFFSET ?");
    }

    Ok((count_sql, select_sql, binds, window))
}
