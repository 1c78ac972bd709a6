use crate::error::JobforgeError;

/// Build an order-by expression for `sort_field`, validated against the
/// resource's allow-list. An unknown field fails with a client error
/// whose message enumerates the valid names.
pub fn sort_clause(
    sort_field: &str,
    sortable_columns: &'static [&'static str],
    ascending: bool,
) -> Result<String, JobforgeError> {
    if !sortable_columns.contains(&sort_field) {
        return Err(JobforgeError::InvalidSortField {
            requested: sort_field.to_string(),
            valid: sortable_columns,
        });
    }
    let direction = if ascending { "ASC" } else { "DESC" };
    Ok(format!("{sort_field} {direction}"))
}
