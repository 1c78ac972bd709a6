/// A rendered SQL fragment plus the text values to bind into its `?`
/// placeholders, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlFragment {
    pub sql: String,
    pub binds: Vec<String>,
}

impl SqlFragment {
    pub fn new(sql: impl Into<String>, binds: Vec<String>) -> Self {
        Self {
            sql: sql.into(),
            binds,
        }
    }

    /// A fragment with no bind values.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::new(sql, Vec::new())
    }
}

/// Build a free-text search predicate over the given columns.
///
/// `search_terms` is split on whitespace; a row matches when any term
/// case-insensitively substring-matches any one of the columns (OR across
/// the full terms x columns cross product). Zero terms or zero columns
/// produce a predicate that matches nothing.
pub fn search_clause(search_terms: &str, searchable_columns: &[&'static str]) -> SqlFragment {
    let mut predicates = Vec::new();
    let mut binds = Vec::new();
    for column in searchable_columns {
        for term in search_terms.split_whitespace() {
            predicates.push(format!("LOWER({column}) LIKE ?"));
            binds.push(format!("%{}%", term.to_lowercase()));
        }
    }
    if predicates.is_empty() {
        return SqlFragment::raw("1 = 0");
    }
    SqlFragment::new(format!("({})", predicates.join(" OR ")), binds)
}
