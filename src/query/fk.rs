use crate::error::{FkDetail, JobforgeError};
use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::error::ErrorKind;

// Matches the detail line some drivers attach to a referential-integrity
// violation, e.g. `Key (id)=(1) is still referenced from table "job_scripts"`.
static FK_DETAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"Key \(\w+\)=\((?P<pk_id>\d+)\) is still referenced from table "(?P<table>\w+)""#)
        .unwrap()
});

/// Whether the driver reported a referential-integrity violation.
pub fn is_fk_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => matches!(db_err.kind(), ErrorKind::ForeignKeyViolation),
        _ => false,
    }
}

/// Best-effort extraction of the referenced key and referencing table
/// from a driver message. Never fails: an unrecognized message yields
/// empty detail. Backends with structured error codes can bypass this
/// entirely and build the `FkDetail` themselves.
pub fn extract_fk_detail(message: &str) -> FkDetail {
    match FK_DETAIL_RE.captures(message) {
        Some(caps) => FkDetail {
            table: caps.name("table").map(|m| m.as_str().to_string()),
            pk_id: caps.name("pk_id").map(|m| m.as_str().to_string()),
        },
        None => FkDetail::default(),
    }
}

/// Run exactly one delete operation, translating a referential-integrity
/// violation into a structured conflict. Every other error passes through
/// untouched.
pub async fn with_fk_translation<T, F>(op: F) -> Result<T, JobforgeError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match op.await {
        Ok(value) => Ok(value),
        Err(err) if is_fk_violation(&err) => {
            let detail = err
                .as_database_error()
                .map(|db_err| extract_fk_detail(db_err.message()))
                .unwrap_or_default();
            Err(JobforgeError::ForeignKeyConflict(detail))
        }
        Err(err) => Err(err.into()),
    }
}
