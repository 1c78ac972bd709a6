use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum JobforgeError {
    #[error("Invalid sorting column requested: {requested}. Must be one of [{}]", .valid.join(", "))]
    InvalidSortField {
        requested: String,
        valid: &'static [&'static str],
    },

    #[error("Could not find {table} instance with id {id}")]
    NotFound { table: &'static str, id: i64 },

    #[error("Could not find {table} instance with identifier {identifier}")]
    NotFoundByIdentifier {
        table: &'static str,
        identifier: String,
    },

    #[error("Delete failed due to foreign-key constraint")]
    ForeignKeyConflict(FkDetail),

    #[error("request body too large")]
    PayloadTooLarge,

    #[error("{0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("Object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Best-effort detail unpacked from a referential-integrity violation.
/// Both fields stay `None` when the driver message carries no usable
/// pattern; the conflict response is still produced either way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FkDetail {
    pub table: Option<String>,
    pub pk_id: Option<String>,
}

impl IntoResponse for JobforgeError {
    fn into_response(self) -> axum::response::Response {
        let message = self.to_string();
        let (status, body) = match self {
            JobforgeError::InvalidSortField { .. } => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "INVALID_SORT_FIELD".to_string(),
                    message,
                    detail: None,
                },
            ),
            JobforgeError::NotFound { .. } | JobforgeError::NotFoundByIdentifier { .. } => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "NOT_FOUND".to_string(),
                    message,
                    detail: None,
                },
            ),
            JobforgeError::ForeignKeyConflict(detail) => (
                StatusCode::CONFLICT,
                ApiErrorBody {
                    code: "CONFLICT".to_string(),
                    message,
                    detail: Some(detail),
                },
            ),
            JobforgeError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ApiErrorBody {
                    code: "PAYLOAD_TOO_LARGE".to_string(),
                    message,
                    detail: None,
                },
            ),
            JobforgeError::BadRequest(_) => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "BAD_REQUEST".to_string(),
                    message,
                    detail: None,
                },
            ),
            JobforgeError::Database(_)
            | JobforgeError::ObjectStore(_)
            | JobforgeError::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                    detail: None,
                },
            ),
        };
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
    #[serde(flatten)]
    pub detail: Option<FkDetail>,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
