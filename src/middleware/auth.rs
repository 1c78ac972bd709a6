use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, StatusCode, request::Parts};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use subtle::ConstantTimeEq;

use crate::router::JobforgeState;

/// Ensure the inbound request carries the shared key.
/// Accepts either:
/// - Header: `x-api-key: ...`
/// - Header: `Authorization: Bearer <key>`
pub fn ensure_authorized(headers: &HeaderMap, expected: &str) -> Result<(), Response> {
    if let Some(hv) = headers.get("x-api-key").and_then(|v| v.to_str().ok())
        && bool::from(hv.as_bytes().ct_eq(expected.as_bytes()))
    {
        return Ok(());
    }

    if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        let auth = auth.trim();
        if let Some(token) = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            && bool::from(token.as_bytes().ct_eq(expected.as_bytes()))
        {
            return Ok(());
        }
    }

    Err((
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": {"code": "UNAUTHORIZED", "message": "invalid or missing key"}})),
    )
        .into_response())
}

/// The authenticated caller. Token issuing and permission scopes belong
/// to an outer gateway; this extractor only checks the shared key and
/// reads the caller email it forwards in `x-user-email`.
#[derive(Debug, Clone)]
pub struct Identity {
    pub email: String,
}

impl FromRequestParts<JobforgeState> for Identity {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &JobforgeState,
    ) -> Result<Self, Self::Rejection> {
        ensure_authorized(&parts.headers, state.api_key())?;

        let email = parts
            .headers
            .get("x-user-email")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .ok_or_else(|| {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": {"code": "BAD_REQUEST", "message": "missing x-user-email header"}
                    })),
                )
                    .into_response()
            })?;

        Ok(Self { email })
    }
}
