pub mod applications;
pub mod job_scripts;
pub mod job_submissions;

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;

use crate::error::JobforgeError;

pub(crate) fn map_multipart_err(err: MultipartError) -> JobforgeError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        JobforgeError::PayloadTooLarge
    } else {
        JobforgeError::BadRequest(err.body_text())
    }
}
