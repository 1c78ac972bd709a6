use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use tracing::info;

use crate::error::JobforgeError;
use crate::middleware::auth::Identity;
use crate::query::{SqlFragment, fetch_instance, list_instances};
use crate::query::{ListPage, ListParams};
use crate::router::JobforgeState;
use crate::types::job_script::{JOB_SCRIPTS, JobScriptResponse};
use crate::types::job_submission::{
    JOB_SUBMISSIONS, JobSubmissionCreate, JobSubmissionResponse, JobSubmissionUpdate,
};

/// POST /job-submissions -> records a submission of an existing job
/// script.
pub async fn create_job_submission(
    State(state): State<JobforgeState>,
    identity: Identity,
    Json(payload): Json<JobSubmissionCreate>,
) -> Result<(StatusCode, Json<JobSubmissionResponse>), JobforgeError> {
    let job_script =
        fetch_instance::<JobScriptResponse>(state.pool(), &JOB_SCRIPTS, payload.job_script_id)
            .await?;

    let now = Utc::now();
    let result = sqlx::query(
        r#"INSERT INTO job_submissions (
            job_submission_name, job_submission_description,
            job_submission_owner_email, job_script_id, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&payload.job_submission_name)
    .bind(&payload.job_submission_description)
    .bind(&identity.email)
    .bind(job_script.id)
    .bind(now)
    .bind(now)
    .execute(state.pool())
    .await?;

    let submission = fetch_instance::<JobSubmissionResponse>(
        state.pool(),
        &JOB_SUBMISSIONS,
        result.last_insert_rowid(),
    )
    .await?;
    info!(id = submission.id, job_script_id = job_script.id, "created job submission");
    Ok((StatusCode::CREATED, Json(submission)))
}

/// GET /job-submissions -> lists the caller's submissions; `all=true`
/// lists everyone's.
pub async fn list_job_submissions(
    State(state): State<JobforgeState>,
    identity: Identity,
    Query(params): Query<ListParams>,
) -> Result<Json<ListPage<JobSubmissionResponse>>, JobforgeError> {
    let mut filters = Vec::new();
    if params.user.unwrap_or(false) || !params.all.unwrap_or(false) {
        filters.push(SqlFragment::new(
            "job_submission_owner_email = ?",
            vec![identity.email.clone()],
        ));
    }

    let page = list_instances(state.pool(), &JOB_SUBMISSIONS, &filters, &params).await?;
    Ok(Json(page))
}

/// GET /job-submissions/{id}
pub async fn get_job_submission(
    State(state): State<JobforgeState>,
    _identity: Identity,
    Path(id): Path<i64>,
) -> Result<Json<JobSubmissionResponse>, JobforgeError> {
    let submission =
        fetch_instance::<JobSubmissionResponse>(state.pool(), &JOB_SUBMISSIONS, id).await?;
    Ok(Json(submission))
}

/// PUT /job-submissions/{id}
pub async fn update_job_submission(
    State(state): State<JobforgeState>,
    _identity: Identity,
    Path(id): Path<i64>,
    Json(payload): Json<JobSubmissionUpdate>,
) -> Result<(StatusCode, Json<JobSubmissionResponse>), JobforgeError> {
    let result = sqlx::query(
        r#"UPDATE job_submissions SET
            job_submission_name = COALESCE(?, job_submission_name),
            job_submission_description = COALESCE(?, job_submission_description),
            slurm_job_id = COALESCE(?, slurm_job_id),
            updated_at = ?
          WHERE id = ?"#,
    )
    .bind(&payload.job_submission_name)
    .bind(&payload.job_submission_description)
    .bind(payload.slurm_job_id)
    .bind(Utc::now())
    .bind(id)
    .execute(state.pool())
    .await?;

    if result.rows_affected() == 0 {
        return Err(JobforgeError::NotFound {
            table: JOB_SUBMISSIONS.name,
            id,
        });
    }

    let submission =
        fetch_instance::<JobSubmissionResponse>(state.pool(), &JOB_SUBMISSIONS, id).await?;
    Ok((StatusCode::CREATED, Json(submission)))
}

/// DELETE /job-submissions/{id}
pub async fn delete_job_submission(
    State(state): State<JobforgeState>,
    _identity: Identity,
    Path(id): Path<i64>,
) -> Result<StatusCode, JobforgeError> {
    fetch_instance::<JobSubmissionResponse>(state.pool(), &JOB_SUBMISSIONS, id).await?;

    sqlx::query("DELETE FROM job_submissions WHERE id = ?")
        .bind(id)
        .execute(state.pool())
        .await?;

    info!(id, "deleted job submission");
    Ok(StatusCode::NO_CONTENT)
}
