use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use tracing::info;

use crate::error::JobforgeError;
use crate::middleware::auth::Identity;
use crate::query::{SqlFragment, fetch_instance, list_instances, with_fk_translation};
use crate::query::{ListPage, ListParams};
use crate::router::JobforgeState;
use crate::service::render::inject_sbatch_params;
use crate::types::application::{APPLICATIONS, ApplicationResponse};
use crate::types::job_script::{JOB_SCRIPTS, JobScriptCreate, JobScriptResponse, JobScriptUpdate};

/// POST /job-scripts -> renders a new job script from the source
/// application's stored file.
pub async fn create_job_script(
    State(state): State<JobforgeState>,
    identity: Identity,
    Json(payload): Json<JobScriptCreate>,
) -> Result<(StatusCode, Json<JobScriptResponse>), JobforgeError> {
    let application = fetch_instance::<ApplicationResponse>(
        state.pool(),
        &APPLICATIONS,
        payload.application_id,
    )
    .await?;

    let data = inject_sbatch_params(&application.application_file, &payload.sbatch_params);

    let now = Utc::now();
    let result = sqlx::query(
        r#"INSERT INTO job_scripts (
            job_script_name, job_script_description, job_script_data_as_string,
            job_script_owner_email, application_id, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&payload.job_script_name)
    .bind(&payload.job_script_description)
    .bind(&data)
    .bind(&identity.email)
    .bind(application.id)
    .bind(now)
    .bind(now)
    .execute(state.pool())
    .await?;

    let job_script =
        fetch_instance::<JobScriptResponse>(state.pool(), &JOB_SCRIPTS, result.last_insert_rowid())
            .await?;
    info!(id = job_script.id, application_id = application.id, "created job script");
    Ok((StatusCode::CREATED, Json(job_script)))
}

/// GET /job-scripts -> lists the caller's job scripts; `all=true` lists
/// everyone's.
pub async fn list_job_scripts(
    State(state): State<JobforgeState>,
    identity: Identity,
    Query(params): Query<ListParams>,
) -> Result<Json<ListPage<JobScriptResponse>>, JobforgeError> {
    let mut filters = Vec::new();
    if params.user.unwrap_or(false) || !params.all.unwrap_or(false) {
        filters.push(SqlFragment::new(
            "job_script_owner_email = ?",
            vec![identity.email.clone()],
        ));
    }

    let page = list_instances(state.pool(), &JOB_SCRIPTS, &filters, &params).await?;
    Ok(Json(page))
}

/// GET /job-scripts/{id}
pub async fn get_job_script(
    State(state): State<JobforgeState>,
    _identity: Identity,
    Path(id): Path<i64>,
) -> Result<Json<JobScriptResponse>, JobforgeError> {
    let job_script = fetch_instance::<JobScriptResponse>(state.pool(), &JOB_SCRIPTS, id).await?;
    Ok(Json(job_script))
}

/// PUT /job-scripts/{id}
pub async fn update_job_script(
    State(state): State<JobforgeState>,
    _identity: Identity,
    Path(id): Path<i64>,
    Json(payload): Json<JobScriptUpdate>,
) -> Result<(StatusCode, Json<JobScriptResponse>), JobforgeError> {
    let result = sqlx::query(
        r#"UPDATE job_scripts SET
            job_script_name = COALESCE(?, job_script_name),
            job_script_description = COALESCE(?, job_script_description),
            updated_at = ?
          WHERE id = ?"#,
    )
    .bind(&payload.job_script_name)
    .bind(&payload.job_script_description)
    .bind(Utc::now())
    .bind(id)
    .execute(state.pool())
    .await?;

    if result.rows_affected() == 0 {
        return Err(JobforgeError::NotFound {
            table: JOB_SCRIPTS.name,
            id,
        });
    }

    let job_script = fetch_instance::<JobScriptResponse>(state.pool(), &JOB_SCRIPTS, id).await?;
    Ok((StatusCode::CREATED, Json(job_script)))
}

/// DELETE /job-scripts/{id}
pub async fn delete_job_script(
    State(state): State<JobforgeState>,
    _identity: Identity,
    Path(id): Path<i64>,
) -> Result<StatusCode, JobforgeError> {
    fetch_instance::<JobScriptResponse>(state.pool(), &JOB_SCRIPTS, id).await?;

    with_fk_translation(
        sqlx::query("DELETE FROM job_scripts WHERE id = ?")
            .bind(id)
            .execute(state.pool()),
    )
    .await?;

    info!(id, "deleted job script");
    Ok(StatusCode::NO_CONTENT)
}
