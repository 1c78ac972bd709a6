use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::error::JobforgeError;
use crate::middleware::auth::Identity;
use crate::query::{SqlFragment, fetch_instance, list_instances, with_fk_translation};
use crate::query::{ListPage, ListParams};
use crate::router::JobforgeState;
use crate::types::application::{
    APPLICATIONS, ApplicationCreate, ApplicationResponse, ApplicationUpdate,
};

use super::map_multipart_err;

/// POST /applications -> creates an application owned by the caller.
pub async fn create_application(
    State(state): State<JobforgeState>,
    identity: Identity,
    Json(payload): Json<ApplicationCreate>,
) -> Result<(StatusCode, Json<ApplicationResponse>), JobforgeError> {
    let now = Utc::now();
    let result = sqlx::query(
        r#"INSERT INTO applications (
            application_name, application_identifier, application_description,
            application_owner_email, application_file, application_config,
            application_uploaded, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, 0, ?, ?)"#,
    )
    .bind(&payload.application_name)
    .bind(&payload.application_identifier)
    .bind(&payload.application_description)
    .bind(&identity.email)
    .bind(&payload.application_file)
    .bind(&payload.application_config)
    .bind(now)
    .bind(now)
    .execute(state.pool())
    .await?;

    let application = fetch_instance::<ApplicationResponse>(
        state.pool(),
        &APPLICATIONS,
        result.last_insert_rowid(),
    )
    .await?;
    info!(id = application.id, owner = %application.application_owner_email, "created application");
    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /applications -> lists applications visible to the caller.
///
/// By default only applications with an identifier are shown; `all=true`
/// lifts that filter and `user=true` restricts to the caller's own rows.
pub async fn list_applications(
    State(state): State<JobforgeState>,
    identity: Identity,
    Query(params): Query<ListParams>,
) -> Result<Json<ListPage<ApplicationResponse>>, JobforgeError> {
    let mut filters = Vec::new();
    if !params.all.unwrap_or(false) {
        filters.push(SqlFragment::raw("application_identifier IS NOT NULL"));
    }
    if params.user.unwrap_or(false) {
        filters.push(SqlFragment::new(
            "application_owner_email = ?",
            vec![identity.email.clone()],
        ));
    }

    let page = list_instances(state.pool(), &APPLICATIONS, &filters, &params).await?;
    Ok(Json(page))
}

/// GET /applications/{id}
pub async fn get_application(
    State(state): State<JobforgeState>,
    _identity: Identity,
    Path(id): Path<i64>,
) -> Result<Json<ApplicationResponse>, JobforgeError> {
    let application = fetch_instance::<ApplicationResponse>(state.pool(), &APPLICATIONS, id).await?;
    Ok(Json(application))
}

/// PUT /applications/{id} -> updates the mutable fields and returns the
/// post-write row.
pub async fn update_application(
    State(state): State<JobforgeState>,
    _identity: Identity,
    Path(id): Path<i64>,
    Json(payload): Json<ApplicationUpdate>,
) -> Result<(StatusCode, Json<ApplicationResponse>), JobforgeError> {
    let result = sqlx::query(
        r#"UPDATE applications SET
            application_name = COALESCE(?, application_name),
            application_identifier = COALESCE(?, application_identifier),
            application_description = COALESCE(?, application_description),
            updated_at = ?
          WHERE id = ?"#,
    )
    .bind(&payload.application_name)
    .bind(&payload.application_identifier)
    .bind(&payload.application_description)
    .bind(Utc::now())
    .bind(id)
    .execute(state.pool())
    .await?;

    if result.rows_affected() == 0 {
        return Err(JobforgeError::NotFound {
            table: APPLICATIONS.name,
            id,
        });
    }

    let application = fetch_instance::<ApplicationResponse>(state.pool(), &APPLICATIONS, id).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// DELETE /applications/{id} -> removes the row and its stored file.
pub async fn delete_application(
    State(state): State<JobforgeState>,
    _identity: Identity,
    Path(id): Path<i64>,
) -> Result<StatusCode, JobforgeError> {
    fetch_instance::<ApplicationResponse>(state.pool(), &APPLICATIONS, id).await?;

    with_fk_translation(
        sqlx::query("DELETE FROM applications WHERE id = ?")
            .bind(id)
            .execute(state.pool()),
    )
    .await?;

    state.files().delete_application_file(id).await?;
    info!(id, "deleted application");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct IdentifierQuery {
    pub identifier: String,
}

/// DELETE /applications?identifier=<identifier>
pub async fn delete_application_by_identifier(
    State(state): State<JobforgeState>,
    _identity: Identity,
    Query(query): Query<IdentifierQuery>,
) -> Result<StatusCode, JobforgeError> {
    let row: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM applications WHERE application_identifier = ?")
            .bind(&query.identifier)
            .fetch_optional(state.pool())
            .await?;
    let (id,) = row.ok_or_else(|| JobforgeError::NotFoundByIdentifier {
        table: APPLICATIONS.name,
        identifier: query.identifier.clone(),
    })?;

    with_fk_translation(
        sqlx::query("DELETE FROM applications WHERE id = ?")
            .bind(id)
            .execute(state.pool()),
    )
    .await?;

    state.files().delete_application_file(id).await?;
    info!(id, identifier = %query.identifier, "deleted application");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /applications/{id}/upload -> stores the uploaded file and marks
/// the application as uploaded.
pub async fn upload_application_file(
    State(state): State<JobforgeState>,
    _identity: Identity,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<StatusCode, JobforgeError> {
    fetch_instance::<ApplicationResponse>(state.pool(), &APPLICATIONS, id).await?;

    let field = multipart
        .next_field()
        .await
        .map_err(map_multipart_err)?
        .ok_or_else(|| JobforgeError::BadRequest("missing upload file".to_string()))?;
    let data = field.bytes().await.map_err(map_multipart_err)?;
    if data.len() > state.max_upload_size() {
        return Err(JobforgeError::PayloadTooLarge);
    }

    state.files().put_application_file(id, data).await?;
    sqlx::query("UPDATE applications SET application_uploaded = 1, updated_at = ? WHERE id = ?")
        .bind(Utc::now())
        .bind(id)
        .execute(state.pool())
        .await?;
    info!(id, "stored application file");
    Ok(StatusCode::CREATED)
}

/// DELETE /applications/{id}/upload -> removes the stored file and clears
/// the uploaded flag.
pub async fn delete_application_file(
    State(state): State<JobforgeState>,
    _identity: Identity,
    Path(id): Path<i64>,
) -> Result<StatusCode, JobforgeError> {
    fetch_instance::<ApplicationResponse>(state.pool(), &APPLICATIONS, id).await?;

    state.files().delete_application_file(id).await?;
    sqlx::query("UPDATE applications SET application_uploaded = 0, updated_at = ? WHERE id = ?")
        .bind(Utc::now())
        .bind(id)
        .execute(state.pool())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
