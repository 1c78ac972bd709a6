use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use std::sync::Arc;

use crate::db::SqlitePool;
use crate::files::FileStore;
use crate::handlers::{applications, job_scripts, job_submissions};

#[derive(Clone)]
pub struct JobforgeState {
    pool: SqlitePool,
    files: FileStore,
    api_key: Arc<str>,
    max_upload_size: usize,
}

impl JobforgeState {
    pub fn new(pool: SqlitePool, files: FileStore, api_key: &str, max_upload_size: usize) -> Self {
        Self {
            pool,
            files,
            api_key: Arc::from(api_key),
            max_upload_size,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn files(&self) -> &FileStore {
        &self.files
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn max_upload_size(&self) -> usize {
        self.max_upload_size
    }
}

pub fn jobforge_router(state: JobforgeState) -> Router {
    // headroom on top of the file cap for multipart framing
    let body_limit = state.max_upload_size + 64 * 1024;

    Router::new()
        .route(
            "/applications",
            post(applications::create_application)
                .get(applications::list_applications)
                .delete(applications::delete_application_by_identifier),
        )
        .route(
            "/applications/{id}",
            get(applications::get_application)
                .put(applications::update_application)
                .delete(applications::delete_application),
        )
        .route(
            "/applications/{id}/upload",
            post(applications::upload_application_file)
                .delete(applications::delete_application_file),
        )
        .route(
            "/job-scripts",
            post(job_scripts::create_job_script).get(job_scripts::list_job_scripts),
        )
        .route(
            "/job-scripts/{id}",
            get(job_scripts::get_job_script)
                .put(job_scripts::update_job_script)
                .delete(job_scripts::delete_job_script),
        )
        .route(
            "/job-submissions",
            post(job_submissions::create_job_submission).get(job_submissions::list_job_submissions),
        )
        .route(
            "/job-submissions/{id}",
            get(job_submissions::get_job_submission)
                .put(job_submissions::update_job_submission)
                .delete(job_submissions::delete_job_submission),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
