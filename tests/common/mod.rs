#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use chrono::Utc;
use jobforge::db::SqlitePool;
use jobforge::files::FileStore;
use jobforge::{JobforgeState, jobforge_router};
use serde_json::Value;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

pub const TEST_KEY: &str = "pwd";

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub db_path: PathBuf,
    pub files_root: PathBuf,
}

impl TestApp {
    /// Build a router over a throwaway SQLite file and object-store root.
    pub async fn spawn(tag: &str, max_upload_size: usize) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();

        let mut db_path = std::env::temp_dir();
        db_path.push(format!(
            "jobforge-{tag}-{}-{}.sqlite",
            std::process::id(),
            nanos
        ));
        let mut files_root = std::env::temp_dir();
        files_root.push(format!(
            "jobforge-files-{tag}-{}-{}",
            std::process::id(),
            nanos
        ));

        let database_url = format!("sqlite:{}", db_path.display());
        let pool = jobforge::db::spawn(&database_url)
            .await
            .expect("failed to spawn database");
        let files = FileStore::local(&files_root).expect("failed to create file store");
        let state = JobforgeState::new(pool.clone(), files, TEST_KEY, max_upload_size);
        let router = jobforge_router(state);

        Self {
            router,
            pool,
            db_path,
            files_root,
        }
    }

    pub fn cleanup(&self) {
        let _ = std::fs::remove_file(&self.db_path);
        let _ = std::fs::remove_dir_all(&self.files_root);
    }
}

/// Send an authenticated request with an optional JSON body and decode
/// the response body as JSON (null for empty bodies).
pub async fn request(
    router: &Router,
    method: &str,
    uri: &str,
    email: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-api-key", TEST_KEY)
        .header("x-user-email", email);
    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    let resp = router
        .clone()
        .oneshot(request)
        .await
        .expect("request failed");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body was not json")
    };
    (status, json)
}

/// Build an authenticated multipart upload request carrying one file
/// field.
pub fn multipart_request(uri: &str, email: &str, filename: &str, bytes: &[u8]) -> Request<Body> {
    let boundary = "jobforge-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"upload_file\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header("x-api-key", TEST_KEY)
        .header("x-user-email", email)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .expect("failed to build request")
}

pub async fn insert_application(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    identifier: Option<&str>,
    owner: &str,
    description: Option<&str>,
) {
    let now = Utc::now();
    sqlx::query(
        r#"INSERT INTO applications (
            id, application_name, application_identifier, application_description,
            application_owner_email, application_file, application_config,
            application_uploaded, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, 'whatever', 'whatever', 0, ?, ?)"#,
    )
    .bind(id)
    .bind(name)
    .bind(identifier)
    .bind(description)
    .bind(owner)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .expect("failed to insert application");
}

pub async fn insert_job_script(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    owner: &str,
    application_id: Option<i64>,
) {
    let now = Utc::now();
    sqlx::query(
        r#"INSERT INTO job_scripts (
            id, job_script_name, job_script_description, job_script_data_as_string,
            job_script_owner_email, application_id, created_at, updated_at
        ) VALUES (?, ?, NULL, '#!/bin/bash', ?, ?, ?, ?)"#,
    )
    .bind(id)
    .bind(name)
    .bind(owner)
    .bind(application_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .expect("failed to insert job script");
}

pub async fn insert_job_submission(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    owner: &str,
    job_script_id: i64,
) {
    let now = Utc::now();
    sqlx::query(
        r#"INSERT INTO job_submissions (
            id, job_submission_name, job_submission_description,
            job_submission_owner_email, job_script_id, created_at, updated_at
        ) VALUES (?, ?, NULL, ?, ?, ?, ?)"#,
    )
    .bind(id)
    .bind(name)
    .bind(owner)
    .bind(job_script_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .expect("failed to insert job submission");
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    sqlx::query_scalar(&sql)
        .fetch_one(pool)
        .await
        .expect("failed to count rows")
}

pub fn result_ids(body: &Value) -> Vec<i64> {
    body["results"]
        .as_array()
        .expect("results missing")
        .iter()
        .map(|row| row["id"].as_i64().expect("id missing"))
        .collect()
}
