mod common;

use axum::http::StatusCode;
use common::{
    TestApp, count_rows, insert_job_script, insert_job_submission, request, result_ids,
};
use serde_json::{Value, json};

const UPLOAD_CAP: usize = 10_000;

async fn insert_template_application(app: &TestApp, id: i64) {
    let now = chrono::Utc::now();
    sqlx::query(
        r#"INSERT INTO applications (
            id, application_name, application_identifier, application_description,
            application_owner_email, application_file, application_config,
            application_uploaded, created_at, updated_at
        ) VALUES (?, 'template-app', NULL, NULL, 'owner1@org.com', ?, '', 0, ?, ?)"#,
    )
    .bind(id)
    .bind("#!/bin/bash\necho hello\n")
    .bind(now)
    .bind(now)
    .execute(&app.pool)
    .await
    .expect("failed to insert application");
}

#[tokio::test]
async fn create_job_script_renders_from_the_application_file() {
    let app = TestApp::spawn("js-create", UPLOAD_CAP).await;
    insert_template_application(&app, 1).await;

    let (status, body) = request(
        &app.router,
        "POST",
        "/job-scripts",
        "owner1@org.com",
        Some(json!({
            "job_script_name": "test script",
            "job_script_description": "a test script",
            "application_id": 1,
            "sbatch_params": ["--partition=debug", "--time=30"],
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["job_script_name"], "test script");
    assert_eq!(body["job_script_owner_email"], "owner1@org.com");
    assert_eq!(body["application_id"], 1);
    assert_eq!(
        body["job_script_data_as_string"],
        "#!/bin/bash\n#SBATCH --partition=debug\n#SBATCH --time=30\necho hello\n"
    );
    assert_eq!(count_rows(&app.pool, "job_scripts").await, 1);
    app.cleanup();
}

#[tokio::test]
async fn create_job_script_against_a_missing_application_is_not_found() {
    let app = TestApp::spawn("js-create-404", UPLOAD_CAP).await;

    let (status, body) = request(
        &app.router,
        "POST",
        "/job-scripts",
        "owner1@org.com",
        Some(json!({
            "job_script_name": "test script",
            "application_id": 999,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(
        body["error"]["message"]
            .as_str()
            .expect("message missing")
            .contains("applications instance with id 999")
    );
    assert_eq!(count_rows(&app.pool, "job_scripts").await, 0);
    app.cleanup();
}

#[tokio::test]
async fn list_defaults_to_the_callers_rows() {
    let app = TestApp::spawn("js-list", UPLOAD_CAP).await;
    insert_job_script(&app.pool, 1, "one", "owner1@org.com", None).await;
    insert_job_script(&app.pool, 2, "two", "owner1@org.com", None).await;
    insert_job_script(&app.pool, 3, "three", "owner999@org.com", None).await;

    let (status, body) = request(&app.router, "GET", "/job-scripts", "owner1@org.com", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result_ids(&body), vec![1, 2]);
    assert_eq!(
        body["pagination"],
        json!({"total": 2, "start": null, "limit": null})
    );

    let (status, body) = request(
        &app.router,
        "GET",
        "/job-scripts?all=true",
        "owner1@org.com",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result_ids(&body), vec![1, 2, 3]);
    app.cleanup();
}

#[tokio::test]
async fn search_and_sort_apply_to_job_scripts() {
    let app = TestApp::spawn("js-search", UPLOAD_CAP).await;
    insert_job_script(&app.pool, 1, "alpha", "owner1@org.com", None).await;
    insert_job_script(&app.pool, 2, "beta", "owner1@org.com", None).await;

    let (status, body) = request(
        &app.router,
        "GET",
        "/job-scripts?all=true&search=beta",
        "owner1@org.com",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result_ids(&body), vec![2]);

    let (status, body) = request(
        &app.router,
        "GET",
        "/job-scripts?all=true&sort_field=job_script_name&sort_ascending=false",
        "owner1@org.com",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result_ids(&body), vec![2, 1]);

    let (status, _) = request(
        &app.router,
        "GET",
        "/job-scripts?all=true&sort_field=job_script_data_as_string",
        "owner1@org.com",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    app.cleanup();
}

#[tokio::test]
async fn get_update_and_delete_job_script() {
    let app = TestApp::spawn("js-crud", UPLOAD_CAP).await;
    insert_job_script(&app.pool, 1, "old name", "owner1@org.com", None).await;

    let (status, body) = request(&app.router, "GET", "/job-scripts/1", "owner1@org.com", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["job_script_name"], "old name");

    let (status, body) = request(
        &app.router,
        "PUT",
        "/job-scripts/1",
        "owner1@org.com",
        Some(json!({
            "job_script_name": "new name",
            "job_script_description": "new description",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["job_script_name"], "new name");
    assert_eq!(body["job_script_description"], "new description");

    let (status, _) = request(
        &app.router,
        "DELETE",
        "/job-scripts/1",
        "owner1@org.com",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(count_rows(&app.pool, "job_scripts").await, 0);

    let (status, _) = request(
        &app.router,
        "DELETE",
        "/job-scripts/1",
        "owner1@org.com",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    app.cleanup();
}

#[tokio::test]
async fn delete_blocked_by_a_referencing_submission_is_a_conflict() {
    let app = TestApp::spawn("js-delete-fk", UPLOAD_CAP).await;
    insert_job_script(&app.pool, 1, "script", "owner1@org.com", None).await;
    insert_job_submission(&app.pool, 1, "submission", "owner1@org.com", 1).await;

    let (status, body) = request(
        &app.router,
        "DELETE",
        "/job-scripts/1",
        "owner1@org.com",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
    assert_eq!(
        body["error"]["message"],
        "Delete failed due to foreign-key constraint"
    );
    assert_eq!(body["error"]["table"], Value::Null);
    assert_eq!(count_rows(&app.pool, "job_scripts").await, 1);
    app.cleanup();
}
