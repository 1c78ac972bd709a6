use crate::query::TableSpec;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const JOB_SUBMISSIONS: TableSpec = TableSpec {
    name: "job_submissions",
    searchable: &[
        "job_submission_name",
        "job_submission_description",
        "job_submission_owner_email",
    ],
    sortable: &[
        "id",
        "job_submission_name",
        "job_submission_owner_email",
        "created_at",
        "updated_at",
    ],
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct JobSubmissionResponse {
    pub id: i64,
    pub job_submission_name: String,
    pub job_submission_description: Option<String>,
    pub job_submission_owner_email: String,
    pub job_script_id: i64,
    pub slurm_job_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct JobSubmissionCreate {
    pub job_submission_name: String,
    pub job_submission_description: Option<String>,
    pub job_script_id: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct JobSubmissionUpdate {
    pub job_submission_name: Option<String>,
    pub job_submission_description: Option<String>,
    pub slurm_job_id: Option<i64>,
}
