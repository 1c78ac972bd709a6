use crate::query::TableSpec;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const JOB_SCRIPTS: TableSpec = TableSpec {
    name: "job_scripts",
    searchable: &[
        "job_script_name",
        "job_script_description",
        "job_script_owner_email",
    ],
    sortable: &[
        "id",
        "job_script_name",
        "job_script_owner_email",
        "created_at",
        "updated_at",
    ],
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct JobScriptResponse {
    pub id: i64,
    pub job_script_name: String,
    pub job_script_description: Option<String>,
    pub job_script_data_as_string: String,
    pub job_script_owner_email: String,
    pub application_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload. The script body is derived server-side from the
/// source application's stored file, with any requested scheduler
/// directives injected.
#[derive(Debug, Deserialize)]
pub struct JobScriptCreate {
    pub job_script_name: String,
    pub job_script_description: Option<String>,
    pub application_id: i64,
    #[serde(default)]
    pub sbatch_params: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct JobScriptUpdate {
    pub job_script_name: Option<String>,
    pub job_script_description: Option<String>,
}
