use crate::query::TableSpec;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const APPLICATIONS: TableSpec = TableSpec {
    name: "applications",
    searchable: &[
        "application_name",
        "application_identifier",
        "application_description",
        "application_owner_email",
    ],
    sortable: &[
        "id",
        "application_name",
        "application_identifier",
        "application_owner_email",
        "created_at",
        "updated_at",
    ],
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct ApplicationResponse {
    pub id: i64,
    pub application_name: String,
    pub application_identifier: Option<String>,
    pub application_description: Option<String>,
    pub application_owner_email: String,
    pub application_file: String,
    pub application_config: String,
    pub application_uploaded: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationCreate {
    pub application_name: String,
    pub application_identifier: Option<String>,
    pub application_description: Option<String>,
    #[serde(default)]
    pub application_file: String,
    #[serde(default)]
    pub application_config: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApplicationUpdate {
    pub application_name: Option<String>,
    pub application_identifier: Option<String>,
    pub application_description: Option<String>,
}
