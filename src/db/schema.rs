//! SQL DDL for initializing the resource tables.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT on every table
/// - `application_identifier` UNIQUE but nullable
/// - booleans stored as INTEGER 0/1
/// - timestamps stored as RFC3339 TEXT
/// - FK references from job_scripts and job_submissions; enforcement is
///   switched on per-connection at pool spawn
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS applications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    application_name TEXT NOT NULL,
    application_identifier TEXT NULL UNIQUE,
    application_description TEXT NULL,
    application_owner_email TEXT NOT NULL,
    application_file TEXT NOT NULL DEFAULT '',
    application_config TEXT NOT NULL DEFAULT '',
    application_uploaded INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_applications_name ON applications(application_name);
CREATE INDEX IF NOT EXISTS idx_applications_owner_email ON applications(application_owner_email);

CREATE TABLE IF NOT EXISTS job_scripts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    job_script_name TEXT NOT NULL,
    job_script_description TEXT NULL,
    job_script_data_as_string TEXT NOT NULL,
    job_script_owner_email TEXT NOT NULL,
    application_id INTEGER NULL REFERENCES applications(id),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_job_scripts_name ON job_scripts(job_script_name);
CREATE INDEX IF NOT EXISTS idx_job_scripts_owner_email ON job_scripts(job_script_owner_email);

CREATE TABLE IF NOT EXISTS job_submissions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    job_submission_name TEXT NOT NULL,
    job_submission_description TEXT NULL,
    job_submission_owner_email TEXT NOT NULL,
    job_script_id INTEGER NOT NULL REFERENCES job_scripts(id),
    slurm_job_id INTEGER NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_job_submissions_name ON job_submissions(job_submission_name);
CREATE INDEX IF NOT EXISTS idx_job_submissions_owner_email ON job_submissions(job_submission_owner_email);
"#;
