use figment::{Figment, providers::Env};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Runtime configuration, read once from `JOBFORGE_`-prefixed environment
/// variables (a `.env` file is honored when present).
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Shared key expected on every request; has no default.
    pub api_key: String,

    #[serde(default = "default_loglevel")]
    pub loglevel: String,

    /// Root directory for the local object store backend.
    #[serde(default = "default_file_store_root")]
    pub file_store_root: PathBuf,

    /// Upper bound, in bytes, for an uploaded application file.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: usize,
}

fn default_database_url() -> String {
    "sqlite:jobforge.sqlite".to_string()
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_loglevel() -> String {
    "info".to_string()
}

fn default_file_store_root() -> PathBuf {
    PathBuf::from("jobforge-files")
}

fn default_max_upload_size() -> usize {
    100 * 1024 * 1024
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Figment::new()
        .merge(Env::prefixed("JOBFORGE_"))
        .extract()
        .unwrap_or_else(|e| panic!("invalid JOBFORGE_* configuration: {e}"))
});
