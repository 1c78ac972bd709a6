pub mod config;
pub mod db;
pub mod error;
pub mod files;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod router;
pub mod service;
pub mod types;

pub use error::JobforgeError;
pub use router::{JobforgeState, jobforge_router};
