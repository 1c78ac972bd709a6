pub mod application;
pub mod job_script;
pub mod job_submission;
