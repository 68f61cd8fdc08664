//! External service interactions
//!
//! - eCourts portal requests and HTML parsing
//! - Background job execution
//! - File export and opening links in the browser

pub mod ecourts;
pub mod export;
pub mod html;
pub mod job_runner;

pub use ecourts::{CourtService, ECourtsClient};
pub use export::{write_json_export, SystemOpener, UrlOpener};
pub use job_runner::{JobMessage, JobRunner};
