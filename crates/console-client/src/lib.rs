pub mod backend;
pub mod error;

pub use backend::{BackendClient, DashboardBackend, GitHubStatus};
pub use error::ClientError;
pub use reqwest::StatusCode;
