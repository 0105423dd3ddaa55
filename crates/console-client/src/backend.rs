use async_trait::async_trait;
use reqwest::Response;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use url::form_urlencoded;

use console_core::model::{ApiKey, GitHubRepository, UserId};

use crate::error::{ClientError, repositories_status_message};

/// Connection state reported by the backend for one user.
#[derive(Clone, Debug, Deserialize)]
pub struct GitHubStatus {
    pub connected: bool,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateKeyResponse {
    api_key: String,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

/// One method per backend operation; each performs exactly one round trip
/// and normalizes non-2xx responses into [`ClientError`]. No retries.
#[async_trait]
pub trait DashboardBackend: Send + Sync {
    async fn list_api_keys(&self, user: &UserId) -> Result<Vec<ApiKey>, ClientError>;
    async fn generate_api_key(&self, user: &UserId, name: &str) -> Result<String, ClientError>;
    async fn delete_api_key(&self, key: &str) -> Result<(), ClientError>;
    async fn github_status(&self, user: &UserId) -> Result<GitHubStatus, ClientError>;
    async fn list_repositories(
        &self,
        user: &UserId,
    ) -> Result<Vec<GitHubRepository>, ClientError>;
    async fn add_repository(&self, user: &UserId, github_repo_id: u64) -> Result<(), ClientError>;

    /// Authorization URL for the OAuth redirect flow. Built, not called:
    /// the navigation seam consumes it as an opaque string.
    fn auth_url(&self, user: &UserId) -> String;
}

pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn from_environment() -> anyhow::Result<Self> {
        let base_url = std::env::var("CONSOLE_API_URL").map_err(|_| {
            anyhow::anyhow!("CONSOLE_API_URL must point at the dashboard backend")
        })?;
        Ok(Self::new(base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl DashboardBackend for BackendClient {
    async fn list_api_keys(&self, user: &UserId) -> Result<Vec<ApiKey>, ClientError> {
        let url = format!("{}/api-keys/{user}", self.base_url);
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(status_error(response, "Failed to load API keys").await);
        }
        Ok(response.json().await?)
    }

    async fn generate_api_key(&self, user: &UserId, name: &str) -> Result<String, ClientError> {
        let url = format!("{}/api-keys/generate", self.base_url);
        let body = json!({
            "clerk_user_id": user.as_str(),
            "name": name,
        });
        let response = self.client.post(url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(status_error(response, "Failed to generate API key").await);
        }
        let payload: GenerateKeyResponse = response.json().await?;
        Ok(payload.api_key)
    }

    async fn delete_api_key(&self, key: &str) -> Result<(), ClientError> {
        let url = format!("{}/api-keys/{key}", self.base_url);
        let response = self.client.delete(url).send().await?;
        if !response.status().is_success() {
            return Err(status_error(response, "Failed to delete API key").await);
        }
        Ok(())
    }

    async fn github_status(&self, user: &UserId) -> Result<GitHubStatus, ClientError> {
        let url = format!("{}/user/{user}/github-status", self.base_url);
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(status_error(response, "Failed to check GitHub status").await);
        }
        Ok(response.json().await?)
    }

    async fn list_repositories(
        &self,
        user: &UserId,
    ) -> Result<Vec<GitHubRepository>, ClientError> {
        let url = format!("{}/github/repositories", self.base_url);
        let response = self
            .client
            .get(url)
            .query(&[("clerk_user_id", user.as_str())])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            if let Some(message) = repositories_status_message(status) {
                return Err(ClientError::status(status, message));
            }
            return Err(status_error(response, "Failed to load repositories").await);
        }
        Ok(response.json().await?)
    }

    async fn add_repository(
        &self,
        user: &UserId,
        github_repo_id: u64,
    ) -> Result<(), ClientError> {
        let url = format!("{}/repositories/add", self.base_url);
        let body = json!({
            "clerk_user_id": user.as_str(),
            "github_repo_id": github_repo_id,
        });
        let response = self.client.post(url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let detail = read_detail(response).await;
            return Err(ClientError::status(
                status,
                detail.unwrap_or_else(|| "Failed to add repository".to_string()),
            ));
        }
        Ok(())
    }

    fn auth_url(&self, user: &UserId) -> String {
        let query: String = form_urlencoded::Serializer::new(String::new())
            .append_pair("user_id", user.as_str())
            .finish();
        format!("{}/auth/github?{query}", self.base_url)
    }
}

/// Build the error for a non-2xx response, preferring the backend's JSON
/// `detail` field over the status-derived fallback.
async fn status_error(response: Response, action: &str) -> ClientError {
    let status = response.status();
    debug!(status = %status, "backend request failed");
    let message = read_detail(response)
        .await
        .unwrap_or_else(|| format!("{action}: {status}"));
    ClientError::status(status, message)
}

async fn read_detail(response: Response) -> Option<String> {
    response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.detail)
}
