use std::sync::Arc;

use tracing::error;

use console_client::DashboardBackend;
use console_core::model::{ApiKey, UserId};

use crate::notify::Notifier;

/// Holds the API-key list for the dashboard. The list is only ever replaced
/// by a fresh fetch; mutation responses are never hand-patched into it.
pub struct ApiKeyStore {
    backend: Arc<dyn DashboardBackend>,
    notifier: Arc<dyn Notifier>,
    keys: Vec<ApiKey>,
    loading: bool,
}

impl ApiKeyStore {
    pub fn new(backend: Arc<dyn DashboardBackend>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            backend,
            notifier,
            keys: Vec::new(),
            loading: true,
        }
    }

    pub fn keys(&self) -> &[ApiKey] {
        &self.keys
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Refresh the list from the backend. Without an identity the viewer is
    /// simply signed out: loading ends and the list stays empty. A failed
    /// fetch clears the list rather than leaving stale rows on display.
    pub async fn load(&mut self, user: Option<&UserId>) {
        let Some(user) = user else {
            self.loading = false;
            return;
        };
        match self.backend.list_api_keys(user).await {
            Ok(keys) => self.keys = keys,
            Err(err) => {
                error!(error = %err, "failed to load API keys");
                self.notifier
                    .error("Failed to load API keys. Please try again.");
                self.keys = Vec::new();
            }
        }
        self.loading = false;
    }

    /// Generate a key, resynchronize the list and hand back the plaintext
    /// secret for one-time display. The secret never enters the list.
    pub async fn create(&mut self, user: Option<&UserId>, name: &str) -> anyhow::Result<String> {
        let Some(user) = user else {
            anyhow::bail!("user identity required");
        };
        let generated = self.backend.generate_api_key(user, name).await;
        match generated {
            Ok(secret) => {
                self.load(Some(user)).await;
                self.notifier
                    .success(&format!("API key \"{name}\" created successfully!"));
                Ok(secret)
            }
            Err(err) => {
                self.notifier.error(&err.to_string());
                Err(err.into())
            }
        }
    }

    /// Delete by key identity, then re-fetch the authoritative list whether
    /// or not the delete succeeded. Deleting an unknown key is a
    /// backend-defined failure, propagated unchanged.
    pub async fn delete(&mut self, user: Option<&UserId>, key: &str) -> anyhow::Result<()> {
        let result = self.backend.delete_api_key(key).await;
        self.load(user).await;
        match result {
            Ok(()) => {
                self.notifier.success("API key deleted successfully!");
                Ok(())
            }
            Err(err) => {
                self.notifier.error(&err.to_string());
                Err(err.into())
            }
        }
    }
}
