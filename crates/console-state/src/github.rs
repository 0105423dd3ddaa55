use std::sync::Arc;

use anyhow::bail;
use tracing::{info, warn};

use console_client::DashboardBackend;
use console_core::codebase;
use console_core::model::{ConnectionStatus, GitHubRepository, IndexedCodebase, UserId};
use console_core::signal::{RedirectSignal, SignalSlot};

use crate::notify::{Navigator, Notifier};

const AUTH_FAILED_MESSAGE: &str = "GitHub authentication failed. Please try again.";

/// State machine reconciling the GitHub integration: redirect signals, the
/// backend status check and the repository list (which doubles as the source
/// for the indexed-codebase view).
pub struct GitHubStore {
    backend: Arc<dyn DashboardBackend>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    connection: ConnectionStatus,
    repositories: Vec<GitHubRepository>,
    repos_loading: bool,
    repos_error: Option<String>,
    codebases: Vec<IndexedCodebase>,
    codebases_loading: bool,
    adding: Option<u64>,
}

impl GitHubStore {
    pub fn new(
        backend: Arc<dyn DashboardBackend>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            backend,
            notifier,
            navigator,
            connection: ConnectionStatus::Unknown,
            repositories: Vec::new(),
            repos_loading: false,
            repos_error: None,
            codebases: Vec::new(),
            codebases_loading: false,
            adding: None,
        }
    }

    pub fn connection(&self) -> &ConnectionStatus {
        &self.connection
    }

    pub fn repositories(&self) -> &[GitHubRepository] {
        &self.repositories
    }

    pub fn repos_loading(&self) -> bool {
        self.repos_loading
    }

    pub fn repos_error(&self) -> Option<&str> {
        self.repos_error.as_deref()
    }

    pub fn indexed_codebases(&self) -> &[IndexedCodebase] {
        &self.codebases
    }

    pub fn codebases_loading(&self) -> bool {
        self.codebases_loading
    }

    /// Repository id of the add currently in flight, if any. Exposed so the
    /// presentation layer can disable duplicate submission.
    pub fn adding(&self) -> Option<u64> {
        self.adding
    }

    /// Reconcile the connection state. A redirect-carried signal wins over
    /// the backend status check and is consumed exactly once: draining the
    /// slot is what keeps a replayed render from re-triggering the
    /// transition. A failed status check is logged and swallowed so a
    /// transient error never flaps a working connection.
    pub async fn check_connection(&mut self, user: Option<&UserId>, slot: &mut SignalSlot) {
        let Some(user) = user else { return };
        if let Some(signal) = slot.take() {
            let next = match signal {
                RedirectSignal::Connected => ConnectionStatus::Connected,
                RedirectSignal::AuthFailed => {
                    ConnectionStatus::Failed(AUTH_FAILED_MESSAGE.to_string())
                }
                RedirectSignal::AlreadyLinked { message } => ConnectionStatus::Failed(message),
            };
            self.transition(user, next).await;
            return;
        }
        let checked = self.backend.github_status(user).await;
        match checked {
            Ok(status) => {
                let next = if status.connected {
                    ConnectionStatus::Connected
                } else {
                    ConnectionStatus::NotConnected
                };
                self.transition(user, next).await;
            }
            Err(err) => {
                warn!(error = %err, "GitHub status check failed");
            }
        }
    }

    /// Kick off the OAuth flow with a full-page navigation. A signed-out
    /// viewer is a no-op.
    pub fn connect(&self, user: Option<&UserId>) {
        let Some(user) = user else { return };
        self.navigator.redirect(&self.backend.auth_url(user));
    }

    /// Replace the repository list from a fresh fetch. No-op unless the
    /// connection is established. A failed fetch records the error and
    /// clears the list; it never leaves a partial or stale one behind.
    pub async fn load_repositories(&mut self, user: Option<&UserId>) {
        let Some(user) = user else { return };
        if !self.connection.is_connected() {
            return;
        }
        self.repos_loading = true;
        self.repos_error = None;
        match self.backend.list_repositories(user).await {
            Ok(repos) => {
                info!(count = repos.len(), "loaded GitHub repositories");
                self.repositories = repos;
            }
            Err(err) => {
                warn!(error = %err, "failed to load repositories");
                self.repos_error = Some(err.to_string());
                self.repositories = Vec::new();
            }
        }
        self.repos_loading = false;
    }

    /// Rebuild the indexed-codebase view from its own fetch of the
    /// repository list. Intentionally does not reuse `load_repositories`
    /// state: both views always derive from a snapshot the backend just
    /// served, so the indexed flag can never be stale relative to it.
    pub async fn load_indexed_codebases(&mut self, user: Option<&UserId>) {
        let Some(user) = user else { return };
        if !self.connection.is_connected() {
            return;
        }
        self.codebases_loading = true;
        match self.backend.list_repositories(user).await {
            Ok(repos) => self.codebases = codebase::indexed_codebases(&repos),
            Err(err) => {
                warn!(error = %err, "failed to load indexed codebases");
                self.codebases = Vec::new();
            }
        }
        self.codebases_loading = false;
    }

    /// Register a repository for indexing, then resynchronize the indexed
    /// view and the repository list, in that order, strictly after the
    /// mutation resolves. The in-flight marker spans the whole action and is
    /// cleared on every exit path; a failed add aborts before any
    /// resynchronization and propagates.
    pub async fn add_repository(
        &mut self,
        user: Option<&UserId>,
        github_repo_id: u64,
    ) -> anyhow::Result<()> {
        let Some(user) = user else {
            bail!("user identity required");
        };
        if !self.connection.is_connected() {
            bail!("GitHub is not connected");
        }
        self.adding = Some(github_repo_id);
        let result = self.add_and_resync(user, github_repo_id).await;
        self.adding = None;
        if let Err(err) = &result {
            self.notifier.error(&err.to_string());
        }
        result
    }

    async fn add_and_resync(&mut self, user: &UserId, github_repo_id: u64) -> anyhow::Result<()> {
        self.backend.add_repository(user, github_repo_id).await?;
        self.load_indexed_codebases(Some(user)).await;
        self.load_repositories(Some(user)).await;
        Ok(())
    }

    async fn transition(&mut self, user: &UserId, next: ConnectionStatus) {
        let became_connected = next.is_connected() && !self.connection.is_connected();
        self.connection = next;
        if became_connected {
            self.load_indexed_codebases(Some(user)).await;
        }
    }
}
