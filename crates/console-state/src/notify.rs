/// Toast delivery is an external collaborator; the stores report through
/// this seam and never render anything themselves.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Full-page navigation primitive used to start the OAuth redirect flow.
pub trait Navigator: Send + Sync {
    fn redirect(&self, url: &str);
}

/// Discards notifications, for embedders that render store state directly.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn success(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}
