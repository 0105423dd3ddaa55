use url::form_urlencoded;

const ALREADY_LINKED_FALLBACK: &str = "This GitHub account is already linked to another user.";

/// Signal carried back from the OAuth redirect as query parameters.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RedirectSignal {
    Connected,
    AuthFailed,
    AlreadyLinked { message: String },
}

/// At most one pending redirect signal. Draining the slot is the
/// acknowledgement: once taken, a replayed render observes an empty slot and
/// cannot re-trigger the transition. The caller is expected to rewrite the
/// visible location when it constructs the slot, so a reload starts empty.
#[derive(Debug, Default)]
pub struct SignalSlot {
    pending: Option<RedirectSignal>,
}

impl SignalSlot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse the redirect query string. Error codes win over the success
    /// flag; unrecognized parameters leave the slot empty so the caller
    /// falls back to the backend status check.
    pub fn from_query(query: &str) -> Self {
        Self {
            pending: parse_signal(query),
        }
    }

    pub fn take(&mut self) -> Option<RedirectSignal> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

fn parse_signal(query: &str) -> Option<RedirectSignal> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut connected = false;
    let mut error: Option<String> = None;
    let mut message: Option<String> = None;
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "github_connected" if value.as_ref() == "true" => connected = true,
            "error" => error = Some(value.into_owned()),
            "message" => message = Some(value.into_owned()),
            _ => {}
        }
    }
    match error.as_deref() {
        Some("already_linked") => Some(RedirectSignal::AlreadyLinked {
            message: message.unwrap_or_else(|| ALREADY_LINKED_FALLBACK.to_string()),
        }),
        Some("auth_failed") => Some(RedirectSignal::AuthFailed),
        _ if connected => Some(RedirectSignal::Connected),
        _ => None,
    }
}
