use anyhow::Context;
use std::sync::OnceLock;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Install the global tracing subscriber. Idempotent so the embedding shell
/// and tests can both call it.
pub fn init_tracing(filter: EnvFilter) -> anyhow::Result<()> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }
    let subscriber = Registry::default().with(filter).with(fmt::layer());
    tracing::subscriber::set_global_default(subscriber).context("install tracing subscriber")?;
    let _ = INSTALLED.set(());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_tracing(EnvFilter::new("info")).unwrap();
        init_tracing(EnvFilter::new("debug")).unwrap();
    }
}

