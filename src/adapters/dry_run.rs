use crate::core::{Mailer, OutgoingEmail};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mailer that only logs. Bodies name the recipient, so they stay at debug level.
#[derive(Debug, Default)]
pub struct DryRunMailer {
    rendered: AtomicUsize,
}

impl DryRunMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rendered(&self) -> usize {
        self.rendered.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Mailer for DryRunMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<()> {
        tracing::info!("🔍 [dry run] would email {} ({})", email.to, email.subject);
        tracing::debug!("🔍 [dry run] body:\n{}", email.body);
        self.rendered.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
