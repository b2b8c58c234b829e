pub mod digest;
pub mod email;
pub mod html;
pub mod json;
pub mod log;

pub use email::{MailCredentials, SmtpNotifier};
pub use json::JsonDigestNotifier;
pub use log::LogNotifier;

use crate::config::{NotifierKind, ScoutConfig};
use crate::models::Listing;
use anyhow::Result;
use async_trait::async_trait;

/// Delivers batches of newly found listings
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one non-empty batch
    async fn notify(&self, listings: &[Listing]) -> Result<()>;

    fn name(&self) -> &'static str;
}

/// Forward a batch to the notifier. Empty batches are never forwarded;
/// returns whether a delivery happened.
pub async fn deliver(notifier: &dyn Notifier, listings: &[Listing]) -> Result<bool> {
    if listings.is_empty() {
        return Ok(false);
    }
    notifier.notify(listings).await?;
    Ok(true)
}

/// Build the notifier selected in the config; SMTP credentials come from the environment
pub fn from_config(config: &ScoutConfig) -> Result<Box<dyn Notifier>> {
    build(config, |key| std::env::var(key).ok())
}

fn build(
    config: &ScoutConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Box<dyn Notifier>> {
    Ok(match config.notifier {
        NotifierKind::Smtp => Box::new(SmtpNotifier::new(
            &config.smtp,
            MailCredentials::from_lookup(lookup)?,
        )?),
        NotifierKind::Log => Box::new(LogNotifier),
        NotifierKind::Json => Box::new(JsonDigestNotifier::new(config.digest_dir.clone())),
    })
}
