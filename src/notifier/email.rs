use crate::config::SmtpConfig;
use crate::models::Listing;
use crate::notifier::{digest, html, Notifier};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::path::Path;
use tracing::{info, warn};

pub const ADDRESS_VAR: &str = "GMAIL_ADDRESS";
pub const PASSWORD_VAR: &str = "GMAIL_APP_PASSWORD";
pub const RECIPIENT_VAR: &str = "RECIPIENT_EMAIL";

/// Sender account and recipient of the digest mails
pub struct MailCredentials {
    pub address: String,
    pub app_password: String,
    pub recipient: String,
}

impl MailCredentials {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Fails naming every variable that is unset or blank
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        match (read(ADDRESS_VAR), read(PASSWORD_VAR), read(RECIPIENT_VAR)) {
            (Some(address), Some(app_password), Some(recipient)) => Ok(Self {
                address,
                app_password,
                recipient,
            }),
            (address, app_password, recipient) => {
                let missing: Vec<&str> = [
                    (ADDRESS_VAR, address.is_none()),
                    (PASSWORD_VAR, app_password.is_none()),
                    (RECIPIENT_VAR, recipient.is_none()),
                ]
                .into_iter()
                .filter(|(_, absent)| *absent)
                .map(|(key, _)| key)
                .collect();
                bail!("Missing email configuration: set {}", missing.join(", "))
            }
        }
    }
}

/// Sends each batch as an HTML mail over SMTP with STARTTLS
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
    template: String,
}

impl SmtpNotifier {
    pub fn new(config: &SmtpConfig, credentials: MailCredentials) -> Result<Self> {
        let from = Mailbox::new(
            Some(config.sender_name.clone()),
            credentials
                .address
                .parse()
                .with_context(|| format!("Invalid {}", ADDRESS_VAR))?,
        );
        let to = Mailbox::new(
            None,
            credentials
                .recipient
                .parse()
                .with_context(|| format!("Invalid {}", RECIPIENT_VAR))?,
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .with_context(|| format!("Failed to set up SMTP relay {}", config.host))?
            .port(config.port)
            .credentials(Credentials::new(
                credentials.address,
                credentials.app_password,
            ))
            .build();

        Ok(Self {
            transport,
            from,
            to,
            template: load_template(config.template_path.as_deref()),
        })
    }

    fn message(&self, listings: &[Listing], sent_at: DateTime<Utc>) -> Result<Message> {
        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(digest::subject(listings.len()))
            .header(ContentType::TEXT_HTML)
            .body(html::render(&self.template, listings, sent_at))
            .context("Failed to build email")
    }
}

fn load_template(path: Option<&Path>) -> String {
    let Some(path) = path else {
        return html::DEFAULT_TEMPLATE.to_string();
    };

    match std::fs::read_to_string(path) {
        Ok(template) => {
            info!("Email template loaded from {}", path.display());
            template
        }
        Err(e) => {
            warn!(
                "Failed to read email template {} ({}), using the built-in one",
                path.display(),
                e
            );
            html::DEFAULT_TEMPLATE.to_string()
        }
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, listings: &[Listing]) -> Result<()> {
        let message = self.message(listings, Utc::now())?;
        self.transport
            .send(message)
            .await
            .context("Failed to send email")?;

        info!("📧 Email sent with {} new listing(s) to {}", listings.len(), self.to);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::testing::listings;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    fn credentials() -> MailCredentials {
        MailCredentials {
            address: "scout@gmail.com".to_string(),
            app_password: "abcd efgh ijkl mnop".to_string(),
            recipient: "friend@example.com".to_string(),
        }
    }

    #[test]
    fn credentials_from_environment() {
        let creds = MailCredentials::from_lookup(env(&[
            (ADDRESS_VAR, " scout@gmail.com "),
            (PASSWORD_VAR, "secret"),
            (RECIPIENT_VAR, "friend@example.com"),
        ]))
        .unwrap();
        assert_eq!(creds.address, "scout@gmail.com");
        assert_eq!(creds.recipient, "friend@example.com");
    }

    #[test]
    fn missing_credentials_are_named() {
        let err = MailCredentials::from_lookup(env(&[
            (ADDRESS_VAR, "scout@gmail.com"),
            (PASSWORD_VAR, "  "),
        ]))
        .err()
        .unwrap()
        .to_string();

        assert!(err.contains(PASSWORD_VAR));
        assert!(err.contains(RECIPIENT_VAR));
        assert!(!err.contains(ADDRESS_VAR));
    }

    #[test]
    fn rejects_invalid_address() {
        let mut creds = credentials();
        creds.recipient = "not an address".to_string();
        assert!(SmtpNotifier::new(&SmtpConfig::default(), creds).is_err());
    }

    #[tokio::test]
    async fn builds_html_message() {
        let notifier = SmtpNotifier::new(&SmtpConfig::default(), credentials()).unwrap();
        let message = notifier.message(&listings("M", 2), Utc::now()).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("Subject: 2 neue private Immobilien auf Willhaben"));
        assert!(raw.contains("Willhaben Scraper"));
        assert!(raw.contains("<scout@gmail.com>"));
        assert!(raw.contains("friend@example.com"));
        assert!(raw.contains("Content-Type: text/html"));
        assert_eq!(notifier.name(), "smtp");
    }

    #[test]
    fn unreadable_template_falls_back_to_built_in() {
        let dir = tempfile::tempdir().unwrap();
        let custom = dir.path().join("digest.html");
        std::fs::write(&custom, "<b>{{COUNT}}</b>").unwrap();

        assert_eq!(load_template(Some(&custom)), "<b>{{COUNT}}</b>");
        assert_eq!(
            load_template(Some(&dir.path().join("missing.html"))),
            html::DEFAULT_TEMPLATE
        );
        assert_eq!(load_template(None), html::DEFAULT_TEMPLATE);
    }
}
