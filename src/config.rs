use crate::scrapers::filter::FilterRules;
use crate::scrapers::types::{DelayWindow, PaginationPolicy};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Monitored regions
pub const DEFAULT_REGIONS: [&str; 3] = [
    "https://www.willhaben.at/iad/immobilien/immobilien/wien",
    "https://www.willhaben.at/iad/immobilien/immobilien/niederoesterreich",
    "https://www.willhaben.at/iad/immobilien/immobilien/burgenland",
];

/// Where newly found listings are delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifierKind {
    /// Send an HTML mail over SMTP
    Smtp,
    /// Print a digest to stdout
    Log,
    /// Write a JSON digest file per batch
    Json,
}

impl std::str::FromStr for NotifierKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smtp" | "email" => Ok(Self::Smtp),
            "log" => Ok(Self::Log),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("Unknown notifier '{}', expected 'smtp', 'log' or 'json'", other),
        }
    }
}

/// Mail relay settings of the SMTP notifier. Credentials come from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    pub host: String,
    /// STARTTLS submission port
    pub port: u16,
    /// Display name of the sender
    pub sender_name: String,
    /// Custom HTML template; the built-in one is used when unset or unreadable
    pub template_path: Option<PathBuf>,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            sender_name: "Willhaben Scraper".to_string(),
            template_path: None,
        }
    }
}

/// Scout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    /// Search-result URL per monitored region
    pub regions: Vec<String>,
    /// Wait between full cycles
    pub cycle_interval: DelayWindow,
    /// Wait between two regions of a cycle
    pub region_delay: DelayWindow,
    /// Wait between two pages of a region
    pub page_delay: DelayWindow,
    pub pagination: PaginationPolicy,
    pub filters: FilterRules,
    /// Per-request HTTP timeout (seconds)
    pub request_timeout_secs: u64,
    pub notifier: NotifierKind,
    /// Output directory of the JSON notifier
    pub digest_dir: PathBuf,
    pub smtp: SmtpConfig,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            regions: DEFAULT_REGIONS.iter().map(|url| url.to_string()).collect(),
            cycle_interval: DelayWindow::new(115_000, 125_000),
            region_delay: DelayWindow::new(2_000, 5_000),
            page_delay: DelayWindow::new(1_500, 3_000),
            pagination: PaginationPolicy::default(),
            filters: FilterRules::default(),
            request_timeout_secs: 30,
            notifier: NotifierKind::Smtp,
            digest_dir: PathBuf::from("digests"),
            smtp: SmtpConfig::default(),
        }
    }
}

impl ScoutConfig {
    /// Load from `SCOUT_CONFIG` (if set), then apply the `SCOUT_NOTIFIER`,
    /// `SCOUT_DIGEST_DIR` and `SCOUT_EMAIL_TEMPLATE` overrides
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var_os("SCOUT_CONFIG") {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };

        if let Ok(kind) = std::env::var("SCOUT_NOTIFIER") {
            config.notifier = kind.parse()?;
        }
        if let Some(dir) = std::env::var_os("SCOUT_DIGEST_DIR") {
            config.digest_dir = PathBuf::from(dir);
        }
        if let Some(path) = std::env::var_os("SCOUT_EMAIL_TEMPLATE") {
            config.smtp.template_path = Some(PathBuf::from(path));
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.regions.is_empty() {
            anyhow::bail!("No regions configured");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be positive");
        }
        let smtp_incomplete = self.smtp.host.is_empty() || self.smtp.port == 0;
        if self.notifier == NotifierKind::Smtp && smtp_incomplete {
            anyhow::bail!("SMTP notifier needs a host and a port");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
