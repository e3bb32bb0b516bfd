//! Configuration handling for the trade-in form

use anyhow::{anyhow, bail, Context, Result};
use directories::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::STATES;

/// Default vehicle-data API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://api.vehicledatabases.com";

/// How the final step hands the lead to the webhook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionMode {
    /// Post the form fields as-is
    #[default]
    Raw,
    /// Fetch a market value first and post it alongside the form fields
    MarketValue,
}

impl SubmissionMode {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "market_value" | "market-value" => Ok(Self::MarketValue),
            other => Err(anyhow!("Unknown submission mode '{other}'")),
        }
    }
}

/// Configuration as stored on disk; every field is optional
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Vehicle-data API base URL
    pub api_base_url: Option<String>,
    /// Static key sent as the `x-AuthKey` header
    pub auth_key: Option<String>,
    /// Where finished leads are posted
    pub webhook_url: Option<String>,
    /// Shown to the user after a successful submission
    pub redirect_url: Option<String>,
    pub submission_mode: Option<SubmissionMode>,
    /// Initial value of the state dropdown
    pub default_state: Option<String>,
}

impl FileConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "tradein", "tradein-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the platform config file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`; a missing file means defaults
    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("parse {}", path.display()))
    }

    /// Apply `TRADEIN_*` overrides from an environment lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("TRADEIN_API_BASE_URL") {
            self.api_base_url = Some(v);
        }
        if let Some(v) = lookup("TRADEIN_API_AUTH_KEY") {
            self.auth_key = Some(v);
        }
        if let Some(v) = lookup("TRADEIN_WEBHOOK_URL") {
            self.webhook_url = Some(v);
        }
        if let Some(v) = lookup("TRADEIN_REDIRECT_URL") {
            self.redirect_url = Some(v);
        }
        if let Some(v) = lookup("TRADEIN_SUBMISSION_MODE") {
            self.submission_mode = Some(SubmissionMode::parse(&v)?);
        }
        if let Some(v) = lookup("TRADEIN_DEFAULT_STATE") {
            self.default_state = Some(v);
        }
        Ok(())
    }
}

/// Resolved runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeInConfig {
    pub api_base_url: String,
    pub auth_key: String,
    pub webhook_url: String,
    pub redirect_url: Option<String>,
    pub submission_mode: SubmissionMode,
    pub default_state: String,
}

impl TradeInConfig {
    /// Load from the config file, then the process environment
    pub fn load() -> Result<Self> {
        let mut file = FileConfig::load()?;
        file.apply_env(|key| std::env::var(key).ok())?;
        Self::resolve(file)
    }

    /// Validate a merged [`FileConfig`] and fill in defaults
    pub fn resolve(file: FileConfig) -> Result<Self> {
        let api_base_url = file
            .api_base_url
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        Url::parse(&api_base_url)
            .map_err(|e| anyhow!("Invalid API base URL '{api_base_url}': {e}"))?;

        let Some(webhook_url) = file.webhook_url.filter(|s| !s.trim().is_empty()) else {
            bail!("No webhook URL configured; set TRADEIN_WEBHOOK_URL");
        };
        Url::parse(&webhook_url)
            .map_err(|e| anyhow!("Invalid webhook URL '{webhook_url}': {e}"))?;

        let auth_key = file.auth_key.unwrap_or_default();
        if auth_key.is_empty() {
            tracing::warn!("No vehicle-data auth key configured; lookups will likely be rejected");
        }

        let default_state = match file.default_state {
            Some(state) => {
                let state = state.trim().to_ascii_uppercase();
                if !STATES.contains(&state.as_str()) {
                    bail!("Unknown default state '{state}'");
                }
                state
            }
            None => STATES[0].to_string(),
        };

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            auth_key,
            webhook_url,
            redirect_url: file.redirect_url.filter(|s| !s.trim().is_empty()),
            submission_mode: file.submission_mode.unwrap_or_default(),
            default_state,
        })
    }
}
