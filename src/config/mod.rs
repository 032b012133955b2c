// ABOUTME: Configuration management for shieldquote
// Handles submission endpoint, wizard timing and session storage settings

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::wizard::{PromotionRules, WizardTiming};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application version
    #[serde(default = "default_version")]
    pub version: String,

    /// Lead submission settings
    #[serde(default)]
    pub submission: SubmissionConfig,

    /// Wizard timing
    #[serde(default)]
    pub wizard: WizardConfig,

    /// Session persistence
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionConfig {
    /// Lead intake URL. Submissions fail with an alert until this is set.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// `source` field sent with every lead
    #[serde(default = "default_source")]
    pub source: String,

    /// `formType` field sent with every lead
    #[serde(default = "default_form_type")]
    pub form_type: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            source: default_source(),
            form_type: default_form_type(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SubmissionConfig {
    /// Parsed endpoint, if one is configured
    pub fn endpoint_url(&self) -> Result<Option<Url>> {
        self.endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(|e| Url::parse(e).with_context(|| format!("Invalid submission endpoint: {e}")))
            .transpose()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Delay before offers are shown on the analysis step (default: 1500ms)
    #[serde(default = "default_analysis_delay_ms")]
    pub analysis_delay_ms: u64,

    /// Delay before an offer-less analysis step moves on (default: 2000ms)
    #[serde(default = "default_auto_advance_delay_ms")]
    pub auto_advance_delay_ms: u64,

    /// First model year that counts as a new vehicle (default: last year)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_vehicle_year: Option<u16>,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            analysis_delay_ms: default_analysis_delay_ms(),
            auto_advance_delay_ms: default_auto_advance_delay_ms(),
            new_vehicle_year: None,
        }
    }
}

impl WizardConfig {
    pub fn timing(&self) -> WizardTiming {
        WizardTiming {
            analysis_delay: Duration::from_millis(self.analysis_delay_ms),
            auto_advance_delay: Duration::from_millis(self.auto_advance_delay_ms),
        }
    }

    pub fn promotion_rules(&self) -> PromotionRules {
        match self.new_vehicle_year {
            Some(year) => PromotionRules { new_vehicle_year: year },
            None => PromotionRules::current(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Session snapshot path (default: ~/.shieldquote/session.json)
    #[serde(default)]
    pub session_file: Option<PathBuf>,
}

impl StorageConfig {
    pub fn session_path(&self) -> Result<PathBuf> {
        match &self.session_file {
            Some(path) => Ok(path.clone()),
            None => crate::wizard::FileSessionStorage::default_path(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            submission: SubmissionConfig::default(),
            wizard: WizardConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_source() -> String {
    "website".to_string()
}

fn default_form_type() -> String {
    "multi-service-quote".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_analysis_delay_ms() -> u64 {
    1500
}

fn default_auto_advance_delay_ms() -> u64 {
    2000
}

impl AppConfig {
    /// Load configuration from the default location, or defaults when absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        // Fail early on a malformed endpoint rather than at submit time
        config.submission.endpoint_url()?;

        Ok(config)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    /// Get the default config file path (~/.shieldquote/config.toml)
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config.toml"))
    }

    /// Get the base shieldquote directory
    pub fn base_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".shieldquote"))
    }
}
