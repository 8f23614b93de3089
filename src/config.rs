use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Function Config Schema
// ============================================================================

/// Annotation the host stores a resource's external name under
pub const DEFAULT_EXTERNAL_NAME_ANNOTATION: &str = "crossplane.io/external-name";

/// Settings the composition consults instead of inline literals
///
/// Every field has a default, so an empty or missing config file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionConfig {
    /// How long the host may cache a response, in seconds
    pub ttl_seconds: u64,

    /// Annotation external names are read from and written to
    pub external_name_annotation: String,

    /// Fixed policy applied to every storage account
    pub account: AccountPolicy,
}

impl Default for FunctionConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: declarative::DEFAULT_TTL.as_secs(),
            external_name_annotation: DEFAULT_EXTERNAL_NAME_ANNOTATION.to_string(),
            account: AccountPolicy::default(),
        }
    }
}

/// Storage account defaults that aren't part of the intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountPolicy {
    /// Account tier (e.g., "Standard", "Premium")
    pub tier: String,

    /// Replication class (e.g., "LRS", "GRS")
    pub replication_type: String,

    /// Whether infrastructure encryption at rest is enabled
    pub infrastructure_encryption: bool,
}

impl Default for AccountPolicy {
    fn default() -> Self {
        Self {
            tier: "Standard".to_string(),
            replication_type: "LRS".to_string(),
            infrastructure_encryption: true,
        }
    }
}

impl FunctionConfig {
    /// Load config from `path`, falling back to defaults if it doesn't exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("Config file {} does not exist, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file: {}", path.display()))?;

        let config = Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Invalid TOML format")?;
        config.validate()?;
        Ok(config)
    }

    /// Render the config as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Validate config values
    pub fn validate(&self) -> Result<()> {
        if self.ttl_seconds == 0 {
            bail!("ttl_seconds must be greater than zero");
        }
        if self.external_name_annotation.trim().is_empty() {
            bail!("external_name_annotation cannot be empty");
        }
        if self.account.tier.trim().is_empty() {
            bail!("account.tier cannot be empty");
        }
        if self.account.replication_type.trim().is_empty() {
            bail!("account.replication_type cannot be empty");
        }
        Ok(())
    }

    /// Response TTL
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

// ============================================================================
// Tests
// ============================================================================
