//! Ledger configuration.
//!
//! Defaults reproduce the reference share values. A TOML file may override
//! them, and `DAYWEIGHT_*` environment variables override the file.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable selecting the [`OrderingPolicy`].
pub const ENV_ORDERING: &str = "DAYWEIGHT_ORDERING";
/// Environment variable selecting the share scale (decimal places).
pub const ENV_SHARE_SCALE: &str = "DAYWEIGHT_SHARE_SCALE";

/// Decimal places used for shares unless configured otherwise.
pub const DEFAULT_SHARE_SCALE: u32 = 4;
/// Largest supported share scale.
pub const MAX_SHARE_SCALE: u32 = 18;

/// How the ledger treats an event whose day precedes the latest recorded day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderingPolicy {
    /// Backdated events fail with `NonMonotonicEvent`.
    #[default]
    Reject,
    /// Backdated events are appended as-is. Snapshot totals may then no longer
    /// match the sum of participant weights.
    Permit,
}

impl std::str::FromStr for OrderingPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(OrderingPolicy::Reject),
            "permit" => Ok(OrderingPolicy::Permit),
            other => Err(anyhow!("unknown ordering policy: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub ordering: OrderingPolicy,
    /// Decimal places of computed shares.
    pub share_scale: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            ordering: OrderingPolicy::Reject,
            share_scale: DEFAULT_SHARE_SCALE,
        }
    }
}

impl LedgerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: LedgerConfig =
            toml::from_str(content).context("failed to parse ledger config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read ledger config {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Load `path` when it exists (defaults otherwise), then apply environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_ORDERING) {
            self.ordering = value.parse()?;
        }
        if let Some(value) = lookup(ENV_SHARE_SCALE) {
            self.share_scale = value
                .trim()
                .parse()
                .with_context(|| format!("invalid {ENV_SHARE_SCALE}: {value}"))?;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        if self.share_scale > MAX_SHARE_SCALE {
            return Err(anyhow!(
                "share_scale {} exceeds maximum {}",
                self.share_scale,
                MAX_SHARE_SCALE
            ));
        }
        Ok(())
    }
}
