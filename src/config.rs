//! Configuration loading from TOML.
//!
//! Reads `config.toml` into strongly-typed structs. Every section and
//! field has a default, so a partial file (or no file at all) still yields
//! a usable configuration.

use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineSettings,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

/// Scalar engine tunables. Lookup tables stay in the per-stage configs.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    /// Target ROI (fraction) when the request omits `targetRoiPct`.
    pub default_target_roi: Decimal,
    /// Bidder count assumed when there is no auction history.
    pub default_bidders: Decimal,
    /// Environmental risk strictly above this discounts the ceiling.
    pub environmental_high_risk: Decimal,
    pub min_win_probability: Decimal,
    pub max_win_probability: Decimal,
}

impl EngineSettings {
    /// Reject tunables the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.default_target_roi.is_sign_negative() && !self.default_target_roi.is_zero() {
            bail!("engine.default_target_roi must not be negative: {}", self.default_target_roi);
        }
        if self.default_bidders.is_sign_negative() && !self.default_bidders.is_zero() {
            bail!("engine.default_bidders must not be negative: {}", self.default_bidders);
        }
        for (name, p) in [
            ("min_win_probability", self.min_win_probability),
            ("max_win_probability", self.max_win_probability),
        ] {
            if p < Decimal::ZERO || p > Decimal::ONE {
                bail!("engine.{name} must be within [0, 1]: {p}");
            }
        }
        if self.min_win_probability > self.max_win_probability {
            bail!(
                "engine.min_win_probability ({}) exceeds engine.max_win_probability ({})",
                self.min_win_probability,
                self.max_win_probability
            );
        }
        Ok(())
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            default_target_roi: dec!(0.50),
            default_bidders: dec!(3),
            environmental_high_risk: dec!(7),
            min_win_probability: dec!(0.05),
            max_win_probability: dec!(0.95),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "bidstrat=info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub pretty: bool,
    /// Write every result here unless `--out` overrides it.
    pub report_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            report_path: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(contents)?;
        cfg.engine.validate()?;
        Ok(cfg)
    }

    /// Like `load`, but a missing file yields the defaults.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }
}
