//! File-based configuration for related assets and indicator thresholds.
//!
//! A missing or malformed `fx_config.json` is not fatal: the scanner just
//! runs with an empty asset list, matching the collector's tolerance for
//! absent credentials.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorParams {
    #[serde(default = "default_lookback")]
    pub lookback_period_days: u32,
    #[serde(default = "default_high")]
    pub momentum_threshold_high: f64,
    #[serde(default = "default_low")]
    pub momentum_threshold_low: f64,
}

fn default_lookback() -> u32 {
    180
}
fn default_high() -> f64 {
    70.0
}
fn default_low() -> f64 {
    30.0
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            lookback_period_days: default_lookback(),
            momentum_threshold_high: default_high(),
            momentum_threshold_low: default_low(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedAsset {
    pub symbol: String,
    #[serde(default)]
    pub relation: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FxConfig {
    #[serde(default)]
    pub indicators: IndicatorParams,
    /// Assets scanned for momentum extremes next to the primary pair.
    #[serde(default)]
    pub related_assets: Vec<RelatedAsset>,
    /// Reference quotes captured into every snapshot.
    #[serde(default)]
    pub macro_symbols: Vec<RelatedAsset>,
}

impl FxConfig {
    pub fn load(path: &Path) -> FxConfig {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => {
                warn!(path = %path.display(), "config file not found, using defaults");
                return FxConfig::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "config parse error, using defaults");
                FxConfig::default()
            }
        }
    }
}
