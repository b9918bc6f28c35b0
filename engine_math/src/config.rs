//! Scenario runner configuration.
//!
//! Loaded from JSON strings (file IO left to the caller). Missing fields take
//! their defaults, so `{}` is a valid config.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Directory the JSON and text reports are written to.
    #[serde(default = "default_report_dir")]
    pub report_dir: String,
    /// Seed for sampled property checks.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Random values drawn per property.
    #[serde(default = "default_samples")]
    pub samples: usize,
    /// Absolute tolerance for approximate comparisons.
    #[serde(default = "default_tolerance")]
    pub tolerance: f32,
}

fn default_report_dir() -> String {
    "target/reports".to_string()
}

fn default_seed() -> u64 {
    0x5EED
}

fn default_samples() -> usize {
    64
}

fn default_tolerance() -> f32 {
    1.0e-4
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            report_dir: default_report_dir(),
            seed: default_seed(),
            samples: default_samples(),
            tolerance: default_tolerance(),
        }
    }
}

impl RunnerConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}
