use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ReportConfig;

/// Health status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

impl HealthStatus {
    /// Classify a combined loss percentage against the report thresholds
    pub fn classify(percent: f64, thresholds: &HealthThresholds) -> Self {
        if percent >= thresholds.critical_percent {
            HealthStatus::Critical
        } else if percent >= thresholds.warning_percent {
            HealthStatus::Warning
        } else {
            HealthStatus::Healthy
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Warning => "warning",
            HealthStatus::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Combined loss percentages at which a camera stops being healthy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthThresholds {
    pub warning_percent: f64,
    pub critical_percent: f64,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            warning_percent: 0.1,
            critical_percent: 1.0,
        }
    }
}

impl From<&ReportConfig> for HealthThresholds {
    fn from(config: &ReportConfig) -> Self {
        Self {
            warning_percent: config.warning_percent,
            critical_percent: config.critical_percent,
        }
    }
}
