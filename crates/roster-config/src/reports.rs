//! Reporting configuration.
//!
//! Holds the at-risk GPA threshold. The owner of a [`ReportConfig`] passes
//! the threshold to the at-risk report explicitly; there is no process-wide
//! mutable copy of it.
//!
//! # Environment Variables
//!
//! - `AT_RISK_THRESHOLD`: GPA cutoff below which a record is flagged (default: 2.0)

use thiserror::Error;

pub const DEFAULT_AT_RISK_THRESHOLD: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("Threshold must be between 0.0 and 4.0, got {0}")]
    ThresholdOutOfRange(f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReportConfig {
    at_risk_threshold: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            at_risk_threshold: DEFAULT_AT_RISK_THRESHOLD,
        }
    }
}

impl ReportConfig {
    /// Loads the threshold from `AT_RISK_THRESHOLD`.
    ///
    /// Falls back to the default when the variable is missing, unparseable
    /// or outside `[0.0, 4.0]`.
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var("AT_RISK_THRESHOLD")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .and_then(|v| Self::with_threshold(v).ok())
            .unwrap_or_default()
    }

    pub fn with_threshold(threshold: f64) -> Result<Self, ConfigError> {
        if !(0.0..=4.0).contains(&threshold) {
            return Err(ConfigError::ThresholdOutOfRange(threshold));
        }
        Ok(Self {
            at_risk_threshold: threshold,
        })
    }

    pub fn at_risk_threshold(&self) -> f64 {
        self.at_risk_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold() {
        assert_eq!(ReportConfig::default().at_risk_threshold(), 2.0);
    }

    #[test]
    fn test_threshold_bounds_are_inclusive() {
        assert!(ReportConfig::with_threshold(0.0).is_ok());
        assert!(ReportConfig::with_threshold(4.0).is_ok());
    }

    #[test]
    fn test_threshold_out_of_range_is_rejected() {
        assert_eq!(
            ReportConfig::with_threshold(4.5),
            Err(ConfigError::ThresholdOutOfRange(4.5))
        );
        assert!(ReportConfig::with_threshold(-0.1).is_err());
        assert!(ReportConfig::with_threshold(f64::NAN).is_err());
    }
}
