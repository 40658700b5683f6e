//! Churn risk classification
//!
//! Buckets a churn probability into the three-tier risk level shown in
//! the user table.

use std::fmt;

/// Probability at or above which a user is high risk
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;

/// Probability at or above which a user is medium risk
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.4;

/// Risk tier derived from the latest churn prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    /// User has not been scored yet
    Unknown,
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Classify a churn probability; `None` means no prediction yet
    pub fn classify(prediction: Option<f64>) -> Self {
        match prediction {
            None => RiskLevel::Unknown,
            Some(p) if p >= HIGH_RISK_THRESHOLD => RiskLevel::High,
            Some(p) if p >= MEDIUM_RISK_THRESHOLD => RiskLevel::Medium,
            Some(_) => RiskLevel::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Unknown => "Unknown",
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_examples() {
        assert_eq!(RiskLevel::classify(Some(0.75)), RiskLevel::High);
        assert_eq!(RiskLevel::classify(Some(0.5)), RiskLevel::Medium);
        assert_eq!(RiskLevel::classify(Some(0.1)), RiskLevel::Low);
        assert_eq!(RiskLevel::classify(None), RiskLevel::Unknown);
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        assert_eq!(RiskLevel::classify(Some(0.7)), RiskLevel::High);
        assert_eq!(RiskLevel::classify(Some(0.4)), RiskLevel::Medium);
        assert_eq!(RiskLevel::classify(Some(0.3999)), RiskLevel::Low);
        assert_eq!(RiskLevel::classify(Some(0.0)), RiskLevel::Low);
        assert_eq!(RiskLevel::classify(Some(1.0)), RiskLevel::High);
    }

    #[test]
    fn test_nan_is_low() {
        assert_eq!(RiskLevel::classify(Some(f64::NAN)), RiskLevel::Low);
    }

    #[test]
    fn test_labels() {
        assert_eq!(RiskLevel::High.to_string(), "High");
        assert_eq!(RiskLevel::Unknown.label(), "Unknown");
    }
}
