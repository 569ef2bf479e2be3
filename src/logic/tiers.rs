//! Confidence tiers
//!
//! Buckets the top class probability. Lower bounds are inclusive, so the
//! tiers cover [0, 1] without gaps or overlap.

use crate::models::ConfidenceTier;

/// Tier lower bounds, highest first
pub const VERY_HIGH_THRESHOLD: f64 = 0.90;
pub const HIGH_THRESHOLD: f64 = 0.80;
pub const MEDIUM_THRESHOLD: f64 = 0.60;

impl ConfidenceTier {
    pub fn from_score(confidence: f64) -> Self {
        if confidence >= VERY_HIGH_THRESHOLD {
            ConfidenceTier::VeryHigh
        } else if confidence >= HIGH_THRESHOLD {
            ConfidenceTier::High
        } else if confidence >= MEDIUM_THRESHOLD {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    /// Display label in the service locale
    pub fn label(self) -> &'static str {
        match self {
            ConfidenceTier::VeryHigh => "Muy alta",
            ConfidenceTier::High => "Alta",
            ConfidenceTier::Medium => "Media",
            ConfidenceTier::Low => "Baja",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_bounds_are_closed() {
        assert_eq!(ConfidenceTier::from_score(0.90), ConfidenceTier::VeryHigh);
        assert_eq!(ConfidenceTier::from_score(0.80), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_score(0.60), ConfidenceTier::Medium);
    }

    #[test]
    fn test_just_below_bounds() {
        assert_eq!(ConfidenceTier::from_score(0.8999), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_score(0.7999), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_score(0.5999), ConfidenceTier::Low);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(ConfidenceTier::from_score(0.0), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::from_score(1.0), ConfidenceTier::VeryHigh);
        assert_eq!(ConfidenceTier::from_score(1.0).label(), "Muy alta");
    }
}
