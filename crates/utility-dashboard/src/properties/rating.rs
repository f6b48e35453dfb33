use std::fmt;

use serde::{Deserialize, Serialize};

/// Four-level label derived from a service score. Variants are declared in
/// ascending order so comparisons follow the ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReliabilityRating {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl ReliabilityRating {
    pub const fn ordered() -> [Self; 4] {
        [Self::Poor, Self::Fair, Self::Good, Self::Excellent]
    }

    /// Thresholds are inclusive on the lower bound. Scores outside `60..=100`
    /// and fractional scores map by the same ladder; NaN is `Poor`.
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::Excellent
        } else if score >= 80.0 {
            Self::Good
        } else if score >= 70.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        }
    }
}

impl fmt::Display for ReliabilityRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn get_reliability_rating(score: f64) -> ReliabilityRating {
    ReliabilityRating::from_score(score)
}
