//! Risk factors of a road segment and the scores derived from them
//!
//! The factor set is closed and the coefficients are design constants:
//!
//! ```text
//! total_risk = 0.6 * theft + 0.5 * accident + 0.3 * rain + 0.4 * flood
//! weight     = distance_km * (1 + total_risk)
//! ```

use serde::{Deserialize, Serialize};

pub const THEFT_COEFFICIENT: f64 = 0.6;
pub const ACCIDENT_COEFFICIENT: f64 = 0.5;
pub const RAIN_COEFFICIENT: f64 = 0.3;
pub const FLOOD_COEFFICIENT: f64 = 0.4;

/// Independent per-segment probabilities, each expected in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskFactors {
    pub theft: f64,
    pub accident: f64,
    pub rain: f64,
    pub flood: f64,
}

impl RiskFactors {
    pub fn new(theft: f64, accident: f64, rain: f64, flood: f64) -> Self {
        Self {
            theft,
            accident,
            rain,
            flood,
        }
    }

    /// Named factors in a fixed order
    pub fn factors(&self) -> [(&'static str, f64); 4] {
        [
            ("theft", self.theft),
            ("accident", self.accident),
            ("rain", self.rain),
            ("flood", self.flood),
        ]
    }

    /// Weighted sum of the four factors
    pub fn composite(&self) -> f64 {
        THEFT_COEFFICIENT * self.theft
            + ACCIDENT_COEFFICIENT * self.accident
            + RAIN_COEFFICIENT * self.rain
            + FLOOD_COEFFICIENT * self.flood
    }

    /// First factor that is not a probability (NaN included)
    pub fn out_of_range(&self) -> Option<(&'static str, f64)> {
        self.factors()
            .into_iter()
            .find(|(_, value)| !(0.0..=1.0).contains(value))
    }
}

/// Distance inflated by risk; only used to select paths
pub fn scalarized_weight(distance_km: f64, total_risk: f64) -> f64 {
    distance_km * (1.0 + total_risk)
}
