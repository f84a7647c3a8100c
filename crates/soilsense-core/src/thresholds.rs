//! Nutrient adequacy thresholds and soil saturation banding.
//!
//! This module categorizes the latest sensor sample: each macronutrient is
//! either adequate or low relative to a configurable minimum, and the
//! water-filled pore space derived from soil moisture is banded into a
//! saturation risk level.
//!
//! # Example
//!
//! ```
//! use soilsense_core::{NutrientThresholds, NutrientStatus, saturation_risk, wfps, SaturationRisk};
//!
//! let thresholds = NutrientThresholds::default();
//! assert_eq!(thresholds.status(140.0, thresholds.nitrogen_min), NutrientStatus::Low);
//!
//! // 45% moisture saturates 90% of pore space
//! assert_eq!(saturation_risk(wfps(45.0)), SaturationRisk::High);
//! ```

use serde::{Deserialize, Serialize};

use soilsense_types::SensorSample;

/// Adequacy category for a single macronutrient reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NutrientStatus {
    /// At or above the adequacy minimum.
    Adequate,
    /// Below the adequacy minimum; trending toward deficiency.
    Low,
}

/// Saturation risk band for the current water-filled pore space.
///
/// This bands the *current* WFPS (>85 high, >70 medium). The forecast peak
/// after rainfall uses the separate, coarser [`crate::waterlogging::RiskBand`]
/// scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaturationRisk {
    Low,
    Medium,
    High,
}

/// Per-nutrient adequacy of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpkStatus {
    pub nitrogen: NutrientStatus,
    pub phosphorus: NutrientStatus,
    pub potassium: NutrientStatus,
}

/// Minimum adequate macronutrient levels, in mg/kg.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutrientThresholds {
    /// Minimum adequate nitrogen.
    pub nitrogen_min: f64,
    /// Minimum adequate phosphorus.
    pub phosphorus_min: f64,
    /// Minimum adequate potassium.
    pub potassium_min: f64,
}

impl Default for NutrientThresholds {
    fn default() -> Self {
        Self {
            nitrogen_min: 150.0,
            phosphorus_min: 30.0,
            potassium_min: 200.0,
        }
    }
}

impl NutrientThresholds {
    /// Evaluate each macronutrient of a sample against its minimum.
    pub fn evaluate(&self, sample: &SensorSample) -> NpkStatus {
        NpkStatus {
            nitrogen: self.status(sample.nitrogen, self.nitrogen_min),
            phosphorus: self.status(sample.phosphorus, self.phosphorus_min),
            potassium: self.status(sample.potassium, self.potassium_min),
        }
    }

    /// Categorize one reading against one minimum.
    pub fn status(&self, value: f64, min: f64) -> NutrientStatus {
        if value >= min {
            NutrientStatus::Adequate
        } else {
            NutrientStatus::Low
        }
    }
}

/// Water-filled pore space in percent, derived from volumetric moisture.
///
/// Assumes 50% porosity, so a moisture reading of 50% fills the pore space
/// completely.
#[must_use]
pub fn wfps(soil_moisture: f64) -> f64 {
    (soil_moisture / 100.0) * 2.0 * 100.0
}

/// Band a current WFPS value into a saturation risk level.
#[must_use]
pub fn saturation_risk(wfps: f64) -> SaturationRisk {
    if wfps > 85.0 {
        SaturationRisk::High
    } else if wfps > 70.0 {
        SaturationRisk::Medium
    } else {
        SaturationRisk::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn sample_with_npk(n: f64, p: f64, k: f64) -> SensorSample {
        SensorSample {
            timestamp: OffsetDateTime::from_unix_timestamp(1_750_000_000).unwrap(),
            nitrogen: n,
            phosphorus: p,
            potassium: k,
            soil_moisture: 40.0,
            ph: 6.5,
            ec: 1.2,
            soil_temp: 26.0,
            air_temp: 28.0,
            humidity: 75.0,
            light_intensity: 5000,
        }
    }

    #[test]
    fn test_default_thresholds_adequate_sample() {
        let t = NutrientThresholds::default();
        let status = t.evaluate(&sample_with_npk(210.0, 52.0, 360.0));

        assert_eq!(status.nitrogen, NutrientStatus::Adequate);
        assert_eq!(status.phosphorus, NutrientStatus::Adequate);
        assert_eq!(status.potassium, NutrientStatus::Adequate);
    }

    #[test]
    fn test_threshold_boundaries() {
        let t = NutrientThresholds::default();

        // At the minimum counts as adequate
        assert_eq!(t.status(150.0, t.nitrogen_min), NutrientStatus::Adequate);
        assert_eq!(t.status(149.9, t.nitrogen_min), NutrientStatus::Low);
        assert_eq!(t.status(30.0, t.phosphorus_min), NutrientStatus::Adequate);
        assert_eq!(t.status(200.0, t.potassium_min), NutrientStatus::Adequate);
        assert_eq!(t.status(199.9, t.potassium_min), NutrientStatus::Low);
    }

    #[test]
    fn test_mixed_npk_status() {
        let t = NutrientThresholds::default();
        let status = t.evaluate(&sample_with_npk(140.0, 52.0, 360.0));

        assert_eq!(status.nitrogen, NutrientStatus::Low);
        assert_eq!(status.phosphorus, NutrientStatus::Adequate);
        assert_eq!(status.potassium, NutrientStatus::Adequate);
    }

    #[test]
    fn test_wfps_doubles_moisture() {
        assert_eq!(wfps(40.0), 80.0);
        assert_eq!(wfps(50.0), 100.0);
        assert_eq!(wfps(0.0), 0.0);
    }

    #[test]
    fn test_saturation_risk_banding() {
        assert_eq!(saturation_risk(90.0), SaturationRisk::High);
        assert_eq!(saturation_risk(85.0), SaturationRisk::Medium); // boundary is exclusive
        assert_eq!(saturation_risk(75.0), SaturationRisk::Medium);
        assert_eq!(saturation_risk(70.0), SaturationRisk::Low);
        assert_eq!(saturation_risk(50.0), SaturationRisk::Low);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_value(NutrientStatus::Adequate).unwrap(),
            "adequate"
        );
        assert_eq!(serde_json::to_value(SaturationRisk::Medium).unwrap(), "medium");
    }
}
