//! Linear macronutrient projections and the fertilization recommendation.
//!
//! Projects the latest N/P/K readings 7 and 14 days forward using fixed
//! daily depletion rates, clamped to the nutrient floors, and derives a
//! fertilize/monitor recommendation from the 7-day point.

use serde::Serialize;

use soilsense_types::{SensorSample, NITROGEN_FLOOR, PHOSPHORUS_FLOOR, POTASSIUM_FLOOR};

use crate::round1;
use crate::thresholds::NutrientThresholds;

/// Daily nitrogen depletion used for projections, in mg/kg.
pub const NITROGEN_DEPLETION_PER_DAY: f64 = 4.0;
/// Daily phosphorus depletion used for projections, in mg/kg.
pub const PHOSPHORUS_DEPLETION_PER_DAY: f64 = 1.8;
/// Daily potassium depletion used for projections, in mg/kg.
pub const POTASSIUM_DEPLETION_PER_DAY: f64 = 3.2;

const FERTILIZER_PRODUCT: &str = "NPK 20-10-10";
const FERTILIZER_AMOUNT_KG: u32 = 45;
const EARLY_ACTION_SAVINGS: u32 = 1050;

/// N/P/K levels at one point in time, in mg/kg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NpkLevels {
    #[serde(rename = "N")]
    pub nitrogen: f64,
    #[serde(rename = "P")]
    pub phosphorus: f64,
    #[serde(rename = "K")]
    pub potassium: f64,
}

/// What to do about the projected nutrient trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FertilizerAction {
    Fertilize,
    Monitor,
}

/// Fertilization recommendation accompanying the projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FertilizerAdvice {
    pub action: FertilizerAction,
    pub timing: &'static str,
    pub fertilizer_type: &'static str,
    pub amount_kg: u32,
    pub reason: String,
    /// Savings from fertilizing on schedule instead of after visible
    /// deficiency.
    pub cost_savings: u32,
}

/// NPK projection for the next two weeks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NpkForecast {
    pub current: NpkLevels,
    #[serde(rename = "7_days")]
    pub in_7_days: NpkLevels,
    #[serde(rename = "14_days")]
    pub in_14_days: NpkLevels,
    pub recommendation: FertilizerAdvice,
}

/// Project NPK forward from the current sample.
///
/// The recommendation switches to [`FertilizerAction::Fertilize`] as soon as
/// any 7-day projection falls below its adequacy minimum. With the default
/// thresholds only nitrogen can trigger this: the phosphorus and potassium
/// minimums coincide with their generation floors, so their projections
/// never dip below.
#[must_use]
pub fn forecast(sample: &SensorSample, thresholds: &NutrientThresholds) -> NpkForecast {
    let in_7_days = project(sample, 7.0);
    let in_14_days = project(sample, 14.0);

    let needs_fertilizer = in_7_days.nitrogen < thresholds.nitrogen_min
        || in_7_days.phosphorus < thresholds.phosphorus_min
        || in_7_days.potassium < thresholds.potassium_min;

    let reason = if in_7_days.nitrogen < thresholds.nitrogen_min {
        format!(
            "Nitrogen will drop below {} mg/kg threshold",
            thresholds.nitrogen_min
        )
    } else {
        "Nutrient levels adequate".to_string()
    };

    let recommendation = if needs_fertilizer {
        FertilizerAdvice {
            action: FertilizerAction::Fertilize,
            timing: "within 5-7 days",
            fertilizer_type: FERTILIZER_PRODUCT,
            amount_kg: FERTILIZER_AMOUNT_KG,
            reason,
            cost_savings: EARLY_ACTION_SAVINGS,
        }
    } else {
        FertilizerAdvice {
            action: FertilizerAction::Monitor,
            timing: "no action needed",
            fertilizer_type: "N/A",
            amount_kg: 0,
            reason,
            cost_savings: EARLY_ACTION_SAVINGS,
        }
    };

    NpkForecast {
        current: NpkLevels {
            nitrogen: round1(sample.nitrogen),
            phosphorus: round1(sample.phosphorus),
            potassium: round1(sample.potassium),
        },
        in_7_days: rounded(in_7_days),
        in_14_days: rounded(in_14_days),
        recommendation,
    }
}

fn project(sample: &SensorSample, days: f64) -> NpkLevels {
    NpkLevels {
        nitrogen: (sample.nitrogen - NITROGEN_DEPLETION_PER_DAY * days).max(NITROGEN_FLOOR),
        phosphorus: (sample.phosphorus - PHOSPHORUS_DEPLETION_PER_DAY * days).max(PHOSPHORUS_FLOOR),
        potassium: (sample.potassium - POTASSIUM_DEPLETION_PER_DAY * days).max(POTASSIUM_FLOOR),
    }
}

fn rounded(levels: NpkLevels) -> NpkLevels {
    NpkLevels {
        nitrogen: round1(levels.nitrogen),
        phosphorus: round1(levels.phosphorus),
        potassium: round1(levels.potassium),
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
    fn test_projection_arithmetic() {
        let forecast = forecast(
            &sample_with_npk(210.0, 52.0, 360.0),
            &NutrientThresholds::default(),
        );

        assert_eq!(forecast.current.nitrogen, 210.0);
        assert_eq!(forecast.in_7_days.nitrogen, 182.0); // 210 - 4*7
        assert_eq!(forecast.in_7_days.phosphorus, 39.4); // 52 - 1.8*7
        assert_eq!(forecast.in_7_days.potassium, 337.6); // 360 - 3.2*7
        assert_eq!(forecast.in_14_days.nitrogen, 154.0);
        assert_eq!(forecast.in_14_days.phosphorus, 30.0); // floored: 52 - 25.2 < 30
        assert_eq!(forecast.in_14_days.potassium, 315.2);
    }

    #[test]
    fn test_projection_respects_floors() {
        let forecast = forecast(
            &sample_with_npk(125.0, 32.0, 205.0),
            &NutrientThresholds::default(),
        );

        assert_eq!(forecast.in_7_days.nitrogen, NITROGEN_FLOOR);
        assert_eq!(forecast.in_7_days.phosphorus, PHOSPHORUS_FLOOR);
        assert_eq!(forecast.in_7_days.potassium, POTASSIUM_FLOOR);
        assert_eq!(forecast.in_14_days.nitrogen, NITROGEN_FLOOR);
    }

    #[test]
    fn test_low_nitrogen_triggers_fertilize() {
        let forecast = forecast(
            &sample_with_npk(140.0, 52.0, 360.0),
            &NutrientThresholds::default(),
        );

        // 140 - 28 = 112, floored to 120, still below the 150 minimum
        assert_eq!(forecast.in_7_days.nitrogen, 120.0);
        assert_eq!(forecast.recommendation.action, FertilizerAction::Fertilize);
        assert_eq!(forecast.recommendation.timing, "within 5-7 days");
        assert_eq!(forecast.recommendation.fertilizer_type, "NPK 20-10-10");
        assert_eq!(forecast.recommendation.amount_kg, 45);
        assert_eq!(
            forecast.recommendation.reason,
            "Nitrogen will drop below 150 mg/kg threshold"
        );
    }

    #[test]
    fn test_adequate_levels_recommend_monitor() {
        let forecast = forecast(
            &sample_with_npk(210.0, 52.0, 360.0),
            &NutrientThresholds::default(),
        );

        assert_eq!(forecast.recommendation.action, FertilizerAction::Monitor);
        assert_eq!(forecast.recommendation.timing, "no action needed");
        assert_eq!(forecast.recommendation.fertilizer_type, "N/A");
        assert_eq!(forecast.recommendation.amount_kg, 0);
        assert_eq!(forecast.recommendation.reason, "Nutrient levels adequate");
        assert_eq!(forecast.recommendation.cost_savings, 1050);
    }

    #[test]
    fn test_fertilize_boundary_at_seven_day_projection() {
        // 178 - 28 = 150: exactly at the minimum is not a breach
        let at_minimum = forecast(
            &sample_with_npk(178.0, 52.0, 360.0),
            &NutrientThresholds::default(),
        );
        assert_eq!(at_minimum.recommendation.action, FertilizerAction::Monitor);

        let below = forecast(
            &sample_with_npk(177.9, 52.0, 360.0),
            &NutrientThresholds::default(),
        );
        assert_eq!(below.recommendation.action, FertilizerAction::Fertilize);
    }

    #[test]
    fn test_forecast_wire_shape() {
        let value = serde_json::to_value(forecast(
            &sample_with_npk(210.0, 52.0, 360.0),
            &NutrientThresholds::default(),
        ))
        .unwrap();

        assert_eq!(value["current"]["N"], 210.0);
        assert_eq!(value["7_days"]["P"], 39.4);
        assert_eq!(value["14_days"]["K"], 315.2);
        assert_eq!(value["recommendation"]["action"], "monitor");
        assert_eq!(value["recommendation"]["cost_savings"], 1050);
    }
}
