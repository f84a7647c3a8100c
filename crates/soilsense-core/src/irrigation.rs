//! Moisture decay projections and the irrigation recommendation.
//!
//! Soil moisture is projected forward by fixed multiplicative decay factors
//! per horizon; irrigation is recommended when the 7-day point falls below
//! the crop stress threshold.

use serde::Serialize;

use soilsense_types::SensorSample;

use crate::round1;

/// Moisture percentage below which crops are considered stressed.
pub const STRESS_THRESHOLD: f64 = 30.0;

/// Optimal moisture range reported alongside the current status.
pub const OPTIMAL_RANGE: &str = "40-60%";

// Decay per horizon; a 45% reading lands near 28% at the 7-day point.
const DECAY_1H: f64 = 0.98;
const DECAY_6H: f64 = 0.94;
const DECAY_24H: f64 = 0.84;
const DECAY_3D: f64 = 0.72;
const DECAY_7D: f64 = 0.63;

/// Moisture band of the current sample relative to the optimal range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoistureStatus {
    /// Inside the 40-60% range.
    Optimal,
    /// Below 40%.
    Low,
    /// Above 60%.
    High,
}

/// Current moisture and its banding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurrentMoisture {
    pub soil_moisture: f64,
    pub status: MoistureStatus,
    pub range: &'static str,
}

/// Projected moisture at the fixed horizons, each rounded to 1 decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoistureProjection {
    #[serde(rename = "1h")]
    pub in_1_hour: f64,
    #[serde(rename = "6h")]
    pub in_6_hours: f64,
    #[serde(rename = "24h")]
    pub in_24_hours: f64,
    #[serde(rename = "3d")]
    pub in_3_days: f64,
    #[serde(rename = "7d")]
    pub in_7_days: f64,
}

/// Whether to irrigate now or keep watching the trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IrrigationAction {
    Irrigate,
    Monitor,
}

/// Irrigation recommendation with its fixed cost model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrrigationAdvice {
    pub action: IrrigationAction,
    pub timing: &'static str,
    pub reason: String,
    pub water_volume_per_m2: f64,
    pub water_volume_hectare: u32,
    pub optimal_time: &'static str,
    pub cost_traditional: u32,
    pub cost_optimized: u32,
    pub savings: u32,
}

/// Cross-check against the waterlogging outlook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IrrigationCoordination {
    pub waterlogging_safe: bool,
    pub message: &'static str,
}

/// Irrigation forecast for the current sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrrigationOutlook {
    pub current_status: CurrentMoisture,
    pub predictions: MoistureProjection,
    pub trend: &'static str,
    pub confidence: &'static str,
    pub recommendation: IrrigationAdvice,
    pub coordination: IrrigationCoordination,
}

/// Project moisture decay and recommend irrigation timing.
#[must_use]
pub fn forecast(sample: &SensorSample) -> IrrigationOutlook {
    let moisture = sample.soil_moisture;

    let predictions = MoistureProjection {
        in_1_hour: round1(moisture * DECAY_1H),
        in_6_hours: round1(moisture * DECAY_6H),
        in_24_hours: round1(moisture * DECAY_24H),
        in_3_days: round1(moisture * DECAY_3D),
        in_7_days: round1(moisture * DECAY_7D),
    };

    // Compared after rounding, matching the reported value
    let needs_irrigation = predictions.in_7_days < STRESS_THRESHOLD;

    let status = if (40.0..=60.0).contains(&moisture) {
        MoistureStatus::Optimal
    } else if moisture < 40.0 {
        MoistureStatus::Low
    } else {
        MoistureStatus::High
    };

    IrrigationOutlook {
        current_status: CurrentMoisture {
            soil_moisture: moisture,
            status,
            range: OPTIMAL_RANGE,
        },
        predictions,
        trend: "decreasing",
        confidence: "±2.1%",
        recommendation: IrrigationAdvice {
            action: if needs_irrigation {
                IrrigationAction::Irrigate
            } else {
                IrrigationAction::Monitor
            },
            timing: if needs_irrigation { "within 24 hours" } else { "N/A" },
            reason: format!(
                "Moisture will drop to {:.1}% in 7 days (below 30% stress threshold)",
                predictions.in_7_days
            ),
            water_volume_per_m2: 35.4,
            water_volume_hectare: 354_000,
            optimal_time: "6:00-8:00 AM (low evaporation)",
            cost_traditional: 1680,
            cost_optimized: 1200,
            savings: 480,
        },
        coordination: IrrigationCoordination {
            waterlogging_safe: true,
            message: "Safe to irrigate - no waterlogging risk detected",
        },
    }
}
