//! Waterlogging outlook for the forecast rain event.
//!
//! A fixed 25mm rainfall is assumed 48 hours out; the outlook projects the
//! peak water-filled pore space it would produce and bands that peak into a
//! coarse risk level with an action plan.

use serde::Serialize;

use soilsense_types::SensorSample;

use crate::round1;
use crate::thresholds::wfps;

/// Rainfall assumed by the outlook, in mm.
pub const RAINFALL_FORECAST_MM: u32 = 25;
/// Hours until the forecast rain event.
pub const TIME_TO_EVENT_HOURS: u32 = 48;
/// Expected duration of the saturation peak, in hours.
pub const EVENT_DURATION_HOURS: u32 = 12;

const ACTION_PLAN: [&str; 4] = [
    "Cancel irrigation scheduled for tomorrow",
    "Prepare drainage channels",
    "Delay fertilization until soil drains",
    "Monitor field conditions closely",
];

/// Risk band for the projected WFPS peak.
///
/// Coarser than [`crate::thresholds::SaturationRisk`]: the peak can exceed
/// full saturation, so the bands sit at 85 and 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

/// Waterlogging forecast for the next rain event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterloggingOutlook {
    pub current_wfps: f64,
    pub current_moisture: f64,
    pub risk_level: RiskBand,
    pub time_to_event_hours: u32,
    pub peak_wfps_predicted: f64,
    pub duration_hours: u32,
    pub rainfall_forecast_mm: u32,
    pub cause: String,
    pub actions: Vec<&'static str>,
    /// Projected crop loss if the field floods; 0 when the risk is low.
    pub potential_loss: u32,
}

/// Assess waterlogging risk from the current sample.
#[must_use]
pub fn assess(sample: &SensorSample) -> WaterloggingOutlook {
    let current_wfps = wfps(sample.soil_moisture);
    let peak_wfps = current_wfps + f64::from(RAINFALL_FORECAST_MM) * 2.0;

    let risk_level = if peak_wfps > 100.0 {
        RiskBand::High
    } else if peak_wfps > 85.0 {
        RiskBand::Medium
    } else {
        RiskBand::Low
    };

    let actions = match risk_level {
        RiskBand::High | RiskBand::Medium => ACTION_PLAN.to_vec(),
        RiskBand::Low => Vec::new(),
    };

    let potential_loss = match risk_level {
        RiskBand::High => 20000,
        RiskBand::Medium => 10000,
        RiskBand::Low => 0,
    };

    WaterloggingOutlook {
        current_wfps: round1(current_wfps),
        current_moisture: sample.soil_moisture,
        risk_level,
        time_to_event_hours: TIME_TO_EVENT_HOURS,
        peak_wfps_predicted: round1(peak_wfps),
        duration_hours: EVENT_DURATION_HOURS,
        rainfall_forecast_mm: RAINFALL_FORECAST_MM,
        cause: format!("Heavy rain ({RAINFALL_FORECAST_MM}mm) forecasted"),
        actions,
        potential_loss,
    }
}
