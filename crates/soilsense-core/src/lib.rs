//! Agronomy calculations for the SoilSense soil monitoring platform.
//!
//! This crate turns the latest sensor sample into the derived views the
//! dashboard shows: nutrient adequacy, saturation risk, and the forecast
//! panels. Every function here is pure; the synthetic dataset lives in
//! soilsense-store and the HTTP surface in soilsense-service.
//!
//! # Modules
//!
//! - [`thresholds`]: nutrient adequacy banding and water-filled pore space
//! - [`npk`]: 7/14-day macronutrient projection and fertilization advice
//! - [`waterlogging`]: peak-saturation outlook for the forecast rain event
//! - [`irrigation`]: moisture decay projection and irrigation advice
//! - [`ph`]: the static pH outlook
//!
//! All projections are deterministic arithmetic over the input sample; none
//! of them consult history or mutate state.
//!
//! # Example
//!
//! ```
//! use soilsense_core::{npk, NutrientThresholds};
//! use soilsense_types::SensorSample;
//! use time::OffsetDateTime;
//!
//! let sample = SensorSample {
//!     timestamp: OffsetDateTime::UNIX_EPOCH,
//!     nitrogen: 140.0,
//!     phosphorus: 52.0,
//!     potassium: 360.0,
//!     soil_moisture: 45.0,
//!     ph: 6.5,
//!     ec: 1.2,
//!     soil_temp: 26.0,
//!     air_temp: 28.0,
//!     humidity: 75.0,
//!     light_intensity: 5000,
//! };
//!
//! let forecast = npk::forecast(&sample, &NutrientThresholds::default());
//! assert_eq!(forecast.in_7_days.nitrogen, 120.0);
//! ```

pub mod irrigation;
pub mod npk;
pub mod ph;
pub mod thresholds;
pub mod waterlogging;

pub use irrigation::{IrrigationAction, IrrigationOutlook, MoistureStatus};
pub use npk::{FertilizerAction, NpkForecast, NpkLevels};
pub use ph::PhForecast;
pub use thresholds::{
    saturation_risk, wfps, NpkStatus, NutrientStatus, NutrientThresholds, SaturationRisk,
};
pub use waterlogging::{RiskBand, WaterloggingOutlook};

/// Round to 1 decimal, the resolution of every reported reading.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
