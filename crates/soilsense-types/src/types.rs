//! Core types for SoilSense field data.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Floor below which nitrogen never falls, in mg/kg.
///
/// Generation and forecasting both clamp to the floors; a value below one of
/// them on the wire is a bug.
pub const NITROGEN_FLOOR: f64 = 120.0;

/// Floor below which phosphorus never falls, in mg/kg.
pub const PHOSPHORUS_FLOOR: f64 = 30.0;

/// Floor below which potassium never falls, in mg/kg.
pub const POTASSIUM_FLOOR: f64 = 200.0;

/// One hourly sensor reading for the monitored plot.
///
/// Samples are immutable once generated and ordered oldest to newest. All
/// floating-point fields are rounded at generation time (1 decimal, EC 2
/// decimals), so values compare exactly across reads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    /// When the reading was taken (UTC).
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Nitrogen in mg/kg.
    pub nitrogen: f64,
    /// Phosphorus in mg/kg.
    pub phosphorus: f64,
    /// Potassium in mg/kg.
    pub potassium: f64,
    /// Volumetric soil moisture in percent.
    pub soil_moisture: f64,
    /// Soil pH.
    #[serde(rename = "pH")]
    pub ph: f64,
    /// Electrical conductivity in dS/m.
    pub ec: f64,
    /// Soil temperature in degrees Celsius.
    pub soil_temp: f64,
    /// Air temperature in degrees Celsius.
    pub air_temp: f64,
    /// Relative air humidity in percent.
    pub humidity: f64,
    /// Light intensity in lux. Daytime hours read in the thousands,
    /// nighttime near zero.
    pub light_intensity: u32,
}

impl SensorSample {
    /// Look up a reading field by its wire name.
    ///
    /// Returns `None` for names that are not sensor parameters (including
    /// `timestamp`). `light_intensity` is widened to `f64` so every
    /// parameter projects to the same point type.
    ///
    /// # Examples
    ///
    /// ```
    /// use soilsense_types::SensorSample;
    /// use time::OffsetDateTime;
    ///
    /// let sample = SensorSample {
    ///     timestamp: OffsetDateTime::UNIX_EPOCH,
    ///     nitrogen: 210.0,
    ///     phosphorus: 52.0,
    ///     potassium: 360.0,
    ///     soil_moisture: 41.5,
    ///     ph: 6.5,
    ///     ec: 1.2,
    ///     soil_temp: 26.0,
    ///     air_temp: 28.0,
    ///     humidity: 75.0,
    ///     light_intensity: 5400,
    /// };
    ///
    /// assert_eq!(sample.value_of("pH"), Some(6.5));
    /// assert_eq!(sample.value_of("light_intensity"), Some(5400.0));
    /// assert_eq!(sample.value_of("rainfall"), None);
    /// ```
    #[must_use]
    pub fn value_of(&self, parameter: &str) -> Option<f64> {
        match parameter {
            "nitrogen" => Some(self.nitrogen),
            "phosphorus" => Some(self.phosphorus),
            "potassium" => Some(self.potassium),
            "soil_moisture" => Some(self.soil_moisture),
            "pH" => Some(self.ph),
            "ec" => Some(self.ec),
            "soil_temp" => Some(self.soil_temp),
            "air_temp" => Some(self.air_temp),
            "humidity" => Some(self.humidity),
            "light_intensity" => Some(f64::from(self.light_intensity)),
            _ => None,
        }
    }
}

/// One point of a parameter history query: a sample projected down to a
/// single field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// Timestamp of the source sample (UTC).
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// The selected parameter's value, or 0 for unrecognized parameters.
    pub value: f64,
}

/// Field event marker attached to a daily pH sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhEvent {
    /// Urea fertilization; accelerates acidification.
    Fertilization,
    /// Agricultural lime application; historical marker only.
    LimeApplication,
}

/// One daily pH reading.
///
/// Serialized with the `pH` key and an always-present `event_type` that is
/// `null` for untagged days, matching the dashboard wire format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhSample {
    /// When the reading was taken (UTC).
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Soil pH, rounded to 2 decimals.
    #[serde(rename = "pH")]
    pub ph: f64,
    /// Field event on that day, if any.
    pub event_type: Option<PhEvent>,
}

/// Category of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Soil saturation approaching waterlogging.
    WaterloggingRisk,
    /// A macronutrient trending below its adequacy threshold.
    NpkLevel,
}

/// Severity of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
}

/// An active alert for the monitored plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Stable alert identifier, e.g. `alert_001`.
    pub id: String,
    /// Alert category; serialized as `type`.
    #[serde(rename = "type")]
    pub kind: AlertKind,
    /// How urgent the alert is.
    pub severity: AlertSeverity,
    /// Human-readable description.
    pub message: String,
    /// When the alert was raised (UTC).
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// A logged irrigation event.
///
/// The irrigation log is ordered most-recent-first; ids are assigned from a
/// monotonic counter at insertion and never reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationEvent {
    /// Monotonic identifier, e.g. `irr_5`.
    pub id: String,
    /// When the irrigation ran (UTC).
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// Water volume in liters per hectare.
    pub volume_liters: f64,
    /// Soil moisture percentage before irrigation.
    pub moisture_before: f64,
    /// Soil moisture percentage after irrigation.
    pub moisture_after: f64,
    /// Water cost, 2 decimals.
    pub cost: f64,
}

/// Fields accepted when logging an irrigation event.
///
/// Every field is optional; missing ones are defaulted at insertion (volume
/// to 0, cost to `volume × 0.035`, moisture from the current sample).
/// Unrecognized fields in the payload are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct NewIrrigation {
    /// Water volume in liters per hectare.
    pub volume_liters: Option<f64>,
    /// Soil moisture percentage before irrigation.
    pub moisture_before: Option<f64>,
    /// Soil moisture percentage after irrigation.
    pub moisture_after: Option<f64>,
    /// Water cost; computed from volume when absent.
    pub cost: Option<f64>,
}

/// A past fertilization, as shown in the fertilization history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilizationEvent {
    /// Stable identifier, e.g. `fert_001`.
    pub id: String,
    /// When the fertilizer was applied (UTC).
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// Fertilizer product, e.g. `NPK 20-10-10`; serialized as `type`.
    #[serde(rename = "type")]
    pub product: String,
    /// Amount applied in kg.
    pub amount_kg: u32,
    /// Application cost.
    pub cost: u32,
}
