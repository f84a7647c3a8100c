//! Shared types for the SoilSense soil monitoring platform.
//!
//! This crate provides the data model used by the synthetic store
//! (soilsense-store), the agronomy layer (soilsense-core), and the HTTP
//! service (soilsense-service).
//!
//! # Features
//!
//! - Sensor sample and pH sample types with dashboard wire names
//! - Irrigation, fertilization, and alert record types
//! - Nutrient floor constants shared by generation and forecasting
//!
//! # Example
//!
//! ```
//! use soilsense_types::{AlertSeverity, NewIrrigation};
//!
//! let payload = NewIrrigation { volume_liters: Some(40000.0), ..Default::default() };
//! assert!(payload.cost.is_none());
//! assert_eq!(serde_json::to_value(AlertSeverity::High).unwrap(), "high");
//! ```

pub mod types;

pub use types::{
    Alert, AlertKind, AlertSeverity, FertilizationEvent, HistoryPoint, IrrigationEvent,
    NewIrrigation, PhEvent, PhSample, SensorSample, NITROGEN_FLOOR, PHOSPHORUS_FLOOR,
    POTASSIUM_FLOOR,
};
