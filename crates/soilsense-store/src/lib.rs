//! Synthetic in-memory dataset for the SoilSense demo service.
//!
//! This crate generates and serves the data behind the HTTP API: 30 days of
//! hourly sensor samples, 90 days of daily pH readings, active alerts, and
//! seeded irrigation and fertilization histories. There is no persistence;
//! the dataset lives for the process and is rebuilt on restart.
//!
//! # Features
//!
//! - Deterministic generation from a seed for reproducible demos
//! - Point and windowed range queries over any sensor parameter
//! - Append-only irrigation log with monotonic ids
//!
//! # Example
//!
//! ```
//! use soilsense_store::SoilStore;
//!
//! let store = SoilStore::with_seed(42);
//!
//! let current = store.current();
//! assert!(current.nitrogen >= 120.0);
//!
//! // One week of hourly nitrogen readings
//! let history = store.history("nitrogen", 7);
//! assert_eq!(history.len(), 168);
//! ```

pub mod generate;
mod store;

pub use generate::{PH_SAMPLE_COUNT, SENSOR_SAMPLE_COUNT};
pub use store::SoilStore;

/// Round to one decimal place, as sensor values are reported.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places, for pH and currency values.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round1() {
        assert_eq!(round1(138.023), 138.0);
        assert_eq!(round1(302.677), 302.7);
        assert_eq!(round1(6.25), 6.3);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1400.0), 1400.0);
        assert_eq!(round2(6.8432), 6.84);
        assert_eq!(round2(1.236), 1.24);
    }
}
