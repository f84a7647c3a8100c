//! Main store implementation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};

use soilsense_types::{
    Alert, FertilizationEvent, HistoryPoint, IrrigationEvent, NewIrrigation, PhSample,
    SensorSample,
};

use crate::generate;
use crate::round2;

/// In-memory store holding the synthetic dataset.
///
/// All series are generated once at construction around an anchor instant;
/// reads are cheap slices over the generated data. The only mutation is
/// [`SoilStore::log_irrigation`].
pub struct SoilStore {
    anchor: OffsetDateTime,
    samples: Vec<SensorSample>,
    ph_history: Vec<PhSample>,
    alerts: Vec<Alert>,
    fertilizations: Vec<FertilizationEvent>,
    irrigation_log: Vec<IrrigationEvent>,
    next_irrigation_id: u64,
}

impl SoilStore {
    /// Build a store anchored at the current instant with fresh entropy.
    pub fn new() -> Self {
        Self::generate(OffsetDateTime::now_utc(), &mut rand::rng())
    }

    /// Build a store anchored at the current instant from a fixed seed.
    ///
    /// Two stores built from the same seed and anchor hold identical data.
    pub fn with_seed(seed: u64) -> Self {
        Self::generate(OffsetDateTime::now_utc(), &mut StdRng::seed_from_u64(seed))
    }

    /// Generate the full dataset around `anchor` using the supplied
    /// generator.
    pub fn generate<R: Rng + ?Sized>(anchor: OffsetDateTime, rng: &mut R) -> Self {
        let samples = generate::sensor_series(anchor, rng);
        let ph_history = generate::ph_series(anchor, rng);
        let alerts = generate::alerts(anchor);
        let irrigation_log = generate::irrigation_seed(anchor, rng);
        let fertilizations = generate::fertilization_seed(anchor);
        let next_irrigation_id = irrigation_log.len() as u64;

        info!(
            "Generated dataset: {} sensor samples, {} pH readings, {} alerts, {} irrigation events",
            samples.len(),
            ph_history.len(),
            alerts.len(),
            irrigation_log.len()
        );

        Self {
            anchor,
            samples,
            ph_history,
            alerts,
            fertilizations,
            irrigation_log,
            next_irrigation_id,
        }
    }

    /// The instant the dataset was generated around.
    #[must_use]
    pub fn anchor(&self) -> OffsetDateTime {
        self.anchor
    }

    // === Read operations ===

    /// The most recent sensor sample.
    #[must_use]
    pub fn current(&self) -> SensorSample {
        *self
            .samples
            .last()
            .expect("sensor series is generated non-empty")
    }

    /// Time series for one parameter over the trailing `days` days.
    ///
    /// The window is measured back from the anchor, so results are stable
    /// across a process lifetime. Unknown parameter names yield points with
    /// a value of `0.0`. A non-positive window is empty.
    #[must_use]
    pub fn history(&self, parameter: &str, days: i64) -> Vec<HistoryPoint> {
        let cutoff = self.anchor - Duration::days(days);

        self.samples
            .iter()
            .filter(|s| s.timestamp >= cutoff)
            .map(|s| HistoryPoint {
                timestamp: s.timestamp,
                value: s.value_of(parameter).unwrap_or(0.0),
            })
            .collect()
    }

    /// Daily pH readings, oldest first.
    #[must_use]
    pub fn ph_history(&self) -> &[PhSample] {
        &self.ph_history
    }

    /// Active alerts.
    #[must_use]
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Fertilization records, newest first.
    #[must_use]
    pub fn fertilizations(&self) -> &[FertilizationEvent] {
        &self.fertilizations
    }

    /// Irrigation events, newest first.
    #[must_use]
    pub fn irrigation_events(&self) -> &[IrrigationEvent] {
        &self.irrigation_log
    }

    // === Write operations ===

    /// Record a new irrigation event and return it.
    ///
    /// Missing fields are filled in: cost from volume at 0.035 per liter,
    /// moisture-before from the latest sample, moisture-after as a 20-point
    /// rise capped at 85%. Ids continue the `irr_N` sequence and never
    /// repeat, even interleaved with the seeded events.
    pub fn log_irrigation(&mut self, new: NewIrrigation) -> IrrigationEvent {
        let volume = new.volume_liters.unwrap_or(0.0);
        let cost = new.cost.unwrap_or_else(|| round2(volume * 0.035));
        let moisture_before = new
            .moisture_before
            .unwrap_or_else(|| self.current().soil_moisture);
        let moisture_after = new
            .moisture_after
            .unwrap_or_else(|| (moisture_before + 20.0).min(85.0));

        let event = IrrigationEvent {
            id: format!("irr_{}", self.next_irrigation_id),
            date: OffsetDateTime::now_utc(),
            volume_liters: volume,
            moisture_before,
            moisture_after,
            cost,
        };
        self.next_irrigation_id += 1;

        debug!(
            "Logged irrigation {}: {} L at cost {}",
            event.id, event.volume_liters, event.cost
        );

        self.irrigation_log.insert(0, event.clone());
        event
    }
}

impl Default for SoilStore {
    fn default() -> Self {
        Self::new()
    }
}
