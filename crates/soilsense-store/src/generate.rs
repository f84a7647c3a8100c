//! Synthetic dataset generation.
//!
//! Everything the store serves is generated here, once, at construction: 30
//! days of hourly sensor samples, 90 days of daily pH readings, the active
//! alerts, and the seed irrigation and fertilization histories. All
//! randomness flows through the caller-supplied [`Rng`], so a seeded
//! generator reproduces the dataset exactly.

use rand::Rng;
use time::{Duration, OffsetDateTime};

use soilsense_types::{
    Alert, AlertKind, AlertSeverity, FertilizationEvent, IrrigationEvent, PhEvent, PhSample,
    SensorSample, NITROGEN_FLOOR, PHOSPHORUS_FLOOR, POTASSIUM_FLOOR,
};

use crate::{round1, round2};

/// Number of hourly sensor samples (30 days of history).
pub const SENSOR_SAMPLE_COUNT: usize = 720;

/// Number of daily pH samples.
pub const PH_SAMPLE_COUNT: usize = 720 / 8;

/// Hour index at which the simulated fertilization lifts the baselines
/// (12 days before the end of the window).
pub const FERTILIZATION_HOUR: usize = 432;

// Window-start baselines.
const NITROGEN_BASE: f64 = 210.0;
const PHOSPHORUS_BASE: f64 = 52.0;
const POTASSIUM_BASE: f64 = 360.0;
const MOISTURE_BASE: f64 = 40.0;

// Hourly depletion; about 4 / 1.8 / 3.2 mg/kg per day.
const NITROGEN_DEPLETION_PER_HOUR: f64 = 0.167;
const PHOSPHORUS_DEPLETION_PER_HOUR: f64 = 0.075;
const POTASSIUM_DEPLETION_PER_HOUR: f64 = 0.133;

// Baseline lift applied at the fertilization hour.
const NITROGEN_BUMP: f64 = 80.0;
const PHOSPHORUS_BUMP: f64 = 25.0;
const POTASSIUM_BUMP: f64 = 60.0;

/// Generate the hourly sensor series for the 30 days ending at `anchor`.
///
/// Sample `i` is timestamped `anchor - 30 days + i hours`, so the newest
/// sample sits one hour before the anchor. Nutrients deplete linearly from
/// their baselines, reset to lifted baselines at the fertilization hour, and
/// never fall below the floors; the remaining fields are baseline plus
/// uniform noise. Values are rounded here, once.
pub fn sensor_series<R: Rng + ?Sized>(anchor: OffsetDateTime, rng: &mut R) -> Vec<SensorSample> {
    let window_start = anchor - Duration::days(30);

    let mut nitrogen_base = NITROGEN_BASE;
    let mut phosphorus_base = PHOSPHORUS_BASE;
    let mut potassium_base = POTASSIUM_BASE;

    let mut samples = Vec::with_capacity(SENSOR_SAMPLE_COUNT);
    for i in 0..SENSOR_SAMPLE_COUNT {
        let timestamp = window_start + Duration::hours(i as i64);

        if i == FERTILIZATION_HOUR {
            nitrogen_base += NITROGEN_BUMP;
            phosphorus_base += PHOSPHORUS_BUMP;
            potassium_base += POTASSIUM_BUMP;
        }

        // Hours since the window start, or since the fertilization reset.
        let offset = if i < FERTILIZATION_HOUR {
            i
        } else {
            i - FERTILIZATION_HOUR
        };
        let elapsed = offset as f64;

        let nitrogen = (nitrogen_base - NITROGEN_DEPLETION_PER_HOUR * elapsed).max(NITROGEN_FLOOR);
        let phosphorus =
            (phosphorus_base - PHOSPHORUS_DEPLETION_PER_HOUR * elapsed).max(PHOSPHORUS_FLOOR);
        let potassium =
            (potassium_base - POTASSIUM_DEPLETION_PER_HOUR * elapsed).max(POTASSIUM_FLOOR);

        let daylight = (6..=18).contains(&timestamp.hour());
        let light_intensity = if daylight {
            rng.random_range(3000..=8000)
        } else {
            rng.random_range(0..=100)
        };

        samples.push(SensorSample {
            timestamp,
            nitrogen: round1(nitrogen),
            phosphorus: round1(phosphorus),
            potassium: round1(potassium),
            soil_moisture: round1(MOISTURE_BASE + rng.random_range(-10.0..=15.0)),
            ph: round1(6.5 + rng.random_range(-0.3..=0.3)),
            ec: round2(1.2 + rng.random_range(-0.2..=0.2)),
            soil_temp: round1(26.0 + rng.random_range(-2.0..=2.0)),
            air_temp: round1(28.0 + rng.random_range(-3.0..=3.0)),
            humidity: round1(75.0 + rng.random_range(-10.0..=10.0)),
            light_intensity,
        });
    }

    samples
}

/// Generate the daily pH series for the 90 days ending at `anchor`,
/// oldest first.
///
/// The series drifts down toward today's 6.8: a slow decline far back and a
/// steeper one over the last 12 days, after the urea fertilization tagged at
/// `days_ago == 12`. The lime application at `days_ago == 60` is a marker
/// only and does not bend the curve.
pub fn ph_series<R: Rng + ?Sized>(anchor: OffsetDateTime, rng: &mut R) -> Vec<PhSample> {
    (0..PH_SAMPLE_COUNT)
        .rev()
        .map(|days_ago| {
            let base = if days_ago <= 12 {
                6.8 + days_ago as f64 * 0.0035
            } else {
                6.84 + (days_ago - 12) as f64 * 0.002
            };

            let event_type = match days_ago {
                12 => Some(PhEvent::Fertilization),
                60 => Some(PhEvent::LimeApplication),
                _ => None,
            };

            PhSample {
                timestamp: anchor - Duration::days(days_ago as i64),
                ph: round2(base + rng.random_range(-0.02..=0.02)),
                event_type,
            }
        })
        .collect()
}

/// The fixed active alerts, timestamped at the anchor.
pub fn alerts(anchor: OffsetDateTime) -> Vec<Alert> {
    vec![
        Alert {
            id: "alert_001".to_string(),
            kind: AlertKind::WaterloggingRisk,
            severity: AlertSeverity::High,
            message: "Heavy rain in 48h - waterlogging likely".to_string(),
            timestamp: anchor,
        },
        Alert {
            id: "alert_002".to_string(),
            kind: AlertKind::NpkLevel,
            severity: AlertSeverity::Medium,
            message: "Nitrogen will drop below threshold in 5-7 days".to_string(),
            timestamp: anchor,
        },
    ]
}

/// Seed irrigation events: five, every 6 days starting 2 days back, newest
/// first.
pub fn irrigation_seed<R: Rng + ?Sized>(
    anchor: OffsetDateTime,
    rng: &mut R,
) -> Vec<IrrigationEvent> {
    (0..5)
        .map(|i| {
            let days_ago = i64::from(i) * 6 + 2;
            let volume: u32 = rng.random_range(30000..=50000);

            IrrigationEvent {
                id: format!("irr_{i}"),
                date: anchor - Duration::days(days_ago),
                volume_liters: f64::from(volume),
                moisture_before: round1(rng.random_range(25.0..=30.0)),
                moisture_after: round1(rng.random_range(55.0..=65.0)),
                cost: round2(f64::from(volume) * 0.035),
            }
        })
        .collect()
}

/// Seed fertilization records, newest first.
pub fn fertilization_seed(anchor: OffsetDateTime) -> Vec<FertilizationEvent> {
    vec![
        FertilizationEvent {
            id: "fert_001".to_string(),
            date: anchor - Duration::days(12),
            product: "NPK 20-10-10".to_string(),
            amount_kg: 50,
            cost: 1200,
        },
        FertilizationEvent {
            id: "fert_002".to_string(),
            date: anchor - Duration::days(42),
            product: "NPK 15-15-15".to_string(),
            amount_kg: 45,
            cost: 1100,
        },
    ]
}
