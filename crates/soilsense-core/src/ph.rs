//! Static pH outlook for the monitored plot.
//!
//! The outlook narrates the same slow acidification the generated pH history
//! shows, but it is a fixed payload: it is not recomputed from the history.

use serde::Serialize;

/// Current pH and its qualitative banding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhStatus {
    #[serde(rename = "pH")]
    pub ph: f64,
    pub status: &'static str,
    pub range: &'static str,
    pub trend: &'static str,
    pub buffer_capacity: &'static str,
}

/// Projected pH at the reporting horizons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhProjection {
    #[serde(rename = "7d")]
    pub in_7_days: f64,
    #[serde(rename = "30d")]
    pub in_30_days: f64,
    #[serde(rename = "90d")]
    pub in_90_days: f64,
}

/// Drift rate and its attributed cause.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DriftAnalysis {
    pub rate: f64,
    pub unit: &'static str,
    pub cause: &'static str,
    pub time_to_critical: &'static str,
}

/// Relative nutrient availability at a given pH.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AvailabilityProfile {
    pub nitrogen: &'static str,
    pub phosphorus: &'static str,
    pub potassium: &'static str,
    /// Set only for the acidified scenario.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<&'static str>,
}

/// Availability now versus the acidified what-if.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NutrientAvailability {
    #[serde(rename = "current_pH_6_8")]
    pub at_current: AvailabilityProfile,
    #[serde(rename = "if_pH_drops_to_5_5")]
    pub if_acidified: AvailabilityProfile,
}

/// Monitoring advice for the next weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShortTermAdvice {
    pub action: &'static str,
    pub description: &'static str,
    pub frequency: &'static str,
}

/// Lime contingency if the drift continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MediumTermAdvice {
    pub action: &'static str,
    pub description: &'static str,
    pub amount_kg: u32,
    pub cost: u32,
    pub effect: &'static str,
}

/// Structural fix for the acidification source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LongTermAdvice {
    pub action: &'static str,
    pub description: &'static str,
    pub reason: &'static str,
}

/// Advice at the three planning horizons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhRecommendations {
    pub short_term: ShortTermAdvice,
    pub medium_term: MediumTermAdvice,
    pub long_term: LongTermAdvice,
}

/// Notes surfaced to the other dashboard panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhCoordination {
    pub alert_to_npk: &'static str,
    pub alert_to_irrigation: &'static str,
    pub fertilizer_recommendation: &'static str,
}

/// The full pH outlook payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhForecast {
    pub current_status: PhStatus,
    pub predictions: PhProjection,
    pub drift_analysis: DriftAnalysis,
    pub nutrient_availability: NutrientAvailability,
    pub recommendations: PhRecommendations,
    pub coordination: PhCoordination,
}

/// The pH outlook. Constant for every call.
#[must_use]
pub fn forecast() -> PhForecast {
    PhForecast {
        current_status: PhStatus {
            ph: 6.8,
            status: "optimal",
            range: "6.0-7.0",
            trend: "slowly_decreasing",
            buffer_capacity: "moderate (CEC 15, OM 3.2%)",
        },
        predictions: PhProjection {
            in_7_days: 6.75,
            in_30_days: 6.5,
            in_90_days: 6.2,
        },
        drift_analysis: DriftAnalysis {
            rate: -0.025,
            unit: "pH units per week",
            cause: "Recent urea fertilization",
            time_to_critical: "120 days until pH 6.0",
        },
        nutrient_availability: NutrientAvailability {
            at_current: AvailabilityProfile {
                nitrogen: "95%",
                phosphorus: "98%",
                potassium: "100%",
                warning: None,
            },
            if_acidified: AvailabilityProfile {
                nitrogen: "90%",
                phosphorus: "60%",
                potassium: "95%",
                warning: Some("40% phosphorus loss, aluminum toxicity risk"),
            },
        },
        recommendations: PhRecommendations {
            short_term: ShortTermAdvice {
                action: "monitor",
                description: "No action needed - pH will remain safe for next 60 days",
                frequency: "Check weekly",
            },
            medium_term: MediumTermAdvice {
                action: "prepare_lime",
                description: "If pH drops to 6.3, apply agricultural lime",
                amount_kg: 200,
                cost: 1200,
                effect: "Raises pH by 0.4-0.6 units over 4-6 weeks",
            },
            long_term: LongTermAdvice {
                action: "switch_fertilizer",
                description: "Consider switching from Urea → Calcium Ammonium Nitrate",
                reason: "Reduce long-term soil acidification",
            },
        },
        coordination: PhCoordination {
            alert_to_npk: "⚠️ Urea fertilizer is acidifying soil (-0.025 pH/week)",
            alert_to_irrigation: "✅ pH stable - no impact on irrigation",
            fertilizer_recommendation: "Consider non-acidifying alternatives",
        },
    }
}
