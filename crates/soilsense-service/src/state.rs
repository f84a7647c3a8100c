//! Application state shared across handlers.

use std::sync::Arc;

use soilsense_store::SoilStore;
use time::OffsetDateTime;
use tokio::sync::RwLock;

/// Shared application state.
pub struct AppState {
    /// The data store (RwLock: many concurrent readers, one writer when an
    /// irrigation event is logged).
    pub store: RwLock<SoilStore>,
    /// When the service started, for uptime reporting.
    pub started_at: OffsetDateTime,
}

impl AppState {
    /// Create new application state around a generated store.
    pub fn new(store: SoilStore) -> Arc<Self> {
        Arc::new(Self {
            store: RwLock::new(store),
            started_at: OffsetDateTime::now_utc(),
        })
    }

    /// Seconds since the service started.
    pub fn uptime_seconds(&self) -> u64 {
        let elapsed = OffsetDateTime::now_utc() - self.started_at;
        elapsed.whole_seconds().max(0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uptime_starts_at_zero() {
        let state = AppState::new(SoilStore::with_seed(1));
        assert_eq!(state.uptime_seconds(), 0);
    }
}
