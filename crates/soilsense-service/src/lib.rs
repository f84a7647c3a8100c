//! HTTP REST API serving synthetic soil monitoring data.
//!
//! This crate hosts the SoilSense demo backend: it generates a realistic
//! in-memory dataset at startup and serves current conditions, forecasts,
//! and event histories for a soil monitoring dashboard.
//!
//! # REST API Endpoints
//!
//! - `GET /api/health` - Service health check
//! - `GET /api/status` - Current conditions with NPK and saturation status
//! - `GET /api/npk-predictions` - Nutrient forecast and fertilizer advice
//! - `GET /api/waterlogging-risk` - Saturation outlook and action plan
//! - `GET /api/irrigation-predictions` - Moisture forecast and irrigation advice
//! - `GET /api/ph-predictions` - pH outlook and correction recommendations
//! - `GET /api/history?parameter=X&days=N` - Hourly series for one parameter
//! - `GET /api/ph-history` - Daily pH readings with event markers
//! - `GET /api/alerts` - Active alerts
//! - `GET /api/irrigation-history` - Irrigation log, newest first
//! - `POST /api/irrigation/log` - Record an irrigation event
//! - `GET /api/fertilization-history` - Fertilization records
//!
//! # Configuration
//!
//! The service reads configuration from `~/.config/soilsense/service.toml`:
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0:8000"
//! cors_origins = ["*"]
//!
//! [data]
//! seed = 42
//! ```
//!
//! `--bind` and `--seed` override the file; the `SOILSENSE_CORS_ORIGINS`
//! environment variable (comma-separated) overrides the origin list.

pub mod api;
pub mod config;
pub mod state;

pub use config::{Config, ConfigError, DataConfig, ServerConfig};
pub use state::AppState;
