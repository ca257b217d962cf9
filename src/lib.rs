//! # Transit TUI
//!
//! A terminal transit tracker: live map, nearest stop and bus,
//! QR ticket scanning and travel analytics.
//!
//! ## Features
//! - Map centered on the device position with stop and bus layers
//! - Nearest stop / nearest bus indicators (Haversine distance)
//! - Bottom navigation sheet with nearby stop search
//! - QR scan modal with camera permission flow
//! - Analytics panel with today / week trip charts
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (View-state coordinator)
//! - Device Layer (Tokio runtime) - geolocation and camera

pub mod constants;
pub mod config;
pub mod models;
pub mod nearest;
pub mod provider;
pub mod ui;
pub mod messages;
pub mod app;
pub mod device;

// Re-export commonly used types
pub use models::{AnalyticsTab, Coordinate, MapView, Marker, Stop, Vehicle};
pub use config::Config;
pub use nearest::{nearest_stop, nearest_vehicle, SelectError};
pub use provider::{StaticProvider, TransitProvider, TravelStatsProvider};
pub use messages::{UiEvent, DeviceCommand, DeviceResponse, RenderState};
pub use app::{AppState, AppActor, ViewState};
pub use device::{DeviceActor, DeviceError};
