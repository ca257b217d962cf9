//! Application constants
//!
//! Centralized location for fallback values and configuration defaults.

use crate::models::Coordinate;

/// Position used until the device reports a fix, and whenever it can't
pub const DEFAULT_POSITION: Coordinate = Coordinate::new(28.604, 77.225);

/// Map zoom level the view recenters to
pub const DEFAULT_ZOOM: u8 = 15;

/// Simulated latency of a geolocation request
pub const DEFAULT_LOCATION_DELAY_MS: u64 = 800;

/// Simulated latency of the camera permission prompt
pub const DEFAULT_CAMERA_DELAY_MS: u64 = 300;

/// Device requests slower than this resolve to a timeout
pub const DEVICE_TIMEOUT_MS: u64 = 10_000;

/// Number of entries in the "Nearby Bus Stops" list
pub const NEARBY_STOPS_LIMIT: usize = 3;

/// Directory under $HOME holding the config file
pub const CONFIG_DIR_NAME: &str = ".transit-tui";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Log file written next to the working directory
pub const LOG_FILE_NAME: &str = "transit-tui.log";

/// Application name
pub const APP_NAME: &str = "Transit Tracker";
