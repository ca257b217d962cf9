//! Device layer - geolocation and camera capabilities
//!
//! The Device actor receives capability requests from the App layer,
//! runs them on the Tokio runtime and sends back tagged responses.

pub mod actor;
pub mod camera;
pub mod geolocation;

use thiserror::Error;

pub use actor::DeviceActor;
pub use camera::{Camera, SimulatedCamera};
pub use geolocation::{Geolocation, SimulatedGeolocation};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeviceError {
    #[error("permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    Unavailable,
    #[error("request timed out")]
    Timeout,
}
