//! Geolocation capability

use std::time::Duration;

use async_trait::async_trait;

use crate::config::{GeolocationConfig, LocationMode};
use crate::device::DeviceError;
use crate::models::Coordinate;

/// Asynchronously yields the device position
#[async_trait]
pub trait Geolocation: Send + Sync {
    async fn current_position(&self) -> Result<Coordinate, DeviceError>;
}

/// Stand-in for a GPS receiver, driven by config
#[derive(Clone, Debug)]
pub struct SimulatedGeolocation {
    mode: LocationMode,
    position: Coordinate,
    delay: Duration,
}

impl SimulatedGeolocation {
    pub fn new(mode: LocationMode, position: Coordinate, delay: Duration) -> Self {
        SimulatedGeolocation { mode, position, delay }
    }

    pub fn from_config(config: &GeolocationConfig) -> Self {
        Self::new(config.mode, config.position, Duration::from_millis(config.delay_ms))
    }
}

#[async_trait]
impl Geolocation for SimulatedGeolocation {
    async fn current_position(&self) -> Result<Coordinate, DeviceError> {
        tokio::time::sleep(self.delay).await;
        match self.mode {
            LocationMode::Located => Ok(self.position),
            LocationMode::Denied => Err(DeviceError::PermissionDenied),
            LocationMode::Unavailable => Err(DeviceError::Unavailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_located_mode_reports_fix() {
        let here = Coordinate::new(49.84, 24.03);
        let geo = SimulatedGeolocation::new(LocationMode::Located, here, Duration::ZERO);
        assert_eq!(geo.current_position().await, Ok(here));
    }

    #[tokio::test]
    async fn test_denied_mode_errors() {
        let geo = SimulatedGeolocation::new(
            LocationMode::Denied,
            Coordinate::new(0.0, 0.0),
            Duration::ZERO,
        );
        assert_eq!(geo.current_position().await, Err(DeviceError::PermissionDenied));
    }
}
