//! Camera capability (permission only, no QR decoding)

use std::time::Duration;

use async_trait::async_trait;

use crate::config::CameraConfig;
use crate::device::DeviceError;

#[async_trait]
pub trait Camera: Send + Sync {
    /// Resolves to whether the user granted camera access
    async fn request_permission(&self) -> Result<bool, DeviceError>;
}

#[derive(Clone, Debug)]
pub struct SimulatedCamera {
    grant: bool,
    delay: Duration,
}

impl SimulatedCamera {
    pub fn new(grant: bool, delay: Duration) -> Self {
        SimulatedCamera { grant, delay }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(config.grant, Duration::from_millis(config.delay_ms))
    }
}

#[async_trait]
impl Camera for SimulatedCamera {
    async fn request_permission(&self) -> Result<bool, DeviceError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.grant)
    }
}
