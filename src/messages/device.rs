//! Device messages - communication between App and Device layers

use crate::device::DeviceError;
use crate::models::Coordinate;

/// Commands sent from App layer to Device layer
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCommand {
    /// Ask for the current position
    Locate { id: u64 },
    /// Prompt for camera access
    RequestCameraPermission { id: u64 },
    /// Cancel a pending request
    Cancel(u64),
    /// Shutdown the device actor, cancelling everything pending
    Shutdown,
}

/// Responses sent from Device layer to App layer
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceResponse {
    Position {
        id: u64,
        result: Result<Coordinate, DeviceError>,
    },
    CameraPermission {
        id: u64,
        result: Result<bool, DeviceError>,
    },
    /// Request was cancelled before it resolved
    Cancelled { id: u64 },
}

impl DeviceResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            DeviceResponse::Position { id, .. } => *id,
            DeviceResponse::CameraPermission { id, .. } => *id,
            DeviceResponse::Cancelled { id } => *id,
        }
    }
}
