//! Message types for inter-layer communication in the actor-based architecture.
//!
//! This module defines all messages that flow between the UI, App, and Device layers.

pub mod ui_events;
pub mod device;
pub mod render;

pub use ui_events::UiEvent;
pub use device::{DeviceCommand, DeviceResponse};
pub use render::RenderState;
