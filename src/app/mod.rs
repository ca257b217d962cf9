//! App layer - central view state and command processing
//!
//! The App actor receives UI events and device responses,
//! updates state, and emits device commands and render state.

pub mod state;
pub mod actor;
pub mod commands;
pub mod qr;
pub mod view;

pub use state::AppState;
pub use actor::AppActor;
pub use qr::{QrScan, QrScanState};
pub use view::{MapViewport, ViewState};
