//! Command handlers - business logic for processing UI events

use crate::app::AppState;
use crate::messages::ui_events::InputMode;
use crate::messages::{DeviceCommand, DeviceResponse};
use crate::models::{PositionFix, PositionSource};

impl AppState {
    // ========================
    // Navbar
    // ========================

    pub fn toggle_navbar(&mut self) {
        self.view.toggle_navbar();
        // the search box only exists on the expanded sheet
        if !self.view.navbar_expanded {
            self.stop_search();
        }
    }

    // ========================
    // Search input
    // ========================

    pub fn start_search(&mut self) {
        if self.view.navbar_expanded {
            self.input_mode = InputMode::Editing;
            self.cursor_position = self.search_query.len();
        }
    }

    pub fn stop_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn search_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position = self.search_query[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn search_cursor_right(&mut self) {
        if self.cursor_position < self.search_query.len() {
            self.cursor_position = self.search_query[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(self.search_query.len());
        }
    }

    pub fn search_char(&mut self, c: char) {
        if self.cursor_position <= self.search_query.len() {
            self.search_query.insert(self.cursor_position, c);
            self.cursor_position += c.len_utf8();
        }
    }

    pub fn search_backspace(&mut self) {
        if self.cursor_position > 0 {
            let prev_pos = self.search_query[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.search_query.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    // ========================
    // Location
    // ========================

    /// Issue a position request unless one is already in flight
    pub fn request_location(&mut self) -> Option<DeviceCommand> {
        if self.disposed || self.pending_location.is_some() {
            return None;
        }
        let id = self.next_id();
        self.pending_location = Some(id);
        Some(DeviceCommand::Locate { id })
    }

    /// Drop the in-flight request, if any, and ask again
    pub fn relocate(&mut self) -> Vec<DeviceCommand> {
        let mut commands = Vec::new();
        if let Some(old) = self.pending_location.take() {
            commands.push(DeviceCommand::Cancel(old));
        }
        commands.extend(self.request_location());
        commands
    }

    // ========================
    // QR modal
    // ========================

    pub fn toggle_qr(&mut self) -> Option<DeviceCommand> {
        self.qr.toggle().map(DeviceCommand::Cancel)
    }

    pub fn close_qr(&mut self) -> Option<DeviceCommand> {
        self.qr.close().map(DeviceCommand::Cancel)
    }

    pub fn allow_camera(&mut self) -> Option<DeviceCommand> {
        if self.disposed {
            return None;
        }
        let id = self.next_request_id;
        if self.qr.begin_permission_request(id) {
            self.next_request_id += 1;
            Some(DeviceCommand::RequestCameraPermission { id })
        } else {
            None
        }
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Teardown
    // ========================

    /// Mark the view as gone; everything still pending becomes stale
    pub fn dispose(&mut self) -> DeviceCommand {
        self.disposed = true;
        self.pending_location = None;
        self.qr.pending_request = None;
        DeviceCommand::Shutdown
    }

    // ========================
    // Device responses
    // ========================

    pub fn handle_response(&mut self, response: DeviceResponse) {
        if self.disposed {
            tracing::debug!(id = response.id(), "Dropping device response after teardown");
            return;
        }

        match response {
            DeviceResponse::Position { id, result } => {
                if self.pending_location != Some(id) {
                    tracing::debug!(id, "Ignoring stale position");
                    return;
                }
                self.pending_location = None;
                self.position = match result {
                    Ok(coordinate) => {
                        tracing::info!(id, %coordinate, "Position fixed");
                        PositionFix {
                            coordinate,
                            source: PositionSource::Located(chrono::Utc::now()),
                        }
                    }
                    Err(e) => {
                        tracing::warn!(id, error = %e, "Error obtaining location, using default position");
                        PositionFix {
                            coordinate: self.fallback_position,
                            source: PositionSource::Fallback(e.to_string()),
                        }
                    }
                };
            }
            DeviceResponse::CameraPermission { id, result } => {
                let granted = match result {
                    Ok(granted) => granted,
                    Err(e) => {
                        tracing::warn!(id, error = %e, "Camera permission request failed");
                        false
                    }
                };
                if !self.qr.permission_resolved(id, granted) {
                    tracing::debug!(id, "Ignoring stale camera permission");
                } else if !granted {
                    tracing::warn!(id, "Camera access denied");
                }
            }
            DeviceResponse::Cancelled { id } => {
                if self.pending_location == Some(id) {
                    self.pending_location = None;
                }
                if self.qr.pending_request == Some(id) {
                    self.qr.pending_request = None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::app::qr::QrScanState;
    use crate::app::AppState;
    use crate::config::Config;
    use crate::device::DeviceError;
    use crate::messages::ui_events::InputMode;
    use crate::messages::{DeviceCommand, DeviceResponse};
    use crate::models::{Coordinate, PositionSource};
    use crate::provider::StaticProvider;

    fn state() -> AppState {
        let provider = Arc::new(StaticProvider::new());
        AppState::new(&Config::default(), provider.clone(), provider)
    }

    #[test]
    fn test_position_fix_applied() {
        let mut state = state();
        let Some(DeviceCommand::Locate { id }) = state.request_location() else {
            panic!("expected a locate command");
        };
        let lviv = Coordinate::new(49.842, 24.031);
        state.handle_response(DeviceResponse::Position { id, result: Ok(lviv) });

        assert_eq!(state.position.coordinate, lviv);
        assert!(matches!(state.position.source, PositionSource::Located(_)));
        assert_eq!(state.map_view().center, lviv);
        assert_eq!(state.pending_location, None);
    }

    #[test]
    fn test_geolocation_error_falls_back() {
        let mut state = state();
        state.request_location();
        let id = state.pending_location.unwrap();
        state.handle_response(DeviceResponse::Position {
            id,
            result: Err(DeviceError::PermissionDenied),
        });

        assert_eq!(state.position.coordinate, Coordinate::new(28.604, 77.225));
        assert_eq!(
            state.position.source,
            PositionSource::Fallback(String::from("permission denied"))
        );
    }

    #[test]
    fn test_stale_position_ignored() {
        let mut state = state();
        state.request_location();
        let first = state.pending_location.unwrap();
        let commands = state.relocate();
        assert_eq!(commands[0], DeviceCommand::Cancel(first));
        assert_eq!(commands.len(), 2);

        state.handle_response(DeviceResponse::Position {
            id: first,
            result: Ok(Coordinate::new(1.0, 1.0)),
        });
        assert_eq!(state.position.coordinate, Coordinate::new(28.604, 77.225));
        assert!(state.pending_location.is_some());
    }

    #[test]
    fn test_result_after_dispose_is_noop() {
        let mut state = state();
        state.request_location();
        let id = state.pending_location.unwrap();
        assert_eq!(state.dispose(), DeviceCommand::Shutdown);

        state.handle_response(DeviceResponse::Position {
            id,
            result: Ok(Coordinate::new(1.0, 1.0)),
        });
        assert_eq!(state.position.coordinate, Coordinate::new(28.604, 77.225));
        assert!(state.request_location().is_none());
    }

    #[test]
    fn test_only_one_location_request_in_flight() {
        let mut state = state();
        assert!(state.request_location().is_some());
        assert!(state.request_location().is_none());
    }

    #[test]
    fn test_qr_permission_flow() {
        let mut state = state();
        assert!(state.toggle_qr().is_none());
        assert_eq!(state.qr.state, QrScanState::PermissionPrompt);

        let Some(DeviceCommand::RequestCameraPermission { id }) = state.allow_camera() else {
            panic!("expected a permission request");
        };
        // a second press while waiting does nothing
        assert!(state.allow_camera().is_none());

        state.handle_response(DeviceResponse::CameraPermission { id, result: Ok(true) });
        assert_eq!(state.qr.state, QrScanState::Scanning);

        assert!(state.close_qr().is_none());
        assert_eq!(state.qr.state, QrScanState::Idle);
    }

    #[test]
    fn test_closing_qr_cancels_permission_request() {
        let mut state = state();
        state.toggle_qr();
        let Some(DeviceCommand::RequestCameraPermission { id }) = state.allow_camera() else {
            panic!("expected a permission request");
        };
        assert_eq!(state.toggle_qr(), Some(DeviceCommand::Cancel(id)));

        state.handle_response(DeviceResponse::CameraPermission { id, result: Ok(true) });
        assert_eq!(state.qr.state, QrScanState::Idle);
    }

    #[test]
    fn test_camera_error_counts_as_denial() {
        let mut state = state();
        state.toggle_qr();
        state.allow_camera();
        let id = state.qr.pending_request.unwrap();
        state.handle_response(DeviceResponse::CameraPermission {
            id,
            result: Err(DeviceError::Unavailable),
        });
        assert_eq!(state.qr.state, QrScanState::PermissionPrompt);
        assert!(state.qr.denied);
    }

    #[test]
    fn test_search_editing() {
        let mut state = state();
        state.start_search();
        assert_eq!(state.input_mode, InputMode::Normal);

        state.toggle_navbar();
        state.start_search();
        assert_eq!(state.input_mode, InputMode::Editing);
        for c in "Rde".chars() {
            state.search_char(c);
        }
        state.search_cursor_left();
        state.search_cursor_left();
        state.search_char('e');
        assert_eq!(state.search_query, "Rede");
        state.search_cursor_right();
        state.search_backspace();
        assert_eq!(state.search_query, "Ree");

        state.toggle_navbar();
        assert_eq!(state.input_mode, InputMode::Normal);
    }
}
