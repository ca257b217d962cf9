//! App actor - message loop processing UI events and device responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{DeviceCommand, DeviceResponse, RenderState, UiEvent};

/// App actor that processes UI events and device responses
pub struct AppActor {
    state: AppState,
    device_tx: mpsc::UnboundedSender<DeviceCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        device_tx: mpsc::UnboundedSender<DeviceCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            device_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut device_rx: mpsc::UnboundedReceiver<DeviceResponse>,
    ) {
        // Render the default position right away, then ask for a real one
        let _ = self.render_tx.send(self.state.to_render_state());
        if let Some(cmd) = self.state.request_location() {
            self.send(cmd);
        }

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        let cmd = self.state.dispose();
                        self.send(cmd);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = device_rx.recv() => {
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }

        tracing::info!("App actor stopped");
    }

    fn send(&self, cmd: DeviceCommand) {
        let _ = self.device_tx.send(cmd);
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Navbar
            UiEvent::ToggleNavbar => self.state.toggle_navbar(),
            UiEvent::ShowStops => self.state.view.set_show_stops(true),
            UiEvent::ToggleStops => self.state.view.toggle_stops(),
            UiEvent::ToggleBuses => self.state.view.toggle_buses(),

            // Analytics
            UiEvent::OpenAnalytics => self.state.view.open_analytics(),
            UiEvent::CloseAnalytics => self.state.view.close_analytics(),
            UiEvent::SetAnalyticsTab(tab) => self.state.view.set_analytics_tab(tab),
            UiEvent::NextAnalyticsTab => self.state.view.next_analytics_tab(),

            // QR modal
            UiEvent::ToggleQr => {
                if let Some(cmd) = self.state.toggle_qr() {
                    self.send(cmd);
                }
            }
            UiEvent::CloseQr => {
                if let Some(cmd) = self.state.close_qr() {
                    self.send(cmd);
                }
            }
            UiEvent::AllowCamera => {
                if let Some(cmd) = self.state.allow_camera() {
                    self.send(cmd);
                }
            }

            // Location
            UiEvent::Relocate => {
                for cmd in self.state.relocate() {
                    self.send(cmd);
                }
            }

            // Search
            UiEvent::StartSearch => self.state.start_search(),
            UiEvent::StopSearch => self.state.stop_search(),
            UiEvent::SearchChar(c) => self.state.search_char(c),
            UiEvent::SearchBackspace => self.state.search_backspace(),
            UiEvent::SearchCursorLeft => self.state.search_cursor_left(),
            UiEvent::SearchCursorRight => self.state.search_cursor_right(),

            UiEvent::Resize(height) => self.state.viewport_height = height,

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
