//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::qr::QrScanState;
use crate::models::AnalyticsTab;

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Navbar
    ToggleNavbar,
    /// Collapsed sheet pin button: only ever shows stops
    ShowStops,
    ToggleStops,
    ToggleBuses,

    // Analytics
    OpenAnalytics,
    CloseAnalytics,
    SetAnalyticsTab(AnalyticsTab),
    NextAnalyticsTab,

    // QR modal
    ToggleQr,
    CloseQr,
    AllowCamera,

    // Location
    Relocate,

    // Search (expanded navbar)
    StartSearch,
    StopSearch,
    SearchChar(char),
    SearchBackspace,
    SearchCursorLeft,
    SearchCursorRight,

    // Terminal height changed
    Resize(u16),

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on what is on screen
pub fn key_to_ui_event(
    key: KeyEvent,
    navbar_expanded: bool,
    analytics_open: bool,
    qr_state: QrScanState,
    input_mode: InputMode,
    show_help: bool,
) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    // Modals sit on top of everything else
    if qr_state != QrScanState::Idle {
        return handle_qr_keys(key, qr_state);
    }

    if analytics_open {
        return handle_analytics_keys(key);
    }

    match input_mode {
        InputMode::Editing => handle_search_keys(key),
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Char('n') | KeyCode::Char(' ') => Some(UiEvent::ToggleNavbar),
            KeyCode::Char('p') => Some(UiEvent::ShowStops),
            KeyCode::Char('s') => Some(UiEvent::ToggleStops),
            KeyCode::Char('b') => Some(UiEvent::ToggleBuses),
            KeyCode::Char('a') => Some(UiEvent::OpenAnalytics),
            KeyCode::Char('r') => Some(UiEvent::ToggleQr),
            KeyCode::Char('l') => Some(UiEvent::Relocate),
            KeyCode::Char('/') if navbar_expanded => Some(UiEvent::StartSearch),
            _ => None,
        },
    }
}

fn handle_qr_keys(key: KeyEvent, qr_state: QrScanState) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('r') => Some(UiEvent::CloseQr),
        KeyCode::Enter | KeyCode::Char('y') if qr_state == QrScanState::PermissionPrompt => {
            Some(UiEvent::AllowCamera)
        }
        KeyCode::Char('q') => Some(UiEvent::Quit),
        _ => None,
    }
}

fn handle_analytics_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('x') | KeyCode::Char('a') => Some(UiEvent::CloseAnalytics),
        KeyCode::Char('1') | KeyCode::Char('t') => Some(UiEvent::SetAnalyticsTab(AnalyticsTab::Today)),
        KeyCode::Char('2') | KeyCode::Char('w') => Some(UiEvent::SetAnalyticsTab(AnalyticsTab::Week)),
        KeyCode::Tab | KeyCode::Left | KeyCode::Right => Some(UiEvent::NextAnalyticsTab),
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        _ => None,
    }
}

fn handle_search_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => Some(UiEvent::StopSearch),
        KeyCode::Left => Some(UiEvent::SearchCursorLeft),
        KeyCode::Right => Some(UiEvent::SearchCursorRight),
        KeyCode::Backspace => Some(UiEvent::SearchBackspace),
        KeyCode::Char(c) => Some(UiEvent::SearchChar(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn map(code: KeyCode) -> Option<UiEvent> {
        key_to_ui_event(press(code), false, false, QrScanState::Idle, InputMode::Normal, false)
    }

    #[test]
    fn test_main_view_bindings() {
        assert_eq!(map(KeyCode::Char('n')), Some(UiEvent::ToggleNavbar));
        assert_eq!(map(KeyCode::Char('s')), Some(UiEvent::ToggleStops));
        assert_eq!(map(KeyCode::Char('b')), Some(UiEvent::ToggleBuses));
        assert_eq!(map(KeyCode::Char('a')), Some(UiEvent::OpenAnalytics));
        // search needs the expanded sheet
        assert_eq!(map(KeyCode::Char('/')), None);
    }

    #[test]
    fn test_qr_modal_captures_keys() {
        let event = key_to_ui_event(
            press(KeyCode::Char('s')),
            false,
            false,
            QrScanState::PermissionPrompt,
            InputMode::Normal,
            false,
        );
        assert_eq!(event, None);

        let event = key_to_ui_event(
            press(KeyCode::Enter),
            false,
            false,
            QrScanState::Scanning,
            InputMode::Normal,
            false,
        );
        assert_eq!(event, None);
    }

    #[test]
    fn test_editing_types_characters() {
        let event = key_to_ui_event(
            press(KeyCode::Char('q')),
            true,
            false,
            QrScanState::Idle,
            InputMode::Editing,
            false,
        );
        assert_eq!(event, Some(UiEvent::SearchChar('q')));
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let event = key_to_ui_event(key, true, true, QrScanState::Scanning, InputMode::Editing, true);
        assert_eq!(event, Some(UiEvent::Quit));
    }
}
