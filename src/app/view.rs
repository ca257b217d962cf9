//! View state - which panels are visible and expanded

use crate::models::{AnalyticsTab, Padding};

/// Cross-panel visibility flags, owned by the app and read by every panel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ViewState {
    pub navbar_expanded: bool,
    pub show_stops: bool,
    pub show_buses: bool,
    pub analytics_open: bool,
    pub analytics_tab: AnalyticsTab,
}

/// Screen space left to the map
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapViewport {
    pub height: u16,
    pub padding: Padding,
}

impl ViewState {
    pub fn toggle_navbar(&mut self) {
        self.navbar_expanded = !self.navbar_expanded;
    }

    pub fn set_show_stops(&mut self, show: bool) {
        self.show_stops = show;
    }

    pub fn set_show_buses(&mut self, show: bool) {
        self.show_buses = show;
    }

    /// Expanded sheet "Bus Stops" button
    pub fn toggle_stops(&mut self) {
        self.show_stops = !self.show_stops;
    }

    /// Expanded sheet "Buses" button
    pub fn toggle_buses(&mut self) {
        self.show_buses = !self.show_buses;
    }

    pub fn open_analytics(&mut self) {
        self.analytics_open = true;
    }

    pub fn close_analytics(&mut self) {
        self.analytics_open = false;
    }

    pub fn set_analytics_tab(&mut self, tab: AnalyticsTab) {
        self.analytics_tab = tab;
    }

    pub fn next_analytics_tab(&mut self) {
        self.analytics_tab = self.analytics_tab.next();
    }

    /// An expanded navbar always halves the map
    pub fn map_viewport(&self, total_height: u16) -> MapViewport {
        if self.navbar_expanded {
            let half = total_height / 2;
            MapViewport {
                height: total_height - half,
                padding: Padding {
                    bottom: half,
                    ..Padding::default()
                },
            }
        } else {
            MapViewport {
                height: total_height,
                padding: Padding::default(),
            }
        }
    }
}
