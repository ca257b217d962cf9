//! App state - pure data structure with no I/O logic

use std::sync::Arc;

use crate::app::qr::QrScan;
use crate::app::view::ViewState;
use crate::config::Config;
use crate::constants::NEARBY_STOPS_LIMIT;
use crate::messages::render::{AnalyticsView, NearbyStop};
use crate::messages::ui_events::InputMode;
use crate::messages::RenderState;
use crate::models::{
    AnalyticsTab, Coordinate, MapView, Marker, MarkerKind, PositionFix, Stop, Vehicle,
};
use crate::nearest::{self, SelectError};
use crate::provider::{TransitProvider, TravelStatsProvider};

/// Main application state - pure data, no I/O
pub struct AppState {
    pub view: ViewState,

    // Position
    pub position: PositionFix,
    pub fallback_position: Coordinate,
    pub pending_location: Option<u64>,
    pub next_request_id: u64,

    // Map
    pub zoom: u8,
    pub viewport_height: u16,

    // Data
    pub stops: Vec<Stop>,
    pub vehicles: Vec<Vehicle>,
    stats: Arc<dyn TravelStatsProvider>,

    // Navbar search
    pub search_query: String,
    pub cursor_position: usize,
    pub input_mode: InputMode,

    pub qr: QrScan,
    pub show_help: bool,

    /// Set once the view is torn down; late device results are dropped
    pub disposed: bool,
}

impl AppState {
    pub fn new(
        config: &Config,
        transit: Arc<dyn TransitProvider>,
        stats: Arc<dyn TravelStatsProvider>,
    ) -> Self {
        AppState {
            view: ViewState::default(),
            position: PositionFix::pending(config.fallback_position),
            fallback_position: config.fallback_position,
            pending_location: None,
            next_request_id: 1,
            zoom: config.zoom,
            viewport_height: 0,
            stops: transit.list_stops(),
            vehicles: transit.list_vehicles(),
            stats,
            search_query: String::new(),
            cursor_position: 0,
            input_mode: InputMode::Normal,
            qr: QrScan::default(),
            show_help: false,
            disposed: false,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn nearest_stop(&self) -> Result<&Stop, SelectError> {
        nearest::nearest_stop(self.position.coordinate, &self.stops)
    }

    pub fn nearest_bus(&self) -> Result<&Vehicle, SelectError> {
        nearest::nearest_vehicle(self.position.coordinate, &self.vehicles)
    }

    /// Formatted distance from the current position to `stop`
    pub fn distance_label(&self, stop: &Stop) -> String {
        nearest::format_distance(nearest::distance_m(self.position.coordinate, stop.position))
    }

    /// Closest stops matching the search query, nearest first
    pub fn nearby_stops(&self) -> Vec<NearbyStop> {
        let query = self.search_query.trim().to_lowercase();
        let matching: Vec<Stop> = self
            .stops
            .iter()
            .filter(|s| query.is_empty() || s.name.to_lowercase().contains(&query))
            .cloned()
            .collect();

        nearest::nearby_stops(self.position.coordinate, &matching, NEARBY_STOPS_LIMIT)
            .into_iter()
            .map(|(stop, meters)| NearbyStop {
                name: stop.name.clone(),
                distance: nearest::format_distance(meters),
            })
            .collect()
    }

    /// Map input: centered on the current position, layers per view flags
    pub fn map_view(&self) -> MapView {
        let mut markers = vec![Marker {
            kind: MarkerKind::CurrentPosition,
            position: self.position.coordinate,
            label: String::from("You are here"),
        }];

        if self.view.show_stops {
            markers.extend(self.stops.iter().map(|stop| Marker {
                kind: MarkerKind::Stop,
                position: stop.position,
                label: format!("{} - {} away", stop.name, self.distance_label(stop)),
            }));
        }

        if self.view.show_buses {
            markers.extend(self.vehicles.iter().map(|bus| Marker {
                kind: MarkerKind::Bus,
                position: bus.position,
                label: format!("Bus {} - Arriving in {}", bus.number, bus.eta),
            }));
        }

        MapView {
            center: self.position.coordinate,
            zoom: self.zoom,
            markers,
            padding: self.view.map_viewport(self.viewport_height).padding,
        }
    }

    pub fn analytics_view(&self) -> AnalyticsView {
        AnalyticsView {
            activity: self.stats.activity(self.view.analytics_tab),
            summaries: vec![
                self.stats.summary(AnalyticsTab::Today),
                self.stats.summary(AnalyticsTab::Week),
            ],
            destinations: self.stats.popular_destinations(),
            peaks: self.stats.peak_windows(),
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            view: self.view,
            viewport: self.view.map_viewport(self.viewport_height),
            position: self.position.clone(),
            map: self.map_view(),
            nearest_stop: self
                .view
                .show_stops
                .then(|| {
                    self.nearest_stop().ok().map(|stop| Stop {
                        distance: self.distance_label(stop),
                        ..stop.clone()
                    })
                })
                .flatten(),
            nearest_bus: self
                .view
                .show_buses
                .then(|| self.nearest_bus().ok().cloned())
                .flatten(),
            nearby_stops: if self.view.navbar_expanded {
                self.nearby_stops()
            } else {
                Vec::new()
            },
            search_query: self.search_query.clone(),
            search_cursor: self.cursor_position,
            input_mode: self.input_mode,
            qr: self.qr.clone(),
            analytics: if self.view.analytics_open {
                self.analytics_view()
            } else {
                AnalyticsView::default()
            },
            show_help: self.show_help,
        }
    }
}
