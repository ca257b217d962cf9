//! Render state - data structure sent from App layer to UI for rendering

use crate::app::qr::QrScan;
use crate::app::view::{MapViewport, ViewState};
use crate::constants::{DEFAULT_POSITION, DEFAULT_ZOOM};
use crate::messages::ui_events::InputMode;
use crate::models::{
    ActivityPoint, Destination, MapView, Padding, PeakWindow, PositionFix, Stop, TravelSummary,
    Vehicle,
};

/// Entry of the "Nearby Bus Stops" list
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyStop {
    pub name: String,
    pub distance: String,
}

/// Analytics panel content for the active tab
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsView {
    pub activity: Vec<ActivityPoint>,
    pub summaries: Vec<TravelSummary>,
    pub destinations: Vec<Destination>,
    pub peaks: Vec<PeakWindow>,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub view: ViewState,
    pub viewport: MapViewport,
    pub position: PositionFix,
    pub map: MapView,

    // Indicator cards, present only while their layer is shown
    pub nearest_stop: Option<Stop>,
    pub nearest_bus: Option<Vehicle>,

    // Expanded navbar
    pub nearby_stops: Vec<NearbyStop>,
    pub search_query: String,
    pub search_cursor: usize,
    pub input_mode: InputMode,

    pub qr: QrScan,
    pub analytics: AnalyticsView,

    pub show_help: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            view: ViewState::default(),
            viewport: MapViewport {
                height: 0,
                padding: Padding::default(),
            },
            position: PositionFix::pending(DEFAULT_POSITION),
            map: MapView {
                center: DEFAULT_POSITION,
                zoom: DEFAULT_ZOOM,
                markers: Vec::new(),
                padding: Padding::default(),
            },
            nearest_stop: None,
            nearest_bus: None,
            nearby_stops: Vec::new(),
            search_query: String::new(),
            search_cursor: 0,
            input_mode: InputMode::Normal,
            qr: QrScan::default(),
            analytics: AnalyticsView::default(),
            show_help: false,
        }
    }
}
