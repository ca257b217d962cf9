use serde::{Deserialize, Serialize};
use std::fmt;

/// Geographic coordinate in degrees
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Coordinate { latitude, longitude }
    }

    /// `geo` points are (x, y) = (longitude, latitude)
    pub fn to_point(self) -> geo::Point<f64> {
        geo::Point::new(self.longitude, self.latitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// A fixed pickup/drop-off point
#[derive(Clone, Debug, PartialEq)]
pub struct Stop {
    pub id: u32,
    pub name: String,
    pub position: Coordinate,
    /// Distance label as published with the stop list
    pub distance: String,
}

impl Stop {
    pub fn new(id: u32, name: impl Into<String>, position: Coordinate, distance: impl Into<String>) -> Self {
        Stop {
            id,
            name: name.into(),
            position,
            distance: distance.into(),
        }
    }
}

/// A tracked bus
#[derive(Clone, Debug, PartialEq)]
pub struct Vehicle {
    pub id: u32,
    /// Route number shown on the bus
    pub number: String,
    pub position: Coordinate,
    pub eta: String,
}

impl Vehicle {
    pub fn new(id: u32, number: impl Into<String>, position: Coordinate, eta: impl Into<String>) -> Self {
        Vehicle {
            id,
            number: number.into(),
            position,
            eta: eta.into(),
        }
    }
}

/// Analytics period; exactly one is active at a time
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AnalyticsTab {
    #[default]
    Today,
    Week,
}

impl AnalyticsTab {
    pub fn as_str(&self) -> &str {
        match self {
            AnalyticsTab::Today => "Today",
            AnalyticsTab::Week => "This Week",
        }
    }

    pub fn next(&self) -> AnalyticsTab {
        match self {
            AnalyticsTab::Today => AnalyticsTab::Week,
            AnalyticsTab::Week => AnalyticsTab::Today,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            AnalyticsTab::Today => 0,
            AnalyticsTab::Week => 1,
        }
    }
}

/// One bar of the travel activity chart
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityPoint {
    pub label: String,
    pub trips: u64,
}

impl ActivityPoint {
    pub fn new(label: impl Into<String>, trips: u64) -> Self {
        ActivityPoint {
            label: label.into(),
            trips,
        }
    }
}

/// Stats card for a period
#[derive(Clone, Debug, PartialEq)]
pub struct TravelSummary {
    pub period: AnalyticsTab,
    pub trips: u64,
    /// Change against the previous period, in percent
    pub change_percent: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Destination {
    pub name: String,
    pub trips: u64,
}

/// A named busy window, e.g. "Morning Peak"
#[derive(Clone, Debug, PartialEq)]
pub struct PeakWindow {
    pub name: String,
    pub window: String,
}

/// Where the current position came from
#[derive(Clone, Debug, PartialEq)]
pub enum PositionSource {
    /// No fix yet, still showing the default
    Default,
    Located(chrono::DateTime<chrono::Utc>),
    Fallback(String),
}

/// Current position together with its provenance
#[derive(Clone, Debug, PartialEq)]
pub struct PositionFix {
    pub coordinate: Coordinate,
    pub source: PositionSource,
}

impl PositionFix {
    pub fn pending(coordinate: Coordinate) -> Self {
        PositionFix {
            coordinate,
            source: PositionSource::Default,
        }
    }

    pub fn describe(&self) -> String {
        match &self.source {
            PositionSource::Default => String::from("locating..."),
            PositionSource::Located(at) => format!("located {}", at.format("%H:%M:%S")),
            PositionSource::Fallback(reason) => format!("default position ({})", reason),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerKind {
    CurrentPosition,
    Stop,
    Bus,
}

/// A labelled point handed to the map renderer
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub position: Coordinate,
    pub label: String,
}

/// Viewport padding in rows
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Padding {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

/// Everything the map renderer consumes
#[derive(Clone, Debug, PartialEq)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
    pub markers: Vec<Marker>,
    pub padding: Padding,
}
