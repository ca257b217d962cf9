//! Data providers - where stops, buses and travel stats come from
//!
//! The app only talks to the traits, so a live backend can replace
//! [`StaticProvider`] without touching the view logic.

use crate::models::{
    ActivityPoint, AnalyticsTab, Coordinate, Destination, PeakWindow, Stop, TravelSummary, Vehicle,
};

/// Source of stops and vehicles
pub trait TransitProvider: Send + Sync {
    fn list_stops(&self) -> Vec<Stop>;
    fn list_vehicles(&self) -> Vec<Vehicle>;
}

/// Source of the analytics panel content
pub trait TravelStatsProvider: Send + Sync {
    fn activity(&self, period: AnalyticsTab) -> Vec<ActivityPoint>;
    fn summary(&self, period: AnalyticsTab) -> TravelSummary;
    fn popular_destinations(&self) -> Vec<Destination>;
    fn peak_windows(&self) -> Vec<PeakWindow>;
}

/// Compiled-in mock data
#[derive(Clone, Debug, Default)]
pub struct StaticProvider;

impl StaticProvider {
    pub fn new() -> Self {
        StaticProvider
    }
}

impl TransitProvider for StaticProvider {
    fn list_stops(&self) -> Vec<Stop> {
        vec![
            Stop::new(1, "India Gate", Coordinate::new(28.628, 77.216), "150m"),
            Stop::new(2, "Connaught Place", Coordinate::new(28.635, 77.222), "300m"),
            Stop::new(3, "Qutub Minar", Coordinate::new(28.604, 77.225), "450m"),
            Stop::new(4, "Red Fort", Coordinate::new(28.608, 77.232), "520m"),
            Stop::new(5, "Lotus Temple", Coordinate::new(28.596, 77.290), "650m"),
        ]
    }

    fn list_vehicles(&self) -> Vec<Vehicle> {
        vec![
            Vehicle::new(1, "501", Coordinate::new(28.630, 77.218), "3 min"),
            Vehicle::new(2, "102", Coordinate::new(28.612, 77.230), "7 min"),
            Vehicle::new(3, "203", Coordinate::new(28.609, 77.220), "1 min"),
        ]
    }
}

impl TravelStatsProvider for StaticProvider {
    fn activity(&self, period: AnalyticsTab) -> Vec<ActivityPoint> {
        let series: &[(&str, u64)] = match period {
            AnalyticsTab::Today => &[
                ("6AM", 12),
                ("8AM", 35),
                ("10AM", 20),
                ("12PM", 25),
                ("2PM", 18),
                ("4PM", 32),
                ("6PM", 40),
                ("8PM", 15),
            ],
            AnalyticsTab::Week => &[
                ("Mon", 120),
                ("Tue", 95),
                ("Wed", 108),
                ("Thu", 132),
                ("Fri", 150),
                ("Sat", 85),
                ("Sun", 60),
            ],
        };
        series
            .iter()
            .map(|(label, trips)| ActivityPoint::new(*label, *trips))
            .collect()
    }

    fn summary(&self, period: AnalyticsTab) -> TravelSummary {
        let (trips, change_percent) = match period {
            AnalyticsTab::Today => (42, 12),
            AnalyticsTab::Week => (196, -5),
        };
        TravelSummary {
            period,
            trips,
            change_percent,
        }
    }

    fn popular_destinations(&self) -> Vec<Destination> {
        ["City Center", "Train Station", "University Campus"]
            .iter()
            .enumerate()
            .map(|(i, name)| Destination {
                name: name.to_string(),
                trips: 35 - i as u64 * 7,
            })
            .collect()
    }

    fn peak_windows(&self) -> Vec<PeakWindow> {
        vec![
            PeakWindow {
                name: String::from("Morning Peak"),
                window: String::from("7:30 AM - 9:00 AM"),
            },
            PeakWindow {
                name: String::from("Evening Peak"),
                window: String::from("5:00 PM - 7:30 PM"),
            },
        ]
    }
}
