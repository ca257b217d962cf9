//! Nearest-entity selection
//!
//! Distances are great-circle (Haversine) in meters. Ties go to the
//! candidate listed first.

use geo::HaversineDistance;
use thiserror::Error;

use crate::models::{Coordinate, Stop, Vehicle};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("no {0} to choose from")]
    NotFound(&'static str),
}

/// Haversine distance between two coordinates in meters
pub fn distance_m(a: Coordinate, b: Coordinate) -> f64 {
    a.to_point().haversine_distance(&b.to_point())
}

/// Pick the item closest to `position`, first occurrence on ties
pub fn nearest_by<'a, T, F>(position: Coordinate, items: &'a [T], coord_of: F) -> Option<&'a T>
where
    F: Fn(&T) -> Coordinate,
{
    let mut best: Option<(&T, f64)> = None;
    for item in items {
        let dist = distance_m(position, coord_of(item));
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((item, dist)),
        }
    }
    best.map(|(item, _)| item)
}

pub fn nearest_stop(position: Coordinate, stops: &[Stop]) -> Result<&Stop, SelectError> {
    nearest_by(position, stops, |s| s.position).ok_or(SelectError::NotFound("stops"))
}

pub fn nearest_vehicle(position: Coordinate, vehicles: &[Vehicle]) -> Result<&Vehicle, SelectError> {
    nearest_by(position, vehicles, |v| v.position).ok_or(SelectError::NotFound("vehicles"))
}

/// Up to `limit` stops ordered by distance, each with its distance in meters
pub fn nearby_stops(position: Coordinate, stops: &[Stop], limit: usize) -> Vec<(&Stop, f64)> {
    let mut ranked: Vec<(&Stop, f64)> = stops
        .iter()
        .map(|s| (s, distance_m(position, s.position)))
        .collect();
    // sort_by is stable, so equal distances keep list order
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked.truncate(limit);
    ranked
}

/// "150m" below a kilometer, "1.2km" above
pub fn format_distance(meters: f64) -> String {
    let rounded = meters.round();
    if rounded < 1000.0 {
        format!("{}m", rounded as u64)
    } else {
        format!("{:.1}km", meters / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: u32, name: &str, lat: f64, lon: f64) -> Stop {
        Stop::new(id, name, Coordinate::new(lat, lon), "")
    }

    #[test]
    fn test_nearest_stop_at_origin() {
        let stops = vec![stop(1, "A", 0.0, 0.0), stop(2, "B", 1.0, 1.0)];
        let nearest = nearest_stop(Coordinate::new(0.0, 0.0), &stops).unwrap();
        assert_eq!(nearest.name, "A");
    }

    #[test]
    fn test_nearest_is_minimal() {
        let stops = vec![
            stop(1, "India Gate", 28.628, 77.216),
            stop(2, "Connaught Place", 28.635, 77.222),
            stop(3, "Qutub Minar", 28.604, 77.225),
            stop(4, "Red Fort", 28.608, 77.232),
            stop(5, "Lotus Temple", 28.596, 77.290),
        ];
        let positions = [
            Coordinate::new(28.604, 77.225),
            Coordinate::new(28.640, 77.210),
            Coordinate::new(28.590, 77.300),
            Coordinate::new(0.0, 0.0),
        ];
        for p in positions {
            let nearest = nearest_stop(p, &stops).unwrap();
            let best = distance_m(p, nearest.position);
            assert!(stops.iter().all(|s| best <= distance_m(p, s.position)));
        }
    }

    #[test]
    fn test_tie_goes_to_first() {
        let stops = vec![stop(1, "East", 0.0, 1.0), stop(2, "West", 0.0, -1.0)];
        let nearest = nearest_stop(Coordinate::new(0.0, 0.0), &stops).unwrap();
        assert_eq!(nearest.id, 1);
    }

    #[test]
    fn test_empty_lists_are_not_found() {
        let origin = Coordinate::new(0.0, 0.0);
        assert_eq!(nearest_stop(origin, &[]), Err(SelectError::NotFound("stops")));
        assert_eq!(nearest_vehicle(origin, &[]), Err(SelectError::NotFound("vehicles")));
    }

    #[test]
    fn test_nearest_vehicle() {
        let buses = vec![
            Vehicle::new(1, "501", Coordinate::new(28.630, 77.218), "3 min"),
            Vehicle::new(2, "102", Coordinate::new(28.612, 77.230), "7 min"),
            Vehicle::new(3, "203", Coordinate::new(28.609, 77.220), "1 min"),
        ];
        let nearest = nearest_vehicle(Coordinate::new(28.604, 77.225), &buses).unwrap();
        assert_eq!(nearest.number, "203");
    }

    #[test]
    fn test_nearby_stops_sorted_and_limited() {
        let stops = vec![
            stop(1, "Far", 1.0, 1.0),
            stop(2, "Here", 0.0, 0.0),
            stop(3, "Near", 0.0, 0.01),
        ];
        let nearby = nearby_stops(Coordinate::new(0.0, 0.0), &stops, 2);
        let names: Vec<&str> = nearby.iter().map(|(s, _)| s.name.as_str()).collect();
        assert_eq!(names, vec!["Here", "Near"]);
        assert!(nearby[0].1 <= nearby[1].1);
    }

    #[test]
    fn test_haversine_one_degree_latitude() {
        let d = distance_m(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
        assert!((d - 111_195.0).abs() < 500.0);
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(149.6), "150m");
        assert_eq!(format_distance(1234.0), "1.2km");
    }

    #[test]
    fn test_format_distance_rounds_up_to_km() {
        assert_eq!(format_distance(999.4), "999m");
        assert_eq!(format_distance(999.6), "1.0km");
    }
}
