//! Day route geometry for map rendering.
//!
//! Points are decoded (latitude, longitude) pairs; encoding for a map
//! library happens at the presentation boundary.

use serde::{Deserialize, Serialize};

use crate::plan::PlanDay;

/// Ordered stops of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

/// Bounding box as `(south, west)` / `(north, east)` corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: (f64, f64),
    pub north_east: (f64, f64),
}

impl Bounds {
    pub fn center(&self) -> (f64, f64) {
        (
            (self.south_west.0 + self.north_east.0) / 2.0,
            (self.south_west.1 + self.north_east.1) / 2.0,
        )
    }
}

impl Polyline {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Scheduled stops of a day in visiting order. The transfer leg carries
    /// ids only, so it is not part of the line.
    pub fn from_day(day: &PlanDay) -> Self {
        Self::new(day.items.iter().map(|item| item.location()).collect())
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest box holding every point, `None` for an empty line.
    pub fn bounds(&self) -> Option<Bounds> {
        let (first, rest) = self.points.split_first()?;
        let mut bounds = Bounds {
            south_west: *first,
            north_east: *first,
        };
        for (lat, lon) in rest {
            bounds.south_west.0 = bounds.south_west.0.min(*lat);
            bounds.south_west.1 = bounds.south_west.1.min(*lon);
            bounds.north_east.0 = bounds.north_east.0.max(*lat);
            bounds.north_east.1 = bounds.north_east.1.max(*lon);
        }
        Some(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PlanDayItem;

    fn item(id: &str, lat: f64, lon: f64) -> PlanDayItem {
        PlanDayItem {
            id: id.to_string(),
            name: id.to_string(),
            lat,
            lon,
            category: "museum".to_string(),
            start_min: 0.0,
            end_min: 60.0,
            visit_min: 60,
            reason: vec![],
        }
    }

    #[test]
    fn test_from_day_keeps_order() {
        let day = PlanDay {
            items: vec![item("a", 31.62, -7.99), item("b", 31.64, -8.00)],
            ..PlanDay::default()
        };
        let line = Polyline::from_day(&day);
        assert_eq!(line.points(), &[(31.62, -7.99), (31.64, -8.00)]);
    }

    #[test]
    fn test_bounds_and_center() {
        let line = Polyline::new(vec![(31.0, -8.0), (33.0, -7.0), (32.0, -9.0)]);
        let bounds = line.bounds().unwrap();
        assert_eq!(bounds.south_west, (31.0, -9.0));
        assert_eq!(bounds.north_east, (33.0, -7.0));
        assert_eq!(bounds.center(), (32.0, -8.0));
    }

    #[test]
    fn test_empty_polyline() {
        let polyline = Polyline::new(vec![]);
        assert!(polyline.is_empty());
        assert!(polyline.bounds().is_none());
    }

    #[test]
    fn test_into_points() {
        let points = vec![(31.5, -9.7), (30.4, -9.6)];
        let owned = Polyline::new(points.clone()).into_points();
        assert_eq!(owned, points);
    }
}
