//! Core seams of the planner.
//!
//! Place data comes from outside the crate; apps may implement [`Place`] for
//! their own records instead of converting to [`crate::place::Poi`].

use crate::error::Result;
use crate::haversine::Estimate;
use crate::params::Budget;
use crate::place::Footprint;

/// A visitable point of interest.
pub trait Place {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    /// Location coordinates (lat, lon) in degrees.
    fn location(&self) -> (f64, f64);

    /// Category tag, e.g. "palace" or "restaurant".
    fn category(&self) -> &str;

    /// Base visit duration in minutes.
    fn visit_minutes(&self) -> u32;

    fn cost_tier(&self) -> Option<Budget> {
        None
    }

    fn footprint(&self) -> Footprint {
        Footprint::Normal
    }

    /// Rating on a 0–5 scale.
    fn rating(&self) -> Option<f64> {
        None
    }

    /// Entry price in Moroccan dirham.
    fn price_mad(&self) -> Option<f64> {
        None
    }

    fn is_outdoor(&self) -> bool {
        crate::place::is_outdoor_category(self.category())
    }
}

/// Converts a pair of coordinates into drive distance and time.
pub trait TravelEstimator {
    fn estimate(&self, from: (f64, f64), to: (f64, f64)) -> Result<Estimate>;
}
