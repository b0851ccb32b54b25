//! Haversine drive estimator.
//!
//! Uses great-circle distance and a fixed average speed to estimate drive
//! time between stops. Ignores roads and traffic.

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::traits::{Place, TravelEstimator};

/// Average inter-city driving speed assumption for time estimation.
pub const DEFAULT_SPEED_KMH: f64 = 60.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Drive distance and duration between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Estimate {
    pub km: f64,
    pub minutes: f64,
}

impl Estimate {
    /// Both components finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.km.is_finite() && self.km >= 0.0 && self.minutes.is_finite() && self.minutes >= 0.0
    }

    /// Pass a valid estimate through, or name the pair it was made for.
    pub fn checked(self, from: &str, to: &str) -> Result<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(PlannerError::InvalidEstimate {
                from: from.to_string(),
                to: to.to_string(),
                km: self.km,
                minutes: self.minutes,
            })
        }
    }
}

/// Haversine-based travel estimator.
#[derive(Debug, Clone)]
pub struct HaversineEstimator {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
}

impl Default for HaversineEstimator {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl HaversineEstimator {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    /// Great-circle distance between two points in kilometers.
    pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
        let (lat1, lon1) = from;
        let (lat2, lon2) = to;

        let lat1_rad = lat1.to_radians();
        let lat2_rad = lat2.to_radians();
        let delta_lat = (lat2 - lat1).to_radians();
        let delta_lon = (lon2 - lon1).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
        // Clamp guards asin against rounding just above 1 for antipodal points.
        let c = 2.0 * a.sqrt().min(1.0).asin();

        EARTH_RADIUS_KM * c
    }

    /// Convert distance in km to drive time in minutes.
    fn km_to_minutes(&self, km: f64) -> f64 {
        km / self.speed_kmh * 60.0
    }
}

impl TravelEstimator for HaversineEstimator {
    fn estimate(&self, from: (f64, f64), to: (f64, f64)) -> Result<Estimate> {
        for (lat, lon) in [from, to] {
            if !lat.is_finite() || !lon.is_finite() {
                return Err(PlannerError::InvalidCoordinate {
                    id: String::new(),
                    lat,
                    lon,
                });
            }
        }

        let km = Self::haversine_km(from, to);
        Ok(Estimate {
            km,
            minutes: self.km_to_minutes(km),
        })
    }
}

/// Pairwise estimates for a fixed set of places, indexed by input order.
#[derive(Debug, Clone)]
pub struct TravelMatrix {
    cells: Vec<Vec<Estimate>>,
}

impl TravelMatrix {
    /// Estimate every pair once. Fails on the first place with a non-finite
    /// coordinate, or the first pair with a negative or non-finite estimate.
    pub fn build<P, E>(places: &[&P], estimator: &E) -> Result<Self>
    where
        P: Place + ?Sized,
        E: TravelEstimator + ?Sized,
    {
        for place in places {
            let (lat, lon) = place.location();
            if !lat.is_finite() || !lon.is_finite() {
                return Err(PlannerError::InvalidCoordinate {
                    id: place.id().to_string(),
                    lat,
                    lon,
                });
            }
        }

        let n = places.len();
        let mut cells = vec![vec![Estimate::default(); n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let estimate = estimator
                    .estimate(places[i].location(), places[j].location())?
                    .checked(places[i].id(), places[j].id())?;
                cells[i][j] = estimate;
                cells[j][i] = estimate;
            }
        }

        Ok(Self { cells })
    }

    pub fn get(&self, from: usize, to: usize) -> Estimate {
        self.cells[from][to]
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
