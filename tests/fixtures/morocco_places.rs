//! Real Moroccan points of interest for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap.

#![allow(dead_code)]

use atlas_planner::{Budget, Footprint, Pace, PlannerParams, Poi};

// ============================================================================
// Marrakech
// ============================================================================

/// Ten Marrakech places spanning food, history and nature.
pub fn marrakech_places() -> Vec<Poi> {
    vec![
        Poi::new("jemaa-el-fna", "Jemaa el-Fnaa", (31.6258, -7.9891), "market", 90)
            .footprint(Footprint::High)
            .rating(4.6),
        Poi::new("bahia-palace", "Bahia Palace", (31.6216, -7.9833), "palace", 75)
            .cost_tier(Budget::Low)
            .rating(4.5)
            .price_mad(70.0),
        Poi::new("koutoubia", "Koutoubia Mosque", (31.6237, -7.9937), "mosque", 30).rating(4.7),
        Poi::new("jardin-majorelle", "Jardin Majorelle", (31.6417, -8.0033), "garden", 60)
            .cost_tier(Budget::Mid)
            .footprint(Footprint::High)
            .rating(4.6)
            .price_mad(150.0),
        Poi::new("ben-youssef", "Ben Youssef Madrasa", (31.6318, -7.9862), "madrasa", 60)
            .rating(4.6)
            .price_mad(50.0),
        Poi::new("saadian-tombs", "Saadian Tombs", (31.6173, -7.9886), "tomb", 45)
            .rating(4.3)
            .price_mad(70.0),
        Poi::new("dar-el-bacha", "Dar El Bacha Museum", (31.6322, -7.9934), "museum", 60).rating(4.5),
        Poi::new("cafe-clock", "Café Clock", (31.6205, -7.9858), "cafe", 60)
            .cost_tier(Budget::Low)
            .rating(4.4),
        Poi::new("al-fassia", "Al Fassia", (31.6363, -8.0117), "restaurant", 90)
            .cost_tier(Budget::High)
            .rating(4.6),
        Poi::new("menara-gardens", "Menara Gardens", (31.6136, -8.0221), "garden", 60)
            .footprint(Footprint::Low)
            .rating(4.0),
    ]
}

// ============================================================================
// Other cities
// ============================================================================

pub fn fes_qarawiyyin() -> Poi {
    Poi::new("al-qarawiyyin", "Al Quaraouiyine", (34.0648, -4.9732), "mosque", 60).rating(4.7)
}

pub fn essaouira_beach() -> Poi {
    Poi::new("essaouira-beach", "Essaouira Beach", (31.5085, -9.7595), "beach", 120).rating(4.4)
}

// ============================================================================
// Requests
// ============================================================================

/// The reference request: three balanced mid-budget days, food and history.
pub fn food_history_params(days: u32) -> PlannerParams {
    PlannerParams::new(days, Budget::Mid, Pace::Balanced)
        .interest("food", 80.0)
        .interest("history", 40.0)
        .sustainability_bias(0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_planner::traits::Place;

    #[test]
    fn test_marrakech_places_count() {
        assert_eq!(marrakech_places().len(), 10);
    }

    #[test]
    fn test_coordinates_in_marrakech_area() {
        for place in marrakech_places() {
            let (lat, lon) = place.location();
            assert!(lat > 31.5 && lat < 31.7, "{} lat out of range: {}", place.name, lat);
            assert!(lon > -8.1 && lon < -7.9, "{} lon out of range: {}", place.name, lon);
        }
    }
}
