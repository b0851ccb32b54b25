//! Built-in Moroccan city table used to resolve `startCity`.

/// A city with its center coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    pub name: &'static str,
    pub slug: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl City {
    pub const fn new(name: &'static str, slug: &'static str, lat: f64, lon: f64) -> Self {
        Self { name, slug, lat, lon }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }
}

pub const CITIES: &[City] = &[
    City::new("Marrakech", "marrakech", 31.6295, -7.9811),
    City::new("Casablanca", "casablanca", 33.5731, -7.5898),
    City::new("Fez", "fes", 34.0331, -5.0003),
    City::new("Tangier", "tangier", 35.7595, -5.8340),
    City::new("Agadir", "agadir", 30.4278, -9.5981),
    City::new("Essaouira", "essaouira", 31.51, -9.77),
];

/// Look up a city by slug or name, ignoring case. "fez" resolves to Fez.
pub fn find_city(key: &str) -> Option<&'static City> {
    let key = key.trim();
    CITIES.iter().find(|city| {
        city.slug.eq_ignore_ascii_case(key)
            || city.name.eq_ignore_ascii_case(key)
    })
}
