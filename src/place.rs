//! Points of interest and the category taxonomy used to match interests.

use serde::{Deserialize, Serialize};

use crate::params::Budget;
use crate::traits::Place;

/// Environmental / crowding footprint of a place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Footprint {
    Low,
    #[default]
    Normal,
    High,
}

/// Interest tags considered cultural for the Deep Culture variant.
pub const CULTURAL_INTERESTS: &[&str] = &["history", "architecture", "handicrafts"];

/// Interest tags a category contributes to. A category always matches an
/// interest of the same name; this table adds the implied ones.
pub fn interest_tags(category: &str) -> &'static [&'static str] {
    match category {
        "restaurant" | "cafe" | "street-food" | "food" => &["food"],
        "market" | "souk" => &["food", "handicrafts"],
        "cooperative" | "tannery" | "workshop" => &["handicrafts"],
        "palace" | "mosque" | "madrasa" | "kasbah" | "riad" => &["architecture", "history"],
        "museum" | "monument" | "tomb" | "ruins" | "medina" => &["history"],
        "garden" | "park" | "mountain" | "desert" | "waterfall" | "viewpoint" => &["nature"],
        "beach" => &["surf", "nature"],
        "surf-spot" => &["surf"],
        _ => &[],
    }
}

/// Whether `category` matches the interest `tag`.
pub fn category_matches(category: &str, tag: &str) -> bool {
    category == tag || interest_tags(category).contains(&tag)
}

/// Categories that are only enjoyable outside.
pub fn is_outdoor_category(category: &str) -> bool {
    matches!(
        category,
        "garden"
            | "park"
            | "mountain"
            | "desert"
            | "waterfall"
            | "viewpoint"
            | "beach"
            | "surf-spot"
            | "nature"
            | "surf"
    )
}

/// Concrete place record, as loaded from the static city datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poi {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub category: String,
    pub visit_min: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_tier: Option<Budget>,
    #[serde(default)]
    pub footprint: Footprint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_mad: Option<f64>,
    /// Overrides the category-derived outdoor flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outdoor: Option<bool>,
}

impl Poi {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: (f64, f64),
        category: impl Into<String>,
        visit_min: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lat: location.0,
            lon: location.1,
            category: category.into(),
            visit_min,
            cost_tier: None,
            footprint: Footprint::Normal,
            rating: None,
            price_mad: None,
            outdoor: None,
        }
    }

    pub fn cost_tier(mut self, tier: Budget) -> Self {
        self.cost_tier = Some(tier);
        self
    }

    pub fn footprint(mut self, footprint: Footprint) -> Self {
        self.footprint = footprint;
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn price_mad(mut self, price: f64) -> Self {
        self.price_mad = Some(price);
        self
    }

    pub fn outdoor(mut self, outdoor: bool) -> Self {
        self.outdoor = Some(outdoor);
        self
    }
}

impl Place for Poi {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn visit_minutes(&self) -> u32 {
        self.visit_min
    }

    fn cost_tier(&self) -> Option<Budget> {
        self.cost_tier
    }

    fn footprint(&self) -> Footprint {
        self.footprint
    }

    fn rating(&self) -> Option<f64> {
        self.rating
    }

    fn price_mad(&self) -> Option<f64> {
        self.price_mad
    }

    fn is_outdoor(&self) -> bool {
        self.outdoor
            .unwrap_or_else(|| is_outdoor_category(&self.category))
    }
}
