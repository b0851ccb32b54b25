//! Planner output: variants, days, scheduled items and legs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::signals::Condition;

/// Optimization bias of a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariantLabel {
    Fastest,
    Balanced,
    #[serde(rename = "Deep Culture")]
    DeepCulture,
}

impl VariantLabel {
    /// Labels in output order.
    pub const ALL: [VariantLabel; 3] = [
        VariantLabel::Fastest,
        VariantLabel::Balanced,
        VariantLabel::DeepCulture,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VariantLabel::Fastest => "Fastest",
            VariantLabel::Balanced => "Balanced",
            VariantLabel::DeepCulture => "Deep Culture",
        }
    }
}

impl fmt::Display for VariantLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drive between two consecutive stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanLeg {
    pub from_id: String,
    pub to_id: String,
    pub drive_km: f64,
    pub drive_min: f64,
}

/// A scheduled visit. Times are minutes from the start of the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDayItem {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub category: String,
    pub start_min: f64,
    pub end_min: f64,
    pub visit_min: u32,
    pub reason: Vec<String>,
}

impl PlanDayItem {
    pub fn location(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDay {
    pub items: Vec<PlanDayItem>,
    pub legs: Vec<PlanLeg>,
    /// Relocation from the previous day's last stop to this day's first stop.
    /// Not counted against the day budget or the variant totals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer: Option<PlanLeg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl PlanDay {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn visit_minutes(&self) -> f64 {
        self.items.iter().map(|item| f64::from(item.visit_min)).sum()
    }

    pub fn drive_minutes(&self) -> f64 {
        self.legs.iter().map(|leg| leg.drive_min).sum()
    }

    pub fn drive_km(&self) -> f64 {
        self.legs.iter().map(|leg| leg.drive_km).sum()
    }

    /// Minutes the day consumes from its budget.
    pub fn active_minutes(&self) -> f64 {
        self.visit_minutes() + self.drive_minutes()
    }
}

/// Non-fatal conditions noticed while planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PlanWarning {
    /// Candidates ran out before every requested day had a stop.
    #[serde(rename_all = "camelCase")]
    InsufficientCandidates { requested_days: u32, filled_days: u32 },
    /// No place matched a positive interest; ranked by rating instead.
    NoInterestMatch,
    UnknownStartCity { city: String },
    DuplicatePlace { id: String },
    /// The visit alone exceeds the day budget.
    PlaceTooLong { id: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanVariant {
    pub label: VariantLabel,
    pub total_km: f64,
    pub total_drive_min: f64,
    pub days: Vec<PlanDay>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<PlanWarning>,
}

impl PlanVariant {
    pub fn items(&self) -> impl Iterator<Item = &PlanDayItem> {
        self.days.iter().flat_map(|day| day.items.iter())
    }

    pub fn stop_count(&self) -> usize {
        self.days.iter().map(|day| day.items.len()).sum()
    }

    pub fn filled_days(&self) -> usize {
        self.days.iter().filter(|day| !day.is_empty()).count()
    }

    pub fn has_shortfall(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, PlanWarning::InsufficientCandidates { .. }))
    }
}
