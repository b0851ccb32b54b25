//! Display helpers for plan cards.

use serde::Serialize;

use crate::plan::PlanVariant;

/// "850m" below one kilometer, "12.3km" otherwise.
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{}m", (km * 1000.0).round() as i64)
    } else {
        format!("{:.1}km", km)
    }
}

/// "45min", "2h" or "1h 5min".
pub fn format_duration(minutes: f64) -> String {
    if minutes < 60.0 {
        return format!("{}min", minutes.round() as i64);
    }
    let total = minutes.round() as i64;
    let hours = total / 60;
    let rest = total % 60;
    if rest == 0 {
        format!("{}h", hours)
    } else {
        format!("{}h {}min", hours, rest)
    }
}

/// Headline numbers for a variant card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantStats {
    pub stops: usize,
    pub filled_days: usize,
    pub total_distance: String,
    pub total_drive: String,
    /// Average drive minutes per stop.
    pub average_drive_per_stop: f64,
}

impl VariantStats {
    pub fn from_variant(variant: &PlanVariant) -> Self {
        let stops = variant.stop_count();
        let average_drive_per_stop = if stops > 0 {
            variant.total_drive_min / stops as f64
        } else {
            0.0
        };

        Self {
            stops,
            filled_days: variant.filled_days(),
            total_distance: format_distance(variant.total_km),
            total_drive: format_duration(variant.total_drive_min),
            average_drive_per_stop,
        }
    }
}
