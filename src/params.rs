//! Traveler request parameters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, ValidationError};

pub const MIN_DAYS: u32 = 1;
pub const MAX_DAYS: u32 = 21;
pub const MAX_INTEREST_WEIGHT: f64 = 100.0;

/// Budget tier. Ordered so that `Low < Mid < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Budget {
    Low,
    Mid,
    High,
}

impl Budget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Budget::Low => "low",
            Budget::Mid => "mid",
            Budget::High => "high",
        }
    }
}

/// Daily intensity preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pace {
    Chill,
    Balanced,
    Packed,
}

impl Pace {
    /// Active minutes available per day: visits plus in-day driving.
    pub fn day_budget_minutes(&self) -> f64 {
        match self {
            Pace::Chill => 270.0,
            Pace::Balanced => 390.0,
            Pace::Packed => 510.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
    Ar,
}

impl Locale {
    /// Currency used when showing converted prices.
    pub fn display_currency(&self) -> &'static str {
        match self {
            Locale::En => "USD",
            Locale::Fr => "EUR",
            Locale::Ar => "MAD",
        }
    }
}

/// A planning request as sent by the web client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerParams {
    pub days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_city: Option<String>,
    pub budget: Budget,
    pub pace: Pace,
    /// Interest tag to weight in `[0, 100]`.
    pub interests: BTreeMap<String, f64>,
    #[serde(default = "default_sustainability_bias")]
    pub sustainability_bias: f64,
    #[serde(default = "default_true")]
    pub weather_aware: bool,
    #[serde(default = "default_true")]
    pub fx_aware: bool,
    #[serde(default)]
    pub locale: Locale,
}

fn default_sustainability_bias() -> f64 {
    0.5
}

fn default_true() -> bool {
    true
}

impl PlannerParams {
    /// Params with defaults for the optional fields.
    pub fn new(days: u32, budget: Budget, pace: Pace) -> Self {
        Self {
            days,
            start_city: None,
            budget,
            pace,
            interests: BTreeMap::new(),
            sustainability_bias: default_sustainability_bias(),
            weather_aware: true,
            fx_aware: true,
            locale: Locale::default(),
        }
    }

    pub fn interest(mut self, tag: impl Into<String>, weight: f64) -> Self {
        self.interests.insert(tag.into(), weight);
        self
    }

    pub fn start_city(mut self, city: impl Into<String>) -> Self {
        self.start_city = Some(city.into());
        self
    }

    pub fn sustainability_bias(mut self, bias: f64) -> Self {
        self.sustainability_bias = bias;
        self
    }

    pub fn weather_aware(mut self, enabled: bool) -> Self {
        self.weather_aware = enabled;
        self
    }

    pub fn fx_aware(mut self, enabled: bool) -> Self {
        self.fx_aware = enabled;
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Per-day time budget in minutes for the requested pace.
    pub fn day_budget_minutes(&self) -> f64 {
        self.pace.day_budget_minutes()
    }

    /// Weight for an interest tag, zero when absent.
    pub fn weight_for(&self, tag: &str) -> f64 {
        self.interests.get(tag).copied().unwrap_or(0.0)
    }

    /// Check every constraint and report all violations at once.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut fields = Vec::new();

        if !(MIN_DAYS..=MAX_DAYS).contains(&self.days) {
            fields.push(FieldError::new(
                "days",
                format!("must be between {} and {}, got {}", MIN_DAYS, MAX_DAYS, self.days),
            ));
        }

        if self.interests.is_empty() {
            fields.push(FieldError::new("interests", "must contain at least one entry"));
        }
        for (tag, weight) in &self.interests {
            if !weight.is_finite() || *weight < 0.0 || *weight > MAX_INTEREST_WEIGHT {
                fields.push(FieldError::new(
                    format!("interests.{}", tag),
                    format!("weight must be within [0, {}], got {}", MAX_INTEREST_WEIGHT, weight),
                ));
            }
        }

        if !self.sustainability_bias.is_finite() || !(0.0..=1.0).contains(&self.sustainability_bias) {
            fields.push(FieldError::new(
                "sustainabilityBias",
                format!("must be within [0, 1], got {}", self.sustainability_bias),
            ));
        }

        if fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { fields })
        }
    }
}
