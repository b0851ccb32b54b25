//! External signals consumed by the planner: daily weather conditions and
//! exchange rates. Both are optional; absent data never fails a request.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

const STORM_PRECIP_MM: f64 = 10.0;
const RAIN_PRECIP_MM: f64 = 2.0;
const HEAT_MAX_C: f64 = 38.0;
const WIND_MAX_KMH: f64 = 50.0;

/// Daily condition summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Clear,
    Cloudy,
    Rain,
    Storm,
    Heat,
    Wind,
}

impl Condition {
    /// Conditions that make outdoor-only stops a poor choice.
    pub fn is_adverse(&self) -> bool {
        matches!(
            self,
            Condition::Rain | Condition::Storm | Condition::Heat | Condition::Wind
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Clear => "clear",
            Condition::Cloudy => "cloudy",
            Condition::Rain => "rain",
            Condition::Storm => "storm",
            Condition::Heat => "heat",
            Condition::Wind => "wind",
        }
    }
}

/// Forecast keyed by zero-based trip day.
pub type DayConditions = BTreeMap<usize, Condition>;

/// The `daily` block of an Open-Meteo forecast response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenMeteoDaily {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_speed_10m_max: Vec<Option<f64>>,
}

/// Classify one day. Missing readings count as benign.
pub fn classify_day(precip_mm: Option<f64>, max_temp_c: Option<f64>, max_wind_kmh: Option<f64>) -> Condition {
    let precip = precip_mm.unwrap_or(0.0);
    if precip >= STORM_PRECIP_MM {
        Condition::Storm
    } else if precip >= RAIN_PRECIP_MM {
        Condition::Rain
    } else if max_temp_c.is_some_and(|t| t >= HEAT_MAX_C) {
        Condition::Heat
    } else if max_wind_kmh.is_some_and(|w| w >= WIND_MAX_KMH) {
        Condition::Wind
    } else if precip > 0.0 {
        Condition::Cloudy
    } else {
        Condition::Clear
    }
}

/// Convert an Open-Meteo daily block to per-day conditions. Day `i` of the
/// trip is the `i`-th forecast entry.
pub fn conditions_from_daily(daily: &OpenMeteoDaily) -> DayConditions {
    let days = daily
        .time
        .len()
        .max(daily.precipitation_sum.len())
        .max(daily.temperature_2m_max.len())
        .max(daily.wind_speed_10m_max.len());

    (0..days)
        .map(|day| {
            let precip = daily.precipitation_sum.get(day).copied().flatten();
            let temp = daily.temperature_2m_max.get(day).copied().flatten();
            let wind = daily.wind_speed_10m_max.get(day).copied().flatten();
            (day, classify_day(precip, temp, wind))
        })
        .collect()
}

/// Exchange rates quoted against a base currency (MAD for this app).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FxRates {
    pub base: String,
    pub rates: HashMap<String, f64>,
}

impl FxRates {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            rates: HashMap::new(),
        }
    }

    pub fn rate(mut self, currency: impl Into<String>, value: f64) -> Self {
        self.rates.insert(currency.into(), value);
        self
    }

    /// Convert an amount in the base currency. The base itself converts 1:1.
    pub fn convert_from_base(&self, amount: f64, currency: &str) -> Option<f64> {
        if currency == self.base {
            return Some(amount);
        }
        self.rates
            .get(currency)
            .filter(|rate| rate.is_finite() && **rate > 0.0)
            .map(|rate| amount * rate)
    }
}

/// Optional signals resolved by the caller before planning.
#[derive(Debug, Clone, Default)]
pub struct Signals {
    pub conditions: Option<DayConditions>,
    pub fx: Option<FxRates>,
}

impl Signals {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_conditions(mut self, conditions: DayConditions) -> Self {
        self.conditions = Some(conditions);
        self
    }

    pub fn with_fx(mut self, fx: FxRates) -> Self {
        self.fx = Some(fx);
        self
    }

    pub fn condition_for(&self, day: usize) -> Option<Condition> {
        self.conditions.as_ref().and_then(|c| c.get(&day).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_thresholds() {
        assert_eq!(classify_day(Some(12.0), Some(20.0), None), Condition::Storm);
        assert_eq!(classify_day(Some(3.0), Some(20.0), None), Condition::Rain);
        assert_eq!(classify_day(Some(0.0), Some(41.0), None), Condition::Heat);
        assert_eq!(classify_day(None, None, Some(60.0)), Condition::Wind);
        assert_eq!(classify_day(Some(0.4), Some(25.0), Some(10.0)), Condition::Cloudy);
        assert_eq!(classify_day(None, None, None), Condition::Clear);
    }

    #[test]
    fn test_conditions_from_open_meteo_daily() {
        let json = r#"{
            "time": ["2026-10-17", "2026-10-18", "2026-10-19"],
            "temperature_2m_max": [27.1, 24.0, null],
            "temperature_2m_min": [14.0, 13.2, 12.9],
            "precipitation_sum": [0.0, 6.3, null]
        }"#;
        let daily: OpenMeteoDaily = serde_json::from_str(json).unwrap();
        let conditions = conditions_from_daily(&daily);

        assert_eq!(conditions.len(), 3);
        assert_eq!(conditions[&0], Condition::Clear);
        assert_eq!(conditions[&1], Condition::Rain);
        assert_eq!(conditions[&2], Condition::Clear);
    }

    #[test]
    fn test_wind_only_payload_yields_conditions() {
        let json = r#"{"wind_speed_10m_max": [12.0, 64.5]}"#;
        let daily: OpenMeteoDaily = serde_json::from_str(json).unwrap();
        let conditions = conditions_from_daily(&daily);

        assert_eq!(conditions.len(), 2);
        assert_eq!(conditions[&0], Condition::Clear);
        assert_eq!(conditions[&1], Condition::Wind);
    }

    #[test]
    fn test_fx_conversion() {
        let fx = FxRates::new("MAD").rate("USD", 0.1).rate("EUR", 0.092);
        assert_eq!(fx.convert_from_base(100.0, "MAD"), Some(100.0));
        assert!((fx.convert_from_base(100.0, "USD").unwrap() - 10.0).abs() < 1e-9);
        assert_eq!(fx.convert_from_base(100.0, "GBP"), None);
    }

    #[test]
    fn test_adverse_conditions() {
        assert!(Condition::Rain.is_adverse());
        assert!(Condition::Heat.is_adverse());
        assert!(!Condition::Clear.is_adverse());
        assert!(!Condition::Cloudy.is_adverse());
    }
}
