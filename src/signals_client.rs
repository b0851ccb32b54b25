//! HTTP adapter for the weather and exchange-rate upstreams.
//!
//! Runs before planning; the planner itself never does I/O.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::signals::{conditions_from_daily, DayConditions, FxRates, OpenMeteoDaily};

const FX_BASE: &str = "MAD";
const FX_SYMBOLS: [&str; 2] = ["USD", "EUR"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalsConfig {
    pub weather_base_url: String,
    pub fx_base_url: String,
    pub fx_fallback_url: String,
    pub timeout_secs: u64,
}

impl Default for SignalsConfig {
    fn default() -> Self {
        Self {
            weather_base_url: "https://api.open-meteo.com".to_string(),
            fx_base_url: "https://api.exchangerate.host".to_string(),
            fx_fallback_url: "https://open.er-api.com".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Error, Debug)]
pub enum SignalsError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream response missing {0}")]
    MissingField(&'static str),
}

#[derive(Debug, Clone)]
pub struct SignalsClient {
    config: SignalsConfig,
    client: reqwest::blocking::Client,
}

impl SignalsClient {
    pub fn new(config: SignalsConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &SignalsConfig {
        &self.config
    }

    /// Daily forecast for a location, starting today.
    pub fn fetch_conditions(&self, lat: f64, lon: f64) -> Result<DayConditions, SignalsError> {
        let url = forecast_url(&self.config.weather_base_url, lat, lon);
        let body = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OpenMeteoResponse>())?;

        let daily = body.daily.ok_or(SignalsError::MissingField("daily"))?;
        let conditions = conditions_from_daily(&daily);
        debug!(lat, lon, days = conditions.len(), "fetched forecast");
        Ok(conditions)
    }

    /// MAD exchange rates, falling back to the secondary provider when the
    /// primary fails or returns unusable rates.
    pub fn fetch_fx(&self) -> Result<FxRates, SignalsError> {
        match self.fetch_primary_fx() {
            Ok(rates) => Ok(rates),
            Err(err) => {
                info!(error = %err, "primary fx provider failed, trying fallback");
                self.fetch_fallback_fx()
            }
        }
    }

    fn fetch_primary_fx(&self) -> Result<FxRates, SignalsError> {
        let url = format!(
            "{}/latest?base={}&symbols={}",
            self.config.fx_base_url,
            FX_BASE,
            FX_SYMBOLS.join(",")
        );
        let body = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<FxResponse>())?;
        rates_from_response(body)
    }

    fn fetch_fallback_fx(&self) -> Result<FxRates, SignalsError> {
        let url = format!("{}/v6/latest/{}", self.config.fx_fallback_url, FX_BASE);
        let body = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<FxResponse>())?;
        rates_from_response(body)
    }
}

fn forecast_url(base_url: &str, lat: f64, lon: f64) -> String {
    format!(
        "{}/v1/forecast?latitude={:.4}&longitude={:.4}\
         &daily=temperature_2m_max,temperature_2m_min,precipitation_sum,wind_speed_10m_max\
         &timezone=auto",
        base_url, lat, lon
    )
}

/// Keep only the symbols the app displays; both must be finite.
fn rates_from_response(body: FxResponse) -> Result<FxRates, SignalsError> {
    let rates = body.rates.ok_or(SignalsError::MissingField("rates"))?;
    let mut out = FxRates::new(FX_BASE);
    for symbol in FX_SYMBOLS {
        match rates.get(symbol) {
            Some(rate) if rate.is_finite() => {
                out.rates.insert(symbol.to_string(), *rate);
            }
            _ => return Err(SignalsError::MissingField("rates")),
        }
    }
    Ok(out)
}

#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    daily: Option<OpenMeteoDaily>,
}

#[derive(Debug, Deserialize)]
struct FxResponse {
    rates: Option<HashMap<String, f64>>,
}
