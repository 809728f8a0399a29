use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    config::WeatherApiConfig,
    error::LookupError,
    model::{Location, TemperatureUnit, WeatherResult},
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { api_key, base_url, http: Client::new() }
    }

    pub fn from_config(config: &WeatherApiConfig) -> anyhow::Result<Self> {
        let api_key = config.api_key().ok_or_else(|| {
            anyhow!(
                "No API key configured for WeatherAPI.\n\
                 Hint: run `weather-lookup configure` or set WEATHERAPI_KEY."
            )
        })?;

        Ok(Self::new(api_key.to_owned(), config.base_url()))
    }

    fn current_url(&self) -> String {
        format!("{}/current.json", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    location: WaLocation,
    current: WaCurrent,
}

impl From<WaResponse> for WeatherResult {
    fn from(parsed: WaResponse) -> Self {
        WeatherResult {
            temperature: parsed.current.temp_c,
            description: parsed.current.condition.text,
            location: parsed.location.name,
            unit: TemperatureUnit::Celsius,
        }
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn current(&self, location: &Location) -> Result<WeatherResult, LookupError> {
        tracing::debug!(location = %location, "requesting current conditions");

        // `query` percent-encodes, so `&`, `#` and spaces in city names are safe.
        let res = self
            .http
            .get(self.current_url())
            .query(&[("key", self.api_key.as_str()), ("q", location.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(LookupError::Status { status, body: truncate_body(&body) });
        }

        let parsed: WaResponse = serde_json::from_str(&body)?;
        tracing::debug!(resolved = %parsed.location.name, "WeatherAPI lookup succeeded");

        Ok(parsed.into())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|&i| body.is_char_boundary(i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
