use crate::{Config, Location, WeatherResult, error::LookupError};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod weatherapi;

pub use weatherapi::WeatherApiProvider;

/// Source of current conditions for a location.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, location: &Location) -> Result<WeatherResult, LookupError>;
}

/// Construct the WeatherAPI provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let provider = WeatherApiProvider::from_config(&config.weatherapi)?;
    Ok(Box::new(provider))
}
