//! Core library for the `weather-lookup` widget.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The WeatherAPI.com provider behind a [`WeatherProvider`] trait
//! - The search widget state ([`WeatherLookup`]) and its derived messages
//!
//! It is used by `weather-lookup-cli`, but any other front end can drive
//! [`WeatherLookup`] the same way.

pub mod config;
pub mod error;
pub mod lookup;
pub mod messages;
pub mod model;
pub mod provider;

pub use config::{Config, WeatherApiConfig};
pub use error::{LookupError, ValidationError};
pub use lookup::{ResultRow, SearchTicket, WeatherLookup};
pub use model::{Location, TemperatureUnit, WeatherResult};
pub use provider::{WeatherApiProvider, WeatherProvider};
