//! Human-readable sentences derived from a [`WeatherResult`](crate::WeatherResult).
//!
//! All functions here are pure; the caller decides when to re-render.

use chrono::{Local, Timelike};

use crate::model::TemperatureUnit;

/// Pick a sentence for the temperature band `temperature` falls into.
pub fn temperature_message(temperature: f64, unit: TemperatureUnit) -> String {
    // -0.0 would otherwise print as "-0".
    let temperature = if temperature == 0.0 { 0.0 } else { temperature };

    if temperature < 0.0 {
        format!("It's freezing at {temperature}°{unit}! Bundle up!")
    } else if temperature < 10.0 {
        format!("It's quite cold at {temperature}°{unit}. Wear warm clothes.")
    } else if temperature < 20.0 {
        format!("The temperature is {temperature}°{unit}. Comfortable for a light jacket.")
    } else if temperature < 30.0 {
        format!("It's a pleasant {temperature}°{unit}. Enjoy the nice weather!")
    } else {
        format!("It's hot at {temperature}°{unit}. Stay hydrated!")
    }
}

/// Map a provider condition label to a canned sentence.
///
/// Matching is case-insensitive and exact; unknown labels come back unchanged.
pub fn weather_message(description: &str) -> String {
    let canned = match description.to_lowercase().as_str() {
        "sunny" => "It's a beautiful sunny day!",
        "partly cloudy" => "Expect some clouds and sunshine.",
        "cloudy" => "It's cloudy today.",
        "overcast" => "The sky is overcast.",
        "rain" => "Don't forget your umbrella! It's raining.",
        "thunderstorm" => "Thunderstorms are expected today.",
        "snow" => "Bundle up! It's snowing.",
        "mist" => "It's misty outside.",
        "fog" => "Be careful, there's fog outside.",
        _ => return description.to_string(),
    };

    canned.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPeriod {
    Day,
    Night,
}

impl DayPeriod {
    /// Night runs from 18:00 up to (not including) 06:00.
    pub fn from_hour(hour: u32) -> Self {
        if (6..18).contains(&hour) { DayPeriod::Day } else { DayPeriod::Night }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayPeriod::Day => "During the Day",
            DayPeriod::Night => "at Night",
        }
    }
}

/// Append a day/night suffix for the given wall-clock hour (0-23).
pub fn location_message(location: &str, hour: u32) -> String {
    format!("{location} {}", DayPeriod::from_hour(hour).label())
}

/// Same as [`location_message`] using the viewer's local clock.
///
/// This is the local time of the machine rendering the result, not of the
/// queried city.
pub fn location_message_now(location: &str) -> String {
    location_message(location, Local::now().hour())
}
