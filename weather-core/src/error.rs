use thiserror::Error;

/// Message shown when the query is blank.
pub const INVALID_LOCATION_MESSAGE: &str = "Please Enter a Valid Location.";

/// Message shown for every kind of lookup failure.
pub const CITY_NOT_FOUND_MESSAGE: &str = "City not found. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("location must not be empty")]
    EmptyLocation,
}

impl ValidationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::EmptyLocation => INVALID_LOCATION_MESSAGE,
        }
    }
}

/// Anything that goes wrong between sending the request and holding a parsed result.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("failed to reach WeatherAPI: {0}")]
    Request(#[from] reqwest::Error),

    #[error("WeatherAPI request failed with status {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },

    #[error("failed to parse WeatherAPI response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl LookupError {
    /// The UI does not distinguish failure kinds.
    pub fn user_message(&self) -> &'static str {
        CITY_NOT_FOUND_MESSAGE
    }
}
