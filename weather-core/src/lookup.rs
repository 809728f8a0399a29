//! UI state for the weather search widget.
//!
//! A search is split into [`WeatherLookup::begin_search`] and
//! [`WeatherLookup::complete_search`] so a front end can keep rendering while
//! the request is in flight. Each search gets a sequence number and only the
//! most recently started search is allowed to update the state.

use chrono::{Local, Timelike};

use crate::{
    error::{INVALID_LOCATION_MESSAGE, LookupError},
    messages::{location_message, temperature_message, weather_message},
    model::{Location, WeatherResult},
    provider::WeatherProvider,
};

/// Handle for a search that passed validation and is awaiting its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    location: Location,
}

impl SearchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn location(&self) -> &Location {
        &self.location
    }
}

/// One labelled line of the results region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub label: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct WeatherLookup {
    query_text: String,
    result: Option<WeatherResult>,
    error_message: Option<String>,
    is_loading: bool,
    latest_seq: u64,
}

impl WeatherLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn set_query_text(&mut self, text: impl Into<String>) {
        self.query_text = text.into();
    }

    pub fn result(&self) -> Option<&WeatherResult> {
        self.result.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Validate `raw` and, if it is usable, mark the widget as loading.
    ///
    /// Returns `None` when validation fails; no request should be sent then.
    pub fn begin_search(&mut self, raw: &str) -> Option<SearchTicket> {
        self.query_text = raw.to_string();
        // Any earlier in-flight search is superseded, valid or not.
        self.latest_seq += 1;

        let location = match Location::parse(raw) {
            Ok(location) => location,
            Err(err) => {
                tracing::debug!(%err, "rejecting search");
                self.error_message = Some(INVALID_LOCATION_MESSAGE.to_string());
                self.result = None;
                self.is_loading = false;
                return None;
            }
        };

        self.is_loading = true;
        self.error_message = None;

        Some(SearchTicket { seq: self.latest_seq, location })
    }

    /// Apply the outcome of a search started with [`begin_search`](Self::begin_search).
    ///
    /// Returns `false` and leaves the state untouched if a newer search has
    /// been started since `ticket` was issued.
    pub fn complete_search(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<WeatherResult, LookupError>,
    ) -> bool {
        if ticket.seq != self.latest_seq {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                location = %ticket.location,
                "dropping stale search result"
            );
            return false;
        }

        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.error_message = None;
            }
            Err(err) => {
                tracing::debug!(location = %ticket.location, error = %err, "lookup failed");
                self.error_message = Some(err.user_message().to_string());
                self.result = None;
            }
        }
        self.is_loading = false;

        true
    }

    /// Run a whole search against `provider`: validate, fetch, store.
    pub async fn submit_search<P>(&mut self, provider: &P, raw: &str)
    where
        P: WeatherProvider + ?Sized,
    {
        let Some(ticket) = self.begin_search(raw) else {
            return;
        };

        let outcome = provider.current(ticket.location()).await;
        self.complete_search(ticket, outcome);
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_loading { "Loading..." } else { "Search" }
    }

    pub fn can_submit(&self) -> bool {
        !self.is_loading
    }

    /// Temperature, condition and location rows for the given local hour.
    pub fn result_rows(&self, hour: u32) -> Option<[ResultRow; 3]> {
        let result = self.result.as_ref()?;

        Some([
            ResultRow {
                label: "Temperature",
                text: temperature_message(result.temperature, result.unit),
            },
            ResultRow { label: "Condition", text: weather_message(&result.description) },
            ResultRow { label: "Location", text: location_message(&result.location, hour) },
        ])
    }

    /// [`result_rows`](Self::result_rows) using the viewer's local clock.
    pub fn result_rows_now(&self) -> Option<[ResultRow; 3]> {
        self.result_rows(Local::now().hour())
    }
}
