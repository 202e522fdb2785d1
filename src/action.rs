//! Actions: user intents and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::{GeocodingError, WeatherError};
use crate::state::{Coordinate, WeatherSnapshot};

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Weather category =====
    /// Intent: look up current conditions for a city (triggers async task)
    WeatherSearch(String),

    /// Result: conditions loaded
    WeatherDidLoad { request: u64, snapshot: WeatherSnapshot },

    /// Result: the service answered with an error message
    WeatherDidReject { request: u64, message: String },

    /// Result: transport or decode failure
    WeatherDidError { request: u64, error: String },

    // ===== Search category =====
    /// Search field text changed
    SearchQueryChange(String),

    /// Focus the search field
    SearchFocus,

    /// Leave the search field
    SearchBlur,

    // ===== Map category =====
    /// A point on the map was clicked
    MapClick(Coordinate),

    MapZoomIn,

    MapZoomOut,

    // ===== Geocode category =====
    /// Result: reverse geocoding answered (`None` when no place is known)
    GeocodeDidResolve { request: u64, name: Option<String> },

    /// Result: reverse geocoding failed
    GeocodeDidError { request: u64, error: String },

    // ===== Alert category =====
    /// Close the alert modal
    AlertDismiss,

    // ===== Uncategorized (global) =====
    /// Force a re-render (for cursor movement, etc.)
    Render,

    /// Exit the application
    Quit,
}

impl Action {
    /// Turn a finished weather request into its result action.
    ///
    /// Errors the user can act on become an alert (`WeatherDidReject`);
    /// transport and decode failures only clear the panel.
    pub fn from_weather_result(
        request: u64,
        result: Result<WeatherSnapshot, WeatherError>,
    ) -> Self {
        match result {
            Ok(snapshot) => {
                tracing::info!(request, location = %snapshot.location_name, "weather loaded");
                Action::WeatherDidLoad { request, snapshot }
            }
            Err(e) if e.is_user_facing() => {
                tracing::warn!(request, error = %e, "weather service rejected search");
                Action::WeatherDidReject {
                    request,
                    message: e.to_string(),
                }
            }
            Err(e) => {
                tracing::error!(request, error = %e, "weather request failed");
                Action::WeatherDidError {
                    request,
                    error: e.to_string(),
                }
            }
        }
    }

    pub fn from_geocode_result(
        request: u64,
        result: Result<Option<String>, GeocodingError>,
    ) -> Self {
        match result {
            Ok(name) => {
                if name.is_none() {
                    tracing::debug!(request, "no place name at selected location");
                }
                Action::GeocodeDidResolve { request, name }
            }
            Err(e) => {
                tracing::error!(request, error = %e, "reverse geocoding failed");
                Action::GeocodeDidError {
                    request,
                    error: e.to_string(),
                }
            }
        }
    }
}
