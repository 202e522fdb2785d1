//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::icons::WeatherIcon;
use crate::map::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM};

/// A point on the globe, in degrees
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Text shown in the marker popup
    pub fn popup_label(&self) -> String {
        format!("Lat: {:.2}, Lon: {:.2}", self.lat, self.lon)
    }
}

/// Current conditions for one place, as returned by the weather service
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherSnapshot {
    /// Relative humidity, percent
    pub humidity: u8,
    /// Wind speed in metres per second
    pub wind_speed: f64,
    /// Temperature rounded down to whole degrees
    pub temperature_celsius: i32,
    pub location_name: String,
    pub icon: WeatherIcon,
    pub coordinate: Coordinate,
}

/// Message shown when a search is submitted with nothing in it.
pub const EMPTY_CITY_MESSAGE: &str = "Please enter a city name";

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Core data (visible in debug) ---
    /// Last successful fetch; `None` until one succeeds or after a failed one
    #[debug(section = "Weather", label = "Snapshot", debug_fmt)]
    pub weather: Option<WeatherSnapshot>,

    /// Map center and marker position
    #[debug(section = "Map", label = "Coordinate", debug_fmt)]
    pub coordinate: Option<Coordinate>,

    #[debug(section = "Map", label = "Zoom")]
    pub zoom: u8,

    /// A weather request is in flight
    #[debug(section = "Weather", label = "Loading")]
    pub is_loading: bool,

    /// Blocking message (validation or service error)
    #[debug(section = "Weather", label = "Alert", debug_fmt)]
    pub alert: Option<String>,

    /// Token of the latest weather request; older results are dropped
    #[debug(section = "Requests", label = "Weather")]
    pub weather_request: u64,

    /// Token of the latest reverse-geocode request
    #[debug(section = "Requests", label = "Geocode")]
    pub geocode_request: u64,

    // --- Search field ---
    #[debug(section = "Search", label = "Query", debug_fmt)]
    pub search_query: String,

    #[debug(skip)]
    pub search_focused: bool,
}

impl AppState {
    /// Create state with the search field pre-filled and the map at `zoom`
    pub fn new(search_query: impl Into<String>, zoom: u8) -> Self {
        Self {
            weather: None,
            coordinate: None,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            is_loading: false,
            alert: None,
            weather_request: 0,
            geocode_request: 0,
            search_query: search_query.into(),
            search_focused: false,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new("London", DEFAULT_ZOOM)
    }
}
