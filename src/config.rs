//! Runtime configuration resolved from the command line and environment

use std::path::PathBuf;
use std::time::Duration;

use crate::map::{TileSource, DEFAULT_ZOOM};

/// Everything the clients and the UI need at startup
#[derive(Clone, Debug)]
pub struct Config {
    /// OpenWeather `appid`
    pub api_key: String,
    pub weather_url: String,
    pub geocode_url: String,
    pub tiles: TileSource,
    /// City searched on startup
    pub initial_city: String,
    pub zoom: u8,
    pub request_timeout: Duration,
    pub log_file: PathBuf,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            weather_url: crate::api::OPENWEATHER_URL.into(),
            geocode_url: crate::api::NOMINATIM_URL.into(),
            tiles: TileSource::default(),
            initial_city: "London".into(),
            zoom: DEFAULT_ZOOM,
            request_timeout: Duration::from_secs(10),
            log_file: default_log_file(),
        }
    }
}

/// `weather-panel.log` in the system temp directory
pub fn default_log_file() -> PathBuf {
    std::env::temp_dir().join("weather-panel.log")
}
