//! OpenWeather and Nominatim clients

use std::time::Duration;

use serde::Deserialize;

use crate::icons::resolve_icon;
use crate::state::{Coordinate, WeatherSnapshot};

pub const OPENWEATHER_URL: &str = "https://api.openweathermap.org";
pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim rejects requests without an identifying agent.
const USER_AGENT: &str = concat!("weather-panel/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Weather API
// ============================================================================

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    name: String,
    coord: CoordResponse,
    main: MainResponse,
    wind: WindResponse,
    weather: Vec<ConditionResponse>,
}

#[derive(Debug, Deserialize)]
struct CoordResponse {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct MainResponse {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct WindResponse {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionResponse {
    icon: String,
}

/// Error body returned with non-success statuses
#[derive(Debug, Deserialize)]
struct ServiceErrorResponse {
    message: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum WeatherError {
    #[error("Please enter a city name")]
    EmptyCity,
    #[error("could not build HTTP client: {0}")]
    Client(reqwest::Error),
    #[error("weather request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{message}")]
    Service { status: u16, message: String },
    #[error("unexpected weather response: {0}")]
    Decode(String),
}

impl WeatherError {
    /// Errors the user should see; the rest are logged and clear the display.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, WeatherError::EmptyCity | WeatherError::Service { .. })
    }
}

impl WeatherResponse {
    fn into_snapshot(self) -> Result<WeatherSnapshot, WeatherError> {
        let condition = self
            .weather
            .first()
            .ok_or_else(|| WeatherError::Decode("no weather conditions in response".into()))?;

        Ok(WeatherSnapshot {
            humidity: self.main.humidity,
            wind_speed: self.wind.speed,
            temperature_celsius: self.main.temp.floor() as i32,
            location_name: self.name,
            icon: resolve_icon(&condition.icon),
            coordinate: Coordinate::new(self.coord.lat, self.coord.lon),
        })
    }
}

/// Current-conditions client for the OpenWeather `/data/2.5/weather` endpoint
#[derive(Clone, Debug)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(WeatherError::Client)?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn url(&self, city: &str) -> String {
        format!(
            "{}/data/2.5/weather?q={}&units=metric&appid={}",
            self.base_url,
            urlencoding::encode(city),
            urlencoding::encode(&self.api_key)
        )
    }

    /// Fetch current conditions for `city`.
    ///
    /// An empty city is rejected before any request is made.
    pub async fn fetch_weather(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::EmptyCity);
        }

        let response = self.http.get(self.url(city)).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ServiceErrorResponse>(&body)
                .ok()
                .and_then(|err| err.message)
                .filter(|msg| !msg.is_empty())
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Request failed")
                        .to_string()
                });
            return Err(WeatherError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let data: WeatherResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Decode(e.to_string()))?;
        data.into_snapshot()
    }
}

// ============================================================================
// Reverse geocoding API
// ============================================================================

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    address: Option<AddressResponse>,
}

#[derive(Debug, Default, Deserialize)]
struct AddressResponse {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
}

impl AddressResponse {
    /// First non-empty of city, town, village, state
    fn place_name(self) -> Option<String> {
        [self.city, self.town, self.village, self.state]
            .into_iter()
            .flatten()
            .map(|name| name.trim().to_string())
            .find(|name| !name.is_empty())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum GeocodingError {
    #[error("could not build HTTP client: {0}")]
    Client(reqwest::Error),
    #[error("reverse geocoding request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("reverse geocoding returned status {0}")]
    Status(u16),
    #[error("unexpected reverse geocoding response: {0}")]
    Decode(String),
}

/// Coordinate-to-place-name client for the Nominatim `/reverse` endpoint
#[derive(Clone, Debug)]
pub struct GeocodingClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeocodingClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GeocodingError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(GeocodingError::Client)?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Resolve `coord` to a place name.
    ///
    /// `Ok(None)` means the service answered but knows no city, town, village
    /// or state there.
    pub async fn resolve_place_name(
        &self,
        coord: Coordinate,
    ) -> Result<Option<String>, GeocodingError> {
        let url = format!(
            "{}/reverse?format=json&lat={}&lon={}",
            self.base_url, coord.lat, coord.lon
        );

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeocodingError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let data: ReverseResponse =
            serde_json::from_str(&body).map_err(|e| GeocodingError::Decode(e.to_string()))?;

        Ok(data.address.and_then(AddressResponse::place_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EMPTY_CITY_MESSAGE;

    fn address(
        city: Option<&str>,
        town: Option<&str>,
        village: Option<&str>,
        state: Option<&str>,
    ) -> AddressResponse {
        AddressResponse {
            city: city.map(Into::into),
            town: town.map(Into::into),
            village: village.map(Into::into),
            state: state.map(Into::into),
        }
    }

    #[test]
    fn test_place_name_precedence() {
        assert_eq!(
            address(Some("Paris"), Some("T"), Some("V"), Some("S")).place_name(),
            Some("Paris".into())
        );
        assert_eq!(
            address(None, Some("Town"), Some("V"), Some("S")).place_name(),
            Some("Town".into())
        );
        assert_eq!(
            address(None, None, Some("Village"), Some("S")).place_name(),
            Some("Village".into())
        );
        assert_eq!(
            address(None, None, None, Some("State")).place_name(),
            Some("State".into())
        );
        assert_eq!(address(None, None, None, None).place_name(), None);
    }

    #[test]
    fn test_place_name_skips_blank_fields() {
        assert_eq!(
            address(Some(""), Some("  "), Some("Hamlet"), None).place_name(),
            Some("Hamlet".into())
        );
    }

    #[test]
    fn test_snapshot_floors_negative_temperature() {
        let data: WeatherResponse = serde_json::from_value(serde_json::json!({
            "name": "Oslo",
            "coord": {"lat": 59.91, "lon": 10.75},
            "main": {"temp": -3.2, "humidity": 80},
            "wind": {"speed": 4.1},
            "weather": [{"icon": "13n"}]
        }))
        .unwrap();
        let snapshot = data.into_snapshot().unwrap();
        assert_eq!(snapshot.temperature_celsius, -4);
        assert_eq!(snapshot.icon, crate::icons::WeatherIcon::Snow);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(WeatherError::EmptyCity.to_string(), EMPTY_CITY_MESSAGE);
        let service = WeatherError::Service {
            status: 404,
            message: "city not found".into(),
        };
        assert_eq!(service.to_string(), "city not found");
        assert!(service.is_user_facing());
        assert!(!WeatherError::Decode("x".into()).is_user_facing());
    }
}
