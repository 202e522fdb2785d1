//! Effects - side effects declared by the reducer

use crate::state::Coordinate;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch current conditions for a city
    FetchWeather { request: u64, city: String },
    /// Resolve a clicked coordinate to a place name
    ReverseGeocode { request: u64, coordinate: Coordinate },
}
