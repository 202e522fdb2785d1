//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::map::{MAX_ZOOM, MIN_ZOOM};
use crate::state::{AppState, EMPTY_CITY_MESSAGE};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Weather actions =====
        // A typed search supersedes any reverse geocode still in flight.
        Action::WeatherSearch(city) => {
            state.geocode_request += 1;
            start_search(state, &city)
        }

        Action::WeatherDidLoad { request, snapshot } => {
            if request != state.weather_request {
                return DispatchResult::unchanged();
            }
            state.coordinate = Some(snapshot.coordinate);
            state.weather = Some(snapshot);
            finish_loading(state);
            DispatchResult::changed()
        }

        // The previous snapshot stays on screen; only the alert is raised.
        Action::WeatherDidReject { request, message } => {
            if request != state.weather_request {
                return DispatchResult::unchanged();
            }
            state.alert = Some(message);
            finish_loading(state);
            DispatchResult::changed()
        }

        Action::WeatherDidError { request, .. } => {
            if request != state.weather_request {
                return DispatchResult::unchanged();
            }
            state.weather = None;
            finish_loading(state);
            DispatchResult::changed()
        }

        // ===== Search actions =====
        Action::SearchQueryChange(query) => {
            if state.search_query == query {
                return DispatchResult::unchanged();
            }
            state.search_query = query;
            DispatchResult::changed()
        }

        Action::SearchFocus => {
            if state.search_focused {
                return DispatchResult::unchanged();
            }
            state.search_focused = true;
            DispatchResult::changed()
        }

        Action::SearchBlur => {
            if !state.search_focused {
                return DispatchResult::unchanged();
            }
            state.search_focused = false;
            DispatchResult::changed()
        }

        // ===== Map actions =====
        Action::MapClick(coordinate) => {
            state.coordinate = Some(coordinate);
            state.geocode_request += 1;
            DispatchResult::changed_with(Effect::ReverseGeocode {
                request: state.geocode_request,
                coordinate,
            })
        }

        Action::MapZoomIn => set_zoom(state, state.zoom.saturating_add(1)),

        Action::MapZoomOut => set_zoom(state, state.zoom.saturating_sub(1)),

        // ===== Geocode actions =====
        Action::GeocodeDidResolve { request, name } => {
            if request != state.geocode_request {
                return DispatchResult::unchanged();
            }
            match name.map(|n| n.trim().to_string()) {
                Some(name) if !name.is_empty() => {
                    state.search_query = name.clone();
                    start_search(state, &name)
                }
                _ => DispatchResult::unchanged(),
            }
        }

        // Non-fatal: the coordinate is already set and the map stays put.
        Action::GeocodeDidError { .. } => DispatchResult::unchanged(),

        // ===== Alert actions =====
        Action::AlertDismiss => {
            if state.alert.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Global actions =====
        Action::Render => DispatchResult::changed(),

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Validate the city and issue a weather request with a fresh token.
fn start_search(state: &mut AppState, city: &str) -> DispatchResult<Effect> {
    let city = city.trim();
    if city.is_empty() {
        state.alert = Some(EMPTY_CITY_MESSAGE.to_string());
        return DispatchResult::changed();
    }

    state.weather_request += 1;
    state.is_loading = true;
    state.search_focused = false;
    DispatchResult::changed_with(Effect::FetchWeather {
        request: state.weather_request,
        city: city.to_string(),
    })
}

fn finish_loading(state: &mut AppState) {
    state.is_loading = false;
}

fn set_zoom(state: &mut AppState, zoom: u8) -> DispatchResult<Effect> {
    let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    if zoom == state.zoom {
        return DispatchResult::unchanged();
    }
    state.zoom = zoom;
    DispatchResult::changed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::WeatherIcon;
    use crate::state::{Coordinate, WeatherSnapshot};

    fn snapshot(name: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            humidity: 70,
            wind_speed: 3.6,
            temperature_celsius: 12,
            location_name: name.into(),
            icon: WeatherIcon::Cloud,
            coordinate: Coordinate::new(51.51, -0.13),
        }
    }

    #[test]
    fn test_search_issues_fetch_with_token() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::WeatherSearch("  London ".into()));

        assert!(result.changed);
        assert!(state.is_loading);
        assert_eq!(
            result.effects,
            vec![Effect::FetchWeather {
                request: 1,
                city: "London".into()
            }]
        );
    }

    #[test]
    fn test_empty_search_raises_alert_without_effect() {
        let mut state = AppState::default();

        for city in ["", "   "] {
            let result = reducer(&mut state, Action::WeatherSearch(city.into()));
            assert!(result.effects.is_empty());
            assert_eq!(state.alert.as_deref(), Some(EMPTY_CITY_MESSAGE));
            assert!(!state.is_loading);
            assert_eq!(state.weather_request, 0);
        }
    }

    #[test]
    fn test_load_sets_snapshot_and_coordinate() {
        let mut state = AppState::default();
        reducer(&mut state, Action::WeatherSearch("London".into()));

        let result = reducer(
            &mut state,
            Action::WeatherDidLoad {
                request: 1,
                snapshot: snapshot("London"),
            },
        );

        assert!(result.changed);
        assert!(!state.is_loading);
        assert_eq!(state.weather, Some(snapshot("London")));
        assert_eq!(state.coordinate, Some(Coordinate::new(51.51, -0.13)));
    }

    #[test]
    fn test_stale_results_are_dropped() {
        let mut state = AppState::default();
        reducer(&mut state, Action::WeatherSearch("London".into()));
        reducer(&mut state, Action::WeatherSearch("Paris".into()));

        let result = reducer(
            &mut state,
            Action::WeatherDidLoad {
                request: 1,
                snapshot: snapshot("London"),
            },
        );
        assert!(!result.changed);
        assert!(state.weather.is_none());
        assert!(state.is_loading);

        let result = reducer(
            &mut state,
            Action::WeatherDidError {
                request: 1,
                error: "timeout".into(),
            },
        );
        assert!(!result.changed);
    }

    #[test]
    fn test_reject_keeps_snapshot() {
        let mut state = AppState {
            weather: Some(snapshot("London")),
            ..Default::default()
        };
        reducer(&mut state, Action::WeatherSearch("Atlantis".into()));

        reducer(
            &mut state,
            Action::WeatherDidReject {
                request: 1,
                message: "city not found".into(),
            },
        );

        assert_eq!(state.weather, Some(snapshot("London")));
        assert_eq!(state.alert.as_deref(), Some("city not found"));
        assert!(!state.is_loading);
    }

    #[test]
    fn test_error_clears_snapshot_but_not_coordinate() {
        let mut state = AppState {
            weather: Some(snapshot("London")),
            coordinate: Some(Coordinate::new(51.51, -0.13)),
            ..Default::default()
        };
        reducer(&mut state, Action::WeatherSearch("London".into()));

        reducer(
            &mut state,
            Action::WeatherDidError {
                request: 1,
                error: "connection reset".into(),
            },
        );

        assert!(state.weather.is_none());
        assert!(state.alert.is_none());
        assert_eq!(state.coordinate, Some(Coordinate::new(51.51, -0.13)));
    }

    #[test]
    fn test_map_click_sets_coordinate_before_geocoding() {
        let mut state = AppState::default();
        let paris = Coordinate::new(48.8566, 2.3522);

        let result = reducer(&mut state, Action::MapClick(paris));

        assert_eq!(state.coordinate, Some(paris));
        assert_eq!(
            result.effects,
            vec![Effect::ReverseGeocode {
                request: 1,
                coordinate: paris
            }]
        );
    }

    #[test]
    fn test_geocode_result_starts_search() {
        let mut state = AppState::default();
        reducer(&mut state, Action::MapClick(Coordinate::new(48.85, 2.35)));

        let result = reducer(
            &mut state,
            Action::GeocodeDidResolve {
                request: 1,
                name: Some("Paris".into()),
            },
        );

        assert_eq!(state.search_query, "Paris");
        assert!(state.is_loading);
        assert_eq!(
            result.effects,
            vec![Effect::FetchWeather {
                request: 1,
                city: "Paris".into()
            }]
        );
    }

    #[test]
    fn test_geocode_without_name_or_stale_is_ignored() {
        let mut state = AppState::default();
        reducer(&mut state, Action::MapClick(Coordinate::new(0.0, -30.0)));
        reducer(&mut state, Action::MapClick(Coordinate::new(0.0, -31.0)));

        let none = reducer(
            &mut state,
            Action::GeocodeDidResolve {
                request: 2,
                name: None,
            },
        );
        let stale = reducer(
            &mut state,
            Action::GeocodeDidResolve {
                request: 1,
                name: Some("Somewhere".into()),
            },
        );
        let failed = reducer(
            &mut state,
            Action::GeocodeDidError {
                request: 2,
                error: "503".into(),
            },
        );

        for result in [none, stale, failed] {
            assert!(!result.changed);
            assert!(result.effects.is_empty());
        }
        assert_eq!(state.search_query, "London");
        assert_eq!(state.coordinate, Some(Coordinate::new(0.0, -31.0)));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut state = AppState::new("x", MAX_ZOOM);
        assert!(!reducer(&mut state, Action::MapZoomIn).changed);
        assert_eq!(state.zoom, MAX_ZOOM);

        let mut state = AppState::new("x", MIN_ZOOM);
        assert!(!reducer(&mut state, Action::MapZoomOut).changed);
        assert!(reducer(&mut state, Action::MapZoomIn).changed);
        assert_eq!(state.zoom, MIN_ZOOM + 1);
    }

    #[test]
    fn test_new_coordinate_keeps_zoom() {
        let mut state = AppState::new("x", 14);
        reducer(&mut state, Action::MapClick(Coordinate::new(10.0, 10.0)));
        reducer(&mut state, Action::WeatherSearch("London".into()));
        reducer(
            &mut state,
            Action::WeatherDidLoad {
                request: 1,
                snapshot: snapshot("London"),
            },
        );
        assert_eq!(state.zoom, 14);
    }

    #[test]
    fn test_alert_dismiss() {
        let mut state = AppState {
            alert: Some("oops".into()),
            ..Default::default()
        };
        assert!(reducer(&mut state, Action::AlertDismiss).changed);
        assert!(state.alert.is_none());
        assert!(!reducer(&mut state, Action::AlertDismiss).changed);
    }

    #[test]
    fn test_typed_search_supersedes_pending_geocode() {
        let mut state = AppState::default();
        reducer(&mut state, Action::MapClick(Coordinate::new(48.85, 2.35)));
        reducer(&mut state, Action::SearchQueryChange("Tokyo".into()));
        reducer(&mut state, Action::WeatherSearch("Tokyo".into()));

        let result = reducer(
            &mut state,
            Action::GeocodeDidResolve {
                request: 1,
                name: Some("Paris".into()),
            },
        );

        assert!(!result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(state.search_query, "Tokyo");
        assert_eq!(state.weather_request, 1);
    }

    #[test]
    fn test_render_always_redraws() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::Render);
        assert!(result.changed);
        assert!(result.effects.is_empty());
    }
}
