//! Render snapshot tests using RenderHarness
//!
//! Render components to a test buffer and check the plain text.

use tui_dispatch::testing::*;
use weather_panel::{
    action::Action,
    components::{
        AlertModal, AlertModalProps, Component, WeatherBody, WeatherBodyProps, WeatherPanel,
        WeatherPanelProps,
    },
    icons::WeatherIcon,
    map::TileSource,
    state::{AppState, Coordinate, EMPTY_CITY_MESSAGE, WeatherSnapshot},
};

fn snapshot(icon: WeatherIcon, temperature_celsius: i32) -> WeatherSnapshot {
    WeatherSnapshot {
        humidity: 70,
        wind_speed: 3.6,
        temperature_celsius,
        location_name: "Reykjavik".into(),
        icon,
        coordinate: Coordinate::new(64.1466, -21.9426),
    }
}

fn loaded(icon: WeatherIcon, temperature_celsius: i32) -> AppState {
    let weather = snapshot(icon, temperature_celsius);
    AppState {
        coordinate: Some(weather.coordinate),
        weather: Some(weather),
        ..Default::default()
    }
}

fn render_body(state: &AppState, width: u16, height: u16) -> String {
    let mut render = RenderHarness::new(width, height);
    let mut component = WeatherBody;
    render.render_to_string_plain(|frame| {
        component.render(frame, frame.area(), WeatherBodyProps { state });
    })
}

fn render_panel(state: &AppState, width: u16, height: u16) -> String {
    let mut render = RenderHarness::new(width, height);
    let tiles = TileSource::default();
    let mut component = WeatherPanel::new();
    render.render_to_string_plain(|frame| {
        let props = WeatherPanelProps {
            state,
            tiles: &tiles,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    })
}

#[test]
fn test_render_loading_state() {
    let state = AppState {
        is_loading: true,
        ..Default::default()
    };
    let output = render_body(&state, 60, 20);
    assert!(output.contains("Loading..."), "{output}");
}

#[test]
fn test_render_initial_state() {
    let output = render_body(&AppState::default(), 60, 20);
    assert!(output.contains("No weather data"), "{output}");
    assert!(output.contains("to search a city"), "{output}");
}

#[test]
fn test_render_snapshot_details() {
    let output = render_body(&loaded(WeatherIcon::Snow, -4), 60, 20);

    assert!(output.contains("Snow in Reykjavik"), "{output}");
    assert!(output.contains("70%"), "{output}");
    assert!(output.contains("Humidity"), "{output}");
    assert!(output.contains("3.6 m/s"), "{output}");
    assert!(output.contains("Wind Speed"), "{output}");
}

#[test]
fn test_render_tiny_area_falls_back_to_emoji() {
    // Too short for the icon art; must still render without panicking
    let output = render_body(&loaded(WeatherIcon::Clear, 25), 40, 6);
    assert!(!output.is_empty());
}

#[test]
fn test_render_each_icon() {
    for icon in WeatherIcon::ALL {
        let output = render_body(&loaded(icon, 10), 60, 24);
        assert!(
            output.contains(&format!("{} in Reykjavik", icon.label())),
            "{icon:?}:\n{output}"
        );
    }
}

#[test]
fn test_render_help_bar() {
    let output = render_panel(&AppState::default(), 80, 24);

    assert!(output.contains("search"), "Should show search hint");
    assert!(output.contains("refresh"), "Should show refresh hint");
    assert!(output.contains("zoom"), "Should show zoom hint");
    assert!(output.contains("quit"), "Should show quit hint");
}

#[test]
fn test_render_search_query_in_bar() {
    let state = AppState::new("Montevideo", 10);
    let output = render_panel(&state, 80, 24);
    assert!(output.contains("Montevideo"), "{output}");
}

#[test]
fn test_render_narrow_stacks_map_below() {
    let output = render_panel(&loaded(WeatherIcon::Cloud, 3), 80, 44);

    assert!(output.contains("Clouds in Reykjavik"), "{output}");
    assert!(output.contains("Selected Location"), "{output}");
    assert!(output.contains("Lat: 64.15, Lon: -21.94"), "{output}");
}

#[test]
fn test_render_map_shows_tile_and_zoom() {
    let mut state = loaded(WeatherIcon::Cloud, 3);
    state.zoom = 12;
    let output = render_panel(&state, 140, 36);

    assert!(output.contains("zoom 12"), "{output}");
    assert!(output.contains("tile 12/"), "{output}");
    assert!(output.contains("tile.openstreetmap.org/12/"), "{output}");
}

#[test]
fn test_render_alert_modal() {
    let mut render = RenderHarness::new(80, 24);
    let mut alert = AlertModal::new();

    let output = render.render_to_string_plain(|frame| {
        let props = AlertModalProps {
            message: EMPTY_CITY_MESSAGE,
            is_focused: true,
            on_dismiss: || Action::AlertDismiss,
        };
        alert.render(frame, frame.area(), props);
    });

    assert!(output.contains(EMPTY_CITY_MESSAGE), "{output}");
}
