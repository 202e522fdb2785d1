use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{
    Component, MapView, MapViewProps, SearchBar, SearchBarProps, WeatherBody, WeatherBodyProps,
};
use crate::action::Action;
use crate::map::TileSource;
use crate::state::AppState;

/// Below this width the map goes under the weather instead of beside it.
const SIDE_BY_SIDE_MIN_WIDTH: u16 = 100;

/// Props for WeatherPanel - read-only view of state
pub struct WeatherPanelProps<'a> {
    pub state: &'a AppState,
    pub tiles: &'a TileSource,
    pub is_focused: bool,
}

/// Top-level panel: search bar, current conditions, map and key hints
#[derive(Default)]
pub struct WeatherPanel {
    search: SearchBar,
    map: MapView,
}

impl WeatherPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map drawing area from the last render, if the map was shown
    pub fn map_area(&self) -> Option<Rect> {
        self.map.canvas_area()
    }

    fn search_props(state: &AppState) -> SearchBarProps<'_> {
        SearchBarProps {
            query: &state.search_query,
            is_focused: state.search_focused,
            on_change: Action::SearchQueryChange,
            on_submit: Action::WeatherSearch,
            on_blur: || Action::SearchBlur,
        }
    }

    /// Map click and scroll handling, shared with the dedicated map route
    pub fn handle_map_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
        tiles: &TileSource,
    ) -> Vec<Action> {
        let Some(coordinate) = state.coordinate else {
            return Vec::new();
        };
        if let EventKind::Mouse(mouse) = event {
            if !self.map.contains(mouse.column, mouse.row) {
                return Vec::new();
            }
        }
        let props = MapViewProps {
            coordinate,
            zoom: state.zoom,
            tiles,
            on_click: Action::MapClick,
            on_zoom_in: || Action::MapZoomIn,
            on_zoom_out: || Action::MapZoomOut,
        };
        self.map.handle_event(event, props).into_iter().collect()
    }
}

impl Component<Action> for WeatherPanel {
    type Props<'a> = WeatherPanelProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let state = props.state;

        match event {
            EventKind::Key(_) if state.search_focused => self
                .search
                .handle_event(event, Self::search_props(state))
                .into_iter()
                .collect(),
            EventKind::Key(key) => match key.code {
                KeyCode::Char('/') | KeyCode::Tab => vec![Action::SearchFocus],
                KeyCode::Char('r') | KeyCode::F(5) => {
                    vec![Action::WeatherSearch(state.search_query.clone())]
                }
                KeyCode::Char('+') | KeyCode::Char('=') => vec![Action::MapZoomIn],
                KeyCode::Char('-') => vec![Action::MapZoomOut],
                KeyCode::Char('q') | KeyCode::Esc => vec![Action::Quit],
                _ => Vec::new(),
            },
            _ => self.handle_map_event(event, state, props.tiles),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherPanelProps<'_>) {
        let state = props.state;
        let [search_area, content, help_area] = Layout::vertical([
            Constraint::Length(3), // Search bar
            Constraint::Min(1),    // Weather + map
            Constraint::Length(1), // Help bar
        ])
        .areas(area);

        self.search
            .render(frame, search_area, Self::search_props(state));

        let mut body = WeatherBody;
        match state.coordinate {
            Some(coordinate) => {
                let [body_area, map_area] = if content.width >= SIDE_BY_SIDE_MIN_WIDTH {
                    Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                        .areas(content)
                } else {
                    Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)])
                        .areas(content)
                };
                body.render(frame, body_area, WeatherBodyProps { state });
                self.map.render(
                    frame,
                    map_area,
                    MapViewProps {
                        coordinate,
                        zoom: state.zoom,
                        tiles: props.tiles,
                        on_click: Action::MapClick,
                        on_zoom_in: || Action::MapZoomIn,
                        on_zoom_out: || Action::MapZoomOut,
                    },
                );
            }
            None => {
                body.render(frame, content, WeatherBodyProps { state });
            }
        }

        let hints = if state.search_focused {
            vec![
                StatusBarHint::new("enter", "search"),
                StatusBarHint::new("esc", "back"),
            ]
        } else {
            vec![
                StatusBarHint::new("/", "search"),
                StatusBarHint::new("r", "refresh"),
                StatusBarHint::new("+/-", "zoom"),
                StatusBarHint::new("click", "pick place"),
                StatusBarHint::new("q", "quit"),
            ]
        };

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            help_area,
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&hints),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
