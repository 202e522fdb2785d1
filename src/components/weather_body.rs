use artbox::{Alignment as ArtAlignment, Renderer, fonts, integrations::ratatui::ArtBox};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::location_header::{HEADER_OVERHEAD, TemperatureBand};
use super::{Component, LocationHeader, LocationHeaderProps};
use crate::action::Action;
use crate::icons::{HUMIDITY_GLYPH, ICON_HEIGHT, WIND_GLYPH};
use crate::state::{AppState, WeatherSnapshot};

pub struct WeatherBody;

pub struct WeatherBodyProps<'a> {
    pub state: &'a AppState,
}

/// Fixed rows: blank + blank + condition + details.
const LAYOUT_FIXED: u16 = 4;

/// Text cap tiers: (header_cap, temp_cap).
/// terminus(6), miniwi(4), plain(1), with HEADER_OVERHEAD added to header.
const TEXT_TIERS: [(u16, u16); 3] = [
    (6 + HEADER_OVERHEAD, 6),
    (4 + HEADER_OVERHEAD, 4),
    (1 + HEADER_OVERHEAD, 1),
];

struct LayoutSizing {
    show_art: bool,
    icon_h: u16,
    header_cap: u16,
    temp_cap: u16,
}

/// Shrink the text before giving up on the icon art.
fn compute_layout(area_height: u16) -> LayoutSizing {
    for &(hcap, tcap) in &TEXT_TIERS {
        if hcap + tcap + ICON_HEIGHT + LAYOUT_FIXED <= area_height {
            return LayoutSizing {
                show_art: true,
                icon_h: ICON_HEIGHT,
                header_cap: hcap,
                temp_cap: tcap,
            };
        }
    }
    let (hcap, tcap) = TEXT_TIERS[TEXT_TIERS.len() - 1];
    LayoutSizing {
        show_art: false,
        icon_h: 1,
        header_cap: hcap,
        temp_cap: tcap,
    }
}

impl Component<Action> for WeatherBody {
    type Props<'a> = WeatherBodyProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        match &props.state.weather {
            Some(weather) => render_ready(frame, area, props.state, weather),
            None if props.state.is_loading => render_message(frame, area, "Loading..."),
            None => render_empty_hint(frame, area),
        }
    }
}

fn render_ready(frame: &mut Frame, area: Rect, state: &AppState, weather: &WeatherSnapshot) {
    let sizing = compute_layout(area.height);
    let chunks = Layout::vertical([
        Constraint::Max(sizing.header_cap),
        Constraint::Length(1),
        Constraint::Length(sizing.icon_h),
        Constraint::Length(1),
        Constraint::Max(sizing.temp_cap),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .flex(Flex::Center)
    .split(area);

    let mut header = LocationHeader;
    header.render(
        frame,
        chunks[0],
        LocationHeaderProps {
            name: &weather.location_name,
            coordinate: weather.coordinate,
            temperature_celsius: weather.temperature_celsius,
            is_refreshing: state.is_loading,
        },
    );

    if sizing.show_art {
        frame.render_widget(
            Paragraph::new(weather.icon.art()).alignment(Alignment::Center),
            chunks[2],
        );
    } else {
        frame.render_widget(
            Paragraph::new(Line::from(weather.icon.emoji()).centered()),
            chunks[2],
        );
    }

    let temp_text = format!("{}°C", weather.temperature_celsius);
    let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
        .with_plain_fallback()
        .with_alignment(ArtAlignment::Center)
        .with_fill(TemperatureBand::from_celsius(weather.temperature_celsius).fill());
    frame.render_widget(ArtBox::new(&renderer, &temp_text), chunks[4]);

    let condition = Line::from(vec![
        Span::styled(weather.icon.label(), Style::default().fg(Color::Gray)),
        Span::styled(" in ", Style::default().fg(Color::DarkGray)),
        Span::styled(weather.location_name.clone(), Style::default().fg(Color::Gray)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(condition), chunks[5]);

    frame.render_widget(Paragraph::new(details_line(weather)), chunks[6]);
}

/// Humidity and wind columns, side by side
fn details_line(weather: &WeatherSnapshot) -> Line<'static> {
    let value = Style::default().fg(Color::White).bold();
    let label = Style::default().fg(Color::DarkGray);
    Line::from(vec![
        Span::raw(format!("{HUMIDITY_GLYPH} ")),
        Span::styled(format!("{}%", weather.humidity), value),
        Span::styled(" Humidity", label),
        Span::raw("     "),
        Span::raw(format!("{WIND_GLYPH} ")),
        Span::styled(format!("{} m/s", weather.wind_speed), value),
        Span::styled(" Wind Speed", label),
    ])
    .centered()
}

fn render_message(frame: &mut Frame, area: Rect, message: &str) {
    let [row] = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .areas(area);
    let msg = Line::from(vec![Span::styled(
        message.to_string(),
        Style::default().fg(Color::DarkGray),
    )])
    .centered();
    frame.render_widget(Paragraph::new(msg), row);
}

fn render_empty_hint(frame: &mut Frame, area: Rect) {
    let [title, hint] = Layout::vertical([Constraint::Length(1), Constraint::Length(1)])
        .flex(Flex::Center)
        .areas(area);
    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled(
                "No weather data",
                Style::default().fg(Color::Gray),
            ))
            .centered(),
        ),
        title,
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::DarkGray)),
                Span::styled("/", Style::default().fg(Color::Cyan).bold()),
                Span::styled(" to search a city", Style::default().fg(Color::DarkGray)),
            ])
            .centered(),
        ),
        hint,
    );
}
