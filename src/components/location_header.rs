use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::state::Coordinate;

/// Rows the header needs besides the FIGlet name: spacer + coordinate line.
pub const HEADER_OVERHEAD: u16 = 2;

/// Coarse feel of a whole-degree Celsius reading, used to colour the big text
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemperatureBand {
    Freezing,
    Cold,
    Mild,
    Warm,
    Hot,
}

impl TemperatureBand {
    pub fn from_celsius(celsius: i32) -> Self {
        match celsius {
            i32::MIN..=0 => TemperatureBand::Freezing,
            1..=9 => TemperatureBand::Cold,
            10..=19 => TemperatureBand::Mild,
            20..=27 => TemperatureBand::Warm,
            _ => TemperatureBand::Hot,
        }
    }

    fn colors(self) -> (ArtColor, ArtColor) {
        match self {
            TemperatureBand::Freezing => (ArtColor::rgb(170, 210, 255), ArtColor::rgb(235, 245, 255)),
            TemperatureBand::Cold => (ArtColor::rgb(90, 160, 240), ArtColor::rgb(140, 210, 220)),
            TemperatureBand::Mild => (ArtColor::rgb(110, 200, 140), ArtColor::rgb(200, 220, 120)),
            TemperatureBand::Warm => (ArtColor::rgb(250, 200, 90), ArtColor::rgb(250, 150, 70)),
            TemperatureBand::Hot => (ArtColor::rgb(250, 110, 70), ArtColor::rgb(220, 50, 60)),
        }
    }

    /// Left-to-right gradient for FIGlet text
    pub fn fill(self) -> Fill {
        let (start, end) = self.colors();
        Fill::Linear(LinearGradient::horizontal(start, end))
    }
}

/// Place name in large type over its coordinates
pub struct LocationHeader;

pub struct LocationHeaderProps<'a> {
    pub name: &'a str,
    pub coordinate: Coordinate,
    pub temperature_celsius: i32,
    /// A newer search is in flight; the shown data may be replaced
    pub is_refreshing: bool,
}

impl Component<Action> for LocationHeader {
    type Props<'a> = LocationHeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let [name_area, _, coords_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(TemperatureBand::from_celsius(props.temperature_celsius).fill());
        frame.render_widget(ArtBox::new(&renderer, props.name), name_area);

        let mut spans = vec![Span::styled(
            format_coordinate(props.coordinate),
            Style::default().fg(Color::DarkGray),
        )];
        if props.is_refreshing {
            spans.push(Span::styled(" \u{b7} updating", Style::default().fg(Color::Cyan).italic()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans).centered()), coords_area);
    }
}

/// `51.51°N, 0.13°W`
pub fn format_coordinate(coord: Coordinate) -> String {
    let ns = if coord.lat < 0.0 { 'S' } else { 'N' };
    let ew = if coord.lon < 0.0 { 'W' } else { 'E' };
    format!("{:.2}°{ns}, {:.2}°{ew}", coord.lat.abs(), coord.lon.abs())
}
