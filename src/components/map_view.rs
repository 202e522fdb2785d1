use crossterm::event::{MouseButton, MouseEventKind};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, BorderType,
        canvas::{Canvas, Map, MapResolution, Points},
    },
};
use tui_dispatch::EventKind;

use super::Component;
use crate::action::Action;
use crate::map::{MapViewport, TileId, TileSource};
use crate::state::Coordinate;

const LAND: Color = Color::Rgb(90, 130, 95);
const MARKER: Color = Color::Rgb(230, 80, 70);

/// World map with a marker at the selected coordinate.
///
/// Remembers where it was last drawn so clicks can be turned back into
/// coordinates.
#[derive(Default)]
pub struct MapView {
    canvas_area: Option<Rect>,
}

pub struct MapViewProps<'a> {
    pub coordinate: Coordinate,
    pub zoom: u8,
    pub tiles: &'a TileSource,
    // Action constructors
    pub on_click: fn(Coordinate) -> Action,
    pub on_zoom_in: fn() -> Action,
    pub on_zoom_out: fn() -> Action,
}

impl MapView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drawing area of the last render, inside the border
    pub fn canvas_area(&self) -> Option<Rect> {
        self.canvas_area
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.canvas_area.is_some_and(|area| {
            column >= area.x
                && row >= area.y
                && column < area.x.saturating_add(area.width)
                && row < area.y.saturating_add(area.height)
        })
    }
}

impl Component<Action> for MapView {
    type Props<'a> = MapViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        match event {
            EventKind::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let Some(area) = self.canvas_area else {
                    return None;
                };
                MapViewport::new(props.coordinate, props.zoom)
                    .coordinate_at(area, mouse.column, mouse.row)
                    .map(props.on_click)
            }
            EventKind::Scroll { delta, .. } if self.canvas_area.is_some() => {
                if *delta < 0 {
                    Some((props.on_zoom_in)())
                } else if *delta > 0 {
                    Some((props.on_zoom_out)())
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let viewport = MapViewport::new(props.coordinate, props.zoom);
        let tile = TileId::containing(props.coordinate, viewport.zoom);
        let tile_url = props.tiles.url(tile);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Line::from(format!(" Map \u{b7} tile {tile} ")))
            .title_bottom(
                Line::from(vec![
                    Span::styled(format!(" zoom {} ", viewport.zoom), Style::default().fg(Color::Gray)),
                    Span::styled("\u{b7} click to pick \u{b7} +/- zoom ", Style::default().fg(Color::DarkGray)),
                ])
                .right_aligned(),
            );
        let inner = block.inner(area);
        self.canvas_area = (inner.width > 0 && inner.height > 0).then_some(inner);

        let coord = props.coordinate;
        let dx = viewport.degrees_per_col();
        let dy = viewport.degrees_per_row();
        let popup = coord.popup_label();
        let popup_lon = coord.lon - popup.chars().count() as f64 * dx / 2.0;

        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds(viewport.x_bounds(inner.width))
            .y_bounds(viewport.y_bounds(inner.height))
            .paint(move |ctx| {
                ctx.draw(&Map {
                    color: LAND,
                    resolution: MapResolution::High,
                });
                ctx.layer();
                ctx.draw(&Points {
                    coords: &[(coord.lon, coord.lat)],
                    color: MARKER,
                });
                ctx.print(
                    coord.lon,
                    coord.lat,
                    Line::from(Span::styled("\u{25bc}", Style::default().fg(MARKER).bold())),
                );
                ctx.print(
                    coord.lon - 8.0 * dx,
                    coord.lat + 3.0 * dy,
                    Line::from(Span::styled(
                        "Selected Location",
                        Style::default().fg(Color::White).bold(),
                    )),
                );
                ctx.print(
                    popup_lon,
                    coord.lat + 2.0 * dy,
                    Line::from(Span::styled(popup.clone(), Style::default().fg(Color::Gray))),
                );
            });
        frame.render_widget(canvas, area);

        if inner.height > 2 {
            let url_row = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
            frame.render_widget(
                Line::from(Span::styled(tile_url, Style::default().fg(Color::DarkGray))),
                url_row,
            );
        }
    }
}
