//! Map geometry: viewport projection and XYZ tile addressing
//!
//! The viewport is a plain equirectangular window around a center point.
//! Zoom follows slippy-map conventions: at zoom `z` the world is `2^z` tiles
//! wide, and one tile spans [`TILE_COLS`] x [`TILE_ROWS`] terminal cells.

use std::f64::consts::PI;

use ratatui::layout::Rect;

use crate::state::Coordinate;

pub const MIN_ZOOM: u8 = 2;
pub const MAX_ZOOM: u8 = 18;
pub const DEFAULT_ZOOM: u8 = 10;

/// Terminal cells per tile, horizontally
pub const TILE_COLS: f64 = 32.0;
/// Terminal cells per tile, vertically (cells are roughly twice as tall as wide)
pub const TILE_ROWS: f64 = 16.0;

/// Web Mercator stops being defined past this latitude
pub const MAX_LATITUDE: f64 = 85.051_128_78;

pub const DEFAULT_TILE_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

// ============================================================================
// Viewport
// ============================================================================

/// What part of the world the map shows
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapViewport {
    pub center: Coordinate,
    pub zoom: u8,
}

impl MapViewport {
    pub fn new(center: Coordinate, zoom: u8) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }

    /// Same zoom, new center
    pub fn recenter(self, center: Coordinate) -> Self {
        Self { center, ..self }
    }

    /// Degrees of longitude covered by one terminal column
    pub fn degrees_per_col(&self) -> f64 {
        360.0 / (2f64.powi(self.zoom as i32) * TILE_COLS)
    }

    /// Degrees of latitude covered by one terminal row
    pub fn degrees_per_row(&self) -> f64 {
        180.0 / (2f64.powi(self.zoom as i32) * TILE_ROWS)
    }

    /// `[min, max]` longitude visible in an area `cols` wide
    pub fn x_bounds(&self, cols: u16) -> [f64; 2] {
        let half = cols as f64 * self.degrees_per_col() / 2.0;
        [self.center.lon - half, self.center.lon + half]
    }

    /// `[min, max]` latitude visible in an area `rows` tall
    pub fn y_bounds(&self, rows: u16) -> [f64; 2] {
        let half = rows as f64 * self.degrees_per_row() / 2.0;
        [self.center.lat - half, self.center.lat + half]
    }

    /// Coordinate under the terminal cell `(column, row)`, or `None` outside `area`
    pub fn coordinate_at(&self, area: Rect, column: u16, row: u16) -> Option<Coordinate> {
        if column < area.x
            || row < area.y
            || column >= area.x.saturating_add(area.width)
            || row >= area.y.saturating_add(area.height)
        {
            return None;
        }

        let dx = (column - area.x) as f64 + 0.5 - area.width as f64 / 2.0;
        let dy = (row - area.y) as f64 + 0.5 - area.height as f64 / 2.0;

        let lat = (self.center.lat - dy * self.degrees_per_row()).clamp(-MAX_LATITUDE, MAX_LATITUDE);
        let lon = wrap_longitude(self.center.lon + dx * self.degrees_per_col());
        Some(Coordinate::new(lat, lon))
    }
}

/// Fold a longitude into `[-180, 180)`
pub fn wrap_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

// ============================================================================
// Tiles
// ============================================================================

/// Slippy-map tile address
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileId {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl TileId {
    /// Tile containing `coord` at `zoom`
    pub fn containing(coord: Coordinate, zoom: u8) -> Self {
        let n = 2f64.powi(zoom as i32);
        let max = (n as u32).saturating_sub(1);

        let lat = coord.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let x = ((wrap_longitude(coord.lon) + 180.0) / 360.0 * n).floor();
        let y = ((1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * n).floor();

        Self {
            z: zoom,
            x: (x.max(0.0) as u32).min(max),
            y: (y.max(0.0) as u32).min(max),
        }
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// XYZ tile URL template with optional `{s}` subdomain rotation
#[derive(Clone, Debug, PartialEq)]
pub struct TileSource {
    pub template: String,
    pub subdomains: Vec<String>,
}

impl Default for TileSource {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_TEMPLATE)
    }
}

impl TileSource {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            subdomains: vec!["a".into(), "b".into(), "c".into()],
        }
    }

    pub fn url(&self, tile: TileId) -> String {
        let subdomain = if self.subdomains.is_empty() {
            ""
        } else {
            let idx = (tile.x as usize + tile.y as usize) % self.subdomains.len();
            self.subdomains[idx].as_str()
        };

        self.template
            .replace("{s}", subdomain)
            .replace("{z}", &tile.z.to_string())
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON: Coordinate = Coordinate::new(51.5085, -0.1257);

    #[test]
    fn test_tile_for_london() {
        let tile = TileId::containing(LONDON, 10);
        assert_eq!(tile, TileId { z: 10, x: 511, y: 340 });
        assert_eq!(tile.to_string(), "10/511/340");
    }

    #[test]
    fn test_tile_clamps_at_poles() {
        let north = TileId::containing(Coordinate::new(90.0, 0.0), 3);
        let south = TileId::containing(Coordinate::new(-90.0, 0.0), 3);
        assert_eq!(north.y, 0);
        assert_eq!(south.y, 7);
    }

    #[test]
    fn test_tile_url_substitutes_placeholders() {
        let source = TileSource::default();
        let url = source.url(TileId { z: 10, x: 511, y: 340 });
        // (511 + 340) % 3 == 2 -> "c"
        assert_eq!(url, "https://c.tile.openstreetmap.org/10/511/340.png");
    }

    #[test]
    fn test_tile_url_without_subdomains() {
        let source = TileSource {
            template: "http://tiles.local/{z}/{x}/{y}.png".into(),
            subdomains: Vec::new(),
        };
        assert_eq!(
            source.url(TileId { z: 1, x: 0, y: 1 }),
            "http://tiles.local/1/0/1.png"
        );
    }

    #[test]
    fn test_recenter_keeps_zoom() {
        let view = MapViewport::new(LONDON, 13);
        let moved = view.recenter(Coordinate::new(48.85, 2.35));
        assert_eq!(moved.zoom, 13);
        assert_eq!(moved.center, Coordinate::new(48.85, 2.35));
    }

    #[test]
    fn test_center_cell_maps_near_center() {
        let view = MapViewport::new(LONDON, 10);
        let area = Rect::new(10, 5, 40, 20);
        let coord = view.coordinate_at(area, 30, 15).unwrap();
        assert!((coord.lat - LONDON.lat).abs() < view.degrees_per_row());
        assert!((coord.lon - LONDON.lon).abs() < view.degrees_per_col());
    }

    #[test]
    fn test_click_directions() {
        let view = MapViewport::new(LONDON, 10);
        let area = Rect::new(0, 0, 40, 20);
        let top_left = view.coordinate_at(area, 0, 0).unwrap();
        let bottom_right = view.coordinate_at(area, 39, 19).unwrap();
        assert!(top_left.lat > LONDON.lat && top_left.lon < LONDON.lon);
        assert!(bottom_right.lat < LONDON.lat && bottom_right.lon > LONDON.lon);
    }

    #[test]
    fn test_click_outside_area_is_none() {
        let view = MapViewport::new(LONDON, 10);
        let area = Rect::new(10, 5, 40, 20);
        assert!(view.coordinate_at(area, 9, 10).is_none());
        assert!(view.coordinate_at(area, 50, 10).is_none());
        assert!(view.coordinate_at(area, 20, 25).is_none());
    }

    #[test]
    fn test_wrap_longitude() {
        assert_eq!(wrap_longitude(190.0), -170.0);
        assert_eq!(wrap_longitude(-190.0), 170.0);
        assert_eq!(wrap_longitude(180.0), -180.0);
        assert_eq!(wrap_longitude(12.5), 12.5);
    }

    #[test]
    fn test_bounds_shrink_with_zoom() {
        let wide = MapViewport::new(LONDON, 4).x_bounds(80);
        let narrow = MapViewport::new(LONDON, 12).x_bounds(80);
        assert!(wide[1] - wide[0] > narrow[1] - narrow[0]);
    }
}
