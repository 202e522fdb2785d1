//! Condition icons: OpenWeather icon codes mapped to terminal art
//!
//! Every icon is drawn from one or more colored layers. Spaces are
//! transparent, so a foreground layer (rain, snow) can sit on top of a cloud.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Height of every icon, in terminal rows.
pub const ICON_HEIGHT: u16 = 5;

// ============================================================================
// Art layers
// ============================================================================

mod art {
    pub const SUN: [&str; 5] = [
        r"    \   /    ",
        r"     .-.     ",
        r"  - (   ) -  ",
        r"     `-'     ",
        r"    /   \    ",
    ];

    pub const SUN_PEEK: [&str; 5] = [
        r"   \  /      ",
        r" _ /''.-.    ",
        r"   \_       ",
        r"             ",
        r"             ",
    ];

    pub const CLOUD: [&str; 5] = [
        r"             ",
        r"      .--.   ",
        r"   .-(    ). ",
        r"  (___.__)__)",
        r"             ",
    ];

    pub const DRIZZLE: [&str; 5] = [
        r"             ",
        r"             ",
        r"             ",
        r"             ",
        r"    '  '  '  ",
    ];

    pub const RAIN: [&str; 5] = [
        r"             ",
        r"             ",
        r"             ",
        r"             ",
        r"   / / / /   ",
    ];

    pub const SNOW: [&str; 5] = [
        r"             ",
        r"             ",
        r"             ",
        r"             ",
        r"   *  *  *   ",
    ];
}

struct IconLayer {
    rows: &'static [&'static str],
    color: Color,
}

const SUN_YELLOW: Color = Color::Yellow;
const CLOUD_GRAY: Color = Color::Rgb(170, 170, 185);
const DRIZZLE_BLUE: Color = Color::Rgb(130, 170, 200);
const RAIN_BLUE: Color = Color::Rgb(80, 140, 200);
const SNOW_WHITE: Color = Color::Rgb(200, 220, 255);

/// Composite layers back-to-front; the last layer wins where it is not blank.
fn composite(layers: &[IconLayer]) -> Text<'static> {
    let height = layers.iter().map(|l| l.rows.len()).max().unwrap_or(0);
    let width = layers
        .iter()
        .flat_map(|l| l.rows.iter())
        .map(|row| row.chars().count())
        .max()
        .unwrap_or(0);

    let lines = (0..height)
        .map(|row| {
            let spans: Vec<Span<'static>> = (0..width)
                .map(|col| {
                    let hit = layers.iter().rev().find_map(|layer| {
                        layer
                            .rows
                            .get(row)
                            .and_then(|line| line.chars().nth(col))
                            .filter(|ch| *ch != ' ')
                            .map(|ch| (ch, layer.color))
                    });
                    let (ch, color) = hit.unwrap_or((' ', Color::Reset));
                    Span::styled(ch.to_string(), Style::default().fg(color))
                })
                .collect();
            Line::from(spans)
        })
        .collect::<Vec<_>>();

    Text::from(lines)
}

// ============================================================================
// Types
// ============================================================================

/// Display icon for the current conditions
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum WeatherIcon {
    #[default]
    Clear,
    Cloud,
    Drizzle,
    Rain,
    Snow,
}

impl WeatherIcon {
    pub const ALL: [WeatherIcon; 5] = [
        WeatherIcon::Clear,
        WeatherIcon::Cloud,
        WeatherIcon::Drizzle,
        WeatherIcon::Rain,
        WeatherIcon::Snow,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WeatherIcon::Clear => "Clear",
            WeatherIcon::Cloud => "Clouds",
            WeatherIcon::Drizzle => "Drizzle",
            WeatherIcon::Rain => "Rain",
            WeatherIcon::Snow => "Snow",
        }
    }

    /// Single-cell fallback when the art does not fit
    pub fn emoji(self) -> &'static str {
        match self {
            WeatherIcon::Clear => "\u{2600}\u{fe0f}",
            WeatherIcon::Cloud => "\u{26c5}",
            WeatherIcon::Drizzle => "\u{1f326}\u{fe0f}",
            WeatherIcon::Rain => "\u{1f327}\u{fe0f}",
            WeatherIcon::Snow => "\u{2744}\u{fe0f}",
        }
    }

    pub fn art(self) -> Text<'static> {
        let layers: Vec<IconLayer> = match self {
            WeatherIcon::Clear => vec![IconLayer {
                rows: &art::SUN,
                color: SUN_YELLOW,
            }],
            WeatherIcon::Cloud => vec![
                IconLayer {
                    rows: &art::SUN_PEEK,
                    color: SUN_YELLOW,
                },
                IconLayer {
                    rows: &art::CLOUD,
                    color: CLOUD_GRAY,
                },
            ],
            WeatherIcon::Drizzle => vec![
                IconLayer {
                    rows: &art::CLOUD,
                    color: CLOUD_GRAY,
                },
                IconLayer {
                    rows: &art::DRIZZLE,
                    color: DRIZZLE_BLUE,
                },
            ],
            WeatherIcon::Rain => vec![
                IconLayer {
                    rows: &art::CLOUD,
                    color: CLOUD_GRAY,
                },
                IconLayer {
                    rows: &art::RAIN,
                    color: RAIN_BLUE,
                },
            ],
            WeatherIcon::Snow => vec![
                IconLayer {
                    rows: &art::CLOUD,
                    color: CLOUD_GRAY,
                },
                IconLayer {
                    rows: &art::SNOW,
                    color: SNOW_WHITE,
                },
            ],
        };

        composite(&layers)
    }
}

/// Glyphs for the humidity and wind columns
pub const HUMIDITY_GLYPH: &str = "\u{1f4a7}";
pub const WIND_GLYPH: &str = "\u{1f32c}\u{fe0f}";

// ============================================================================
// Public API
// ============================================================================

/// Resolve an OpenWeather icon code (`"10d"`, `"01n"`, ...) to a display icon.
///
/// Unknown codes fall back to [`WeatherIcon::Clear`].
pub fn resolve_icon(code: &str) -> WeatherIcon {
    match code {
        "01d" | "01n" => WeatherIcon::Clear,
        "02d" | "03d" | "03n" => WeatherIcon::Cloud,
        "04d" | "04n" => WeatherIcon::Drizzle,
        "09d" | "09n" | "10d" | "10n" => WeatherIcon::Rain,
        "13d" | "13n" => WeatherIcon::Snow,
        _ => WeatherIcon::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_map_to_icons() {
        let table = [
            ("01d", WeatherIcon::Clear),
            ("01n", WeatherIcon::Clear),
            ("02d", WeatherIcon::Cloud),
            ("03d", WeatherIcon::Cloud),
            ("03n", WeatherIcon::Cloud),
            ("04d", WeatherIcon::Drizzle),
            ("04n", WeatherIcon::Drizzle),
            ("09d", WeatherIcon::Rain),
            ("09n", WeatherIcon::Rain),
            ("10d", WeatherIcon::Rain),
            ("10n", WeatherIcon::Rain),
            ("13d", WeatherIcon::Snow),
            ("13n", WeatherIcon::Snow),
        ];
        for (code, icon) in table {
            assert_eq!(resolve_icon(code), icon, "code {code}");
        }
    }

    #[test]
    fn test_unknown_codes_fall_back_to_clear() {
        for code in ["", "02n", "11d", "50d", "10", "10D", "garbage"] {
            assert_eq!(resolve_icon(code), WeatherIcon::Clear, "code {code:?}");
        }
    }

    #[test]
    fn test_art_has_fixed_height() {
        for icon in WeatherIcon::ALL {
            let text = icon.art();
            assert_eq!(text.lines.len(), ICON_HEIGHT as usize, "{icon:?}");
        }
    }

    #[test]
    fn test_foreground_layer_wins() {
        let text = WeatherIcon::Snow.art();
        let bottom: String = text.lines[4]
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert!(bottom.contains('*'));
    }
}
