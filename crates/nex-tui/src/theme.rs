//! Color definitions and chart templates.
//!
//! Theming is an explicit value handed to whoever draws: panels embed a
//! [`ChartTemplate`] chosen from the dark-mode flag at render time, and
//! the view asks [`get_colors`] per frame. Nothing mutates a shared
//! default.

use ratatui::style::Color;

/// Palette for everything that is not a carrier color.
pub struct Colors {
    pub primary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub muted: Color,
    pub text: Color,
    pub background: Color,
    pub surface: Color,
}

impl Colors {
    pub fn light() -> Self {
        Colors {
            primary: Color::Rgb(52, 152, 219),
            success: Color::Rgb(46, 204, 113),
            warning: Color::Rgb(255, 184, 77),
            error: Color::Rgb(214, 39, 40),
            muted: Color::Rgb(108, 117, 125),
            text: Color::Rgb(44, 62, 80),
            background: Color::Rgb(245, 247, 250),
            surface: Color::Rgb(255, 255, 255),
        }
    }

    pub fn dark() -> Self {
        Colors {
            primary: Color::Rgb(100, 200, 255),
            success: Color::Rgb(100, 255, 100),
            warning: Color::Rgb(255, 200, 100),
            error: Color::Rgb(255, 100, 100),
            muted: Color::Rgb(150, 150, 150),
            text: Color::Rgb(220, 220, 220),
            background: Color::Rgb(30, 30, 30),
            surface: Color::Rgb(45, 45, 45),
        }
    }
}

pub fn get_colors(dark_mode: bool) -> Colors {
    if dark_mode {
        Colors::dark()
    } else {
        Colors::light()
    }
}

/// Per-figure theme, selected from the dark-mode flag at render time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChartTemplate {
    pub background: Color,
    pub grid: Color,
    pub text: Color,
}

impl ChartTemplate {
    pub fn light() -> Self {
        ChartTemplate {
            background: Color::Rgb(245, 247, 250),
            grid: Color::Rgb(233, 236, 239),
            text: Color::Rgb(44, 62, 80),
        }
    }

    pub fn dark() -> Self {
        ChartTemplate {
            background: Color::Rgb(30, 30, 30),
            grid: Color::Rgb(70, 70, 70),
            text: Color::Rgb(220, 220, 220),
        }
    }

    pub fn for_dark(dark_mode: bool) -> Self {
        if dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

/// Parse a `#rrggbb` carrier color; carriers without a parseable color
/// fall back to the template text color.
pub fn parse_hex_color(text: &str) -> Option<Color> {
    let hex = text.trim().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse() {
        assert_eq!(parse_hex_color("#1f77b4"), Some(Color::Rgb(0x1f, 0x77, 0xb4)));
        assert_eq!(parse_hex_color(" #FF0000 "), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("red"), None);
        assert_eq!(parse_hex_color("#12345"), None);
    }

    #[test]
    fn template_follows_flag() {
        assert_eq!(ChartTemplate::for_dark(true), ChartTemplate::dark());
        assert_eq!(ChartTemplate::for_dark(false), ChartTemplate::light());
    }
}
