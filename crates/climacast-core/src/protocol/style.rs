//! Series display styles and their single-character wire codes
//!
//! The plotting consumer defines the code tables; every mapping lives in the
//! `code()` functions below so the wire format stays in one place.

use core::fmt;

use super::{EncodeError, EncodeResult};

/// Line color of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Blue,
    Cyan,
    Magenta,
    Yellow,
    Black,
    White,
}

impl Color {
    /// Wire code for this color
    pub const fn code(self) -> char {
        match self {
            Self::Red => 'r',
            Self::Green => 'g',
            Self::Blue => 'b',
            Self::Cyan => 'c',
            Self::Magenta => 'm',
            Self::Yellow => 'y',
            Self::Black => 'k',
            Self::White => 'w',
        }
    }
}

/// Line drawn between consecutive points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    /// Points only
    NoLine,
    Dashed,
    Dotted,
}

impl LineStyle {
    /// Wire code for this line style
    pub const fn code(self) -> char {
        match self {
            Self::Solid => 's',
            Self::NoLine => 'n',
            Self::Dashed => 'd',
            Self::Dotted => ':',
        }
    }
}

/// Marker drawn at each point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    Square,
    Circle,
    NoMarker,
    Diamond,
    Triangle,
    Cross,
    Plus,
    Star,
}

impl MarkerStyle {
    /// Wire code for this marker
    pub const fn code(self) -> char {
        match self {
            Self::Square => '#',
            Self::Circle => 'o',
            Self::NoMarker => 'n',
            Self::Diamond => 'd',
            Self::Triangle => '^',
            Self::Cross => 'x',
            Self::Plus => '+',
            Self::Star => '*',
        }
    }
}

/// Complete display style of a series
///
/// Renders as `<color><line><width><marker>`, e.g. `rs2n` for a red solid
/// line two pixels wide without markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesStyle {
    /// Line color
    pub color: Color,
    /// Line style
    pub line: LineStyle,
    /// Line width in pixels (positive)
    pub width: u8,
    /// Point marker
    pub marker: MarkerStyle,
}

impl SeriesStyle {
    /// Create a new series style
    pub const fn new(color: Color, line: LineStyle, width: u8, marker: MarkerStyle) -> Self {
        Self {
            color,
            line,
            width,
            marker,
        }
    }

    pub(crate) fn validate(&self) -> EncodeResult<()> {
        if self.width == 0 {
            return Err(EncodeError::InvalidLineWidth);
        }
        Ok(())
    }
}

impl fmt::Display for SeriesStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.color.code(),
            self.line.code(),
            self.width,
            self.marker.code()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_color_codes() {
        assert_eq!(Color::Blue.code(), 'b');
        assert_eq!(Color::Red.code(), 'r');
        assert_eq!(Color::Black.code(), 'k');
        assert_eq!(Color::Green.code(), 'g');
    }

    #[test]
    fn test_line_codes() {
        assert_eq!(LineStyle::Solid.code(), 's');
        assert_eq!(LineStyle::NoLine.code(), 'n');
        assert_eq!(LineStyle::Dashed.code(), 'd');
    }

    #[test]
    fn test_marker_codes() {
        assert_eq!(MarkerStyle::Square.code(), '#');
        assert_eq!(MarkerStyle::Circle.code(), 'o');
        assert_eq!(MarkerStyle::NoMarker.code(), 'n');
    }

    #[test]
    fn test_style_rendering() {
        let raw = SeriesStyle::new(Color::Red, LineStyle::NoLine, 2, MarkerStyle::Square);
        assert_eq!(raw.to_string(), "rn2#");

        let wide = SeriesStyle::new(Color::Blue, LineStyle::Dashed, 12, MarkerStyle::Circle);
        assert_eq!(wide.to_string(), "bd12o");
    }

    #[test]
    fn test_zero_width_rejected() {
        let style = SeriesStyle::new(Color::Green, LineStyle::Solid, 0, MarkerStyle::NoMarker);
        assert_eq!(style.validate(), Err(EncodeError::InvalidLineWidth));
    }
}
