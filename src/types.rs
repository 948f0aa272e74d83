//! Strongly-typed geometry primitives shared by the bounds, path and label code.
//!
//! Device space is Y-down: larger `y` is further down the surface.

use std::fmt;

use serde::Deserialize;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is negative when non-negative required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Reject NaN and infinities.
#[inline]
pub fn check_finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// Reject NaN, infinities and negative values.
#[inline]
pub fn check_non_negative(val: f64) -> Result<f64, NumericError> {
    let val = check_finite(val)?;
    if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// Treat zero and NaN as "not provided".
///
/// Chart hosts report missing scales as `0` or `NaN` interchangeably, so every
/// fallback chain in the bounds code goes through this.
#[inline]
pub(crate) fn non_zero(val: f64) -> Option<f64> {
    if val == 0.0 || val.is_nan() {
        None
    } else {
        Some(val)
    }
}

/// Plot-area bounding box in device units, origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Left edge
    pub fn left(&self) -> f64 {
        self.x
    }

    /// Right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Top edge (smallest y)
    pub fn top(&self) -> f64 {
        self.y
    }

    /// Bottom edge (largest y)
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Measured size of a rendered text primitive.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
}

impl TextExtent {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Angle in degrees, clockwise in Y-down device space.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Degrees(pub f64);

impl Degrees {
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stroke/fill colour as configured.
///
/// Hex forms are normalized to RGB so two spellings of the same colour compare
/// equal; anything else (`red`, `rgba(...)`, `hsl(...)`) is kept verbatim.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "String")]
pub enum Color {
    Named(String),
    Rgb(u8, u8, u8),
    Raw(String),
}

impl Color {
    pub const BLACK: Color = Color::Rgb(0, 0, 0);

    pub fn parse(s: &str) -> Color {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if let Some(rgb) = parse_hex(hex) {
                return rgb;
            }
            return Color::Raw(s.to_string());
        }
        if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic()) {
            Color::Named(s.to_ascii_lowercase())
        } else {
            Color::Raw(s.to_string())
        }
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let mut it = hex.chars().map(|c| c.to_digit(16).unwrap_or(0) as u8 * 17);
            Some(Color::Rgb(it.next()?, it.next()?, it.next()?))
        }
        6 => {
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Color::Rgb(byte(0)?, byte(2)?, byte(4)?))
        }
        _ => None,
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl From<String> for Color {
    fn from(s: String) -> Self {
        Color::parse(&s)
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        Color::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Named(s) | Color::Raw(s) => write!(f, "{}", s),
            Color::Rgb(r, g, b) => write!(f, "rgb({},{},{})", r, g, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_finite_rejects_nan_and_infinity() {
        assert_eq!(check_finite(f64::NAN), Err(NumericError::NaN));
        assert_eq!(check_finite(f64::INFINITY), Err(NumericError::Infinite));
        assert_eq!(check_finite(-3.5), Ok(-3.5));
    }

    #[test]
    fn check_non_negative_rejects_negative() {
        assert_eq!(check_non_negative(-0.1), Err(NumericError::Negative));
        assert_eq!(check_non_negative(0.0), Ok(0.0));
    }

    #[test]
    fn non_zero_treats_zero_and_nan_as_missing() {
        assert_eq!(non_zero(0.0), None);
        assert_eq!(non_zero(f64::NAN), None);
        assert_eq!(non_zero(-2.0), Some(-2.0));
    }

    #[test]
    fn rect_edges() {
        let r = Rect::new(10.0, 20.0, 200.0, 100.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 210.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 120.0);
        assert_eq!(r.area(), 20_000.0);
    }

    #[test]
    fn color_parses_short_and_long_hex() {
        assert_eq!(Color::parse("#000"), Color::Rgb(0, 0, 0));
        assert_eq!(Color::parse("#fff"), Color::Rgb(255, 255, 255));
        assert_eq!(Color::parse("#FF0000"), Color::Rgb(255, 0, 0));
        assert_eq!(Color::parse("#FF0000"), Color::parse("#f00"));
    }

    #[test]
    fn color_keeps_names_and_functions() {
        assert_eq!(Color::parse("Red"), Color::Named("red".to_string()));
        assert_eq!(
            Color::parse("rgba(0,0,0,0.5)"),
            Color::Raw("rgba(0,0,0,0.5)".to_string())
        );
        assert_eq!(Color::parse("#12"), Color::Raw("#12".to_string()));
    }

    #[test]
    fn color_display() {
        assert_eq!(Color::Rgb(255, 0, 0).to_string(), "rgb(255,0,0)");
        assert_eq!(Color::parse("navy").to_string(), "navy");
    }
}
