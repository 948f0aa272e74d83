//! Decoration configuration: threshold lines, their labels, and shaded ranges.
//!
//! Specs are built once, validated, and then only read. The JSON shape mirrors
//! the option objects chart integrators already write:
//!
//! ```json
//! {
//!   "lines":  [{ "position": "left", "value": 30, "width": 3,
//!                "label": { "text": "Goal", "showValue": false } }],
//!   "ranges": [{ "from": 0, "to": 70, "color": "#FF0000", "opacity": 0.1 }]
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::defaults;
use crate::errors::{ConfigError, SourceContext, SpecKind};
use crate::types::{Color, Degrees, check_finite, check_non_negative};

/// Plot edge a decoration is measured from.
///
/// Left/right lines are horizontal (their value is on the Y axis); top/bottom
/// lines are vertical (their value is on the X axis).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum AxisPosition {
    #[default]
    Left,
    Right,
    Top,
    Bottom,
}

impl AxisPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            AxisPosition::Left => "left",
            AxisPosition::Right => "right",
            AxisPosition::Top => "top",
            AxisPosition::Bottom => "bottom",
        }
    }

    /// Label rotation so text reads along top/bottom lines
    pub fn label_rotation(self) -> Option<Degrees> {
        match self {
            AxisPosition::Top => Some(Degrees(90.0)),
            AxisPosition::Bottom => Some(Degrees(270.0)),
            AxisPosition::Left | AxisPosition::Right => None,
        }
    }
}

impl FromStr for AxisPosition {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(AxisPosition::Left),
            "right" => Ok(AxisPosition::Right),
            "top" => Ok(AxisPosition::Top),
            "bottom" => Ok(AxisPosition::Bottom),
            _ => Err(ConfigError::UnknownPosition {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for AxisPosition {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for AxisPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stroke dash lengths, e.g. `4, 4`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct DashPattern(Vec<f64>);

impl DashPattern {
    pub fn lengths(&self) -> &[f64] {
        &self.0
    }
}

impl Default for DashPattern {
    fn default() -> Self {
        DashPattern(vec![4.0, 0.0])
    }
}

impl FromStr for DashPattern {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidDash {
            value: s.to_string(),
        };
        let lengths = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<f64>()
                    .ok()
                    .and_then(|v| check_non_negative(v).ok())
                    .ok_or_else(invalid)
            })
            .collect::<Result<Vec<_>, _>>()?;
        if lengths.is_empty() {
            return Err(invalid());
        }
        Ok(DashPattern(lengths))
    }
}

impl TryFrom<String> for DashPattern {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for DashPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, len) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", len)?;
        }
        Ok(())
    }
}

/// Text shown next to a threshold line
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelSpec {
    pub text: String,
    pub color: Color,
    pub font: String,
    /// Append ` (value)` to the text
    pub show_value: bool,
}

impl Default for LabelSpec {
    fn default() -> Self {
        Self {
            text: String::new(),
            color: Color::BLACK,
            font: defaults::LABEL_FONT.to_string(),
            show_value: true,
        }
    }
}

impl LabelSpec {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    pub fn with_show_value(mut self, show_value: bool) -> Self {
        self.show_value = show_value;
        self
    }
}

fn default_line_width() -> f64 {
    defaults::LINE_WIDTH
}

fn default_line_opacity() -> f64 {
    defaults::LINE_OPACITY
}

/// A threshold line drawn across the plot at one axis value
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LineSpec {
    #[serde(default)]
    pub position: AxisPosition,
    pub value: f64,
    #[serde(default)]
    pub color: Color,
    #[serde(default = "default_line_width")]
    pub width: f64,
    #[serde(default = "default_line_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub dash: DashPattern,
    #[serde(default)]
    pub label: LabelSpec,
}

impl LineSpec {
    pub fn new(position: AxisPosition, value: f64) -> Self {
        Self {
            position,
            value,
            color: Color::BLACK,
            width: defaults::LINE_WIDTH,
            opacity: defaults::LINE_OPACITY,
            dash: DashPattern::default(),
            label: LabelSpec::default(),
        }
    }

    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_dash(mut self, dash: DashPattern) -> Self {
        self.dash = dash;
        self
    }

    pub fn with_label(mut self, label: LabelSpec) -> Self {
        self.label = label;
        self
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        let number = |field, result: Result<f64, _>| {
            result.map(|_| ()).map_err(|source| ConfigError::InvalidNumber {
                kind: SpecKind::Line,
                index,
                field,
                source,
            })
        };
        number("value", check_finite(self.value))?;
        number("width", check_non_negative(self.width))?;
        check_opacity(SpecKind::Line, index, self.opacity)
    }
}

fn default_range_opacity() -> f64 {
    defaults::RANGE_OPACITY
}

fn default_range_line_width() -> f64 {
    defaults::RANGE_LINE_WIDTH
}

/// A shaded band between two values of the series' bound axis
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeSpec {
    pub from: f64,
    pub to: f64,
    /// Fill colour; no fill when absent
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default = "default_range_opacity")]
    pub opacity: f64,
    /// Stroke allowance the band is inset by, half on each edge
    #[serde(default = "default_range_line_width")]
    pub line_width: f64,
}

impl RangeSpec {
    pub fn new(from: f64, to: f64) -> Self {
        Self {
            from,
            to,
            color: None,
            opacity: defaults::RANGE_OPACITY,
            line_width: defaults::RANGE_LINE_WIDTH,
        }
    }

    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        let number = |field, result: Result<f64, _>| {
            result.map(|_| ()).map_err(|source| ConfigError::InvalidNumber {
                kind: SpecKind::Range,
                index,
                field,
                source,
            })
        };
        number("from", check_finite(self.from))?;
        number("to", check_finite(self.to))?;
        number("lineWidth", check_non_negative(self.line_width))?;
        check_opacity(SpecKind::Range, index, self.opacity)
    }
}

fn check_opacity(kind: SpecKind, index: usize, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OpacityOutOfRange { kind, index, value })
    }
}

/// Everything a controller draws, in draw order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DecorationConfig {
    pub lines: Vec<LineSpec>,
    pub ranges: Vec<RangeSpec>,
}

impl DecorationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_line(mut self, line: LineSpec) -> Self {
        self.lines.push(line);
        self
    }

    pub fn with_range(mut self, range: RangeSpec) -> Self {
        self.ranges.push(range);
        self
    }

    /// Check every entry; the first problem found is returned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, line) in self.lines.iter().enumerate() {
            line.validate(index)?;
        }
        for (index, range) in self.ranges.iter().enumerate() {
            range.validate(index)?;
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        Self::from_json_named("<config>", source)
    }

    /// Like [`DecorationConfig::from_json`], naming the source in diagnostics.
    pub fn from_json_named(name: &str, source: &str) -> Result<Self, ConfigError> {
        let ctx = SourceContext::new(name, source);
        let config: DecorationConfig =
            serde_json::from_str(source).map_err(|e| ConfigError::from_json(e, &ctx))?;
        config.validate()?;
        Ok(config)
    }
}
