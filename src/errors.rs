//! Error types with rich diagnostics using miette
//!
//! Configuration errors are raised before anything is drawn. Parse errors
//! carry source spans into the JSON they came from.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::host::SeriesKind;
use crate::types::NumericError;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<config>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    /// Create a new source context
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }

    /// Byte offset of a 1-based line/column pair, clamped to the source length.
    pub fn offset_of(&self, line: usize, column: usize) -> usize {
        let mut offset = 0;
        for (idx, text) in self.source.split_inclusive('\n').enumerate() {
            if idx + 1 == line {
                return (offset + column.saturating_sub(1)).min(self.source.len());
            }
            offset += text.len();
        }
        self.source.len()
    }
}

/// Which configured sequence an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecKind {
    Line,
    Range,
}

impl std::fmt::Display for SpecKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecKind::Line => write!(f, "lines"),
            SpecKind::Range => write!(f, "ranges"),
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Malformed decoration configuration
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("unknown axis position: {value:?}")]
    #[diagnostic(
        code(chart_thresholds::config::unknown_position),
        help("expected one of `left`, `right`, `top`, `bottom`")
    )]
    UnknownPosition { value: String },

    #[error("{kind}[{index}].{field}: {source}")]
    #[diagnostic(code(chart_thresholds::config::invalid_number))]
    InvalidNumber {
        kind: SpecKind,
        index: usize,
        field: &'static str,
        source: NumericError,
    },

    #[error("{kind}[{index}].opacity must be within 0..=1, got {value}")]
    #[diagnostic(code(chart_thresholds::config::opacity_out_of_range))]
    OpacityOutOfRange {
        kind: SpecKind,
        index: usize,
        value: f64,
    },

    #[error("invalid dash pattern: {value:?}")]
    #[diagnostic(
        code(chart_thresholds::config::invalid_dash),
        help("use comma or space separated non-negative lengths, e.g. \"4, 4\"")
    )]
    InvalidDash { value: String },

    #[error("invalid configuration: {message}")]
    #[diagnostic(code(chart_thresholds::config::parse))]
    Parse {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },
}

impl ConfigError {
    /// Wrap a serde_json error with a span pointing into the offending source.
    pub fn from_json(err: serde_json::Error, ctx: &SourceContext) -> Self {
        let offset = ctx.offset_of(err.line(), err.column());
        ConfigError::Parse {
            message: err.to_string(),
            src: ctx.named_source(),
            span: SourceSpan::from((offset, 0)),
        }
    }
}

// ============================================================================
// Render Errors
// ============================================================================

/// Conditions that stop a decoration pass, or its SVG output
#[derive(Error, Diagnostic, Debug, PartialEq)]
pub enum RenderError {
    #[error("series kind {kind:?} cannot be decorated")]
    #[diagnostic(
        code(chart_thresholds::render::unsupported_series),
        help("only cartesian and radar series expose the bounds decorations need")
    )]
    UnsupportedSeries { kind: SeriesKind },

    #[error("radar series has not laid out its radial geometry yet")]
    #[diagnostic(code(chart_thresholds::render::missing_radial_geometry))]
    MissingRadialGeometry,

    #[error("XML serialization error: {message}")]
    #[diagnostic(code(chart_thresholds::render::serialize))]
    Serialize { message: String },
}
