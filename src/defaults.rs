//! Default styling and layout constants (device units)

pub const LINE_WIDTH: f64 = 1.0;
pub const LINE_OPACITY: f64 = 1.0;
pub const LINE_DASH: &str = "4, 0";

pub const LABEL_FONT: &str = "11px Helvetica, sans-serif";
pub const LABEL_FONT_PX: f64 = 11.0;
/// Gap between a line's anchor and its label
pub const LABEL_PAD: f64 = 5.0;

pub const RANGE_OPACITY: f64 = 0.1;
pub const RANGE_LINE_WIDTH: f64 = 1.0;
/// Ranges sit behind the series marks
pub const RANGE_Z_INDEX: i32 = -1;

/// Crisp-edge nudges applied to range corners, across and along the bound axis
pub const RANGE_SNAP_MAJOR: f64 = 1.0;
pub const RANGE_SNAP_MINOR: f64 = 0.5;

/// Horizontal nudge that keeps a full-circle arc's end point distinct from its start
pub const ARC_CLOSE_EPSILON: f64 = 0.001;

/// Text height as a multiple of the font size, for surfaces that estimate metrics
pub const TEXT_LINE_HEIGHT: f64 = 1.2;
/// Average glyph advance relative to font size (0.08 / 0.14 em table units)
pub const CHAR_WIDTH_RATIO: f64 = 0.08 / 0.14;
