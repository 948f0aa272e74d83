//! Label text and placement relative to a line's anchor.

use glam::{DVec2, dvec2};

use crate::config::{AxisPosition, LabelSpec};
use crate::defaults::LABEL_PAD;
use crate::types::{Degrees, TextExtent};

/// Where a measured label goes and how it is turned
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub position: DVec2,
    pub rotation: Option<Degrees>,
}

/// Display text for a line's label. With `show_value` the value is appended
/// in parentheses, even when the text itself is empty.
pub fn compose_label_text(label: &LabelSpec, value: f64) -> String {
    if label.show_value {
        format!("{} ({})", label.text, value)
    } else {
        label.text.clone()
    }
}

/// Position a label of size `extent` next to `anchor`, offset away from the
/// edge the line starts on.
pub fn place_label(position: AxisPosition, anchor: DVec2, extent: TextExtent) -> LabelPlacement {
    let TextExtent { width: w, height: h } = extent;
    let pad = LABEL_PAD;
    let offset = match position {
        AxisPosition::Top => dvec2(w - pad - h / 2.0, pad + h / 2.0),
        AxisPosition::Bottom => dvec2(-w / 2.0 - h / 2.0, -pad - h / 2.0),
        AxisPosition::Left => dvec2(pad, -h / 2.0),
        AxisPosition::Right => dvec2(-w - pad, -h / 2.0),
    };
    LabelPlacement {
        position: anchor + offset,
        rotation: position.label_rotation(),
    }
}
