//! Device-space paths for threshold lines and ranges.
//!
//! Cartesian shapes are built against a [`CartesianFrame`], radial shapes
//! against [`RadialBounds`]. All functions are pure; syncing the results onto
//! a surface happens in [`crate::sync`].

use glam::{DVec2, dvec2};

use crate::bounds::{CartesianFrame, RadialBounds};
use crate::config::{AxisPosition, LineSpec, RangeSpec};
use crate::defaults::{ARC_CLOSE_EPSILON, RANGE_SNAP_MAJOR, RANGE_SNAP_MINOR};
use crate::path::PathData;

/// A straight threshold line and the point its label hangs off
#[derive(Debug, Clone, PartialEq)]
pub struct LinePath {
    pub path: PathData,
    /// Start of the line, on the edge named by the line's position
    pub anchor: DVec2,
}

/// A threshold ring on a radar chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingPath {
    pub center: DVec2,
    pub radius: f64,
}

impl RingPath {
    /// Ring point at angle 0, where the label goes
    pub fn label_anchor(&self) -> DVec2 {
        self.center + dvec2(self.radius, 0.0)
    }
}

/// Line across the whole plot at `line.value`, starting on the edge named by
/// `line.position`.
pub fn cartesian_line_path(frame: &CartesianFrame, line: &LineSpec) -> LinePath {
    let bbox = frame.bbox;
    let (anchor, delta) = match line.position {
        AxisPosition::Left => (dvec2(bbox.left(), frame.y(line.value)), dvec2(bbox.width, 0.0)),
        AxisPosition::Right => (dvec2(bbox.right(), frame.y(line.value)), dvec2(-bbox.width, 0.0)),
        AxisPosition::Bottom => (dvec2(frame.x(line.value), bbox.bottom()), dvec2(0.0, -bbox.height)),
        AxisPosition::Top => (dvec2(frame.x(line.value), bbox.top()), dvec2(0.0, bbox.height)),
    };
    LinePath {
        path: PathData::new().m(anchor.x, anchor.y).l_rel(delta.x, delta.y),
        anchor,
    }
}

/// Ring whose radius is the line value's share of the radial maximum.
pub fn radar_line_path(bounds: &RadialBounds, line: &LineSpec) -> RingPath {
    RingPath {
        center: bounds.center,
        radius: bounds.radius * line.value / bounds.max_value,
    }
}

/// Closed band between `range.from` and `range.to` along the axis at
/// `position`, spanning the plot across it.
///
/// Every edge is pulled in by half the range's line width. Corners start on
/// the `from` edge and carry a small pixel-snap offset.
pub fn range_path(position: AxisPosition, frame: &CartesianFrame, range: &RangeSpec) -> PathData {
    let bbox = frame.bbox;
    let (w, h) = (bbox.width, bbox.height);
    let inset = range.line_width / 2.0;
    let (major, minor) = (RANGE_SNAP_MAJOR, RANGE_SNAP_MINOR);

    match position {
        AxisPosition::Left => {
            let (x, fy, ty) = (bbox.left() + major, frame.y(range.from) + minor, frame.y(range.to) + minor);
            PathData::new()
                .m(x + inset, fy - inset)
                .l(x + w - inset, fy - inset)
                .l(x + w - inset, ty + inset)
                .l(x + inset, ty + inset)
                .z()
        }
        AxisPosition::Right => {
            let (x, fy, ty) = (bbox.right(), frame.y(range.from) + minor, frame.y(range.to) + minor);
            PathData::new()
                .m(x - inset, fy - inset)
                .l(x - w + inset, fy - inset)
                .l(x - w + inset, ty + inset)
                .l(x - inset, ty + inset)
                .z()
        }
        AxisPosition::Top => {
            let (y, fx, tx) = (bbox.top() + major, frame.x(range.from) + minor, frame.x(range.to) + minor);
            PathData::new()
                .m(fx + inset, y + inset)
                .l(fx + inset, y + h - inset)
                .l(tx - inset, y + h - inset)
                .l(tx - inset, y + inset)
                .z()
        }
        AxisPosition::Bottom => {
            let (y, fx, tx) = (bbox.bottom(), frame.x(range.from) + minor, frame.x(range.to) + minor);
            PathData::new()
                .m(fx + inset, y - inset)
                .l(fx + inset, y - h + inset)
                .l(tx - inset, y - h + inset)
                .l(tx - inset, y - inset)
                .z()
        }
    }
}

/// Annulus between `range.from` and `range.to` (clamped to the radial
/// maximum), as two full-circle arcs of opposite sweep.
///
/// An inner radius of zero or less leaves only the outer ring, i.e. a disk.
pub fn radial_range_path(bounds: &RadialBounds, range: &RangeSpec) -> PathData {
    let DVec2 { x: cx, y: cy } = bounds.center;
    let to = range.to.min(bounds.max_value);
    let outer = bounds.radius * to / bounds.max_value;
    let inner = bounds.radius * range.from / bounds.max_value;

    let path = PathData::new()
        .m(cx, cy + outer)
        .a(outer, true, true, cx + ARC_CLOSE_EPSILON, cy + outer);
    if inner > 0.0 {
        path.m(cx, cy + inner)
            .a(inner, true, false, cx - ARC_CLOSE_EPSILON, cy + inner)
    } else {
        path
    }
}
