//! Bounds resolution: the facts needed to map domain values into device space.
//!
//! Bounds are recomputed from scratch on every render; nothing here caches.

use glam::DVec2;

use crate::errors::RenderError;
use crate::host::{AxisDim, ChartKind, HostSeries};
use crate::types::{Rect, non_zero};

/// Independent min/scale for each cartesian direction (line-style series)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub bbox: Rect,
    pub min_x: f64,
    pub min_y: f64,
    pub x_scale: f64,
    pub y_scale: f64,
}

/// One scale for both directions (bar-style series)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformBounds {
    pub bbox: Rect,
    pub scale: f64,
}

/// Polar layout of a radar series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialBounds {
    pub bbox: Rect,
    pub radius: f64,
    pub center: DVec2,
    /// Domain value at the outer ring; never zero
    pub max_value: f64,
}

/// Bounds descriptor, tagged by how the series exposes its scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bounds {
    PerAxis(AxisBounds),
    Uniform(UniformBounds),
    Radial(RadialBounds),
}

impl Bounds {
    pub fn chart_kind(&self) -> ChartKind {
        match self {
            Bounds::PerAxis(_) | Bounds::Uniform(_) => ChartKind::Cartesian,
            Bounds::Radial(_) => ChartKind::Radial,
        }
    }

    /// The mapping passes draw with, every fallback applied.
    pub fn projection(&self) -> Projection {
        match *self {
            Bounds::PerAxis(b) => Projection::Cartesian(CartesianFrame {
                bbox: b.bbox,
                min_x: finite_or_zero(b.min_x),
                min_y: finite_or_zero(b.min_y),
                x_scale: non_zero(b.x_scale).unwrap_or(1.0),
                y_scale: non_zero(b.y_scale).unwrap_or(1.0),
            }),
            Bounds::Uniform(b) => {
                let scale = non_zero(b.scale).unwrap_or(1.0);
                Projection::Cartesian(CartesianFrame {
                    bbox: b.bbox,
                    min_x: 0.0,
                    min_y: 0.0,
                    x_scale: scale,
                    y_scale: scale,
                })
            }
            Bounds::Radial(b) => Projection::Radial(b),
        }
    }

    /// Cartesian mapping; `None` for radial bounds.
    pub fn cartesian_frame(&self) -> Option<CartesianFrame> {
        match self.projection() {
            Projection::Cartesian(frame) => Some(frame),
            Projection::Radial(_) => None,
        }
    }

    pub fn radial(&self) -> Option<&RadialBounds> {
        match self {
            Bounds::Radial(b) => Some(b),
            _ => None,
        }
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// What a pass draws against
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Cartesian(CartesianFrame),
    Radial(RadialBounds),
}

/// Normalized cartesian mapping from domain values to device coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartesianFrame {
    pub bbox: Rect,
    pub min_x: f64,
    pub min_y: f64,
    pub x_scale: f64,
    pub y_scale: f64,
}

impl CartesianFrame {
    /// Device x of domain value `v` on the X axis
    pub fn x(&self, v: f64) -> f64 {
        self.bbox.x + (v - self.min_x) * self.x_scale
    }

    /// Device y of domain value `v` on the Y axis (Y grows downwards)
    pub fn y(&self, v: f64) -> f64 {
        self.bbox.bottom() - (v - self.min_y) * self.y_scale
    }
}

/// First usable denominator: the axis span, then `count - 1`, then 1.
fn denominator(span: Option<f64>, record_count: usize) -> f64 {
    span.and_then(non_zero)
        .or_else(|| non_zero(record_count.saturating_sub(1) as f64))
        .unwrap_or(1.0)
}

/// Min and scale along one direction
fn resolve_axis(series: &(impl HostSeries + ?Sized), dim: AxisDim, length: f64) -> (f64, f64) {
    let count = series.record_count();
    match series.axis_extent(dim).filter(|e| e.from.is_finite()) {
        Some(extent) => (extent.from, length / denominator(Some(extent.span()), count)),
        // No numeric axis governs this direction: one step per record
        None => (0.0, length / denominator(None, count)),
    }
}

/// Bounds of a cartesian series.
///
/// Bar-style series that report native bounds win; everything else gets
/// per-axis min/scale derived from the bound axes.
pub fn resolve_linear_bounds(series: &(impl HostSeries + ?Sized)) -> Bounds {
    if let Some(bar) = series.bar_bounds() {
        crate::log::debug!(scale = bar.scale, "using native bar bounds");
        return Bounds::Uniform(UniformBounds {
            bbox: bar.bbox,
            scale: bar.scale,
        });
    }

    let bbox = series.bbox();
    let (min_x, x_scale) = resolve_axis(series, AxisDim::X, bbox.width);
    let (min_y, y_scale) = resolve_axis(series, AxisDim::Y, bbox.height);
    crate::log::debug!(min_x, min_y, x_scale, y_scale, "resolved per-axis bounds");
    Bounds::PerAxis(AxisBounds {
        bbox,
        min_x,
        min_y,
        x_scale,
        y_scale,
    })
}

/// Largest finite value of any chart field across all records, floored at 0.
pub fn aggregate_max_value(series: &(impl HostSeries + ?Sized)) -> f64 {
    let fields = series.chart_value_fields();
    (0..series.record_count())
        .flat_map(|idx| fields.iter().filter_map(move |f| series.record_value(idx, f)))
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max)
}

/// Bounds of a radar series; `None` until it has laid out its geometry.
pub fn resolve_radial_bounds(series: &(impl HostSeries + ?Sized)) -> Option<Bounds> {
    let geometry = series.radial_geometry()?;
    let max_value = match series.radial_axis_maximum().and_then(non_zero) {
        Some(explicit) => explicit,
        None => aggregate_max_value(series),
    };
    let max_value = if max_value.is_finite() && max_value > 0.0 {
        max_value
    } else {
        1.0
    };
    crate::log::debug!(radius = geometry.radius, max_value, "resolved radial bounds");
    Some(Bounds::Radial(RadialBounds {
        bbox: series.bbox(),
        radius: geometry.radius,
        center: geometry.center,
        max_value,
    }))
}

/// Bounds for whatever projection the series uses.
pub fn resolve_bounds(series: &(impl HostSeries + ?Sized)) -> Result<Bounds, RenderError> {
    let kind = series.kind();
    match kind.chart_kind() {
        Some(ChartKind::Cartesian) => Ok(resolve_linear_bounds(series)),
        Some(ChartKind::Radial) => resolve_radial_bounds(series).ok_or(RenderError::MissingRadialGeometry),
        None => Err(RenderError::UnsupportedSeries { kind }),
    }
}
