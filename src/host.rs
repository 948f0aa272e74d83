//! What the decorations need from the host chart.
//!
//! The host owns series layout, axes and the data store. Decorations only
//! read the facts below after the series has rendered.

use glam::DVec2;

use crate::config::AxisPosition;
use crate::types::Rect;

/// Series types a host chart can render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Line,
    Area,
    Scatter,
    Column,
    Bar,
    Radar,
    Pie,
    Gauge,
}

impl SeriesKind {
    /// Projection the decorations must use, or `None` for kinds that cannot be decorated.
    pub fn chart_kind(self) -> Option<ChartKind> {
        match self {
            SeriesKind::Line
            | SeriesKind::Area
            | SeriesKind::Scatter
            | SeriesKind::Column
            | SeriesKind::Bar => Some(ChartKind::Cartesian),
            SeriesKind::Radar => Some(ChartKind::Radial),
            SeriesKind::Pie | SeriesKind::Gauge => None,
        }
    }
}

/// The two projections decorations know how to draw into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Cartesian,
    Radial,
}

/// Data dimension of a cartesian series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisDim {
    X,
    Y,
}

/// Computed extrema of an axis after the host applied its data.
///
/// Category axes report NaN bounds; the resolver treats those like an
/// absent axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisExtent {
    pub from: f64,
    pub to: f64,
}

impl AxisExtent {
    pub fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }

    pub fn span(&self) -> f64 {
        self.to - self.from
    }
}

/// Bounds reported natively by bar-style series: one scale for both directions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarBounds {
    pub bbox: Rect,
    pub scale: f64,
}

/// Laid-out polar geometry of a radar series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGeometry {
    pub center: DVec2,
    pub radius: f64,
}

/// A rendered series, as far as decorations care.
pub trait HostSeries {
    fn kind(&self) -> SeriesKind;

    /// Plot area the series was laid out in
    fn bbox(&self) -> Rect;

    /// Number of records in the chart's store
    fn record_count(&self) -> usize;

    /// Extrema of the axis bound to this series' field for `dim`, if any
    fn axis_extent(&self, dim: AxisDim) -> Option<AxisExtent>;

    /// Edge of the axis the series is plotted against; ranges shade along it
    fn bound_axis(&self) -> AxisPosition {
        AxisPosition::Left
    }

    /// Native uniform-scale bounds, for bar-style series that compute them
    fn bar_bounds(&self) -> Option<BarBounds> {
        None
    }

    /// Radar centre and radius, once laid out
    fn radial_geometry(&self) -> Option<RadialGeometry> {
        None
    }

    /// Explicit maximum configured on the radial axis
    fn radial_axis_maximum(&self) -> Option<f64> {
        None
    }

    /// Value fields of every series attached to the chart
    fn chart_value_fields(&self) -> Vec<String> {
        Vec::new()
    }

    /// Numeric value of `field` in record `index`, `None` when absent or non-numeric
    fn record_value(&self, _index: usize, _field: &str) -> Option<f64> {
        None
    }
}

/// State of the chart's first series at attach time
#[derive(Debug, Clone, Copy)]
pub enum FirstSeries<'a, S: ?Sized> {
    /// Already instantiated and rendering
    Live(&'a S),
    /// Still a raw configuration; the host will instantiate it later
    Pending,
}

/// Subscription points the host exposes to the controller.
///
/// The host records the subscription and later calls the matching
/// [`crate::DecorationController`] method.
pub trait RenderHooks {
    /// Deliver `series_instantiated` once, when the first series becomes live
    fn subscribe_series_instantiated_once(&mut self);

    /// Deliver `after_render` after every render of the live series
    fn subscribe_after_render(&mut self);
}
