//! In-memory [`HostSeries`] for hosts that can hand over a plain description of
//! their laid-out series, and for tests.

use std::collections::HashMap;

use glam::DVec2;

use crate::config::AxisPosition;
use crate::host::{AxisDim, AxisExtent, BarBounds, HostSeries, RadialGeometry, SeriesKind};
use crate::types::Rect;

/// One store record: field name → numeric value
pub type Record = HashMap<String, f64>;

/// A frozen copy of everything a series exposes after layout
#[derive(Debug, Clone)]
pub struct SeriesSnapshot {
    kind: SeriesKind,
    bbox: Rect,
    bound_axis: AxisPosition,
    x_axis: Option<AxisExtent>,
    y_axis: Option<AxisExtent>,
    bar_scale: Option<f64>,
    radial: Option<RadialGeometry>,
    radial_maximum: Option<f64>,
    fields: Vec<String>,
    records: Vec<Record>,
}

impl SeriesSnapshot {
    pub fn new(kind: SeriesKind, bbox: Rect) -> Self {
        Self {
            kind,
            bbox,
            bound_axis: AxisPosition::Left,
            x_axis: None,
            y_axis: None,
            bar_scale: None,
            radial: None,
            radial_maximum: None,
            fields: Vec::new(),
            records: Vec::new(),
        }
    }

    pub fn with_x_axis(mut self, from: f64, to: f64) -> Self {
        self.x_axis = Some(AxisExtent::new(from, to));
        self
    }

    pub fn with_y_axis(mut self, from: f64, to: f64) -> Self {
        self.y_axis = Some(AxisExtent::new(from, to));
        self
    }

    pub fn with_bound_axis(mut self, position: AxisPosition) -> Self {
        self.bound_axis = position;
        self
    }

    /// Mark this as a bar-style series reporting a single native scale
    pub fn with_bar_scale(mut self, scale: f64) -> Self {
        self.bar_scale = Some(scale);
        self
    }

    pub fn with_radial_geometry(mut self, center_x: f64, center_y: f64, radius: f64) -> Self {
        self.radial = Some(RadialGeometry {
            center: DVec2::new(center_x, center_y),
            radius,
        });
        self
    }

    pub fn with_radial_maximum(mut self, maximum: f64) -> Self {
        self.radial_maximum = Some(maximum);
        self
    }

    /// Add a value field used by one of the chart's series
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    pub fn with_records(mut self, records: impl IntoIterator<Item = Record>) -> Self {
        self.records.extend(records);
        self
    }

    /// Append a record, e.g. after a store reload
    pub fn push_record(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Change the plot area, e.g. after a resize
    pub fn set_bbox(&mut self, bbox: Rect) {
        self.bbox = bbox;
    }

    /// Build a record from `(field, value)` pairs
    pub fn record<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Record {
        pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }
}

impl HostSeries for SeriesSnapshot {
    fn kind(&self) -> SeriesKind {
        self.kind
    }

    fn bbox(&self) -> Rect {
        self.bbox
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }

    fn axis_extent(&self, dim: AxisDim) -> Option<AxisExtent> {
        match dim {
            AxisDim::X => self.x_axis,
            AxisDim::Y => self.y_axis,
        }
    }

    fn bound_axis(&self) -> AxisPosition {
        self.bound_axis
    }

    fn bar_bounds(&self) -> Option<BarBounds> {
        self.bar_scale.map(|scale| BarBounds {
            bbox: self.bbox,
            scale,
        })
    }

    fn radial_geometry(&self) -> Option<RadialGeometry> {
        self.radial
    }

    fn radial_axis_maximum(&self) -> Option<f64> {
        self.radial_maximum
    }

    fn chart_value_fields(&self) -> Vec<String> {
        self.fields.clone()
    }

    fn record_value(&self, index: usize, field: &str) -> Option<f64> {
        self.records.get(index)?.get(field).copied()
    }
}
