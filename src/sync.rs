//! Keep one surface primitive per decoration index.
//!
//! The first pass creates each primitive with its full styling. Later passes
//! only touch the mutable subset (visibility, geometry, position); styling
//! changes in the configuration are not picked up by primitives that already
//! exist.

use glam::DVec2;

use crate::config::{AxisPosition, LineSpec, RangeSpec};
use crate::defaults;
use crate::geometry::{LinePath, RingPath};
use crate::label::{LabelPlacement, compose_label_text, place_label};
use crate::path::PathData;
use crate::surface::{
    AttributeUpdate, CirclePrimitive, GroupId, PathPrimitive, Primitive, PrimitiveHandle, Surface,
    TextPrimitive,
};
use crate::types::non_zero;

/// Result of syncing one decoration onto the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Synced {
    pub handle: PrimitiveHandle,
    /// Whether this pass created the primitive
    pub created: bool,
}

/// Find the `index`-th primitive of `group`, creating it with `create` when
/// absent, then apply `update` and redraw.
pub fn sync_primitive<S>(
    surface: &mut S,
    group: GroupId,
    index: usize,
    create: impl FnOnce() -> Primitive,
    update: AttributeUpdate,
) -> Synced
where
    S: Surface + ?Sized,
{
    let (handle, created) = match surface.primitive_at(group, index) {
        Some(handle) => {
            crate::log::debug!(group = group.name(), index, "reusing primitive");
            (handle, false)
        }
        None => {
            crate::log::debug!(group = group.name(), index, "creating primitive");
            (surface.add(group, create()), true)
        }
    };
    surface.set_attributes(handle, update, true);
    Synced { handle, created }
}

/// Hide every primitive of `group` from `start` on. Primitives are never
/// removed; a decoration that comes back at that index reuses its slot.
/// Returns how many were hidden.
pub fn hide_surplus<S>(surface: &mut S, group: GroupId, start: usize) -> usize
where
    S: Surface + ?Sized,
{
    let mut hidden = 0;
    while let Some(handle) = surface.primitive_at(group, start + hidden) {
        let update = AttributeUpdate {
            hidden: Some(true),
            ..AttributeUpdate::default()
        };
        surface.set_attributes(handle, update, true);
        hidden += 1;
    }
    if hidden > 0 {
        crate::log::debug!(group = group.name(), start, hidden, "hid surplus primitives");
    }
    hidden
}

// Zero counts as unset for line styling
fn line_width(line: &LineSpec) -> f64 {
    non_zero(line.width).unwrap_or(defaults::LINE_WIDTH)
}

fn line_opacity(line: &LineSpec) -> f64 {
    non_zero(line.opacity).unwrap_or(defaults::LINE_OPACITY)
}

/// Straight threshold line in the `thresholdlines` group
pub fn sync_line<S>(surface: &mut S, index: usize, line: &LineSpec, path: &LinePath) -> Synced
where
    S: Surface + ?Sized,
{
    let create = || -> Primitive {
        PathPrimitive::stroked(path.path.clone(), line.color.clone(), line_width(line))
            .with_opacity(line_opacity(line))
            .with_dash(line.dash.clone())
            .into()
    };
    let update = AttributeUpdate::shown().with_path(path.path.clone());
    sync_primitive(surface, GroupId::ThresholdLines, index, create, update)
}

/// Threshold ring in the `thresholdlines` group; never filled
pub fn sync_ring<S>(surface: &mut S, index: usize, line: &LineSpec, ring: &RingPath) -> Synced
where
    S: Surface + ?Sized,
{
    let create = || -> Primitive {
        CirclePrimitive::new(ring.center, ring.radius, line.color.clone(), line_width(line))
            .with_opacity(line_opacity(line))
            .with_dash(line.dash.clone())
            .into()
    };
    let update = AttributeUpdate::shown().with_circle(ring.center, ring.radius);
    sync_primitive(surface, GroupId::ThresholdLines, index, create, update)
}

/// Shaded range in the `rangegroup` group, painted behind the series
pub fn sync_range<S>(surface: &mut S, index: usize, range: &RangeSpec, path: PathData) -> Synced
where
    S: Surface + ?Sized,
{
    let update = AttributeUpdate::shown().with_path(path.clone());
    let create = move || -> Primitive {
        PathPrimitive::filled(path, range.color.clone())
            .with_opacity(non_zero(range.opacity).unwrap_or(defaults::RANGE_OPACITY))
            .with_z_index(defaults::RANGE_Z_INDEX)
            .into()
    };
    sync_primitive(surface, GroupId::Ranges, index, create, update)
}

/// Label for line `index` in the `thresholdlabels` group.
///
/// A new label is added at the origin so the surface can measure it; it is
/// then moved next to `anchor`. Existing labels keep their text.
pub fn sync_label<S>(
    surface: &mut S,
    index: usize,
    line: &LineSpec,
    position: AxisPosition,
    anchor: DVec2,
) -> (Synced, LabelPlacement)
where
    S: Surface + ?Sized,
{
    let group = GroupId::ThresholdLabels;
    let (handle, created) = match surface.primitive_at(group, index) {
        Some(handle) => (handle, false),
        None => {
            let label = &line.label;
            let text = TextPrimitive::new(
                compose_label_text(label, line.value),
                label.font.clone(),
                label.color.clone(),
            )
            .with_rotation(position.label_rotation());
            crate::log::debug!(index, text = %text.text, "creating label");
            (surface.add(group, Primitive::from(text)), true)
        }
    };

    let placement = place_label(position, anchor, surface.measure_text(handle));
    surface.set_attributes(
        handle,
        AttributeUpdate::shown().with_position(placement.position),
        true,
    );
    (Synced { handle, created }, placement)
}
