//! Drawing surface abstraction and the primitives decorations put on it.
//!
//! The surface owns every primitive. Decorations keep only
//! [`PrimitiveHandle`]s, which stay valid for the lifetime of the surface.

use enum_dispatch::enum_dispatch;
use glam::DVec2;

use crate::config::DashPattern;
use crate::path::PathData;
use crate::types::{Color, Degrees, TextExtent};

/// Named primitive groups; decorations of one kind share a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupId {
    ThresholdLines,
    ThresholdLabels,
    Ranges,
}

impl GroupId {
    pub const ALL: [GroupId; 3] = [GroupId::ThresholdLines, GroupId::ThresholdLabels, GroupId::Ranges];

    pub fn name(self) -> &'static str {
        match self {
            GroupId::ThresholdLines => "thresholdlines",
            GroupId::ThresholdLabels => "thresholdlabels",
            GroupId::Ranges => "rangegroup",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            GroupId::ThresholdLines => 0,
            GroupId::ThresholdLabels => 1,
            GroupId::Ranges => 2,
        }
    }
}

/// Opaque reference to a primitive owned by a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimitiveHandle {
    group: GroupId,
    slot: usize,
}

impl PrimitiveHandle {
    /// For surface implementations: the `slot`-th primitive added to `group`
    pub fn new(group: GroupId, slot: usize) -> Self {
        Self { group, slot }
    }

    pub fn group(self) -> GroupId {
        self.group
    }

    pub fn slot(self) -> usize {
        self.slot
    }
}

/// The mutable attribute subset; `None` leaves an attribute untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeUpdate {
    pub hidden: Option<bool>,
    pub path: Option<PathData>,
    pub center: Option<DVec2>,
    pub radius: Option<f64>,
    pub position: Option<DVec2>,
}

impl AttributeUpdate {
    /// Make the primitive visible
    pub fn shown() -> Self {
        Self {
            hidden: Some(false),
            ..Self::default()
        }
    }

    pub fn with_path(mut self, path: PathData) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_circle(mut self, center: DVec2, radius: f64) -> Self {
        self.center = Some(center);
        self.radius = Some(radius);
        self
    }

    pub fn with_position(mut self, position: DVec2) -> Self {
        self.position = Some(position);
        self
    }
}

/// Common behavior for all primitives
#[enum_dispatch]
pub trait Drawable {
    /// Apply the attributes that make sense for this primitive
    fn apply(&mut self, update: &AttributeUpdate);

    fn is_hidden(&self) -> bool;

    /// Paint order; lower draws first (behind)
    fn z_index(&self) -> i32 {
        0
    }
}

/// A stroked and/or filled path
#[derive(Debug, Clone, PartialEq)]
pub struct PathPrimitive {
    pub path: PathData,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub dash: Option<DashPattern>,
    pub fill: Option<Color>,
    pub opacity: f64,
    pub z_index: i32,
    pub hidden: bool,
}

impl PathPrimitive {
    pub fn stroked(path: PathData, stroke: Color, stroke_width: f64) -> Self {
        Self {
            path,
            stroke: Some(stroke),
            stroke_width,
            dash: None,
            fill: None,
            opacity: 1.0,
            z_index: 0,
            hidden: false,
        }
    }

    pub fn filled(path: PathData, fill: Option<Color>) -> Self {
        Self {
            path,
            stroke: None,
            stroke_width: 0.0,
            dash: None,
            fill,
            opacity: 1.0,
            z_index: 0,
            hidden: false,
        }
    }

    pub fn with_dash(mut self, dash: DashPattern) -> Self {
        self.dash = Some(dash);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }
}

impl Drawable for PathPrimitive {
    fn apply(&mut self, update: &AttributeUpdate) {
        if let Some(hidden) = update.hidden {
            self.hidden = hidden;
        }
        if let Some(path) = &update.path {
            self.path = path.clone();
        }
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn z_index(&self) -> i32 {
        self.z_index
    }
}

/// An unfilled circle outline
#[derive(Debug, Clone, PartialEq)]
pub struct CirclePrimitive {
    pub center: DVec2,
    pub radius: f64,
    pub stroke: Color,
    pub stroke_width: f64,
    pub dash: Option<DashPattern>,
    pub opacity: f64,
    pub hidden: bool,
}

impl CirclePrimitive {
    pub fn new(center: DVec2, radius: f64, stroke: Color, stroke_width: f64) -> Self {
        Self {
            center,
            radius,
            stroke,
            stroke_width,
            dash: None,
            opacity: 1.0,
            hidden: false,
        }
    }

    pub fn with_dash(mut self, dash: DashPattern) -> Self {
        self.dash = Some(dash);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

impl Drawable for CirclePrimitive {
    fn apply(&mut self, update: &AttributeUpdate) {
        if let Some(hidden) = update.hidden {
            self.hidden = hidden;
        }
        if let Some(center) = update.center {
            self.center = center;
        }
        if let Some(radius) = update.radius {
            self.radius = radius;
        }
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }
}

/// A single line of text anchored at `position`
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub font: String,
    pub fill: Color,
    pub rotation: Option<Degrees>,
    pub position: DVec2,
    pub hidden: bool,
}

impl TextPrimitive {
    pub fn new(text: impl Into<String>, font: impl Into<String>, fill: Color) -> Self {
        Self {
            text: text.into(),
            font: font.into(),
            fill,
            rotation: None,
            position: DVec2::ZERO,
            hidden: false,
        }
    }

    pub fn with_rotation(mut self, rotation: Option<Degrees>) -> Self {
        self.rotation = rotation;
        self
    }
}

impl Drawable for TextPrimitive {
    fn apply(&mut self, update: &AttributeUpdate) {
        if let Some(hidden) = update.hidden {
            self.hidden = hidden;
        }
        if let Some(position) = update.position {
            self.position = position;
        }
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }
}

/// Any primitive a surface can hold
#[enum_dispatch(Drawable)]
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Path(PathPrimitive),
    Circle(CirclePrimitive),
    Text(TextPrimitive),
}

/// A display surface holding persistent, grouped primitives.
pub trait Surface {
    /// The `index`-th primitive added to `group`, if it exists
    fn primitive_at(&self, group: GroupId, index: usize) -> Option<PrimitiveHandle>;

    /// Append a primitive to `group` and render it
    fn add(&mut self, group: GroupId, primitive: Primitive) -> PrimitiveHandle;

    /// Update attributes of an existing primitive, redrawing it when `redraw`
    fn set_attributes(&mut self, handle: PrimitiveHandle, update: AttributeUpdate, redraw: bool);

    /// Rendered size of a text primitive; zero for anything else
    fn measure_text(&self, handle: PrimitiveHandle) -> TextExtent;
}
