//! In-memory SVG surface.
//!
//! Keeps every primitive in its group, estimates text metrics from a
//! proportional glyph-width table, and builds a `facet-svg` document from
//! the visible primitives. Hosts that already have a retained-mode canvas
//! implement [`Surface`] on it instead.

use facet_svg::facet_xml::SerializeOptions;
use facet_svg::{Circle as SvgCircle, Group, Path, Svg, SvgNode, SvgStyle, Text, facet_xml};

use crate::defaults;
use crate::errors::RenderError;
use crate::surface::{
    AttributeUpdate, CirclePrimitive, Drawable, GroupId, PathPrimitive, Primitive,
    PrimitiveHandle, Surface, TextPrimitive,
};
use crate::types::{Color, TextExtent};

/// Proportional character widths, in hundredths of the average advance.
#[rustfmt::skip]
pub const AW_CHAR: [u8; 95] = [
    45,  55,  62, 115,  90, 132, 125,  40,
    55,  55,  71, 115,  45,  48,  45,  50,
    91,  91,  91,  91,  91,  91,  91,  91,
    91,  91,  50,  50, 120, 120, 120,  78,
   142, 102, 105, 110, 115, 105,  98, 105,
   125,  58,  58, 107,  95, 145, 125, 115,
    95, 115, 107,  95,  97, 118, 102, 150,
   100,  93, 100,  58,  50,  58, 119,  72,
    72,  86,  92,  80,  92,  85,  52,  92,
    92,  47,  47,  88,  48, 135,  92,  86,
    92,  92,  69,  75,  58,  92,  80, 121,
    81,  80,  76,  91,  49,  91, 118,
];

/// Text width in hundredths of the average glyph advance.
pub fn text_length(text: &str) -> u32 {
    text.chars()
        .map(|c| {
            if (' '..='~').contains(&c) {
                AW_CHAR[(c as usize) - 0x20] as u32
            } else {
                100
            }
        })
        .sum()
}

/// Pixel size from a CSS font shorthand such as `bold 12px Arial`.
pub fn font_size_px(font: &str) -> f64 {
    font.split_whitespace()
        .find_map(|token| token.strip_suffix("px")?.parse::<f64>().ok())
        .filter(|px| px.is_finite() && *px > 0.0)
        .unwrap_or(defaults::LABEL_FONT_PX)
}

/// Estimated unrotated extent of `text` rendered in `font`.
pub fn estimate_text_extent(text: &str, font: &str) -> TextExtent {
    let px = font_size_px(font);
    TextExtent {
        width: text_length(text) as f64 * 0.01 * px * defaults::CHAR_WIDTH_RATIO,
        height: px * defaults::TEXT_LINE_HEIGHT,
    }
}

/// Format a number with 6 significant figures, trailing zeros trimmed.
pub(crate) fn fmt_num(value: f64) -> String {
    fmt_num_precision(value, 6)
}

fn fmt_num_precision(value: f64, sig_figs: i32) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let abs_val = value.abs();
    let magnitude = abs_val.log10().floor() as i32;
    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", value, prec = decimals);
    if !s.contains('.') {
        return s;
    }
    let s = s.trim_end_matches('0');
    let s = s.trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Retained primitives, grouped, with SVG output
#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    groups: [Vec<Primitive>; 3],
    redraws: usize,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Primitives in `group`, in insertion order
    pub fn group(&self, group: GroupId) -> &[Primitive] {
        &self.groups[group.index()]
    }

    pub fn get(&self, handle: PrimitiveHandle) -> Option<&Primitive> {
        self.groups[handle.group().index()].get(handle.slot())
    }

    /// Total primitives across all groups
    pub fn len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of attribute updates that asked for a redraw
    pub fn redraw_count(&self) -> usize {
        self.redraws
    }

    /// SVG DOM of every visible primitive, lowest z-index first.
    ///
    /// Consecutive primitives of one group share a `<g>` carrying the group
    /// name as its class.
    pub fn to_document(&self) -> Svg {
        let mut ordered: Vec<(GroupId, &Primitive)> = GroupId::ALL
            .iter()
            .flat_map(|&g| self.group(g).iter().map(move |p| (g, p)))
            .filter(|(_, p)| !p.is_hidden())
            .collect();
        ordered.sort_by_key(|(_, p)| p.z_index());

        let children = ordered
            .chunk_by(|a, b| a.0 == b.0)
            .map(|run| {
                SvgNode::G(Group {
                    class: Some(run[0].0.name().to_string()),
                    children: run.iter().map(|(_, p)| render_primitive(p)).collect(),
                    ..Default::default()
                })
            })
            .collect();

        Svg {
            view_box: Some(format!("0 0 {} {}", fmt_num(self.width), fmt_num(self.height))),
            children,
            ..Default::default()
        }
    }

    /// Serialize [`Self::to_document`] to an SVG string.
    pub fn to_svg(&self) -> Result<String, RenderError> {
        fn format_float(value: f64, writer: &mut dyn std::io::Write) -> Result<(), std::io::Error> {
            write!(writer, "{}", fmt_num(value))
        }

        let options = SerializeOptions {
            float_formatter: Some(format_float),
            ..Default::default()
        };
        facet_xml::to_string_with_options(&self.to_document(), &options).map_err(|e| {
            RenderError::Serialize {
                message: e.to_string(),
            }
        })
    }
}

/// One SVG element for a primitive
pub fn render_primitive(prim: &Primitive) -> SvgNode {
    match prim {
        Primitive::Path(p) => SvgNode::Path(Path {
            d: Some(p.path.to_svg_path()),
            style: svg_style_from_entries(path_style(p)),
            ..Default::default()
        }),
        Primitive::Circle(c) => SvgNode::Circle(SvgCircle {
            cx: Some(c.center.x),
            cy: Some(c.center.y),
            r: Some(c.radius),
            style: svg_style_from_entries(circle_style(c)),
            ..Default::default()
        }),
        Primitive::Text(t) => SvgNode::Text(Text {
            x: Some(t.position.x),
            y: Some(t.position.y),
            transform: t.rotation.map(|rotation| {
                format!(
                    "rotate({} {} {})",
                    fmt_num(rotation.raw()),
                    fmt_num(t.position.x),
                    fmt_num(t.position.y)
                )
            }),
            fill: Some(t.fill.to_string()),
            style: format!("font: {}", t.font),
            content: t.text.clone(),
            ..Default::default()
        }),
    }
}

fn svg_style_from_entries(entries: Vec<(&'static str, String)>) -> SvgStyle {
    entries
        .into_iter()
        .fold(SvgStyle::new(), |style, (name, value)| style.add(name, &value))
}

fn paint(color: Option<&Color>) -> String {
    color.map_or_else(|| "none".to_string(), ToString::to_string)
}

/// Style declarations for a path, in output order
fn path_style(p: &PathPrimitive) -> Vec<(&'static str, String)> {
    let mut entries = vec![("fill", paint(p.fill.as_ref())), ("stroke", paint(p.stroke.as_ref()))];
    if p.stroke.is_some() {
        entries.push(("stroke-width", fmt_num(p.stroke_width)));
    }
    if let Some(dash) = &p.dash {
        entries.push(("stroke-dasharray", dash.to_string()));
    }
    entries.push(("opacity", fmt_num(p.opacity)));
    entries
}

fn circle_style(c: &CirclePrimitive) -> Vec<(&'static str, String)> {
    let mut entries = vec![
        ("fill", "none".to_string()),
        ("stroke", c.stroke.to_string()),
        ("stroke-width", fmt_num(c.stroke_width)),
    ];
    if let Some(dash) = &c.dash {
        entries.push(("stroke-dasharray", dash.to_string()));
    }
    entries.push(("opacity", fmt_num(c.opacity)));
    entries
}

impl Surface for SvgSurface {
    fn primitive_at(&self, group: GroupId, index: usize) -> Option<PrimitiveHandle> {
        (index < self.group(group).len()).then(|| PrimitiveHandle::new(group, index))
    }

    fn add(&mut self, group: GroupId, primitive: Primitive) -> PrimitiveHandle {
        let slots = &mut self.groups[group.index()];
        slots.push(primitive);
        crate::log::debug!(group = group.name(), slot = slots.len() - 1, "primitive added");
        PrimitiveHandle::new(group, slots.len() - 1)
    }

    fn set_attributes(&mut self, handle: PrimitiveHandle, update: AttributeUpdate, redraw: bool) {
        let Some(prim) = self.groups[handle.group().index()].get_mut(handle.slot()) else {
            crate::log::warn!(?handle, "attribute update for unknown primitive");
            return;
        };
        prim.apply(&update);
        if redraw {
            self.redraws += 1;
        }
    }

    fn measure_text(&self, handle: PrimitiveHandle) -> TextExtent {
        match self.get(handle) {
            Some(Primitive::Text(t)) => estimate_text_extent(&t.text, &t.font),
            _ => TextExtent::default(),
        }
    }
}
