//! Path data: an ordered list of drawing commands with SVG `d` serialization.
//!
//! [`PathData::to_svg_path`] hands the same commands to `facet-svg` for
//! document output.
//!
//! Built with a fluent API:
//!
//! ```
//! use chart_thresholds::path::PathData;
//!
//! let d = PathData::new().m(0.0, 70.0).l_rel(200.0, 0.0);
//! assert_eq!(d.to_string(), "M0,70 l200,0");
//! ```

use std::fmt;

use glam::{DVec2, dvec2};

use crate::svg::fmt_num;

/// One drawing command. Coordinates are device units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// `M x,y`
    MoveTo(DVec2),
    /// `L x,y`
    LineTo(DVec2),
    /// `l dx,dy`
    LineBy(DVec2),
    /// `A rx,ry rotation large_arc sweep x,y`
    Arc {
        radii: DVec2,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: DVec2,
    },
    /// `Z`
    Close,
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PathCommand::MoveTo(p) => write!(f, "M{},{}", fmt_num(p.x), fmt_num(p.y)),
            PathCommand::LineTo(p) => write!(f, "L{},{}", fmt_num(p.x), fmt_num(p.y)),
            PathCommand::LineBy(d) => write!(f, "l{},{}", fmt_num(d.x), fmt_num(d.y)),
            PathCommand::Arc {
                radii,
                rotation,
                large_arc,
                sweep,
                to,
            } => write!(
                f,
                "A{},{} {} {} {} {},{}",
                fmt_num(radii.x),
                fmt_num(radii.y),
                fmt_num(rotation),
                u8::from(large_arc),
                u8::from(sweep),
                fmt_num(to.x),
                fmt_num(to.y)
            ),
            PathCommand::Close => f.write_str("Z"),
        }
    }
}

/// Ordered path commands
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn m(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::MoveTo(dvec2(x, y)));
        self
    }

    pub fn l(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::LineTo(dvec2(x, y)));
        self
    }

    pub fn l_rel(mut self, dx: f64, dy: f64) -> Self {
        self.commands.push(PathCommand::LineBy(dvec2(dx, dy)));
        self
    }

    /// Elliptical arc with equal radii and no rotation
    pub fn a(mut self, r: f64, large_arc: bool, sweep: bool, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::Arc {
            radii: dvec2(r, r),
            rotation: 0.0,
            large_arc,
            sweep,
            to: dvec2(x, y),
        });
        self
    }

    pub fn z(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Absolute end point of every command, resolving relative moves.
    /// `Close` contributes nothing.
    pub fn vertices(&self) -> Vec<DVec2> {
        let mut out = Vec::with_capacity(self.commands.len());
        let mut cursor = DVec2::ZERO;
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => cursor = p,
                PathCommand::LineBy(d) => cursor += d,
                PathCommand::Arc { to, .. } => cursor = to,
                PathCommand::Close => continue,
            }
            out.push(cursor);
        }
        out
    }

    /// The same commands as a `facet-svg` path. Relative segments are
    /// resolved against the current point and emitted as absolute lines.
    pub fn to_svg_path(&self) -> facet_svg::PathData {
        let mut out = facet_svg::PathData::new();
        let mut cursor = DVec2::ZERO;
        let mut start = DVec2::ZERO;
        for cmd in &self.commands {
            out = match *cmd {
                PathCommand::MoveTo(p) => {
                    cursor = p;
                    start = p;
                    out.m(p.x, p.y)
                }
                PathCommand::LineTo(p) => {
                    cursor = p;
                    out.l(p.x, p.y)
                }
                PathCommand::LineBy(d) => {
                    cursor += d;
                    out.l(cursor.x, cursor.y)
                }
                PathCommand::Arc {
                    radii,
                    rotation,
                    large_arc,
                    sweep,
                    to,
                } => {
                    cursor = to;
                    out.a(radii.x, radii.y, rotation, large_arc, sweep, to.x, to.y)
                }
                PathCommand::Close => {
                    cursor = start;
                    out.z()
                }
            };
        }
        out
    }

    /// Shoelace area of the polygon traced by the vertices (arcs count as chords).
    pub fn polygon_area(&self) -> f64 {
        let pts = self.vertices();
        if pts.len() < 3 {
            return 0.0;
        }
        let twice: f64 = pts
            .iter()
            .zip(pts.iter().cycle().skip(1))
            .map(|(a, b)| a.perp_dot(*b))
            .sum();
        twice.abs() / 2.0
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", cmd)?;
        }
        Ok(())
    }
}
