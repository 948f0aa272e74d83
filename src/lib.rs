//! Threshold lines, value labels and shaded ranges drawn over an
//! already-rendered chart.
//!
//! A [`DecorationController`] is attached to a host chart and runs
//! [`decorate`] after every render. Each pass reads the series' current
//! layout through [`HostSeries`], computes device-space paths, and creates or
//! updates primitives on a [`Surface`]. Both cartesian (line, area, bar...)
//! and radial (radar) charts are supported.
//!
//! ```
//! use chart_thresholds::{
//!     AxisPosition, DecorationConfig, LineSpec, Rect, SeriesKind, SeriesSnapshot, SvgSurface,
//!     decorate,
//! };
//!
//! let series = SeriesSnapshot::new(SeriesKind::Line, Rect::new(0.0, 0.0, 200.0, 100.0))
//!     .with_y_axis(0.0, 100.0);
//! let config = DecorationConfig::new().with_line(LineSpec::new(AxisPosition::Left, 30.0));
//!
//! let mut surface = SvgSurface::new(200.0, 100.0);
//! let report = decorate(&series, &mut surface, &config).unwrap();
//! assert_eq!(report.lines.len(), 1);
//! assert!(report.lines[0].line.created);
//! assert!(surface.to_svg().unwrap().contains("thresholdlines"));
//! ```

pub mod bounds;
pub mod config;
pub mod controller;
pub mod defaults;
pub mod errors;
pub mod geometry;
pub mod host;
pub mod label;
mod log;
pub mod path;
pub mod snapshot;
pub mod surface;
pub mod svg;
pub mod sync;
pub mod types;

pub use bounds::{Bounds, CartesianFrame, Projection, resolve_bounds};
pub use config::{AxisPosition, DashPattern, DecorationConfig, LabelSpec, LineSpec, RangeSpec};
pub use controller::{ControllerState, DecorationController, LineOutcome, PassReport, decorate};
pub use errors::{ConfigError, RenderError};
pub use host::{ChartKind, FirstSeries, HostSeries, RenderHooks, SeriesKind};
pub use path::PathData;
pub use snapshot::SeriesSnapshot;
pub use surface::{AttributeUpdate, GroupId, Primitive, PrimitiveHandle, Surface};
pub use svg::SvgSurface;
pub use types::{Color, Rect};
