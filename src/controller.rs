//! The decoration pass and the controller that decides when to run it.

use crate::bounds::{Projection, resolve_bounds};
use crate::config::DecorationConfig;
use crate::errors::{ConfigError, RenderError};
use crate::geometry::{cartesian_line_path, radar_line_path, radial_range_path, range_path};
use crate::host::{ChartKind, FirstSeries, HostSeries, RenderHooks};
use crate::label::LabelPlacement;
use crate::surface::{GroupId, Surface};
use crate::sync::{Synced, hide_surplus, sync_label, sync_line, sync_range, sync_ring};

/// What one pass did for a threshold line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineOutcome {
    pub line: Synced,
    pub label: Synced,
    pub placement: LabelPlacement,
}

/// Summary of one decoration pass, in configuration order
#[derive(Debug, Clone, PartialEq)]
pub struct PassReport {
    pub chart_kind: ChartKind,
    pub lines: Vec<LineOutcome>,
    pub ranges: Vec<Synced>,
}

impl PassReport {
    /// Number of primitives this pass created rather than reused
    pub fn created(&self) -> usize {
        let lines = self
            .lines
            .iter()
            .map(|o| usize::from(o.line.created) + usize::from(o.label.created))
            .sum::<usize>();
        lines + self.ranges.iter().filter(|r| r.created).count()
    }
}

/// Draw or update every configured decoration against the series' current
/// layout: lines (each followed by its label) in order, then ranges in order.
pub fn decorate<H, S>(
    series: &H,
    surface: &mut S,
    config: &DecorationConfig,
) -> Result<PassReport, RenderError>
where
    H: HostSeries + ?Sized,
    S: Surface + ?Sized,
{
    let bounds = resolve_bounds(series)?;
    crate::log::debug!(
        kind = ?bounds.chart_kind(),
        lines = config.lines.len(),
        ranges = config.ranges.len(),
        "decoration pass"
    );

    let mut report = PassReport {
        chart_kind: bounds.chart_kind(),
        lines: Vec::with_capacity(config.lines.len()),
        ranges: Vec::with_capacity(config.ranges.len()),
    };

    match bounds.projection() {
        Projection::Cartesian(frame) => {
            for (index, line) in config.lines.iter().enumerate() {
                let path = cartesian_line_path(&frame, line);
                let synced = sync_line(surface, index, line, &path);
                let (label, placement) = sync_label(surface, index, line, line.position, path.anchor);
                report.lines.push(LineOutcome {
                    line: synced,
                    label,
                    placement,
                });
            }
            let bound_axis = series.bound_axis();
            for (index, range) in config.ranges.iter().enumerate() {
                let path = range_path(bound_axis, &frame, range);
                report.ranges.push(sync_range(surface, index, range, path));
            }
        }
        Projection::Radial(radial) => {
            for (index, line) in config.lines.iter().enumerate() {
                let ring = radar_line_path(&radial, line);
                let synced = sync_ring(surface, index, line, &ring);
                let (label, placement) =
                    sync_label(surface, index, line, line.position, ring.label_anchor());
                report.lines.push(LineOutcome {
                    line: synced,
                    label,
                    placement,
                });
            }
            for (index, range) in config.ranges.iter().enumerate() {
                let path = radial_range_path(&radial, range);
                report.ranges.push(sync_range(surface, index, range, path));
            }
        }
    }

    hide_surplus(surface, GroupId::ThresholdLines, report.lines.len());
    hide_surplus(surface, GroupId::ThresholdLabels, report.lines.len());
    hide_surplus(surface, GroupId::Ranges, report.ranges.len());

    crate::log::debug!(created = report.created(), "decoration pass done");
    Ok(report)
}

/// Lifecycle of a [`DecorationController`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    /// Not attached to a chart yet
    #[default]
    Uninitialized,
    /// Attached; the chart's first series is not live yet
    WaitingForSeries,
    /// Redrawing after every render
    Ready,
    /// The first series is neither cartesian nor radial; nothing is drawn
    Unsupported,
}

/// Owns a validated configuration and runs a pass after each host render.
///
/// The host drives it through three events:
///
/// 1. [`attach`](Self::attach) once, when the chart is set up;
/// 2. [`series_instantiated`](Self::series_instantiated) if the first series
///    was still pending at attach time;
/// 3. [`after_render`](Self::after_render) after every render.
#[derive(Debug, Clone)]
pub struct DecorationController {
    config: DecorationConfig,
    state: ControllerState,
}

impl DecorationController {
    pub fn new(config: DecorationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: ControllerState::Uninitialized,
        })
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn config(&self) -> &DecorationConfig {
        &self.config
    }

    /// Swap in a new configuration, validated first.
    ///
    /// Decorations keep their index: primitives for existing indices are
    /// updated in place on the next pass, new indices get new primitives.
    pub fn set_config(&mut self, config: DecorationConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Hook into the chart. Subsequent calls are ignored.
    pub fn attach<H, R>(&mut self, first_series: FirstSeries<'_, H>, hooks: &mut R)
    where
        H: HostSeries + ?Sized,
        R: RenderHooks + ?Sized,
    {
        if self.state != ControllerState::Uninitialized {
            crate::log::warn!(state = ?self.state, "controller already attached");
            return;
        }
        match first_series {
            FirstSeries::Live(series) => self.become_live(series, hooks),
            FirstSeries::Pending => {
                hooks.subscribe_series_instantiated_once();
                self.state = ControllerState::WaitingForSeries;
            }
        }
    }

    /// The chart's first series went live after [`attach`](Self::attach).
    pub fn series_instantiated<H, R>(&mut self, series: &H, hooks: &mut R)
    where
        H: HostSeries + ?Sized,
        R: RenderHooks + ?Sized,
    {
        if self.state != ControllerState::WaitingForSeries {
            crate::log::warn!(state = ?self.state, "ignoring series instantiation");
            return;
        }
        self.become_live(series, hooks);
    }

    fn become_live<H, R>(&mut self, series: &H, hooks: &mut R)
    where
        H: HostSeries + ?Sized,
        R: RenderHooks + ?Sized,
    {
        let kind = series.kind();
        if kind.chart_kind().is_none() {
            crate::log::warn!(?kind, "series kind cannot be decorated");
            self.state = ControllerState::Unsupported;
            return;
        }
        hooks.subscribe_after_render();
        self.state = ControllerState::Ready;
    }

    /// Run a pass if the controller is ready.
    ///
    /// Returns `None` when not ready or when the pass had to be skipped.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn after_render<H, S>(&mut self, series: &H, surface: &mut S) -> Option<PassReport>
    where
        H: HostSeries + ?Sized,
        S: Surface + ?Sized,
    {
        if self.state != ControllerState::Ready {
            return None;
        }
        match decorate(series, surface, &self.config) {
            Ok(report) => Some(report),
            Err(err) => {
                crate::log::warn!(%err, "skipping decoration pass");
                None
            }
        }
    }
}
