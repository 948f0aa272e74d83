//! End-to-end passes against the in-memory series and SVG surface.

use chart_thresholds::surface::{CirclePrimitive, PathPrimitive, TextPrimitive};
use chart_thresholds::{
    AxisPosition, ChartKind, ControllerState, DecorationConfig, DecorationController, FirstSeries,
    GroupId, LabelSpec, LineSpec, Primitive, PrimitiveHandle, RangeSpec, Rect, RenderHooks,
    SeriesKind, SeriesSnapshot, SvgSurface, decorate,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn line_chart() -> SeriesSnapshot {
    SeriesSnapshot::new(SeriesKind::Line, Rect::new(0.0, 0.0, 200.0, 100.0))
        .with_y_axis(0.0, 100.0)
        .with_records((0..5).map(|i| SeriesSnapshot::record([("data1", f64::from(i) * 20.0)])))
}

fn radar_chart() -> SeriesSnapshot {
    SeriesSnapshot::new(SeriesKind::Radar, Rect::new(0.0, 0.0, 300.0, 300.0))
        .with_radial_geometry(150.0, 150.0, 80.0)
        .with_radial_maximum(100.0)
}

fn path_at(surface: &SvgSurface, handle: PrimitiveHandle) -> &PathPrimitive {
    match surface.get(handle) {
        Some(Primitive::Path(p)) => p,
        other => panic!("expected a path at {handle:?}, got {other:?}"),
    }
}

fn circle_at(surface: &SvgSurface, handle: PrimitiveHandle) -> &CirclePrimitive {
    match surface.get(handle) {
        Some(Primitive::Circle(c)) => c,
        other => panic!("expected a circle at {handle:?}, got {other:?}"),
    }
}

fn text_at(surface: &SvgSurface, handle: PrimitiveHandle) -> &TextPrimitive {
    match surface.get(handle) {
        Some(Primitive::Text(t)) => t,
        other => panic!("expected text at {handle:?}, got {other:?}"),
    }
}

#[derive(Default)]
struct RecordingHooks {
    events: Vec<&'static str>,
}

impl RenderHooks for RecordingHooks {
    fn subscribe_series_instantiated_once(&mut self) {
        self.events.push("series_instantiated");
    }

    fn subscribe_after_render(&mut self) {
        self.events.push("after_render");
    }
}

#[test]
fn left_line_at_30() {
    init_tracing();
    let config = DecorationConfig::new()
        .with_line(LineSpec::new(AxisPosition::Left, 30.0).with_label(LabelSpec::new("Target")));
    let mut surface = SvgSurface::new(200.0, 100.0);
    let report = decorate(&line_chart(), &mut surface, &config).unwrap();

    assert_eq!(report.chart_kind, ChartKind::Cartesian);
    let outcome = report.lines[0];
    assert_eq!(path_at(&surface, outcome.line.handle).path.to_string(), "M0,70 l200,0");

    let label = text_at(&surface, outcome.label.handle);
    assert_eq!(label.text, "Target (30)");
    assert!(!label.hidden);
    assert_eq!(label.position, outcome.placement.position);
    assert_eq!(label.position.x, 5.0);
    assert!(label.position.y < 70.0);
}

#[test]
fn second_pass_reuses_every_primitive() {
    init_tracing();
    let config = DecorationConfig::new()
        .with_line(LineSpec::new(AxisPosition::Left, 30.0))
        .with_line(LineSpec::new(AxisPosition::Bottom, 2.0))
        .with_range(RangeSpec::new(10.0, 40.0).with_color("#0a0"));
    let series = line_chart();
    let mut surface = SvgSurface::new(200.0, 100.0);

    let first = decorate(&series, &mut surface, &config).unwrap();
    let svg = surface.to_svg().unwrap();
    let count = surface.len();
    assert_eq!(first.created(), 5);

    let second = decorate(&series, &mut surface, &config).unwrap();
    assert_eq!(second.created(), 0);
    assert_eq!(surface.len(), count);
    assert_eq!(surface.to_svg().unwrap(), svg);
    for (a, b) in first.lines.iter().zip(&second.lines) {
        assert_eq!(a.line.handle, b.line.handle);
        assert_eq!(a.label.handle, b.label.handle);
    }
    assert_eq!(first.ranges[0].handle, second.ranges[0].handle);
}

#[test]
fn appending_a_line_keeps_existing_handles() {
    init_tracing();
    let base = DecorationConfig::new()
        .with_line(LineSpec::new(AxisPosition::Left, 30.0))
        .with_line(LineSpec::new(AxisPosition::Left, 60.0));
    let series = line_chart();
    let mut surface = SvgSurface::new(200.0, 100.0);
    let mut hooks = RecordingHooks::default();

    let mut controller = DecorationController::new(base.clone()).unwrap();
    controller.attach(FirstSeries::Live(&series), &mut hooks);
    let before = controller.after_render(&series, &mut surface).unwrap();

    controller
        .set_config(base.with_line(LineSpec::new(AxisPosition::Left, 90.0)))
        .unwrap();
    let after = controller.after_render(&series, &mut surface).unwrap();

    assert_eq!(after.lines.len(), 3);
    for i in 0..2 {
        assert_eq!(after.lines[i].line.handle, before.lines[i].line.handle);
        assert!(!after.lines[i].line.created);
    }
    assert!(after.lines[2].line.created);
    assert!(after.lines[2].label.created);
    assert_eq!(after.created(), 2);
    assert_eq!(surface.group(GroupId::ThresholdLines).len(), 3);
    assert_eq!(surface.group(GroupId::ThresholdLabels).len(), 3);
}

#[test]
fn removing_decorations_hides_their_primitives() {
    init_tracing();
    let full = DecorationConfig::new()
        .with_line(LineSpec::new(AxisPosition::Left, 30.0).with_label(LabelSpec::new("Low")))
        .with_line(LineSpec::new(AxisPosition::Left, 60.0).with_label(LabelSpec::new("High")))
        .with_range(RangeSpec::new(10.0, 20.0))
        .with_range(RangeSpec::new(70.0, 90.0));
    let series = line_chart();
    let mut surface = SvgSurface::new(200.0, 100.0);
    let mut hooks = RecordingHooks::default();

    let mut controller = DecorationController::new(full.clone()).unwrap();
    controller.attach(FirstSeries::Live(&series), &mut hooks);
    let before = controller.after_render(&series, &mut surface).unwrap();

    controller
        .set_config(
            DecorationConfig::new()
                .with_line(LineSpec::new(AxisPosition::Left, 30.0).with_label(LabelSpec::new("Low")))
                .with_range(RangeSpec::new(10.0, 20.0)),
        )
        .unwrap();
    let after = controller.after_render(&series, &mut surface).unwrap();

    assert_eq!(after.created(), 0);
    assert_eq!(surface.len(), 6);
    assert!(!path_at(&surface, after.lines[0].line.handle).hidden);
    assert!(!text_at(&surface, after.lines[0].label.handle).hidden);
    assert!(!path_at(&surface, after.ranges[0].handle).hidden);
    assert!(path_at(&surface, before.lines[1].line.handle).hidden);
    assert!(text_at(&surface, before.lines[1].label.handle).hidden);
    assert!(path_at(&surface, before.ranges[1].handle).hidden);

    let svg = surface.to_svg().unwrap();
    assert!(svg.contains("Low"), "{svg}");
    assert!(!svg.contains("High"), "{svg}");

    // restoring the line reuses its hidden slot
    controller.set_config(full).unwrap();
    let restored = controller.after_render(&series, &mut surface).unwrap();
    assert_eq!(restored.created(), 0);
    assert_eq!(restored.lines[1].line.handle, before.lines[1].line.handle);
    assert!(!path_at(&surface, restored.lines[1].line.handle).hidden);
    assert!(!text_at(&surface, restored.lines[1].label.handle).hidden);
    assert!(!path_at(&surface, restored.ranges[1].handle).hidden);
}

#[test]
fn controller_waits_for_pending_series() {
    init_tracing();
    let config = DecorationConfig::new().with_line(LineSpec::new(AxisPosition::Left, 50.0));
    let mut controller = DecorationController::new(config).unwrap();
    let mut hooks = RecordingHooks::default();
    let mut surface = SvgSurface::new(200.0, 100.0);
    let series = line_chart();

    controller.attach(FirstSeries::<SeriesSnapshot>::Pending, &mut hooks);
    assert_eq!(controller.state(), ControllerState::WaitingForSeries);
    assert!(controller.after_render(&series, &mut surface).is_none());

    controller.series_instantiated(&series, &mut hooks);
    assert_eq!(controller.state(), ControllerState::Ready);
    assert_eq!(hooks.events, ["series_instantiated", "after_render"]);

    assert!(controller.after_render(&series, &mut surface).is_some());
    assert_eq!(surface.len(), 2);
}

#[test]
fn resize_moves_primitives_in_place() {
    init_tracing();
    let config = DecorationConfig::new()
        .with_line(LineSpec::new(AxisPosition::Left, 50.0))
        .with_range(RangeSpec::new(0.0, 100.0).with_line_width(0.0));
    let mut series = line_chart();
    let mut surface = SvgSurface::new(400.0, 200.0);

    let first = decorate(&series, &mut surface, &config).unwrap();
    series.set_bbox(Rect::new(0.0, 0.0, 400.0, 200.0));
    let second = decorate(&series, &mut surface, &config).unwrap();

    assert_eq!(first.lines[0].line.handle, second.lines[0].line.handle);
    assert_eq!(
        path_at(&surface, second.lines[0].line.handle).path.to_string(),
        "M0,100 l400,0"
    );
    let range = path_at(&surface, second.ranges[0].handle);
    assert!((range.path.polygon_area() - 400.0 * 200.0).abs() < 1e-9);
    assert!(surface.redraw_count() >= 6);
}

#[test]
fn bar_series_uses_uniform_scale() {
    init_tracing();
    let series = SeriesSnapshot::new(SeriesKind::Bar, Rect::new(0.0, 0.0, 200.0, 100.0))
        .with_y_axis(0.0, 1000.0)
        .with_bar_scale(2.0);
    let config = DecorationConfig::new()
        .with_line(LineSpec::new(AxisPosition::Left, 10.0))
        .with_line(LineSpec::new(AxisPosition::Top, 10.0));
    let mut surface = SvgSurface::new(200.0, 100.0);
    let report = decorate(&series, &mut surface, &config).unwrap();

    let paths: Vec<String> = report
        .lines
        .iter()
        .map(|o| path_at(&surface, o.line.handle).path.to_string())
        .collect();
    assert_eq!(paths, ["M0,80 l200,0", "M20,0 l0,100"]);

    let top_label = text_at(&surface, report.lines[1].label.handle);
    assert_eq!(top_label.rotation.map(|d| d.raw()), Some(90.0));
}

#[test]
fn radar_ring_and_disk() {
    init_tracing();
    let config = DecorationConfig::new()
        .with_line(LineSpec::new(AxisPosition::Left, 50.0).with_color("#c00"))
        .with_range(RangeSpec::new(0.0, 50.0).with_color("#00c"));
    let mut surface = SvgSurface::new(300.0, 300.0);
    let report = decorate(&radar_chart(), &mut surface, &config).unwrap();

    assert_eq!(report.chart_kind, ChartKind::Radial);
    let ring = circle_at(&surface, report.lines[0].line.handle);
    assert_eq!(ring.radius, 40.0);
    assert_eq!(ring.center.x, 150.0);
    assert_eq!(ring.center.y, 150.0);

    let label = text_at(&surface, report.lines[0].label.handle);
    assert_eq!(label.position.x, 195.0);

    insta::assert_snapshot!(
        path_at(&surface, report.ranges[0].handle).path.to_string(),
        @"M150,190 A40,40 0 1 1 150.001,190"
    );
}

#[test]
fn radar_without_explicit_maximum_uses_data() {
    init_tracing();
    let series = SeriesSnapshot::new(SeriesKind::Radar, Rect::new(0.0, 0.0, 300.0, 300.0))
        .with_radial_geometry(150.0, 150.0, 80.0)
        .with_field("sales")
        .with_field("cost")
        .with_records([
            SeriesSnapshot::record([("sales", 120.0), ("cost", 80.0)]),
            SeriesSnapshot::record([("sales", 90.0), ("cost", 200.0)]),
        ]);
    let config = DecorationConfig::new().with_line(LineSpec::new(AxisPosition::Left, 100.0));
    let mut surface = SvgSurface::new(300.0, 300.0);
    let report = decorate(&series, &mut surface, &config).unwrap();
    assert_eq!(circle_at(&surface, report.lines[0].line.handle).radius, 40.0);
}

#[test]
fn json_config_end_to_end() {
    init_tracing();
    let config = DecorationConfig::from_json(
        r##"{
            "lines": [
                { "position": "right", "value": 80, "color": "#ff0000", "dash": "6, 3",
                  "label": { "text": "Max", "showValue": false } }
            ],
            "ranges": [
                { "from": 20, "to": 40, "color": "#00ff00", "opacity": 0.25, "lineWidth": 2 }
            ]
        }"##,
    )
    .unwrap();
    let mut surface = SvgSurface::new(200.0, 100.0);
    let report = decorate(&line_chart(), &mut surface, &config).unwrap();

    let line = path_at(&surface, report.lines[0].line.handle);
    assert_eq!(line.path.to_string(), "M200,20 l-200,0");
    assert_eq!(line.dash.as_ref().map(ToString::to_string).as_deref(), Some("6, 3"));
    assert_eq!(text_at(&surface, report.lines[0].label.handle).text, "Max");
    let band = path_at(&surface, report.ranges[0].handle);
    assert_eq!(band.fill.as_ref().map(ToString::to_string).as_deref(), Some("rgb(0,255,0)"));
    assert_eq!(band.opacity, 0.25);

    let svg = surface.to_svg().unwrap();
    assert!(svg.contains("Max"), "{svg}");
    assert!(svg.contains("6, 3"), "{svg}");
    assert!(svg.contains("rgb(0,255,0)"), "{svg}");

    // ranges are painted first
    let range_at = svg.find("rangegroup").unwrap();
    let line_at = svg.find("thresholdlines").unwrap();
    assert!(range_at < line_at);
}

#[test]
fn unsupported_series_draws_nothing() {
    init_tracing();
    let gauge = SeriesSnapshot::new(SeriesKind::Gauge, Rect::new(0.0, 0.0, 100.0, 100.0));
    let config = DecorationConfig::new().with_line(LineSpec::new(AxisPosition::Left, 1.0));
    let mut controller = DecorationController::new(config).unwrap();
    let mut hooks = RecordingHooks::default();
    let mut surface = SvgSurface::new(100.0, 100.0);

    controller.attach(FirstSeries::Live(&gauge), &mut hooks);
    assert_eq!(controller.state(), ControllerState::Unsupported);
    assert!(hooks.events.is_empty());
    assert!(controller.after_render(&gauge, &mut surface).is_none());
    assert!(surface.is_empty());
}
