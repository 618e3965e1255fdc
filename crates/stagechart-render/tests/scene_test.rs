use stagechart_core::{DiagramConfig, Error as ConfigError, LayoutConfig, Rgb, Stage};
use stagechart_render::canvas::{
    ArrowShape, Canvas, DrawCommand, RecordingCanvas, RoundedBoxShape, Scene, TextAnnotation,
    TextRole,
};
use stagechart_render::{Error, RenderOptions, render_diagram};

fn render_scene(config: &DiagramConfig) -> Scene {
    render_diagram(config, RecordingCanvas::new(), &RenderOptions::default()).expect("render ok")
}

fn stages(n: usize) -> Vec<Stage> {
    (0..n)
        .map(|i| {
            let t = i as f64 / n.max(1) as f64;
            Stage::new(format!("Stage {i}\n(step)"), (t, 1.0 - t, 0.5))
        })
        .collect()
}

#[test]
fn preset_scene_has_boxes_labels_arrows_and_title() {
    let scene = render_scene(&DiagramConfig::predictive_maintenance());
    assert_eq!(scene.boxes().count(), 8);
    assert_eq!(scene.arrows().count(), 7);
    assert_eq!(scene.texts().count(), 9);
    assert_eq!(
        scene.texts().filter(|t| t.role == TextRole::Title).count(),
        1
    );
    assert!(!scene.axes_visible);

    let bounds = scene.bounds.expect("bounds set");
    assert_eq!((bounds.min_x, bounds.max_x), (0.0, 9.0));
    assert_eq!(bounds.min_y, -0.5);
    assert!((bounds.max_y - 17.2).abs() < 1e-9);
}

#[test]
fn connector_count_is_stage_count_minus_one() {
    for n in 1..=10 {
        let config = DiagramConfig::new("t", stages(n), LayoutConfig::default()).unwrap();
        let scene = render_scene(&config);
        assert_eq!(scene.boxes().count(), n);
        assert_eq!(scene.arrows().count(), n - 1);
    }
}

#[test]
fn box_fill_matches_stage_color_after_reordering() {
    let mut reordered = DiagramConfig::predictive_maintenance().stages().to_vec();
    reordered.reverse();
    reordered.swap(1, 5);
    let config = DiagramConfig::new("t", reordered.clone(), LayoutConfig::default()).unwrap();
    let scene = render_scene(&config);

    let fills: Vec<Rgb> = scene.boxes().map(|b| b.fill).collect();
    let expected: Vec<Rgb> = reordered.iter().map(|s| s.fill).collect();
    assert_eq!(fills, expected);

    let labels: Vec<&str> = scene
        .texts()
        .filter(|t| t.role == TextRole::Label)
        .map(|t| t.text.as_str())
        .collect();
    let expected_labels: Vec<&str> = reordered.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, expected_labels);
}

#[test]
fn labels_are_centered_in_their_boxes() {
    let scene = render_scene(&DiagramConfig::predictive_maintenance());
    let labels: Vec<_> = scene
        .texts()
        .filter(|t| t.role == TextRole::Label)
        .collect();
    for (b, t) in scene.boxes().zip(labels) {
        assert!((t.x - (b.x + b.width / 2.0)).abs() < 1e-9);
        assert!((t.y - (b.y + b.height / 2.0)).abs() < 1e-9);
    }
}

#[test]
fn arrows_run_top_to_bottom_between_adjacent_boxes() {
    let scene = render_scene(&DiagramConfig::predictive_maintenance());
    let boxes: Vec<_> = scene.boxes().collect();
    for (i, a) in scene.arrows().enumerate() {
        assert!((a.start.y - boxes[i].y).abs() < 1e-9);
        assert!((a.end.y - (boxes[i + 1].y + boxes[i + 1].height)).abs() < 1e-9);
        assert!(a.start.y > a.end.y);
    }
}

#[test]
fn each_box_is_followed_by_its_label() {
    let scene = render_scene(&DiagramConfig::predictive_maintenance());
    let stage_part = &scene.commands[..16];
    for pair in stage_part.chunks(2) {
        assert!(matches!(pair[0], DrawCommand::RoundedBox(_)));
        assert!(matches!(pair[1], DrawCommand::Text(_)));
    }
}

#[test]
fn rendering_is_idempotent() {
    let config = DiagramConfig::predictive_maintenance();
    assert_eq!(render_scene(&config), render_scene(&config));
}

#[test]
fn mismatched_colors_fail_before_any_drawing() {
    let preset = DiagramConfig::predictive_maintenance();
    let labels: Vec<String> = preset.stages().iter().map(|s| s.label.clone()).collect();
    let colors: Vec<Rgb> = preset.stages().iter().take(7).map(|s| s.fill).collect();

    let err = DiagramConfig::from_parallel(preset.title(), labels, colors, *preset.layout())
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidConfiguration { .. }));
}

/// Counts every canvas call a render makes, finish excluded.
#[derive(Default)]
struct CountingCanvas {
    calls: usize,
}

impl Canvas for CountingCanvas {
    type Output = usize;

    fn draw_rounded_box(&mut self, _: RoundedBoxShape) {
        self.calls += 1;
    }
    fn draw_text(&mut self, _: TextAnnotation) {
        self.calls += 1;
    }
    fn draw_arrow(&mut self, _: ArrowShape) {
        self.calls += 1;
    }
    fn set_bounds(&mut self, _: stagechart_core::geom::Bounds) {
        self.calls += 1;
    }
    fn set_axes_visible(&mut self, _: bool) {
        self.calls += 1;
    }
    fn finish(self) -> stagechart_render::Result<usize> {
        Ok(self.calls)
    }
}

#[test]
fn counting_canvas_sees_every_call() {
    let calls = render_diagram(
        &DiagramConfig::predictive_maintenance(),
        CountingCanvas::default(),
        &RenderOptions::default(),
    )
    .unwrap();
    // 8 boxes + 8 labels + 7 arrows + title + bounds + axes.
    assert_eq!(calls, 26);
}

#[test]
fn config_error_converts_into_render_error() {
    let err: Error = ConfigError::InvalidConfiguration {
        message: "x".to_string(),
    }
    .into();
    assert_eq!(err.to_string(), "InvalidConfiguration: x");
}

#[test]
fn scene_serializes_with_tagged_commands() {
    let config = DiagramConfig::new("t", stages(2), LayoutConfig::default()).unwrap();
    let value = serde_json::to_value(render_scene(&config)).unwrap();
    let commands = value["commands"].as_array().unwrap();
    assert_eq!(commands.len(), 6);
    assert_eq!(commands[0]["kind"], "rounded_box");
    assert_eq!(commands[1]["kind"], "text");
    assert_eq!(commands[1]["role"], "label");
    assert_eq!(commands[4]["kind"], "arrow");
    assert_eq!(commands[5]["role"], "title");
    assert_eq!(value["axes_visible"], false);
}
