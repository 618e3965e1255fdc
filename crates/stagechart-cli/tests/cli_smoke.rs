use assert_cmd::prelude::*;
use std::fs;
use std::process::Command;

fn cli() -> Command {
    Command::new(assert_cmd::cargo_bin!("stagechart-cli"))
}

#[test]
fn cli_renders_svg_to_stdout() {
    let output = cli().arg("render").output().expect("run cli");
    assert!(output.status.success());

    let svg = String::from_utf8(output.stdout).expect("utf8");
    let doc = roxmltree::Document::parse(&svg).expect("valid svg");
    let boxes = doc
        .descendants()
        .filter(|n| n.attribute("class") == Some("stage-box"))
        .count();
    assert_eq!(boxes, 8);
    assert!(svg.contains("Proposed Predictive Maintenance Pipeline"));
}

#[test]
fn cli_renders_png_smoke() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("out.png");

    cli()
        .args([
            "render",
            "--format",
            "png",
            "--out",
            out.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let bytes = fs::read(&out).expect("read png");
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "output is not a PNG"
    );

    let decoder = png::Decoder::new(std::io::Cursor::new(bytes));
    let reader = decoder.read_info().expect("png header");
    let info = reader.info();
    assert_eq!((info.width, info.height), (900, 1200));
}

#[test]
fn cli_renders_png_with_default_out_path() {
    let tmp = tempfile::tempdir().expect("tempdir");

    cli()
        .current_dir(tmp.path())
        .args(["render", "--format", "png", "--scale", "0.5"])
        .assert()
        .success();

    let bytes = fs::read(tmp.path().join("pipeline.png")).expect("read png");
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
}

#[test]
fn cli_renders_pdf() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("chart.pdf");

    cli()
        .args(["render", "--format", "pdf", "--out"])
        .arg(&out)
        .assert()
        .success();

    let bytes = fs::read(&out).expect("read pdf");
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn cli_layout_prints_geometry_json() {
    let output = cli().args(["layout", "--pretty"]).output().expect("run cli");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let boxes = value["boxes"].as_array().expect("boxes");
    assert_eq!(boxes.len(), 8);
    assert_eq!(value["connectors"].as_array().map(Vec::len), Some(7));
    let first_y = boxes[0]["y"].as_f64().expect("y");
    assert!((first_y - 13.3).abs() < 1e-9);
    assert_eq!(boxes[7]["y"].as_f64(), Some(0.0));
}

#[test]
fn cli_layout_scene_lists_draw_commands() {
    let output = cli().args(["layout", "--scene"]).output().expect("run cli");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["commands"].as_array().map(Vec::len), Some(24));
    assert_eq!(value["axes_visible"], serde_json::Value::Bool(false));
}

#[test]
fn cli_lists_stages() {
    let output = cli().arg("stages").output().expect("run cli");
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 8);
    assert!(lines[0].contains("Data Acquisition / (Sensor Data Collection)"));
    assert!(lines[7].starts_with(" 8  #f2ffd9"));
}

#[test]
fn cli_usage_errors_exit_with_code_2() {
    cli().arg("--bogus").assert().failure().code(2);
    cli().args(["render", "--format", "gif"]).assert().code(2);
    cli()
        .args(["render", "--format", "png", "--background", "chartreuse", "--out", "-"])
        .assert()
        .code(2);
}

#[test]
fn cli_svg_carries_sanitized_id() {
    let output = cli().args(["render", "--id", "my chart"]).output().expect("run cli");
    assert!(output.status.success());
    let svg = String::from_utf8(output.stdout).expect("utf8");
    let doc = roxmltree::Document::parse(&svg).expect("valid svg");
    assert_eq!(doc.root_element().attribute("id"), Some("my-chart"));
}
