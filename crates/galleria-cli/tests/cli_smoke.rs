use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const LAYOUT_JSON: &str = r#"{
  "museo": {
    "grid": {
      "Ingresso": {"row": 0, "col": 0, "type": "entrance"},
      "Egizi": {"row": 0, "col": 1},
      "Romani": {"row": 0, "col": 2}
    }
  }
}"#;

const VENUE_JSON: &str = r#"{
  "name": "museo",
  "objects": [
    {"name": "anfora", "room": "Egizi", "connessi": ["sfinge"]},
    {"name": "sfinge", "room": "Egizi", "connessi": ["lupa"]},
    {"name": "lupa", "room": "Romani"}
  ]
}"#;

fn write_fixtures(dir: &Path) -> (PathBuf, PathBuf) {
    let layout = dir.join("layout.json");
    let venue = dir.join("venue.json");
    fs::write(&layout, LAYOUT_JSON).expect("write layout fixture");
    fs::write(&venue, VENUE_JSON).expect("write venue fixture");
    (layout, venue)
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn cli_renders_svg_with_the_expected_class_vocabulary() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (layout, venue) = write_fixtures(tmp.path());

    let exe = assert_cmd::cargo_bin!("galleria-cli");
    let assert = Command::new(exe)
        .args([
            "render",
            "--layout",
            layout.to_string_lossy().as_ref(),
            "--venue",
            venue.to_string_lossy().as_ref(),
            "--mode",
            "all",
        ])
        .assert()
        .success();

    let svg = stdout_of(assert.get_output());
    assert!(svg.starts_with("<svg"), "not an SVG document: {svg}");
    assert!(svg.contains(r#"class="room entrance""#));
    assert!(svg.contains(r#"class="room-label""#));
    assert!(svg.contains(r#"class="corridor""#));
    assert!(svg.contains(r#"class="exhibit""#));
    assert!(svg.contains(r#"class="conn""#));
    assert!(svg.contains(r#"class="conn-debug""#));
    assert!(svg.contains(">Egizi<"));
}

#[test]
fn cli_writes_svg_to_the_out_path() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (layout, venue) = write_fixtures(tmp.path());
    let out = tmp.path().join("map.svg");

    let exe = assert_cmd::cargo_bin!("galleria-cli");
    Command::new(exe)
        .args([
            "render",
            "--layout",
            layout.to_string_lossy().as_ref(),
            "--venue",
            venue.to_string_lossy().as_ref(),
            "--out",
            out.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let svg = fs::read_to_string(&out).expect("read svg");
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn cli_reads_the_venue_document_from_stdin() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (layout, _) = write_fixtures(tmp.path());

    let exe = assert_cmd::cargo_bin!("galleria-cli");
    let assert = assert_cmd::Command::new(exe)
        .args([
            "render",
            "--layout",
            layout.to_string_lossy().as_ref(),
            "--venue",
            "-",
        ])
        .write_stdin(VENUE_JSON)
        .assert()
        .success();

    assert!(stdout_of(assert.get_output()).starts_with("<svg"));
}

#[test]
fn cli_render_with_focus_draws_the_route() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (layout, venue) = write_fixtures(tmp.path());

    let exe = assert_cmd::cargo_bin!("galleria-cli");
    let assert = Command::new(exe)
        .args([
            "render",
            "--layout",
            layout.to_string_lossy().as_ref(),
            "--venue",
            venue.to_string_lossy().as_ref(),
            "--mode",
            "path",
            "--focus",
            "anfora",
            "lupa",
        ])
        .assert()
        .success();

    let svg = stdout_of(assert.get_output());
    assert_eq!(svg.matches(r#"class="conn""#).count(), 1);
}

#[test]
fn cli_layout_dumps_assembled_geometry_as_json() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (layout, venue) = write_fixtures(tmp.path());

    let exe = assert_cmd::cargo_bin!("galleria-cli");
    let assert = Command::new(exe)
        .args([
            "layout",
            "--layout",
            layout.to_string_lossy().as_ref(),
            "--venue",
            venue.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let value: serde_json::Value =
        serde_json::from_str(&stdout_of(assert.get_output())).expect("layout dump is JSON");
    assert_eq!(value["name"], "museo");
    assert_eq!(value["rooms"].as_array().expect("rooms").len(), 3);
    assert_eq!(value["corridors"].as_array().expect("corridors").len(), 2);
    assert_eq!(value["rooms"][0]["rect"]["x"], 100.0);
    // three declared exhibits plus the entrance's synthetic one
    assert_eq!(value["exhibits"].as_array().expect("exhibits").len(), 4);
}

#[test]
fn cli_route_prints_the_exhibit_walk() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (layout, venue) = write_fixtures(tmp.path());

    let exe = assert_cmd::cargo_bin!("galleria-cli");
    let assert = Command::new(exe)
        .args([
            "route",
            "--layout",
            layout.to_string_lossy().as_ref(),
            "--venue",
            venue.to_string_lossy().as_ref(),
            "--from",
            "anfora",
            "--to",
            "lupa",
        ])
        .assert()
        .success();

    assert_eq!(
        stdout_of(assert.get_output()),
        r#"["anfora","sfinge","lupa"]"#
    );
}

#[test]
fn cli_route_to_an_unknown_exhibit_fails_with_code_one() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (layout, venue) = write_fixtures(tmp.path());

    let exe = assert_cmd::cargo_bin!("galleria-cli");
    let assert = Command::new(exe)
        .args([
            "route",
            "--layout",
            layout.to_string_lossy().as_ref(),
            "--venue",
            venue.to_string_lossy().as_ref(),
            "--from",
            "anfora",
            "--to",
            "fantasma",
        ])
        .assert()
        .failure()
        .code(1);

    assert!(stderr_of(assert.get_output()).contains("fantasma"));
}

#[test]
fn cli_reports_a_missing_layout_entry() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (layout, _) = write_fixtures(tmp.path());
    let venue = tmp.path().join("other.json");
    fs::write(&venue, r#"{"name": "pinacoteca", "objects": []}"#).expect("write venue fixture");

    let exe = assert_cmd::cargo_bin!("galleria-cli");
    let assert = Command::new(exe)
        .args([
            "render",
            "--layout",
            layout.to_string_lossy().as_ref(),
            "--venue",
            venue.to_string_lossy().as_ref(),
        ])
        .assert()
        .failure()
        .code(1);

    assert!(stderr_of(assert.get_output()).contains("pinacoteca"));
}

#[test]
fn cli_rejects_unknown_flags_with_usage() {
    let exe = assert_cmd::cargo_bin!("galleria-cli");
    let assert = Command::new(exe)
        .args(["render", "--frobnicate"])
        .assert()
        .failure()
        .code(2);

    assert!(stderr_of(assert.get_output()).contains("USAGE"));
}

#[test]
fn cli_route_requires_both_endpoints() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (layout, venue) = write_fixtures(tmp.path());

    let exe = assert_cmd::cargo_bin!("galleria-cli");
    Command::new(exe)
        .args([
            "route",
            "--layout",
            layout.to_string_lossy().as_ref(),
            "--venue",
            venue.to_string_lossy().as_ref(),
            "--from",
            "anfora",
        ])
        .assert()
        .failure()
        .code(2);
}
