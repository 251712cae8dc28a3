//! End-to-end conversion tests through the public API.

use std::fs;
use std::path::PathBuf;

use map2tscn::{convert_file, convert_source, parse_map, Config, ConvertError, DedupStrategy};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn convert_to_string(source: &str, config: &Config) -> String {
    let mut out = Vec::new();
    convert_source(source, "uid://test", config, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

/// Value of `key = ...` inside the sub-resource block `id`.
fn block_value<'a>(text: &'a str, id: &str, key: &str) -> Option<&'a str> {
    let header = format!("[sub_resource type=\"Resource\" id=\"{}\"]\n", id);
    let start = text.find(&header)? + header.len();
    let block = &text[start..];
    let block = &block[..block.find("\n\n").unwrap_or(block.len())];
    let prefix = format!("{} = ", key);
    block
        .lines()
        .find_map(|line| line.strip_prefix(prefix.as_str()))
}

#[test]
fn quad_brush_scenario() {
    let source = "// brush 0\n{\n( 0 0 0 ) ( 1 0 0 ) ( 1 1 0 ) ( 0 1 0 ) floor\n}\n";
    let text = convert_to_string(source, &Config::default());

    assert_eq!(
        block_value(&text, "position_0", "data"),
        Some("PackedFloat32Array(0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0)")
    );
    assert_eq!(block_value(&text, "Resource_Block0", "num_vertices"), Some("4"));
    assert_eq!(block_value(&text, "Resource_Block0", "num_faces"), Some("1"));
    assert_eq!(block_value(&text, "Resource_Block0", "num_edges"), Some("4"));
    assert_eq!(
        block_value(&text, "Resource_Block0", "face_vertex_indices"),
        Some("PackedInt32Array(0, 1, 2, 3)")
    );
    assert_eq!(
        block_value(&text, "Resource_Block0", "edge_vertex_indices"),
        Some("PackedInt32Array(0, 1, 1, 2, 2, 3, 3, 0)")
    );
    assert_eq!(
        block_value(&text, "normal_0", "data"),
        Some("PackedFloat32Array(0.0, 0.0, 1.0)")
    );
    assert!(text.contains("[node name=\"Block_0\" type=\"Node3D\" parent=\".\"]"));
}

#[test]
fn mesh_brush_scenario() {
    let source = "\
// brush 3
{
mesh
{
(
v 0 0 0 t 0 0 0 0
v 10 0 0 t 0 0 0 0
)
(
v 10 0 0 t 0 0 0 0
v 10 10 0 t 0 0 0 0
)
}
}
";
    let text = convert_to_string(source, &Config::default());

    assert_eq!(block_value(&text, "Resource_Block3", "num_vertices"), Some("3"));
    assert_eq!(
        block_value(&text, "Resource_Block3", "edge_vertex_indices"),
        Some("PackedInt32Array(0, 1, 1, 2)")
    );
    assert_eq!(block_value(&text, "Resource_Block3", "num_faces"), Some("0"));
    assert!(!text.contains("Block_3"));
}

#[test]
fn fixture_converts_with_both_dedup_strategies() {
    let dir = tempdir().unwrap();
    let input = fixture("sample.map");

    let linear_out = dir.path().join("linear/sample.tscn");
    let report = convert_file(&input, &linear_out, &Config::default()).unwrap();
    assert_eq!(report.summary.brushes, 3);
    assert_eq!(report.summary.mesh_brushes, 1);
    assert_eq!(report.summary.nodes, 2);
    assert!(report.validation.is_ok());

    let grid = Config {
        dedup: DedupStrategy::Grid,
        ..Config::default()
    };
    let grid_out = dir.path().join("grid/sample.tscn");
    convert_file(&input, &grid_out, &grid).unwrap();

    assert_eq!(
        fs::read_to_string(&linear_out).unwrap(),
        fs::read_to_string(&grid_out).unwrap()
    );
}

#[test]
fn fixture_header_and_layers() {
    let source = fs::read_to_string(fixture("sample.map")).unwrap();
    let brushes = parse_map(&source).unwrap();

    assert_eq!(brushes.len(), 3);
    assert_eq!(brushes[0].layer.as_deref(), Some("000 Base/floor"));
    assert_eq!(brushes[1].faces.len(), 3);
    assert!(brushes[2].is_mesh);

    let text = convert_to_string(&source, &Config::default());
    assert!(text.starts_with("[gd_scene load_steps=4 format=3 uid=\"uid://test\"]\n"));
}

#[test]
fn face_vertex_counts_match_indices() {
    let source = fs::read_to_string(fixture("sample.map")).unwrap();
    let text = convert_to_string(&source, &Config::default());

    let counts = block_value(&text, "Resource_Block1", "face_vertex_count").unwrap();
    let indices = block_value(&text, "Resource_Block1", "face_vertex_indices").unwrap();

    let total: usize = counts
        .trim_start_matches("PackedInt32Array(")
        .trim_end_matches(')')
        .split(", ")
        .map(|n| n.parse::<usize>().unwrap())
        .sum();
    let listed = indices
        .trim_start_matches("PackedInt32Array(")
        .trim_end_matches(')')
        .split(", ")
        .count();

    assert_eq!(total, 12);
    assert_eq!(listed, total);
}

#[test]
fn invalid_brush_id_writes_no_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.map");
    fs::write(&input, "// brush 0\n( 0 0 0 ) ( 1 0 0 ) ( 0 1 0 ) a\n// brush two\n").unwrap();
    let output = dir.path().join("dist/broken.tscn");

    let err = convert_file(&input, &output, &Config::default()).unwrap_err();

    match err {
        ConvertError::Parse { location, .. } => assert_eq!(location.line, 3),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!output.exists());
}

#[test]
fn failed_conversion_keeps_previous_scene() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("arena.map");
    let output = dir.path().join("arena.tscn");
    fs::write(&output, "previous").unwrap();
    fs::write(&input, "// brush 1\n// brush 1\n").unwrap();

    let err = convert_file(&input, &output, &Config::default()).unwrap_err();

    assert!(err.to_string().contains("duplicate brush id 1"));
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
}
