//! Map file parser.
//!
//! Converts map source text into `Brush` records in a single forward pass.
//! Brush, face, and vertex order follow the source.
//!
//! Mesh blocks are tracked with an explicit state machine:
//!
//! ```text
//! Idle --mesh--> InMesh --(--> InVertexBlock
//!   ^               |                |
//!   +------}--------+--------}-------+
//! ```
//!
//! Inside a vertex block, `v` lines are paired into mesh line segments.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{ConvertError, Result};
use crate::types::{Brush, Face, Vertex};

use super::line::{classify, LineKind};
use super::span::Location;

/// Mesh parsing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeshState {
    /// Not inside a mesh block. Parenthesized lines are faces.
    #[default]
    Idle,
    /// After a `mesh` keyword, before any vertex group.
    InMesh,
    /// Inside a parenthesized vertex group; `v` lines carry data.
    InVertexBlock,
}

impl MeshState {
    pub fn in_mesh(&self) -> bool {
        !matches!(self, MeshState::Idle)
    }
}

/// Single-pass map parser.
///
/// Feed lines in order with [`MapParser::feed_line`], then call
/// [`MapParser::finish`]. The brush being populated is always the last one
/// started.
#[derive(Debug, Default)]
pub struct MapParser {
    brushes: Vec<Brush>,
    seen_ids: HashMap<i32, Location>,
    state: MeshState,
    /// At most one unpaired mesh vertex.
    pending: Option<Vertex>,
}

impl MapParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MeshState {
        self.state
    }

    /// The unpaired mesh vertex waiting for its partner, if any.
    pub fn pending(&self) -> Option<Vertex> {
        self.pending
    }

    /// Brushes parsed so far.
    pub fn brushes(&self) -> &[Brush] {
        &self.brushes
    }

    /// Process one source line. `line_no` is 1-based.
    pub fn feed_line(&mut self, line_no: u32, raw: &str) -> Result<()> {
        let line = raw.trim();

        match classify(line) {
            LineKind::BrushMarker(id) => self.start_brush(line_no, raw, line, id),
            LineKind::Layer(rest) => {
                // Layer lines outside a brush are not read at all
                if let Some(brush) = self.brushes.last_mut() {
                    brush.layer = Some(parse_layer(line_no, raw, rest)?);
                }
                Ok(())
            }
            LineKind::Mesh => {
                if let Some(brush) = self.brushes.last_mut() {
                    brush.is_mesh = true;
                }
                self.state = MeshState::InMesh;
                Ok(())
            }
            LineKind::Group if self.state.in_mesh() => {
                self.state = MeshState::InVertexBlock;
                Ok(())
            }
            LineKind::MeshVertex(rest) if self.state == MeshState::InVertexBlock => {
                let vertex = parse_mesh_vertex(line_no, raw, line, rest)?;
                self.push_mesh_vertex(line_no, vertex);
                Ok(())
            }
            LineKind::Group => {
                let face = parse_face(line_no, raw, line)?;
                match self.brushes.last_mut() {
                    Some(brush) => brush.faces.push(face),
                    None => warn!(line = line_no, "Dropping face outside of any brush"),
                }
                Ok(())
            }
            LineKind::CloseBrace => {
                self.reset(line_no);
                Ok(())
            }
            LineKind::MeshVertex(_) | LineKind::Other => Ok(()),
        }
    }

    /// Finish parsing and return the brushes in source order.
    pub fn finish(mut self) -> Vec<Brush> {
        self.reset(0);
        debug!("Parsed {} brush(es)", self.brushes.len());
        self.brushes
    }

    fn start_brush(&mut self, line_no: u32, raw: &str, line: &str, id: Option<&str>) -> Result<()> {
        let Some(token) = id else {
            return Err(ConvertError::parse(
                Location::of_token(line_no, raw, line),
                "brush marker has no id",
            )
            .with_help("Brush markers look like `// brush 12`"));
        };

        let location = Location::of_token(line_no, raw, token);
        let id: i32 = token.parse().map_err(|_| {
            ConvertError::parse(location, format!("invalid brush id '{}'", token))
                .with_help("Brush ids must be 32-bit integers")
        })?;

        if let Some(first) = self.seen_ids.insert(id, location) {
            return Err(ConvertError::parse(
                location,
                format!("duplicate brush id {} (first defined at {})", id, first),
            )
            .with_help("Brush ids name the emitted resources and must be unique"));
        }

        self.reset(line_no);
        self.brushes.push(Brush::new(id).at(location));
        Ok(())
    }

    fn push_mesh_vertex(&mut self, line_no: u32, vertex: Vertex) {
        let Some(first) = self.pending.take() else {
            self.pending = Some(vertex);
            return;
        };

        match self.brushes.last_mut() {
            Some(brush) => brush.mesh_lines.push((first, vertex)),
            None => warn!(line = line_no, "Dropping mesh line outside of any brush"),
        }
    }

    fn reset(&mut self, line_no: u32) {
        if let Some(vertex) = self.pending.take() {
            debug!(line = line_no, %vertex, "Dropping unpaired mesh vertex");
        }
        self.state = MeshState::Idle;
    }
}

/// Parse map source text into brushes.
pub fn parse_map(source: &str) -> Result<Vec<Brush>> {
    parse_map_lines(source.lines())
}

/// Parse an ordered sequence of lines into brushes.
pub fn parse_map_lines<I, S>(lines: I) -> Result<Vec<Brush>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = MapParser::new();
    for (index, line) in lines.into_iter().enumerate() {
        parser.feed_line(index as u32 + 1, line.as_ref())?;
    }
    Ok(parser.finish())
}

/// Extract the quoted value of a `layer "<name>"` line.
fn parse_layer(line_no: u32, raw: &str, rest: &str) -> Result<String> {
    let mut parts = rest.splitn(3, '"');
    let _before = parts.next();
    match (parts.next(), parts.next()) {
        (Some(name), Some(_)) => Ok(name.to_string()),
        _ => Err(ConvertError::parse(
            Location::of_token(line_no, raw, rest),
            "layer has no quoted name",
        )
        .with_help("Layers look like `layer \"000 Base/room\"`")),
    }
}

/// Parse the coordinates of a `v <x> <y> <z> ...` line. Extra tokens are ignored.
fn parse_mesh_vertex(line_no: u32, raw: &str, line: &str, rest: &str) -> Result<Vertex> {
    let tokens: Vec<&str> = rest.split_whitespace().take(3).collect();
    if tokens.len() < 3 {
        return Err(ConvertError::parse(
            Location::of_token(line_no, raw, line),
            format!("mesh vertex needs 3 coordinates, found {}", tokens.len()),
        ));
    }
    parse_triple(line_no, raw, &tokens)
}

/// Parse a face line: one or more `( x y z )` groups followed by a material.
fn parse_face(line_no: u32, raw: &str, line: &str) -> Result<Face> {
    let mut vertices = Vec::new();
    let mut rest = line;

    loop {
        let trimmed = rest.trim_start();
        let Some(after_open) = trimmed.strip_prefix('(') else {
            break;
        };

        let Some(close) = after_open.find(')') else {
            return Err(ConvertError::parse(
                Location::of_token(line_no, raw, trimmed),
                "unclosed '(' in face",
            )
            .with_help("Each face vertex is written as `( x y z )`"));
        };

        let inner = &after_open[..close];
        let tokens: Vec<&str> = inner.split_whitespace().collect();
        if tokens.len() != 3 {
            return Err(ConvertError::parse(
                Location::of_token(line_no, raw, trimmed),
                format!("face vertex needs 3 coordinates, found {}", tokens.len()),
            ));
        }
        vertices.push(parse_triple(line_no, raw, &tokens)?);

        rest = &after_open[close + 1..];
    }

    let Some(material) = rest.split_whitespace().next() else {
        return Err(ConvertError::parse(
            Location::of_token(line_no, raw, line),
            "face has no material",
        )
        .with_help("A material name must follow the last `)`"));
    };

    Ok(Face::with_vertices(material, vertices))
}

fn parse_triple(line_no: u32, raw: &str, tokens: &[&str]) -> Result<Vertex> {
    let mut coords = [0.0f32; 3];
    for (slot, token) in coords.iter_mut().zip(tokens) {
        *slot = parse_float(line_no, raw, token)?;
    }
    Ok(Vertex::from(coords))
}

fn parse_float(line_no: u32, raw: &str, token: &str) -> Result<f32> {
    match token.parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ConvertError::parse(
            Location::of_token(line_no, raw, token),
            format!("invalid coordinate '{}'", token),
        )
        .with_help("Coordinates must be finite numbers")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLYGON_MAP: &str = r#"iwmap 4
// entity 0
{
"classname" "worldspawn"
// brush 0
{
layer "000 Base/shipment"
( 0 0 0 ) ( 64 0 0 ) ( 64 64 0 ) ( 0 64 0 ) stone 64 64 0 0 0 0 lightmap_gray 16384 16384 0 0 0 0
( 0 0 8 ) ( 0 64 8 ) ( 64 64 8 ) caulk 64 64 0 0 0 0
}
// brush 1
{
( 1.5 -2.25 3 ) ( 4 5 6 ) ( 7 8 9 ) metal
}
}
"#;

    const MESH_MAP: &str = r#"// brush 5
{
mesh
{
toolFlags splitGeo;
caulk
lightmap_gray
2 2 16 8
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
"#;

    #[test]
    fn test_parse_polygon_brushes() {
        let brushes = parse_map(POLYGON_MAP).unwrap();
        assert_eq!(brushes.len(), 2);

        let first = &brushes[0];
        assert_eq!(first.id, 0);
        assert_eq!(first.layer.as_deref(), Some("000 Base/shipment"));
        assert!(!first.is_mesh);
        assert_eq!(first.faces.len(), 2);
        assert_eq!(first.faces[0].material, "stone");
        assert_eq!(first.faces[0].vertices.len(), 4);
        assert_eq!(first.faces[0].vertices[2], Vertex::new(64.0, 64.0, 0.0));
        assert_eq!(first.faces[1].material, "caulk");
        assert_eq!(first.location, Location::new(5, 10));

        let second = &brushes[1];
        assert_eq!(second.id, 1);
        assert_eq!(second.layer, None);
        assert_eq!(second.faces[0].vertices[0], Vertex::new(1.5, -2.25, 3.0));
        assert_eq!(second.faces[0].material, "metal");
    }

    #[test]
    fn test_parse_mesh_brush() {
        let brushes = parse_map(MESH_MAP).unwrap();
        assert_eq!(brushes.len(), 1);

        let brush = &brushes[0];
        assert_eq!(brush.id, 5);
        assert!(brush.is_mesh);
        assert!(brush.faces.is_empty());
        assert_eq!(brush.mesh_lines.len(), 2);
        assert_eq!(
            brush.mesh_lines[0],
            (Vertex::new(0.0, 0.0, 0.0), Vertex::new(10.0, 0.0, 0.0))
        );
        assert_eq!(
            brush.mesh_lines[1],
            (Vertex::new(10.0, 0.0, 0.0), Vertex::new(10.0, 10.0, 0.0))
        );
    }

    #[test]
    fn test_vertex_pairs_span_groups() {
        // Pairing follows v lines, not group boundaries
        let source = "// brush 1\nmesh\n(\nv 0 0 0\n)\n(\nv 1 0 0\nv 2 0 0\n)\n}\n";
        let brushes = parse_map(source).unwrap();
        assert_eq!(brushes[0].mesh_lines.len(), 1);
        assert_eq!(brushes[0].mesh_lines[0].1, Vertex::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_unpaired_vertex_dropped_on_brace() {
        let source = "// brush 1\nmesh\n(\nv 0 0 0\nv 1 0 0\nv 2 0 0\n}\n";
        let brushes = parse_map(source).unwrap();
        assert_eq!(brushes[0].mesh_lines.len(), 1);
    }

    #[test]
    fn test_unpaired_vertex_not_carried_to_next_brush() {
        let source = "// brush 1\nmesh\n(\nv 0 0 0\n// brush 2\nmesh\n(\nv 1 0 0\nv 2 0 0\n}\n";
        let brushes = parse_map(source).unwrap();
        assert!(brushes[0].mesh_lines.is_empty());
        assert_eq!(
            brushes[1].mesh_lines,
            vec![(Vertex::new(1.0, 0.0, 0.0), Vertex::new(2.0, 0.0, 0.0))]
        );
    }

    #[test]
    fn test_state_machine_transitions() {
        let mut parser = MapParser::new();
        parser.feed_line(1, "// brush 0").unwrap();
        assert_eq!(parser.state(), MeshState::Idle);

        parser.feed_line(2, "mesh").unwrap();
        assert_eq!(parser.state(), MeshState::InMesh);

        parser.feed_line(3, "(").unwrap();
        assert_eq!(parser.state(), MeshState::InVertexBlock);

        parser.feed_line(4, "v 1 2 3").unwrap();
        assert_eq!(parser.pending(), Some(Vertex::new(1.0, 2.0, 3.0)));

        parser.feed_line(5, "}").unwrap();
        assert_eq!(parser.state(), MeshState::Idle);
        assert_eq!(parser.pending(), None);
    }

    #[test]
    fn test_close_brace_does_not_close_brush() {
        let source = "// brush 3\n{\n}\n( 0 0 0 ) ( 1 0 0 ) ( 0 1 0 ) late\n";
        let brushes = parse_map(source).unwrap();
        assert_eq!(brushes[0].faces.len(), 1);
        assert_eq!(brushes[0].faces[0].material, "late");
    }

    #[test]
    fn test_v_lines_outside_vertex_block_ignored() {
        let source = "// brush 1\nmesh\nv 0 0 0\nv 1 1 1\n}\n";
        let brushes = parse_map(source).unwrap();
        assert!(brushes[0].mesh_lines.is_empty());
    }

    #[test]
    fn test_parenthesized_line_in_mesh_is_not_a_face() {
        let source = "// brush 1\nmesh\n( 0 0 0 ) ( 1 0 0 ) ( 0 1 0 ) caulk\n}\n";
        let brushes = parse_map(source).unwrap();
        assert!(brushes[0].faces.is_empty());
    }

    #[test]
    fn test_layer_without_brush_is_ignored() {
        let brushes = parse_map("layer \"lost\"\n// brush 0\n").unwrap();
        assert_eq!(brushes[0].layer, None);

        let brushes = parse_map("layer base\n// brush 0\nlayer \"kept\"\n").unwrap();
        assert_eq!(brushes.len(), 1);
        assert_eq!(brushes[0].layer.as_deref(), Some("kept"));
    }

    #[test]
    fn test_unquoted_layer_inside_brush_is_error() {
        let err = parse_map("// brush 0\nlayer base\n").unwrap_err();
        assert!(err.to_string().contains("layer has no quoted name"));
    }

    #[test]
    fn test_face_before_any_brush_is_dropped() {
        let brushes = parse_map("( 0 0 0 ) ( 1 0 0 ) ( 0 1 0 ) caulk\n// brush 0\n").unwrap();
        assert_eq!(brushes.len(), 1);
        assert!(brushes[0].faces.is_empty());
    }

    #[test]
    fn test_invalid_brush_id() {
        let err = parse_map("{\n// brush abc\n").unwrap_err();
        match err {
            ConvertError::Parse { location, message, .. } => {
                assert_eq!(location, Location::new(2, 10));
                assert!(message.contains("'abc'"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_negative_brush_id_accepted() {
        let brushes = parse_map("// brush -1\n// brush +7\n").unwrap();
        assert_eq!(brushes[0].id, -1);
        assert_eq!(brushes[1].id, 7);
    }

    #[test]
    fn test_out_of_range_brush_id_rejected() {
        let err = parse_map("// brush 2147483648\n").unwrap_err();
        assert!(err.to_string().contains("invalid brush id '2147483648'"));
    }

    #[test]
    fn test_non_finite_coordinates_rejected() {
        let err = parse_map("// brush 0\n( 0 nan 0 ) ( 1 0 0 ) ( 0 1 0 ) caulk\n").unwrap_err();
        match err {
            ConvertError::Parse { location, message, .. } => {
                assert_eq!(location, Location::new(2, 5));
                assert_eq!(message, "invalid coordinate 'nan'");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(parse_map("// brush 0\n( 0 0 inf ) ( 1 0 0 ) ( 0 1 0 ) caulk\n").is_err());
        assert!(parse_map("// brush 0\n( 0 0 1e999 ) ( 1 0 0 ) ( 0 1 0 ) caulk\n").is_err());

        let mesh = "// brush 1\n{\nmesh\n{\n(\nv -inf 0 0 t 0 0\n";
        assert!(parse_map(mesh).is_err());
    }

    #[test]
    fn test_missing_brush_id() {
        let err = parse_map("// brush\n").unwrap_err().to_string();
        assert!(err.contains("no id"));
    }

    #[test]
    fn test_duplicate_brush_id() {
        let err = parse_map("// brush 7\n{\n}\n// brush 7\n").unwrap_err().to_string();
        assert!(err.contains("duplicate brush id 7"));
        assert!(err.contains("1:10"));
    }

    #[test]
    fn test_invalid_face_coordinate() {
        let err = parse_map("// brush 0\n( 0 zero 0 ) caulk\n").unwrap_err();
        match err {
            ConvertError::Parse { location, message, .. } => {
                assert_eq!(location, Location::new(2, 5));
                assert!(message.contains("'zero'"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_mesh_coordinate() {
        let source = "// brush 0\nmesh\n(\nv 0 0 nope\n";
        let err = parse_map(source).unwrap_err().to_string();
        assert!(err.contains("'nope'"));
        assert!(err.contains("4:7"));
    }

    #[test]
    fn test_short_mesh_vertex() {
        let err = parse_map("// brush 0\nmesh\n(\nv 1 2\n").unwrap_err().to_string();
        assert!(err.contains("found 2"));
    }

    #[test]
    fn test_unclosed_face_group() {
        let err = parse_map("// brush 0\n( 0 0 0 ) ( 1 1 1 caulk\n").unwrap_err().to_string();
        assert!(err.contains("unclosed"));
    }

    #[test]
    fn test_face_without_material() {
        let err = parse_map("// brush 0\n( 0 0 0 ) ( 1 1 1 )\n").unwrap_err().to_string();
        assert!(err.contains("no material"));
    }

    #[test]
    fn test_face_vertex_wrong_arity() {
        let err = parse_map("// brush 0\n( 0 0 ) caulk\n").unwrap_err().to_string();
        assert!(err.contains("found 2"));
    }

    #[test]
    fn test_layer_without_quotes() {
        let err = parse_map("// brush 0\nlayer base\n").unwrap_err().to_string();
        assert!(err.contains("quoted"));
    }

    #[test]
    fn test_parse_lines_iterator() {
        let lines = vec!["// brush 9".to_string(), "( 0 0 0 ) ( 1 0 0 ) ( 1 1 0 ) tile".to_string()];
        let brushes = parse_map_lines(&lines).unwrap();
        assert_eq!(brushes[0].id, 9);
        assert_eq!(brushes[0].faces[0].len(), 3);
    }

    #[test]
    fn test_empty_source() {
        assert!(parse_map("").unwrap().is_empty());
    }
}
