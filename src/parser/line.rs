//! Structural classification of map lines.
//!
//! Classification looks only at the shape of a single trimmed line. Whether a
//! line is acted on also depends on parser state (see `MapParser`).

/// The brush marker is a comment of the form `// brush <id>`.
const COMMENT_TOKEN: &str = "//";
const BRUSH_KEYWORD: &str = "brush";
const LAYER_KEYWORD: &str = "layer";
const MESH_KEYWORD: &str = "mesh";
const VERTEX_KEYWORD: &str = "v";

/// What a trimmed line looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `// brush <id>`; the id token if present.
    BrushMarker(Option<&'a str>),
    /// `layer "<name>"`; the text after the keyword.
    Layer(&'a str),
    /// `mesh`
    Mesh,
    /// A line opening a parenthesized group.
    Group,
    /// `v <x> <y> <z> ...`; the text after the keyword.
    MeshVertex(&'a str),
    /// A bare `}`.
    CloseBrace,
    /// Anything else.
    Other,
}

/// Classify a trimmed line.
pub fn classify(line: &str) -> LineKind<'_> {
    if line == "}" {
        return LineKind::CloseBrace;
    }

    if line.starts_with('(') {
        return LineKind::Group;
    }

    if let Some(rest) = line.strip_prefix(COMMENT_TOKEN) {
        if let Some(after) = keyword(rest.trim_start(), BRUSH_KEYWORD) {
            // "//brush" without a space is not a marker
            if rest.starts_with(char::is_whitespace) {
                return LineKind::BrushMarker(after.split_whitespace().next());
            }
        }
        return LineKind::Other;
    }

    if let Some(rest) = keyword(line, LAYER_KEYWORD) {
        return LineKind::Layer(rest);
    }

    if keyword(line, MESH_KEYWORD).is_some() {
        return LineKind::Mesh;
    }

    if let Some(rest) = keyword(line, VERTEX_KEYWORD) {
        return LineKind::MeshVertex(rest);
    }

    LineKind::Other
}

/// Match `word` as a whole leading token, returning the remainder.
fn keyword<'a>(line: &'a str, word: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(word)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest)
    } else {
        None
    }
}
