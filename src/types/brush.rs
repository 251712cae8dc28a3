//! Brush type.
//!
//! A brush is the unit the emitter converts. It holds one of two
//! representations: polygon faces, or a mesh made of line segments.
//! `is_mesh` selects which one is meaningful.

use crate::parser::Location;

use super::{Face, Vertex};

/// A line segment belonging to a mesh brush.
pub type MeshLine = (Vertex, Vertex);

/// Which representation a brush carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushKind {
    Polygon,
    Mesh,
}

impl BrushKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrushKind::Polygon => "polygon",
            BrushKind::Mesh => "mesh",
        }
    }
}

/// One convertible unit from the map file.
#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    /// Identifier from the `// brush <id>` marker. Used in emitted resource names.
    pub id: i32,

    /// Layer name, if the brush declared one.
    pub layer: Option<String>,

    /// Whether the brush was declared with a `mesh` block.
    pub is_mesh: bool,

    /// Polygon faces (only meaningful when `is_mesh` is false).
    pub faces: Vec<Face>,

    /// Mesh line segments (only meaningful when `is_mesh` is true).
    pub mesh_lines: Vec<MeshLine>,

    /// Where the brush marker appeared.
    pub location: Location,
}

impl Brush {
    /// Create an empty polygon brush.
    pub fn new(id: i32) -> Self {
        Self {
            id,
            layer: None,
            is_mesh: false,
            faces: Vec::new(),
            mesh_lines: Vec::new(),
            location: Location::default(),
        }
    }

    /// Set the source location of the brush marker.
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Create a polygon brush from faces.
    pub fn polygon(id: i32, faces: Vec<Face>) -> Self {
        Self {
            faces,
            ..Self::new(id)
        }
    }

    /// Create a mesh brush from line segments.
    pub fn mesh(id: i32, mesh_lines: Vec<MeshLine>) -> Self {
        Self {
            is_mesh: true,
            mesh_lines,
            ..Self::new(id)
        }
    }

    pub fn kind(&self) -> BrushKind {
        if self.is_mesh {
            BrushKind::Mesh
        } else {
            BrushKind::Polygon
        }
    }

    /// Number of faces the emitter counts for this brush (zero for meshes).
    pub fn face_count(&self) -> usize {
        match self.kind() {
            BrushKind::Polygon => self.faces.len(),
            BrushKind::Mesh => 0,
        }
    }

    /// Whether the brush carries no geometry in its active representation.
    pub fn is_empty(&self) -> bool {
        match self.kind() {
            BrushKind::Polygon => self.faces.is_empty(),
            BrushKind::Mesh => self.mesh_lines.is_empty(),
        }
    }

    /// Name of the aggregate block for this brush.
    pub fn block_name(&self) -> String {
        format!("Resource_Block{}", self.id)
    }

    /// Name of the scene node for this brush.
    pub fn node_name(&self) -> String {
        format!("Block_{}", self.id)
    }
}
