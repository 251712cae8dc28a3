//! Polygon face type.

use super::Vertex;

/// A polygon boundary with its material.
///
/// Vertex order is the winding order from the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// Material name (first token after the coordinate groups).
    pub material: String,

    /// Boundary vertices in source order.
    pub vertices: Vec<Vertex>,
}

impl Face {
    /// Create a face with no vertices.
    pub fn new(material: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            vertices: Vec::new(),
        }
    }

    /// Create a face from a material and its vertices.
    pub fn with_vertices(material: impl Into<String>, vertices: Vec<Vertex>) -> Self {
        Self {
            material: material.into(),
            vertices,
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// A face needs at least three vertices to describe a polygon.
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Iterate over the boundary edges as (current, next) pairs, wrapping around.
    pub fn edges(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}
