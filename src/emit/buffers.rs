//! Per-brush derived buffers.
//!
//! Flattens a brush into the index buffers the scene format stores:
//! unique positions, edge index pairs, per-face vertex indices and counts,
//! and face normals. Buffers are transient and built once per brush.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::types::{Brush, BrushKind, Vertex};

use super::dedup::{DedupStrategy, GridDeduplicator, LinearDeduplicator, VertexDeduplicator};
use super::normals::{compute_normals, NormalStrategy};

/// Options controlling buffer construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryOptions {
    pub dedup: DedupStrategy,
    pub normals: NormalStrategy,
}

/// Derived geometry for a single brush.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrushBuffers {
    /// Unique vertex positions.
    pub positions: Vec<Vertex>,
    /// Pairs of indices into `positions`, flattened.
    pub edge_indices: Vec<usize>,
    /// Indices into `positions` for each face vertex, face after face.
    pub face_vertex_indices: Vec<usize>,
    /// Vertex count of each face, parallel to the faces.
    pub face_vertex_counts: Vec<usize>,
    /// Computed normals (polygon brushes only).
    pub normals: Vec<Vec3>,
    /// Face count (zero for mesh brushes).
    pub face_count: usize,
}

impl BrushBuffers {
    /// Build buffers using the deduplicator and normal strategy in `options`.
    pub fn build(brush: &Brush, options: GeometryOptions) -> Self {
        match options.dedup {
            DedupStrategy::Linear => Self::build_with(brush, LinearDeduplicator::new(), options.normals),
            DedupStrategy::Grid => Self::build_with(brush, GridDeduplicator::new(), options.normals),
        }
    }

    /// Build buffers with a specific deduplicator.
    pub fn build_with<D: VertexDeduplicator>(brush: &Brush, mut dedup: D, normals: NormalStrategy) -> Self {
        let mut buffers = Self::default();

        match brush.kind() {
            BrushKind::Mesh => {
                for &(a, b) in &brush.mesh_lines {
                    let ia = dedup.insert_or_find(a);
                    let ib = dedup.insert_or_find(b);
                    buffers.edge_indices.extend([ia, ib]);
                }
            }
            BrushKind::Polygon => {
                for face in &brush.faces {
                    buffers.face_vertex_counts.push(face.len());

                    // Shared edges between faces are kept once per face
                    for (current, next) in face.edges() {
                        let ic = dedup.insert_or_find(current);
                        buffers.face_vertex_indices.push(ic);

                        let inext = dedup.insert_or_find(next);
                        buffers.edge_indices.extend([ic, inext]);
                    }
                }
                buffers.face_count = brush.faces.len();
            }
        }

        buffers.positions = dedup.into_vertices();

        if brush.kind() == BrushKind::Polygon {
            buffers.normals = compute_normals(
                &buffers.positions,
                &buffers.face_vertex_indices,
                &buffers.face_vertex_counts,
                normals,
            );
        }

        buffers
    }

    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edge_indices.len() / 2
    }

    pub fn num_face_vertices(&self) -> usize {
        self.face_vertex_indices.len()
    }
}
