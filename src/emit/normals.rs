//! Normal computation for polygon brushes.

use clap::ValueEnum;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::Vertex;

/// How face vertex indices are grouped into triangles for normals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum NormalStrategy {
    /// Consecutive triples of the flattened face vertex index list, ignoring
    /// face boundaries. Matches the output existing scenes were built with.
    #[default]
    Naive,
    /// One normal per face from its first three vertices.
    PerFace,
}

/// Normalized cross product of `(b - a)` and `(c - a)`.
///
/// A degenerate triangle yields the zero vector.
pub fn triangle_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalize_or_zero()
}

/// Compute normals for a polygon brush.
///
/// `face_vertex_indices` index into `positions`; `face_vertex_counts` holds
/// the length of each face's run in that list.
pub fn compute_normals(
    positions: &[Vertex],
    face_vertex_indices: &[usize],
    face_vertex_counts: &[usize],
    strategy: NormalStrategy,
) -> Vec<Vec3> {
    match strategy {
        NormalStrategy::Naive => naive_normals(positions, face_vertex_indices),
        NormalStrategy::PerFace => per_face_normals(positions, face_vertex_indices, face_vertex_counts),
    }
}

fn naive_normals(positions: &[Vertex], indices: &[usize]) -> Vec<Vec3> {
    let chunks = indices.chunks_exact(3);
    let leftover = chunks.remainder().len();

    let normals: Vec<Vec3> = chunks
        .filter_map(|tri| normal_of(positions, tri[0], tri[1], tri[2]))
        .collect();

    if leftover > 0 {
        warn!(
            leftover,
            "Skipping incomplete face (not enough indices for a triangle)"
        );
    }

    normals
}

fn per_face_normals(positions: &[Vertex], indices: &[usize], counts: &[usize]) -> Vec<Vec3> {
    let mut normals = Vec::with_capacity(counts.len());
    let mut start = 0;

    for (face, &count) in counts.iter().enumerate() {
        let end = (start + count).min(indices.len());
        let run = &indices[start.min(end)..end];
        start += count;

        if run.len() < 3 {
            warn!(face, vertices = run.len(), "Skipping face with fewer than 3 vertices");
            continue;
        }

        if let Some(normal) = normal_of(positions, run[0], run[1], run[2]) {
            normals.push(normal);
        }
    }

    normals
}

fn normal_of(positions: &[Vertex], i1: usize, i2: usize, i3: usize) -> Option<Vec3> {
    let a = positions.get(i1)?.to_vec3();
    let b = positions.get(i2)?.to_vec3();
    let c = positions.get(i3)?.to_vec3();
    Some(triangle_normal(a, b, c))
}
