//! Vertex deduplication.
//!
//! Vertices closer than the tolerance on every axis collapse into one entry.
//! `LinearDeduplicator` is a plain scan over the unique list, which is
//! quadratic in the brush's vertex count. `GridDeduplicator` buckets vertices
//! into tolerance-sized cells and returns the same indices.

use std::collections::HashMap;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::types::{Vertex, VERTEX_TOLERANCE};

/// Insert-or-find over a growing list of unique vertices.
pub trait VertexDeduplicator {
    /// Return the index of the first stored vertex matching `vertex`,
    /// appending it when there is none.
    fn insert_or_find(&mut self, vertex: Vertex) -> usize;

    /// The unique vertices in insertion order.
    fn vertices(&self) -> &[Vertex];

    /// Consume the deduplicator, returning the unique vertices.
    fn into_vertices(self) -> Vec<Vertex>
    where
        Self: Sized;

    fn len(&self) -> usize {
        self.vertices().len()
    }

    fn is_empty(&self) -> bool {
        self.vertices().is_empty()
    }
}

/// Which deduplicator the emitter uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DedupStrategy {
    /// Linear scan over the unique list.
    #[default]
    Linear,
    /// Spatial hash over tolerance-sized cells.
    Grid,
}

/// Linear-scan deduplicator.
#[derive(Debug, Clone)]
pub struct LinearDeduplicator {
    vertices: Vec<Vertex>,
    tolerance: f32,
}

impl LinearDeduplicator {
    pub fn new() -> Self {
        Self::with_tolerance(VERTEX_TOLERANCE)
    }

    pub fn with_tolerance(tolerance: f32) -> Self {
        Self {
            vertices: Vec::new(),
            tolerance,
        }
    }
}

impl Default for LinearDeduplicator {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexDeduplicator for LinearDeduplicator {
    fn insert_or_find(&mut self, vertex: Vertex) -> usize {
        if let Some(index) = self
            .vertices
            .iter()
            .position(|v| v.approx_eq(&vertex, self.tolerance))
        {
            return index;
        }
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    fn into_vertices(self) -> Vec<Vertex> {
        self.vertices
    }
}

type CellKey = [i64; 3];

/// Spatial-hash deduplicator.
///
/// Two vertices within tolerance on every axis always land in the same or
/// adjacent cells, so only the 27 surrounding cells are searched. The lowest
/// matching index wins, which is what the linear scan returns.
#[derive(Debug, Clone)]
pub struct GridDeduplicator {
    vertices: Vec<Vertex>,
    cells: HashMap<CellKey, Vec<usize>>,
    tolerance: f32,
}

impl GridDeduplicator {
    pub fn new() -> Self {
        Self::with_tolerance(VERTEX_TOLERANCE)
    }

    pub fn with_tolerance(tolerance: f32) -> Self {
        Self {
            vertices: Vec::new(),
            cells: HashMap::new(),
            tolerance,
        }
    }

    fn cell_of(&self, vertex: &Vertex) -> CellKey {
        let size = self.tolerance as f64;
        // NaN casts to 0; such vertices never match anything anyway
        let axis = |c: f32| (c as f64 / size).floor() as i64;
        [axis(vertex.x), axis(vertex.y), axis(vertex.z)]
    }

    fn find(&self, vertex: &Vertex, cell: CellKey) -> Option<usize> {
        let mut best: Option<usize> = None;

        for dx in -1..=1i64 {
            for dy in -1..=1i64 {
                for dz in -1..=1i64 {
                    let key = [
                        cell[0].saturating_add(dx),
                        cell[1].saturating_add(dy),
                        cell[2].saturating_add(dz),
                    ];
                    let Some(bucket) = self.cells.get(&key) else {
                        continue;
                    };
                    // Buckets are in insertion order, so the first match is the lowest
                    let found = bucket
                        .iter()
                        .copied()
                        .find(|&i| self.vertices[i].approx_eq(vertex, self.tolerance));
                    if let Some(index) = found {
                        best = Some(best.map_or(index, |b| b.min(index)));
                    }
                }
            }
        }

        best
    }
}

impl Default for GridDeduplicator {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexDeduplicator for GridDeduplicator {
    fn insert_or_find(&mut self, vertex: Vertex) -> usize {
        let cell = self.cell_of(&vertex);
        if let Some(index) = self.find(&vertex, cell) {
            return index;
        }

        let index = self.vertices.len();
        self.vertices.push(vertex);
        self.cells.entry(cell).or_default().push(index);
        index
    }

    fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    fn into_vertices(self) -> Vec<Vertex> {
        self.vertices
    }
}
