//! Scene resource emitter.
//!
//! Turns parsed brushes into a Godot scene for the Cyclops Level Builder
//! plugin: deduplicated vertex buffers, edge and face index lists, normals,
//! and the placeholder attribute blocks the plugin expects.

mod buffers;
mod dedup;
mod normals;
mod scene;
pub mod tscn;
mod write;

pub use buffers::{BrushBuffers, GeometryOptions};
pub use dedup::{DedupStrategy, GridDeduplicator, LinearDeduplicator, VertexDeduplicator};
pub use normals::{compute_normals, triangle_normal, NormalStrategy};
pub use scene::{write_brush_resources, EmitSummary, SceneEmitter, SceneOptions};
pub use write::write_atomic;
