//! Core domain types for map2tscn.
//!
//! This module contains the geometric model produced by the parser:
//! - `Vertex` - a point in map space
//! - `Face` - an ordered polygon boundary with a material
//! - `Brush` - one convertible unit, either polygonal faces or mesh lines

mod brush;
mod face;
mod vertex;

pub use brush::{Brush, BrushKind, MeshLine};
pub use face::Face;
pub use vertex::{Vertex, VERTEX_TOLERANCE};
