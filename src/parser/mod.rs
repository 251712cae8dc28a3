//! Parser for brush/mesh map files.
//!
//! The source format is line oriented. Each brush starts with a
//! `// brush <id>` marker and holds either polygon faces or a mesh block.
//!
//! # File Structure
//!
//! ```text
//! // brush 0
//! {
//! layer "000 Base/room"
//! ( 0 0 0 ) ( 64 0 0 ) ( 64 64 0 ) stone 64 64 0 0 0 0
//! }
//! // brush 1
//! {
//! mesh
//! {
//! (
//! v 0 0 0 t 0 0
//! v 16 0 0 t 0 0
//! )
//! }
//! }
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use map2tscn::parser::parse_map;
//!
//! let source = std::fs::read_to_string("mp_shipment.map")?;
//! let brushes = parse_map(&source)?;
//!
//! for brush in &brushes {
//!     println!("brush {} ({} faces)", brush.id, brush.faces.len());
//! }
//! ```

mod line;
mod map;
pub mod span;

pub use line::{classify, LineKind};
pub use map::{parse_map, parse_map_lines, MapParser, MeshState};
pub use span::Location;
