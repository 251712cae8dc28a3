//! map2tscn - Brush/mesh map to Godot scene converter
//!
//! A library for turning line-oriented `.map` files into `.tscn` scenes
//! for the Cyclops Level Builder plugin.

pub mod cli;
pub mod discovery;
pub mod emit;
pub mod error;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod types;
pub mod validation;

pub use discovery::{collect_inputs, Config, CONFIG_FILENAME};
pub use emit::{
    BrushBuffers, DedupStrategy, EmitSummary, GeometryOptions, NormalStrategy, SceneEmitter,
    SceneOptions,
};
pub use error::{ConvertError, Result};
pub use parser::{parse_map, Location, MapParser};
pub use pipeline::{convert_file, convert_source, ConversionReport};
pub use types::{Brush, BrushKind, Face, Vertex};
pub use validation::{validate_brushes, Diagnostic, Severity, ValidationResult};
