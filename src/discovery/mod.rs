//! Input and configuration discovery.
//!
//! Finds the map files to convert and the `map2tscn.yaml` config that
//! applies to them.

mod config;
mod scanner;

pub use config::{Config, CONFIG_FILENAME};
pub use scanner::{collect_inputs, is_map_file, scan_directory, MAP_EXTENSION};
