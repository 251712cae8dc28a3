//! Project configuration (map2tscn.yaml) parsing.
//!
//! The config file sets the output directory, geometry strategies and
//! scene-level options. Every field is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::emit::{DedupStrategy, GeometryOptions, NormalStrategy, SceneOptions};
use crate::error::{ConvertError, Result};

/// Config filename looked up in the working directory.
pub const CONFIG_FILENAME: &str = "map2tscn.yaml";

/// Project configuration loaded from map2tscn.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output directory for generated scenes.
    pub output: PathBuf,

    /// How vertex normals are computed.
    pub normals: NormalStrategy,

    /// How vertices are deduplicated.
    pub dedup: DedupStrategy,

    /// Scene header and node settings.
    pub scene: SceneOptions,
}

fn default_output() -> PathBuf {
    PathBuf::from("dist")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: default_output(),
            normals: NormalStrategy::default(),
            dedup: DedupStrategy::default(),
            scene: SceneOptions::default(),
        }
    }
}

impl Config {
    /// Load config from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConvertError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse config from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        // serde_yaml rejects an empty document for a struct
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| ConvertError::Config {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Load `explicit` if given, else `map2tscn.yaml` from `dir` if present,
    /// else the defaults.
    pub fn load_or_default(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let path = dir.join(CONFIG_FILENAME);
        if path.is_file() {
            tracing::debug!(path = %path.display(), "Loading config");
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Geometry options for the emitter.
    pub fn geometry(&self) -> GeometryOptions {
        GeometryOptions {
            dedup: self.dedup,
            normals: self.normals,
        }
    }
}
