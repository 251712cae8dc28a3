//! Stats command implementation.
//!
//! Prints per-brush geometry counts as a table, or as JSON on stdout.

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;

use crate::discovery::Config;
use crate::emit::{BrushBuffers, DedupStrategy, GeometryOptions};
use crate::error::{ConvertError, Result};
use crate::output::{count, display_path, Printer};
use crate::pipeline::load_brushes;
use crate::types::Brush;

/// Print per-brush geometry counts for a map file
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Map file to inspect
    pub input: PathBuf,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Config file (default: map2tscn.yaml in the working directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Vertex deduplication strategy
    #[arg(long, value_enum)]
    pub dedup: Option<DedupStrategy>,
}

/// Counts for one brush.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrushStats {
    pub id: i32,
    pub kind: &'static str,
    pub layer: Option<String>,
    pub faces: usize,
    pub vertices: usize,
    pub edges: usize,
}

/// Stats for a whole map.
#[derive(Debug, Clone, Serialize)]
pub struct MapStats {
    pub file: String,
    pub brushes: Vec<BrushStats>,
    pub total_faces: usize,
    pub total_vertices: usize,
    pub total_edges: usize,
}

impl MapStats {
    pub fn collect(file: &Path, brushes: &[Brush], geometry: GeometryOptions) -> Self {
        let brushes: Vec<BrushStats> = brushes
            .iter()
            .map(|brush| {
                let buffers = BrushBuffers::build(brush, geometry);
                BrushStats {
                    id: brush.id,
                    kind: brush.kind().as_str(),
                    layer: brush.layer.clone(),
                    faces: buffers.face_count,
                    vertices: buffers.num_vertices(),
                    edges: buffers.num_edges(),
                }
            })
            .collect();

        Self {
            file: display_path(file),
            total_faces: brushes.iter().map(|b| b.faces).sum(),
            total_vertices: brushes.iter().map(|b| b.vertices).sum(),
            total_edges: brushes.iter().map(|b| b.edges).sum(),
            brushes,
        }
    }

    /// Render as a plain text table.
    pub fn to_table(&self) -> String {
        let layer_width = self
            .brushes
            .iter()
            .filter_map(|b| b.layer.as_deref())
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            .max("layer".len());

        let mut out = format!(
            "{:>6}  {:<7}  {:<lw$}  {:>5}  {:>8}  {:>5}\n",
            "id",
            "kind",
            "layer",
            "faces",
            "vertices",
            "edges",
            lw = layer_width
        );
        for b in &self.brushes {
            out.push_str(&format!(
                "{:>6}  {:<7}  {:<lw$}  {:>5}  {:>8}  {:>5}\n",
                b.id,
                b.kind,
                b.layer.as_deref().unwrap_or("-"),
                b.faces,
                b.vertices,
                b.edges,
                lw = layer_width
            ));
        }
        out
    }
}

pub fn run(args: StatsArgs, printer: &Printer) -> Result<()> {
    let mut config = Config::load_or_default(args.config.as_deref(), Path::new("."))?;
    if let Some(dedup) = args.dedup {
        config.dedup = dedup;
    }

    let brushes = load_brushes(&args.input)?;
    let stats = MapStats::collect(&args.input, &brushes, config.geometry());

    if args.json {
        let json = serde_json::to_string_pretty(&stats).map_err(|e| ConvertError::Emit {
            message: format!("Failed to serialize stats: {}", e),
            help: None,
        })?;
        println!("{}", json);
        return Ok(());
    }

    print!("{}", stats.to_table());
    printer.info(
        "Total",
        &format!(
            "{}, {}, {}, {}",
            count(stats.brushes.len(), "brush"),
            count(stats.total_faces, "face"),
            count(stats.total_vertices, "vertex"),
            count(stats.total_edges, "edge")
        ),
    );

    Ok(())
}
