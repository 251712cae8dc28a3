//! Convert command implementation.
//!
//! Converts map files (or directories of them) into `.tscn` scenes.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::{collect_inputs, Config};
use crate::emit::{DedupStrategy, NormalStrategy};
use crate::error::{ConvertError, Result};
use crate::output::{count, display_path, Printer};
use crate::pipeline::{convert_file, output_path_for};

/// Convert map files into .tscn scenes
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Map files or directories to convert
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output directory (overrides config)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Config file (default: map2tscn.yaml in the working directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Normal computation strategy
    #[arg(long, value_enum)]
    pub normals: Option<NormalStrategy>,

    /// Vertex deduplication strategy
    #[arg(long, value_enum)]
    pub dedup: Option<DedupStrategy>,

    /// Scene uid (only valid with a single input)
    #[arg(long)]
    pub uid: Option<String>,
}

impl ConvertArgs {
    /// Load the config and apply command line overrides.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::load_or_default(self.config.as_deref(), Path::new("."))?;

        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(normals) = self.normals {
            config.normals = normals;
        }
        if let Some(dedup) = self.dedup {
            config.dedup = dedup;
        }
        if let Some(uid) = &self.uid {
            config.scene.uid = Some(uid.clone());
        }

        Ok(config)
    }
}

pub fn run(args: ConvertArgs, printer: &Printer) -> Result<()> {
    let config = args.resolve_config()?;
    let files = collect_inputs(&args.inputs)?;

    if files.is_empty() {
        return Err(ConvertError::Validation {
            message: "No map files found".to_string(),
            help: Some("Pass .map files or directories containing them".to_string()),
        });
    }

    if args.uid.is_some() && files.len() > 1 {
        return Err(ConvertError::Config {
            message: format!("--uid given for {}", count(files.len(), "input")),
            help: Some("A scene uid must be unique; convert one map at a time".to_string()),
        });
    }

    let mut warnings = 0;
    for file in &files {
        printer.status("Converting", &display_path(file));

        let output = output_path_for(file, &config.output);
        let report = convert_file(file, &output, &config)?;

        if report.validation.has_warnings() {
            printer.diagnostics(&report.validation);
            warnings += report.validation.warning_count();
        }

        let summary = &report.summary;
        printer.info(
            "Wrote",
            &format!(
                "{} {}",
                display_path(&report.output),
                printer.dim(&format!(
                    "({}, {})",
                    count(summary.brushes, "brush"),
                    count(summary.vertices, "vertex")
                ))
            ),
        );
    }

    let mut message = format!(
        "{} to {}",
        count(files.len(), "scene"),
        display_path(&config.output)
    );
    if warnings > 0 {
        message.push_str(&format!(" ({})", count(warnings, "warning")));
    }
    printer.status("Finished", &message);

    Ok(())
}
