//! End-to-end conversion: read, parse, validate, emit.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::discovery::Config;
use crate::emit::{write_atomic, EmitSummary, SceneEmitter};
use crate::error::{ConvertError, Result};
use crate::parser::parse_map;
use crate::types::Brush;
use crate::validation::{validate_brushes, ValidationResult};

/// Outcome of converting one map file.
#[derive(Debug)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub summary: EmitSummary,
    /// Warnings raised by validation. Never contains errors.
    pub validation: ValidationResult,
}

/// Output path for `input` inside `out_dir`: `<out_dir>/<stem>.tscn`.
pub fn output_path_for(input: &Path, out_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "scene".to_string());
    out_dir.join(format!("{}.tscn", stem))
}

/// Read and parse a map file.
pub fn load_brushes(input: &Path) -> Result<Vec<Brush>> {
    let source = fs::read_to_string(input).map_err(|e| ConvertError::Io {
        path: input.to_path_buf(),
        message: format!("Failed to read map: {}", e),
    })?;

    parse_map(&source)
}

/// Parse, validate and emit `source` into `out`.
///
/// Nothing is written when parsing fails or validation reports an error.
pub fn convert_source<W: Write>(
    source: &str,
    uid: &str,
    config: &Config,
    out: W,
) -> Result<(EmitSummary, ValidationResult)> {
    let brushes = parse_map(source)?;
    let validation = checked(&brushes)?;
    let summary = SceneEmitter::new(&config.scene, config.geometry()).emit(uid, &brushes, out)?;
    Ok((summary, validation))
}

/// Convert one map file to a scene at `output`.
///
/// The scene is written to a temporary file next to `output` and moved into
/// place on success, so a failed conversion never leaves a partial file.
pub fn convert_file(input: &Path, output: &Path, config: &Config) -> Result<ConversionReport> {
    debug!(input = %input.display(), output = %output.display(), "Converting");

    let brushes = load_brushes(input)?;
    let validation = checked(&brushes)?;

    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let uid = config.scene.uid_for(&stem);
    let emitter = SceneEmitter::new(&config.scene, config.geometry());

    let summary = write_atomic(output, |w| emitter.emit(&uid, &brushes, w))?;

    info!(
        output = %output.display(),
        brushes = summary.brushes,
        nodes = summary.nodes,
        "Wrote scene"
    );

    Ok(ConversionReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        summary,
        validation,
    })
}

/// Run validation, turning the first error into a `ConvertError`.
fn checked(brushes: &[Brush]) -> Result<ValidationResult> {
    let validation = validate_brushes(brushes);

    if let Some(error) = validation.first_error() {
        return Err(ConvertError::Validation {
            message: error.message.clone(),
            help: error.help.clone(),
        });
    }

    Ok(validation)
}
