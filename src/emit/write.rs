//! Atomic file output.
//!
//! The scene is written to a temporary file next to the destination and
//! renamed into place once complete. A failed conversion leaves no file.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{ConvertError, Result};

/// Write `path` through `write`, replacing it only if `write` succeeds.
pub fn write_atomic<T, F>(path: &Path, write: F) -> Result<T>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> Result<T>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    fs::create_dir_all(dir).map_err(|e| ConvertError::Io {
        path: dir.to_path_buf(),
        message: format!("Failed to create output directory: {}", e),
    })?;

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| ConvertError::Io {
        path: dir.to_path_buf(),
        message: format!("Failed to create temporary file: {}", e),
    })?;

    let value = {
        let mut writer = BufWriter::new(temp.as_file_mut());
        let value = write(&mut writer)?;
        writer.flush().map_err(|e| ConvertError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write output: {}", e),
        })?;
        value
    };

    temp.persist(path).map_err(|e| ConvertError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write output: {}", e.error),
    })?;

    Ok(value)
}
