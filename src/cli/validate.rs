//! Validate command implementation.
//!
//! Parses map files and runs validation checks without writing scenes.

use std::path::PathBuf;

use clap::Args;

use crate::discovery::collect_inputs;
use crate::error::{ConvertError, Result};
use crate::output::{count, display_path, Printer};
use crate::pipeline::load_brushes;
use crate::validation::validate_brushes;

/// Parse and check map files without writing scenes
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Map files or directories to validate
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let files = collect_inputs(&args.inputs)?;

    let mut errors = 0;
    let mut warnings = 0;

    for file in &files {
        printer.status("Checking", &display_path(file));

        match load_brushes(file) {
            Ok(brushes) => {
                let result = validate_brushes(&brushes);
                printer.diagnostics(&result);
                errors += result.error_count();
                warnings += result.warning_count();
            }
            Err(e) => {
                printer.error("Failed", &e.to_string());
                errors += 1;
            }
        }
    }

    let summary = format!(
        "{} checked: {}, {}",
        count(files.len(), "map"),
        count(errors, "error"),
        count(warnings, "warning")
    );

    if errors > 0 {
        return Err(ConvertError::Validation {
            message: summary,
            help: None,
        });
    }

    printer.status("Finished", &summary);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_validate_clean_map() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ok.map");
        fs::write(&path, "// brush 0\n( 0 0 0 ) ( 1 0 0 ) ( 0 1 0 ) caulk\n").unwrap();

        let args = ValidateArgs { inputs: vec![path] };
        assert!(run(args, &Printer::new()).is_ok());
    }

    #[test]
    fn test_validate_warnings_pass() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("warn.map");
        fs::write(&path, "// brush 0\n{\n}\n").unwrap();

        let args = ValidateArgs { inputs: vec![path] };
        assert!(run(args, &Printer::new()).is_ok());
    }

    #[test]
    fn test_validate_continues_after_parse_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.map"), "// brush x\n").unwrap();
        fs::write(dir.path().join("b.map"), "").unwrap();

        let args = ValidateArgs {
            inputs: vec![dir.path().to_path_buf()],
        };
        let err = run(args, &Printer::new()).unwrap_err();

        assert!(err
            .to_string()
            .contains("2 maps checked: 1 error, 1 warning"));
    }
}
