//! Validation of parsed brushes.
//!
//! Runs a suite of checks against the brush list and reports errors
//! and warnings. Used by `map2tscn validate` and before every conversion.
//! Syntax errors and duplicate brush ids are caught earlier, by the parser.
//! `output::Printer` renders the diagnostics.

mod checks;
mod warning;

pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::types::Brush;

/// Run all validation checks against the brushes.
pub fn validate_brushes(brushes: &[Brush]) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_empty_map(brushes));
    result.merge(checks::check_empty_brushes(brushes));
    result.merge(checks::check_degenerate_faces(brushes));
    result.merge(checks::check_mixed_brushes(brushes));

    result
}
