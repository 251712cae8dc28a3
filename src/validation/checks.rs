//! Validation checks over parsed brushes.
//!
//! Each check takes the brush list and returns a `ValidationResult`.

use crate::types::{Brush, BrushKind};

use super::warning::{Diagnostic, ValidationResult};

/// A map with no brushes still converts, to a scene holding only the root node.
pub fn check_empty_map(brushes: &[Brush]) -> ValidationResult {
    let mut result = ValidationResult::new();

    if brushes.is_empty() {
        result.push(
            Diagnostic::warning("map2tscn::validate::empty-map", "Map contains no brushes")
                .with_help("Brushes start with a `// brush <id>` marker"),
        );
    }

    result
}

/// Brushes without geometry in their active representation.
pub fn check_empty_brushes(brushes: &[Brush]) -> ValidationResult {
    let mut result = ValidationResult::new();

    for brush in brushes.iter().filter(|b| b.is_empty()) {
        let what = match brush.kind() {
            BrushKind::Polygon => "faces",
            BrushKind::Mesh => "mesh lines",
        };
        result.push(
            Diagnostic::warning(
                "map2tscn::validate::empty-brush",
                format!("Brush {} has no {}", brush.id, what),
            )
            .at(brush.location),
        );
    }

    result
}

/// Faces with fewer than three vertices. The emitter does not guard against them.
pub fn check_degenerate_faces(brushes: &[Brush]) -> ValidationResult {
    let mut result = ValidationResult::new();

    for brush in brushes.iter().filter(|b| b.kind() == BrushKind::Polygon) {
        for (index, face) in brush.faces.iter().enumerate() {
            if face.is_degenerate() {
                result.push(
                    Diagnostic::warning(
                        "map2tscn::validate::degenerate-face",
                        format!(
                            "Brush {}: face {} ('{}') has {} vertices",
                            brush.id,
                            index,
                            face.material,
                            face.len()
                        ),
                    )
                    .at(brush.location)
                    .with_help("A face needs at least 3 vertices"),
                );
            }
        }
    }

    result
}

/// Mesh brushes that also picked up face lines before their `mesh` keyword.
pub fn check_mixed_brushes(brushes: &[Brush]) -> ValidationResult {
    let mut result = ValidationResult::new();

    for brush in brushes
        .iter()
        .filter(|b| b.kind() == BrushKind::Mesh && !b.faces.is_empty())
    {
        result.push(
            Diagnostic::warning(
                "map2tscn::validate::mixed-brush",
                format!(
                    "Brush {} is a mesh but also has {} face(s); the faces are ignored",
                    brush.id,
                    brush.faces.len()
                ),
            )
            .at(brush.location),
        );
    }

    result
}
