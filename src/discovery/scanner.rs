//! Input discovery for map files.
//!
//! Inputs may be files or directories; directories are walked
//! recursively for `.map` files.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{ConvertError, Result};

/// Extension of map source files.
pub const MAP_EXTENSION: &str = "map";

/// Check whether a path looks like a map source file.
pub fn is_map_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(MAP_EXTENSION))
}

/// Scan a directory for map files, sorted by path.
pub fn scan_directory(root: &Path) -> Vec<PathBuf> {
    let mut maps: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_map_file(e.path()))
        .map(|e| e.into_path())
        .collect();

    maps.sort();
    maps
}

/// Expand the given inputs into a list of map files.
///
/// Files are taken as-is whatever their extension; directories contribute
/// every `.map` file beneath them. Duplicates are removed, order kept.
pub fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            files.extend(scan_directory(input));
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(ConvertError::Io {
                path: input.clone(),
                message: "No such file or directory".to_string(),
            });
        }
    }

    let mut seen = std::collections::HashSet::new();
    files.retain(|f| seen.insert(f.clone()));

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_is_map_file() {
        assert!(is_map_file(Path::new("arena.map")));
        assert!(is_map_file(Path::new("levels/ARENA.MAP")));
        assert!(!is_map_file(Path::new("arena.tscn")));
        assert!(!is_map_file(Path::new("map")));
    }

    #[test]
    fn test_scan_directory_recursive_sorted() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("b.map"), "").unwrap();
        fs::write(dir.path().join("sub/a.map"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let maps = scan_directory(dir.path());
        assert_eq!(
            maps,
            vec![dir.path().join("b.map"), dir.path().join("sub/a.map")]
        );
    }

    #[test]
    fn test_collect_inputs_mixes_files_and_dirs() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("levels")).unwrap();
        fs::write(dir.path().join("levels/one.map"), "").unwrap();
        fs::write(dir.path().join("extra.txt"), "").unwrap();

        let inputs = vec![
            dir.path().join("extra.txt"),
            dir.path().join("levels"),
            dir.path().join("levels/one.map"),
        ];
        let files = collect_inputs(&inputs).unwrap();

        assert_eq!(
            files,
            vec![dir.path().join("extra.txt"), dir.path().join("levels/one.map")]
        );
    }

    #[test]
    fn test_collect_inputs_missing_path() {
        let dir = tempdir().unwrap();
        let result = collect_inputs(&[dir.path().join("missing.map")]);
        assert!(result.is_err());
    }
}
