//! Init command implementation.
//!
//! Writes a `map2tscn.yaml` holding the default configuration.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::discovery::{scan_directory, Config, CONFIG_FILENAME};
use crate::error::{ConvertError, Result};
use crate::output::{count, display_path, Printer};

/// Initialize a project by generating a map2tscn.yaml config
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing map2tscn.yaml
    #[arg(long)]
    pub force: bool,
}

const HEADER: &str = "# map2tscn configuration. Every field is optional.\n";

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let config_path = args.path.join(CONFIG_FILENAME);

    if config_path.exists() && !args.force {
        return Err(ConvertError::Config {
            message: format!("{} already exists", CONFIG_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let yaml = serde_yaml::to_string(&Config::default()).map_err(|e| ConvertError::Config {
        message: format!("Failed to serialize config: {}", e),
        help: None,
    })?;

    fs::create_dir_all(&args.path).map_err(|e| ConvertError::Io {
        path: args.path.clone(),
        message: format!("Failed to create directory: {}", e),
    })?;
    fs::write(&config_path, format!("{}{}", HEADER, yaml)).map_err(|e| ConvertError::Io {
        path: config_path.clone(),
        message: format!("Failed to write config: {}", e),
    })?;

    let maps = scan_directory(&args.path).len();
    printer.status(
        "Created",
        &format!(
            "{} ({} found)",
            display_path(&config_path),
            count(maps, "map")
        ),
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_creates_config() {
        let dir = tempdir().unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };
        run(args, &Printer::new()).unwrap();

        let content = fs::read_to_string(dir.path().join(CONFIG_FILENAME)).unwrap();
        assert!(content.starts_with("# map2tscn"));
        assert!(content.contains("output: dist"));
        assert!(content.contains("normals: naive"));
        assert!(content.contains("dedup: linear"));
    }

    #[test]
    fn test_init_output_round_trips() {
        let dir = tempdir().unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };
        run(args, &Printer::new()).unwrap();

        let loaded = Config::load(&dir.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_init_errors_if_config_exists() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "output: build").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };
        assert!(run(args, &Printer::new()).is_err());

        let content = fs::read_to_string(dir.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(content, "output: build");
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "output: build").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: true,
        };
        run(args, &Printer::new()).unwrap();

        let content = fs::read_to_string(dir.path().join(CONFIG_FILENAME)).unwrap();
        assert!(content.contains("output: dist"));
    }
}
