//! Init command - writes a starter dto2ts.toml.

use crate::cli::{Cli, InitArgs};
use dto2ts_core::config::{CONFIG_FILE_NAME, STARTER_CONFIG};
use dto2ts_core::error::{Dto2TsError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Runs the init command in the working directory.
pub fn run(_cli: &Cli, args: InitArgs) -> Result<()> {
    let config_path = init_in(Path::new("."), args.force)?;

    info!("Created {}", config_path.display());
    info!("Next steps:");
    info!("  1. List the classes to convert under `classes`");
    info!("  2. Point [source] at your Rust sources or a descriptor file");
    info!("  3. Run 'dto2ts generate'");
    Ok(())
}

/// Writes the starter configuration into `dir`. Refuses to replace an
/// existing file unless `force` is set.
pub fn init_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        return Err(Dto2TsError::config(format!(
            "{} already exists. Use --force to overwrite.",
            CONFIG_FILE_NAME
        )));
    }

    fs::write(&config_path, STARTER_CONFIG)?;
    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_starter_config() {
        let dir = TempDir::new().unwrap();
        let path = init_in(dir.path(), false).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), STARTER_CONFIG);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "classes = [\"Mine\"]").unwrap();

        assert!(init_in(dir.path(), false).is_err());
        assert_eq!(
            fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap(),
            "classes = [\"Mine\"]"
        );
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "old").unwrap();
        init_in(dir.path(), true).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap(),
            STARTER_CONFIG
        );
    }
}
