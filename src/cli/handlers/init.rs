use std::path::Path;

use crate::cli::commands::InitArgs;
use crate::io::config_io;
use crate::io::store;

/// `jt init`: write an empty jotter.json (and optionally a starter
/// jotter.toml) without requiring an existing notebook.
pub fn cmd_init(args: InitArgs, dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let dir = match dir {
        Some(d) => d.to_path_buf(),
        None => std::env::current_dir()?,
    };

    let path = store::init_notebook(&dir, args.force)?;
    println!("created {}", path.display());

    if args.config {
        config_io::write_starter_config(&dir)?;
        println!("created {}", dir.join(config_io::CONFIG_FILE).display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::io::store::{NOTEBOOK_FILE, StoreError};

    use super::*;

    #[test]
    fn init_writes_an_empty_notebook_and_optional_config() {
        let dir = TempDir::new().unwrap();
        let args = InitArgs {
            force: false,
            config: true,
        };
        cmd_init(args, Some(dir.path())).unwrap();

        assert!(dir.path().join(NOTEBOOK_FILE).exists());
        assert!(dir.path().join(config_io::CONFIG_FILE).exists());

        let loaded = store::load_notebook(&dir.path().join(NOTEBOOK_FILE)).unwrap();
        assert!(loaded.all_sections.is_empty());
    }

    #[test]
    fn init_twice_needs_force() {
        let dir = TempDir::new().unwrap();
        cmd_init(
            InitArgs {
                force: false,
                config: false,
            },
            Some(dir.path()),
        )
        .unwrap();

        let again = cmd_init(
            InitArgs {
                force: false,
                config: false,
            },
            Some(dir.path()),
        );
        let err = again.unwrap_err();
        assert!(err.downcast_ref::<StoreError>().is_some());

        cmd_init(
            InitArgs {
                force: true,
                config: false,
            },
            Some(dir.path()),
        )
        .unwrap();
    }
}
