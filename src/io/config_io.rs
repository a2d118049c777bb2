use std::fs;
use std::path::{Path, PathBuf};

use crate::model::JotterConfig;

/// Name of the optional config file, kept next to the data file
pub const CONFIG_FILE: &str = "jotter.toml";

const STARTER_CONFIG: &str = "\
# jotter configuration

[import]
# ask before merging pasted data into the notebook
confirm = true

[ui.colors]
# override theme slots with hex colors, e.g.
# highlight = \"#e0af68\"
# selected_bg = \"#283457\"
";

/// Error type for config reading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse jotter.toml: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Read jotter.toml from the notebook's directory. A missing file means
/// defaults; a malformed one is an error.
pub fn read_config(dir: &Path) -> Result<JotterConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(JotterConfig::default());
    }
    let text = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

/// Write the commented starter config, unless one already exists
pub fn write_starter_config(dir: &Path) -> Result<(), std::io::Error> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() {
        return Ok(());
    }
    fs::write(&path, STARTER_CONFIG)
}
