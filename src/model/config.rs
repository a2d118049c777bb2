use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Configuration from jotter.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JotterConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub import: ImportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Color overrides by theme slot name, as hex strings
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Ask before merging pasted data into the notebook
    #[serde(default = "default_true")]
    pub confirm: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        ImportConfig { confirm: true }
    }
}

fn default_true() -> bool {
    true
}
