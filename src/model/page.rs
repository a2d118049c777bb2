use serde::{Deserialize, Serialize};

use super::context::Context;

/// A titled collection of contexts within a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub title: String,
    #[serde(default)]
    pub contexts: Vec<Context>,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Page {
        Page {
            title: title.into(),
            contexts: Vec::new(),
        }
    }

    /// Find a context index by title, case-insensitively
    pub fn find_context(&self, title: &str) -> Option<usize> {
        let needle = title.to_lowercase();
        self.contexts
            .iter()
            .position(|c| c.title.to_lowercase() == needle)
    }
}
