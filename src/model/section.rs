use serde::{Deserialize, Serialize};

use super::page::Page;

/// A top-level grouping of pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Section {
        Section {
            title: title.into(),
            pages: Vec::new(),
        }
    }

    /// Find a page index by title, case-insensitively
    pub fn find_page(&self, title: &str) -> Option<usize> {
        let needle = title.to_lowercase();
        self.pages
            .iter()
            .position(|p| p.title.to_lowercase() == needle)
    }
}
