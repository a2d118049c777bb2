use serde::{Deserialize, Serialize};

use super::section::Section;

/// The whole note tree: an ordered list of sections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notebook {
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Notebook {
    pub fn new() -> Notebook {
        Notebook::default()
    }

    /// Find a section index by title, case-insensitively
    pub fn find_section(&self, title: &str) -> Option<usize> {
        let needle = title.to_lowercase();
        self.sections
            .iter()
            .position(|s| s.title.to_lowercase() == needle)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_section_ignores_case_and_keeps_original() {
        let mut nb = Notebook::new();
        nb.sections.push(Section::new("Skyrim"));
        assert_eq!(nb.find_section("SKYRIM"), Some(0));
        assert_eq!(nb.sections[0].title, "Skyrim");
        assert_eq!(nb.find_section("Oblivion"), None);
    }
}
