use super::context::Context;
use super::notebook::Notebook;
use super::page::Page;
use super::section::Section;

/// The notebook plus the current selection path.
///
/// Selection is nested: a selected page implies a selected section, a
/// selected context implies a selected page. The setters keep that
/// invariant, and selecting a level cascades downward to the first child
/// (or clears the deeper levels when there is none).
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub notebook: Notebook,
    section: Option<usize>,
    page: Option<usize>,
    context: Option<usize>,
}

impl Session {
    pub fn new(notebook: Notebook) -> Session {
        Session {
            notebook,
            section: None,
            page: None,
            context: None,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn section_index(&self) -> Option<usize> {
        self.section
    }

    pub fn page_index(&self) -> Option<usize> {
        self.page
    }

    pub fn context_index(&self) -> Option<usize> {
        self.context
    }

    pub fn section(&self) -> Option<&Section> {
        self.notebook.sections.get(self.section?)
    }

    pub fn page(&self) -> Option<&Page> {
        self.section()?.pages.get(self.page?)
    }

    pub fn context(&self) -> Option<&Context> {
        self.page()?.contexts.get(self.context?)
    }

    pub fn section_mut(&mut self) -> Option<&mut Section> {
        let idx = self.section?;
        self.notebook.sections.get_mut(idx)
    }

    pub fn page_mut(&mut self) -> Option<&mut Page> {
        let idx = self.page?;
        self.section_mut()?.pages.get_mut(idx)
    }

    pub fn context_mut(&mut self) -> Option<&mut Context> {
        let idx = self.context?;
        self.page_mut()?.contexts.get_mut(idx)
    }

    /// Titles along the selection path, for breadcrumbs and snapshots
    pub fn selected_titles(&self) -> (Option<String>, Option<String>, Option<String>) {
        (
            self.section().map(|s| s.title.clone()),
            self.page().map(|p| p.title.clone()),
            self.context().map(|c| c.title.clone()),
        )
    }

    // -----------------------------------------------------------------------
    // Cascading selection
    // -----------------------------------------------------------------------

    /// Select a section and cascade to its first page (and that page's
    /// first context). Out-of-range indices clear the selection.
    pub fn select_section(&mut self, idx: usize) -> bool {
        if idx >= self.notebook.sections.len() {
            self.clear_selection();
            return false;
        }
        self.section = Some(idx);
        if self.notebook.sections[idx].pages.is_empty() {
            self.page = None;
            self.context = None;
        } else {
            self.select_page(0);
        }
        true
    }

    /// Select a page within the selected section, cascading to its first
    /// context. No-op (returning false) when no section is selected or the
    /// index is out of range.
    pub fn select_page(&mut self, idx: usize) -> bool {
        let Some(section) = self.section() else {
            return false;
        };
        let has_contexts = section.pages.get(idx).map(|p| !p.contexts.is_empty());
        let Some(has_contexts) = has_contexts else {
            self.page = None;
            self.context = None;
            return false;
        };
        self.page = Some(idx);
        self.context = if has_contexts { Some(0) } else { None };
        true
    }

    /// Select a context within the selected page
    pub fn select_context(&mut self, idx: usize) -> bool {
        let Some(page) = self.page() else {
            return false;
        };
        if idx >= page.contexts.len() {
            self.context = None;
            return false;
        }
        self.context = Some(idx);
        true
    }

    pub fn clear_selection(&mut self) {
        self.section = None;
        self.page = None;
        self.context = None;
    }

    // -----------------------------------------------------------------------
    // Title-based selection (snapshot restore)
    // -----------------------------------------------------------------------

    /// Restore a selection from titles, case-insensitively, level by
    /// level. Stops at the first title that no longer exists; deeper
    /// titles are ignored. Titles may override the default cascade (a
    /// stored page need not be the first page).
    pub fn select_by_titles(
        &mut self,
        section: Option<&str>,
        page: Option<&str>,
        context: Option<&str>,
    ) {
        self.clear_selection();
        let Some(idx) = section.and_then(|t| self.notebook.find_section(t)) else {
            return;
        };
        self.select_section(idx);
        let Some(idx) = page.and_then(|t| self.section().and_then(|s| s.find_page(t))) else {
            return;
        };
        self.select_page(idx);
        if let Some(idx) = context.and_then(|t| self.page().and_then(|p| p.find_context(t))) {
            self.select_context(idx);
        }
    }
}
