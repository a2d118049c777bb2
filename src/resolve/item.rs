use crate::model::ContextKind;

use super::code::Code;

/// What selecting a candidate does. One variant per dispatchable command;
/// the payload carries either a proposed title/kind (create commands, with
/// `None` meaning "prompt the user") or the index of the target entity
/// (select/done commands, relative to the current selection).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NewSection { title: Option<String> },
    SelectSection { section: usize },
    NewPage { title: Option<String> },
    SelectPage { page: usize },
    RemoveDonePage,
    NewContext { kind: Option<ContextKind>, title: Option<String> },
    SelectContext { context: usize },
    RemoveDoneContext,
    SortContext,
    NewTodo { title: Option<String> },
    NewListItem { title: Option<String> },
    MarkDone { item: usize },
    Export,
    Import,
    Help,
}

impl Command {
    /// Stable dotted name for the command, used in `jt find` output and
    /// tests
    pub fn tag(&self) -> &'static str {
        match self {
            Command::NewSection { .. } => "section.new",
            Command::SelectSection { .. } => "section.select",
            Command::NewPage { .. } => "page.new",
            Command::SelectPage { .. } => "page.select",
            Command::RemoveDonePage => "page.remove-done",
            Command::NewContext { .. } => "context.new",
            Command::SelectContext { .. } => "context.select",
            Command::RemoveDoneContext => "context.remove-done",
            Command::SortContext => "context.sort",
            Command::NewTodo { .. } => "todo.new",
            Command::NewListItem { .. } => "list-item.new",
            Command::MarkDone { .. } => "todo.done",
            Command::Export => "clipboard.export",
            Command::Import => "clipboard.import",
            Command::Help => "help",
        }
    }
}

/// One actionable candidate produced for the search box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchItem {
    /// Display title, e.g. `Select section: Skyrim`
    pub title: String,
    /// The code this candidate answers to (bare-code filtering)
    pub code: Code,
    pub command: Command,
    /// True when the input resolved this candidate unambiguously (code
    /// match); exact candidates are never mixed with ranked ones
    pub exact: bool,
}

impl SearchItem {
    pub fn exact(title: impl Into<String>, code: Code, command: Command) -> SearchItem {
        SearchItem {
            title: title.into(),
            code,
            command,
            exact: true,
        }
    }

    pub fn ranked(title: impl Into<String>, code: Code, command: Command) -> SearchItem {
        SearchItem {
            title: title.into(),
            code,
            command,
            exact: false,
        }
    }

    /// The same candidate with `exact` set
    pub fn into_exact(mut self) -> SearchItem {
        self.exact = true;
        self
    }
}
