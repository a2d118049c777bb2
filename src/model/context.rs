use serde::{Deserialize, Serialize};

use super::item::Item;

/// The kind of a context, deciding what its items look like and which
/// commands apply (`remove done` only makes sense for todo contexts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextKind {
    Todo,
    /// Ordered list
    Ol,
    /// Unordered list
    Ul,
}

impl ContextKind {
    /// Parse a user-typed kind token (`todo`, `ol`, `ul`)
    pub fn from_token(token: &str) -> Option<ContextKind> {
        match token {
            "todo" => Some(ContextKind::Todo),
            "ol" => Some(ContextKind::Ol),
            "ul" => Some(ContextKind::Ul),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            ContextKind::Todo => "todo",
            ContextKind::Ol => "ol",
            ContextKind::Ul => "ul",
        }
    }
}

impl std::fmt::Display for ContextKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// A titled group of items on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ContextKind,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Context {
    pub fn new(title: impl Into<String>, kind: ContextKind) -> Context {
        Context {
            title: title.into(),
            kind,
            items: Vec::new(),
        }
    }

    /// Find a todo by title, case-insensitively
    pub fn find_todo_mut(&mut self, title: &str) -> Option<&mut Item> {
        let needle = title.to_lowercase();
        self.items
            .iter_mut()
            .filter(|i| i.is_todo())
            .find(|i| i.title().to_lowercase() == needle)
    }

    /// True when every item fits this context's kind. Todo contexts
    /// require a done flag on every item. List contexts accept anything
    /// with a title, so a todo that drifted in through a merge keeps its
    /// done flag and still loads.
    pub fn items_match_kind(&self) -> bool {
        match self.kind {
            ContextKind::Todo => self.items.iter().all(Item::is_todo),
            ContextKind::Ol | ContextKind::Ul => true,
        }
    }
}
