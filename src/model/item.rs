use serde::{Deserialize, Serialize};

/// A single entry inside a context. The context's kind decides which
/// variant its items use: todo contexts hold `Todo`, list contexts hold
/// `Entry`.
///
/// Serialization is untagged and the shapes are disjoint (`done` is
/// required on `Todo`), so `{"title": ..., "done": ...}` round-trips as a
/// todo and `{"title": ...}` as a list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Item {
    /// A checkable todo
    Todo { title: String, done: bool },
    /// A plain list entry
    Entry { title: String },
}

impl Item {
    pub fn todo(title: impl Into<String>) -> Item {
        Item::Todo {
            title: title.into(),
            done: false,
        }
    }

    pub fn entry(title: impl Into<String>) -> Item {
        Item::Entry {
            title: title.into(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Item::Todo { title, .. } => title,
            Item::Entry { title } => title,
        }
    }

    /// True for a todo that has been marked done
    pub fn is_done(&self) -> bool {
        matches!(self, Item::Todo { done: true, .. })
    }

    pub fn is_todo(&self) -> bool {
        matches!(self, Item::Todo { .. })
    }
}
