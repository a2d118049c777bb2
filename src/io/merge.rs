use indexmap::IndexMap;
use indexmap::map::Entry;

use super::snapshot::Snapshot;
use crate::model::{Context, ContextKind, Item, Page, Section};

/// Deep-merge a pasted snapshot into the current one.
///
/// Collections union by title (case-insensitively) and come out sorted
/// by title ascending. Same-titled entries merge recursively, with the
/// pasted side winning every scalar conflict: title casing, context
/// type, done flags. Items caught on the losing side of a type conflict
/// are reshaped to fit the winning type. A selection stored in the
/// pasted snapshot replaces ours level by level.
pub fn merge_snapshots(ours: Snapshot, pasted: Snapshot) -> Snapshot {
    Snapshot {
        all_sections: merge_sections(ours.all_sections, pasted.all_sections),
        selected_section_title: pasted
            .selected_section_title
            .or(ours.selected_section_title),
        selected_page_title: pasted.selected_page_title.or(ours.selected_page_title),
        selected_context_title: pasted
            .selected_context_title
            .or(ours.selected_context_title),
    }
}

fn merge_sections(ours: Vec<Section>, pasted: Vec<Section>) -> Vec<Section> {
    let mut merged: IndexMap<String, Section> = IndexMap::new();
    for section in ours {
        merged.insert(section.title.to_lowercase(), section);
    }
    for section in pasted {
        let key = section.title.to_lowercase();
        match merged.entry(key) {
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                existing.title = section.title;
                existing.pages = merge_pages(std::mem::take(&mut existing.pages), section.pages);
            }
            Entry::Vacant(slot) => {
                slot.insert(section);
            }
        }
    }
    let mut out: Vec<Section> = merged.into_values().collect();
    out.sort_by(|a, b| a.title.cmp(&b.title));
    out
}

fn merge_pages(ours: Vec<Page>, pasted: Vec<Page>) -> Vec<Page> {
    let mut merged: IndexMap<String, Page> = IndexMap::new();
    for page in ours {
        merged.insert(page.title.to_lowercase(), page);
    }
    for page in pasted {
        let key = page.title.to_lowercase();
        match merged.entry(key) {
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                existing.title = page.title;
                existing.contexts =
                    merge_contexts(std::mem::take(&mut existing.contexts), page.contexts);
            }
            Entry::Vacant(slot) => {
                slot.insert(page);
            }
        }
    }
    let mut out: Vec<Page> = merged.into_values().collect();
    out.sort_by(|a, b| a.title.cmp(&b.title));
    out
}

fn merge_contexts(ours: Vec<Context>, pasted: Vec<Context>) -> Vec<Context> {
    let mut merged: IndexMap<String, Context> = IndexMap::new();
    for context in ours {
        merged.insert(context.title.to_lowercase(), context);
    }
    for context in pasted {
        let key = context.title.to_lowercase();
        match merged.entry(key) {
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                existing.title = context.title;
                existing.kind = context.kind;
                existing.items = merge_items(std::mem::take(&mut existing.items), context.items);
                reshape_items(existing.kind, &mut existing.items);
            }
            Entry::Vacant(slot) => {
                slot.insert(context);
            }
        }
    }
    let mut out: Vec<Context> = merged.into_values().collect();
    out.sort_by(|a, b| a.title.cmp(&b.title));
    out
}

fn merge_items(ours: Vec<Item>, pasted: Vec<Item>) -> Vec<Item> {
    let mut merged: IndexMap<String, Item> = IndexMap::new();
    for item in ours {
        merged.insert(item.title().to_lowercase(), item);
    }
    for item in pasted {
        let key = item.title().to_lowercase();
        match merged.entry(key) {
            Entry::Occupied(mut slot) => {
                let combined = merge_item(slot.get(), item);
                *slot.get_mut() = combined;
            }
            Entry::Vacant(slot) => {
                slot.insert(item);
            }
        }
    }
    let mut out: Vec<Item> = merged.into_values().collect();
    out.sort_by(|a, b| a.title().cmp(b.title()));
    out
}

fn merge_item(ours: &Item, pasted: Item) -> Item {
    match (ours, pasted) {
        // a pasted item with no done flag keeps ours
        (Item::Todo { done, .. }, Item::Entry { title }) => Item::Todo { title, done: *done },
        (_, pasted) => pasted,
    }
}

/// A todo context never holds bare entries (`decode` refuses the shape),
/// so entries surviving a kind conflict become open todos. Todos that
/// drift into a list context are left alone and keep their `done` flag.
fn reshape_items(kind: ContextKind, items: &mut [Item]) {
    if kind != ContextKind::Todo {
        return;
    }
    for item in items {
        if let Item::Entry { title } = item {
            *item = Item::todo(std::mem::take(title));
        }
    }
}
