use std::fmt::Write;

use crate::io::snapshot::Snapshot;
use crate::model::{Context, ContextKind, Item};
use crate::resolve::SearchItem;

/// The `find` listing: dotted command tag, then the candidate title
pub fn format_candidates(items: &[SearchItem]) -> String {
    let mut out = String::new();
    for item in items {
        let _ = writeln!(out, "{:<20} {}", item.command.tag(), item.title);
    }
    out
}

/// The `tree` outline. Two-space indent per level, context kind in
/// brackets, the selection path marked with `*`.
pub fn format_tree(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    for section in &snapshot.all_sections {
        let on_section = titles_eq(
            &section.title,
            snapshot.selected_section_title.as_deref(),
        );
        push_titled(&mut out, 0, &section.title, on_section);
        for page in &section.pages {
            let on_page = on_section
                && titles_eq(&page.title, snapshot.selected_page_title.as_deref());
            push_titled(&mut out, 1, &page.title, on_page);
            for context in &page.contexts {
                let on_context = on_page
                    && titles_eq(&context.title, snapshot.selected_context_title.as_deref());
                let label = format!("{} [{}]", context.title, context.kind.token());
                push_titled(&mut out, 2, &label, on_context);
                push_items(&mut out, context);
            }
        }
    }
    out
}

fn titles_eq(title: &str, selected: Option<&str>) -> bool {
    selected.is_some_and(|s| s.to_lowercase() == title.to_lowercase())
}

fn push_titled(out: &mut String, depth: usize, label: &str, selected: bool) {
    let marker = if selected { " *" } else { "" };
    let _ = writeln!(out, "{}{}{}", "  ".repeat(depth), label, marker);
}

fn push_items(out: &mut String, context: &Context) {
    for (i, item) in context.items.iter().enumerate() {
        let line = match item {
            Item::Todo { title, done } => {
                format!("[{}] {}", if *done { 'x' } else { ' ' }, title)
            }
            Item::Entry { title } => match context.kind {
                ContextKind::Ol => format!("{}. {}", i + 1, title),
                _ => format!("- {}", title),
            },
        };
        let _ = writeln!(out, "      {line}");
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use crate::model::{Context, ContextKind, Item, Page, Section};
    use crate::resolve::{Code, Command, SearchItem};

    use super::*;

    fn sample_snapshot() -> Snapshot {
        let mut main = Context::new("Main quests", ContextKind::Todo);
        main.items.push(Item::todo("Reach High Hrothgar"));
        main.items.push(Item::Todo {
            title: "Find the Golden Claw".into(),
            done: true,
        });
        let mut shopping = Context::new("Shopping", ContextKind::Ul);
        shopping.items.push(Item::entry("Iron ingots"));
        let mut steps = Context::new("Alchemy steps", ContextKind::Ol);
        steps.items.push(Item::entry("Pick mushrooms"));
        steps.items.push(Item::entry("Brew"));

        let mut quests = Page::new("Quests");
        quests.contexts.push(main);
        quests.contexts.push(shopping);
        quests.contexts.push(steps);

        let mut skyrim = Section::new("Skyrim");
        skyrim.pages.push(quests);

        Snapshot {
            all_sections: vec![skyrim, Section::new("Halo")],
            selected_section_title: Some("Skyrim".into()),
            selected_page_title: Some("Quests".into()),
            selected_context_title: Some("Shopping".into()),
        }
    }

    #[test]
    fn tree_outline_shows_kinds_items_and_selection() {
        let output = format_tree(&sample_snapshot());
        assert_snapshot!(output, @r"
        Skyrim *
          Quests *
            Main quests [todo]
              [ ] Reach High Hrothgar
              [x] Find the Golden Claw
            Shopping [ul] *
              - Iron ingots
            Alchemy steps [ol]
              1. Pick mushrooms
              2. Brew
        Halo
        ");
    }

    #[test]
    fn selection_markers_respect_the_path_not_just_the_title() {
        // a second section also holds a page called Quests; only the
        // selected section's page gets the marker
        let mut snapshot = sample_snapshot();
        let mut halo_quests = Page::new("Quests");
        halo_quests
            .contexts
            .push(Context::new("Campaign", ContextKind::Todo));
        snapshot.all_sections[1].pages.push(halo_quests);

        let output = format_tree(&snapshot);
        let marked: Vec<&str> = output
            .lines()
            .filter(|l| l.ends_with(" *"))
            .map(str::trim_start)
            .collect();
        assert_eq!(marked, vec!["Skyrim *", "Quests *", "Shopping [ul] *"]);
    }

    #[test]
    fn candidate_listing_pairs_tags_with_titles() {
        let items = vec![
            SearchItem::ranked("New section", Code::NewSection, Command::NewSection { title: None }),
            SearchItem::ranked(
                "Select section: Halo",
                Code::SelectSection,
                Command::SelectSection { section: 1 },
            ),
        ];
        let output = format_candidates(&items);
        assert_snapshot!(output, @r"
        section.new          New section
        section.select       Select section: Halo
        ");
    }
}
