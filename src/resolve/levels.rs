use crate::model::{Context, ContextKind, Notebook, Page, Section};

use super::code::{Code, ParsedInput};
use super::fuzzy;
use super::item::{Command, SearchItem};

/// What one level contributed. `Exact` short-circuits the whole
/// composition; `Ranked` accumulates and descent continues.
#[derive(Debug)]
pub(crate) enum Resolution {
    Exact(Vec<SearchItem>),
    Ranked(Vec<SearchItem>),
}

fn all_exact(items: Vec<SearchItem>) -> Resolution {
    Resolution::Exact(items.into_iter().map(SearchItem::into_exact).collect())
}

// ---------------------------------------------------------------------------
// Section level
// ---------------------------------------------------------------------------

fn new_section(title: Option<&str>) -> SearchItem {
    let label = match title {
        Some(t) => format!("New section: {t}"),
        None => "New section".to_string(),
    };
    SearchItem::ranked(
        label,
        Code::NewSection,
        Command::NewSection {
            title: title.map(str::to_string),
        },
    )
}

pub(crate) fn resolve_sections(
    parsed: &ParsedInput,
    input: &str,
    notebook: &Notebook,
) -> Resolution {
    let selects: Vec<SearchItem> = notebook
        .sections
        .iter()
        .enumerate()
        .map(|(idx, s)| {
            SearchItem::ranked(
                format!("Select section: {}", s.title),
                Code::SelectSection,
                Command::SelectSection { section: idx },
            )
        })
        .collect();

    match (parsed.code, parsed.additional.as_deref()) {
        (Some(Code::NewSection), rest) => all_exact(vec![new_section(rest)]),
        (Some(Code::SelectSection), Some(rest)) => {
            let hits = fuzzy::rank_items(rest, selects);
            if hits.is_empty() {
                // no section matches: treat the text as a title to create
                all_exact(vec![new_section(Some(rest))])
            } else {
                all_exact(hits)
            }
        }
        (Some(Code::SelectSection), None) if !selects.is_empty() => all_exact(selects),
        _ => {
            let mut all = vec![new_section(None)];
            all.extend(selects);
            Resolution::Ranked(fuzzy::rank_items(input.trim(), all))
        }
    }
}

// ---------------------------------------------------------------------------
// Page level
// ---------------------------------------------------------------------------

fn new_page(title: Option<&str>) -> SearchItem {
    let label = match title {
        Some(t) => format!("New page: {t}"),
        None => "New page".to_string(),
    };
    SearchItem::ranked(
        label,
        Code::NewPage,
        Command::NewPage {
            title: title.map(str::to_string),
        },
    )
}

pub(crate) fn resolve_pages(parsed: &ParsedInput, input: &str, section: &Section) -> Resolution {
    let selects: Vec<SearchItem> = section
        .pages
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            SearchItem::ranked(
                format!("Select page: {}", p.title),
                Code::SelectPage,
                Command::SelectPage { page: idx },
            )
        })
        .collect();
    let remove_done = SearchItem::ranked(
        "Remove done items from page",
        Code::RemoveDonePage,
        Command::RemoveDonePage,
    );

    match (parsed.code, parsed.additional.as_deref()) {
        (Some(Code::NewPage), rest) => all_exact(vec![new_page(rest)]),
        (Some(Code::SelectPage), Some(rest)) => {
            let hits = fuzzy::rank_items(rest, selects);
            if hits.is_empty() {
                all_exact(vec![new_page(Some(rest))])
            } else {
                all_exact(hits)
            }
        }
        (Some(Code::SelectPage), None) if !selects.is_empty() => all_exact(selects),
        (Some(Code::RemoveDonePage), None) => all_exact(vec![remove_done]),
        _ => {
            let mut all = vec![new_page(None)];
            all.extend(selects);
            all.push(remove_done);
            Resolution::Ranked(fuzzy::rank_items(input.trim(), all))
        }
    }
}

// ---------------------------------------------------------------------------
// Context level
// ---------------------------------------------------------------------------

/// Split a `nc` remainder into an optional leading kind token and a title:
/// `todo Work` → (todo, "Work"), `Work` → (none, "Work"), `ul` → (ul, none)
fn split_kind(rest: &str) -> (Option<ContextKind>, Option<String>) {
    let mut parts = rest.splitn(2, ' ');
    let first = parts.next().unwrap_or("");
    match ContextKind::from_token(first) {
        Some(kind) => {
            let title = parts
                .next()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            (Some(kind), title)
        }
        None => (None, Some(rest.to_string())),
    }
}

fn new_context(kind: Option<ContextKind>, title: Option<String>) -> SearchItem {
    let label = match &title {
        Some(t) => format!("New context: {t}"),
        None => "New context".to_string(),
    };
    SearchItem::ranked(label, Code::NewContext, Command::NewContext { kind, title })
}

pub(crate) fn resolve_contexts(parsed: &ParsedInput, input: &str, page: &Page) -> Resolution {
    let selects: Vec<SearchItem> = page
        .contexts
        .iter()
        .enumerate()
        .map(|(idx, c)| {
            SearchItem::ranked(
                format!("Select context: {}", c.title),
                Code::SelectContext,
                Command::SelectContext { context: idx },
            )
        })
        .collect();

    match (parsed.code, parsed.additional.as_deref()) {
        (Some(Code::NewContext), Some(rest)) => {
            let (kind, title) = split_kind(rest);
            all_exact(vec![new_context(kind, title)])
        }
        (Some(Code::NewContext), None) => all_exact(vec![new_context(None, None)]),
        (Some(Code::SelectContext), Some(rest)) => {
            let hits = fuzzy::rank_items(rest, selects);
            if hits.is_empty() {
                let (kind, title) = split_kind(rest);
                all_exact(vec![new_context(kind, title)])
            } else {
                all_exact(hits)
            }
        }
        (Some(Code::SelectContext), None) if !selects.is_empty() => all_exact(selects),
        _ => {
            let mut all = vec![new_context(None, None)];
            all.extend(selects);
            Resolution::Ranked(fuzzy::rank_items(input.trim(), all))
        }
    }
}

// ---------------------------------------------------------------------------
// Item level
// ---------------------------------------------------------------------------

fn new_item(kind: ContextKind, title: Option<&str>) -> SearchItem {
    let noun = match kind {
        ContextKind::Todo => "todo",
        ContextKind::Ol | ContextKind::Ul => "list item",
    };
    let label = match title {
        Some(t) => format!("New {noun}: {t}"),
        None => format!("New {noun}"),
    };
    let title = title.map(str::to_string);
    let command = match kind {
        ContextKind::Todo => Command::NewTodo { title },
        ContextKind::Ol | ContextKind::Ul => Command::NewListItem { title },
    };
    SearchItem::ranked(label, Code::NewItem, command)
}

pub(crate) fn resolve_items(
    parsed: &ParsedInput,
    input: &str,
    context: &Context,
    nothing_accumulated: bool,
) -> Resolution {
    let dones: Vec<SearchItem> = context
        .items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.is_todo())
        .map(|(idx, item)| {
            SearchItem::ranked(
                format!("Mark done: {}", item.title()),
                Code::Done,
                Command::MarkDone { item: idx },
            )
        })
        .collect();
    let remove_done = SearchItem::ranked(
        "Remove done items from context",
        Code::RemoveDoneContext,
        Command::RemoveDoneContext,
    );
    let sort = SearchItem::ranked("Sort items by title", Code::Sort, Command::SortContext);

    match (parsed.code, parsed.additional.as_deref()) {
        (Some(Code::NewItem), rest) => {
            return all_exact(vec![new_item(context.kind, rest)]);
        }
        (Some(Code::Done), Some(rest)) => {
            let hits = fuzzy::rank_items(rest, dones.clone());
            if !hits.is_empty() {
                return all_exact(hits);
            }
            // fall through: unmatched `d` text degrades to free text below
        }
        (Some(Code::Done), None) => {
            if !dones.is_empty() {
                return all_exact(dones);
            }
        }
        (Some(Code::RemoveDoneContext), None) => {
            return all_exact(vec![remove_done]);
        }
        (Some(Code::Sort), None) => {
            return all_exact(vec![sort]);
        }
        _ => {}
    }

    let mut all = dones;
    all.push(new_item(context.kind, None));
    all.push(remove_done);
    all.push(sort);
    let ranked = fuzzy::rank_items(input.trim(), all);

    // Deepest-level fallback: nothing matched anywhere, so offer the whole
    // input as a new item title (leading near-miss code tokens included).
    if ranked.is_empty() && nothing_accumulated {
        return all_exact(vec![new_item(context.kind, Some(input.trim()))]);
    }
    Resolution::Ranked(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Item;
    use crate::resolve::code::parse_input;

    fn section_with_pages(titles: &[&str]) -> Section {
        let mut section = Section::new("Sec");
        for t in titles {
            section.pages.push(Page::new(*t));
        }
        section
    }

    fn todo_context(items: &[(&str, bool)]) -> Context {
        let mut ctx = Context::new("Stuff", ContextKind::Todo);
        for (title, done) in items {
            ctx.items.push(Item::Todo {
                title: (*title).to_string(),
                done: *done,
            });
        }
        ctx
    }

    fn exact_titles(resolution: Resolution) -> Vec<String> {
        match resolution {
            Resolution::Exact(items) => {
                assert!(items.iter().all(|i| i.exact));
                items.into_iter().map(|i| i.title).collect()
            }
            Resolution::Ranked(items) => panic!("expected exact, got ranked {items:?}"),
        }
    }

    #[test]
    fn select_page_with_text_narrows_to_matches() {
        let section = section_with_pages(&["Quests", "Builds"]);
        let input = "p que";
        let titles = exact_titles(resolve_pages(&parse_input(input), input, &section));
        assert_eq!(titles, vec!["Select page: Quests"]);
    }

    #[test]
    fn unmatched_select_falls_back_to_create() {
        let section = section_with_pages(&["Quests"]);
        let input = "p Mods";
        let titles = exact_titles(resolve_pages(&parse_input(input), input, &section));
        assert_eq!(titles, vec!["New page: Mods"]);
    }

    #[test]
    fn bare_select_code_lists_all_pages_exact() {
        let section = section_with_pages(&["Quests", "Builds"]);
        let titles = exact_titles(resolve_pages(&parse_input("p"), "p", &section));
        assert_eq!(titles, vec!["Select page: Quests", "Select page: Builds"]);
    }

    #[test]
    fn remove_done_page_requires_bare_code() {
        let section = section_with_pages(&["Quests"]);
        let titles = exact_titles(resolve_pages(&parse_input("rp"), "rp", &section));
        assert_eq!(titles, vec!["Remove done items from page"]);

        // with a remainder the code does not apply; input degrades to fuzzy
        let result = resolve_pages(&parse_input("rp xyzzy"), "rp xyzzy", &section);
        match result {
            Resolution::Ranked(items) => assert!(items.is_empty()),
            Resolution::Exact(items) => panic!("rp with remainder must not be exact: {items:?}"),
        }
    }

    #[test]
    fn kind_token_splits_off_the_title() {
        assert_eq!(
            split_kind("todo Work"),
            (Some(ContextKind::Todo), Some("Work".to_string()))
        );
        assert_eq!(split_kind("ul"), (Some(ContextKind::Ul), None));
        assert_eq!(split_kind("Workout plan"), (None, Some("Workout plan".to_string())));
    }

    #[test]
    fn new_context_carries_kind_and_title() {
        let page = Page::new("P");
        let input = "nc todo Work";
        let result = resolve_contexts(&parse_input(input), input, &page);
        match result {
            Resolution::Exact(items) => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].title, "New context: Work");
                assert_eq!(
                    items[0].command,
                    Command::NewContext {
                        kind: Some(ContextKind::Todo),
                        title: Some("Work".to_string()),
                    }
                );
            }
            Resolution::Ranked(items) => panic!("expected exact, got {items:?}"),
        }
    }

    #[test]
    fn done_with_text_narrows_to_matching_todos() {
        let ctx = todo_context(&[("Call bank", false), ("Buy milk", false)]);
        let input = "d milk";
        let titles = exact_titles(resolve_items(&parse_input(input), input, &ctx, true));
        assert_eq!(titles, vec!["Mark done: Buy milk"]);
    }

    #[test]
    fn bare_done_lists_every_todo() {
        let ctx = todo_context(&[("Call bank", true), ("Buy milk", false)]);
        let titles = exact_titles(resolve_items(&parse_input("d"), "d", &ctx, true));
        assert_eq!(titles, vec!["Mark done: Call bank", "Mark done: Buy milk"]);
    }

    #[test]
    fn sort_and_remove_done_require_bare_codes() {
        let ctx = todo_context(&[("A", false)]);
        let titles = exact_titles(resolve_items(&parse_input("sort"), "sort", &ctx, true));
        assert_eq!(titles, vec!["Sort items by title"]);
        let titles = exact_titles(resolve_items(&parse_input("rc"), "rc", &ctx, true));
        assert_eq!(titles, vec!["Remove done items from context"]);
    }

    #[test]
    fn unmatched_text_becomes_a_new_item_title() {
        let ctx = todo_context(&[("Call bank", false)]);
        let input = "d zzz unmatched";
        let titles = exact_titles(resolve_items(&parse_input(input), input, &ctx, true));
        assert_eq!(titles, vec!["New todo: d zzz unmatched"]);
    }

    #[test]
    fn fallback_is_suppressed_when_shallower_levels_matched() {
        let ctx = todo_context(&[("Call bank", false)]);
        let input = "qqqq";
        match resolve_items(&parse_input(input), input, &ctx, false) {
            Resolution::Ranked(items) => assert!(items.is_empty()),
            Resolution::Exact(items) => panic!("expected ranked, got {items:?}"),
        }
    }

    #[test]
    fn list_context_offers_list_items_and_no_done_candidates() {
        let mut ctx = Context::new("Steps", ContextKind::Ol);
        ctx.items.push(Item::entry("First"));
        let titles = exact_titles(resolve_items(&parse_input("n"), "n", &ctx, true));
        assert_eq!(titles, vec!["New list item"]);

        let ranked = match resolve_items(&parse_input(""), "", &ctx, true) {
            Resolution::Ranked(items) => items,
            Resolution::Exact(items) => panic!("expected ranked, got {items:?}"),
        };
        assert!(ranked.iter().all(|i| i.code != Code::Done));
    }
}
