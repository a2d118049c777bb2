pub mod code;
pub mod fuzzy;
pub mod item;
mod levels;

pub use code::{CODES, Code, CodeInfo, ParsedInput, help_text, parse_input};
pub use item::{Command, SearchItem};

use crate::model::Session;

use levels::Resolution;

/// Resolve the search box contents into an ordered candidate list.
///
/// Global escapes (`ex`, `im`, `help`, bare) resolve first. Then each
/// hierarchy level contributes top-down: an exact resolution is returned
/// alone, ranked output accumulates, and descent stops at the first level
/// without a selection. The result is never a mix of exact and ranked
/// candidates.
pub fn get_search_items(session: &Session, input: &str) -> Vec<SearchItem> {
    let parsed = code::parse_input(input);

    if parsed.additional.is_none() {
        match parsed.code {
            Some(Code::Export) => {
                return vec![SearchItem::exact(
                    "Export notebook to clipboard",
                    Code::Export,
                    Command::Export,
                )];
            }
            Some(Code::Import) => {
                return vec![SearchItem::exact(
                    "Import notebook from clipboard",
                    Code::Import,
                    Command::Import,
                )];
            }
            Some(Code::Help) => {
                return vec![SearchItem::exact("Help", Code::Help, Command::Help)];
            }
            _ => {}
        }
    }

    let mut acc: Vec<SearchItem> = Vec::new();

    match levels::resolve_sections(&parsed, input, &session.notebook) {
        Resolution::Exact(items) => return items,
        Resolution::Ranked(items) => acc.extend(items),
    }
    let Some(section) = session.section() else {
        return acc;
    };

    match levels::resolve_pages(&parsed, input, section) {
        Resolution::Exact(items) => return items,
        Resolution::Ranked(items) => acc.extend(items),
    }
    let Some(page) = session.page() else {
        return acc;
    };

    match levels::resolve_contexts(&parsed, input, page) {
        Resolution::Exact(items) => return items,
        Resolution::Ranked(items) => acc.extend(items),
    }
    let Some(context) = session.context() else {
        return acc;
    };

    match levels::resolve_items(&parsed, input, context, acc.is_empty()) {
        Resolution::Exact(items) => return items,
        Resolution::Ranked(items) => acc.extend(items),
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Context, ContextKind, Item, Notebook, Page, Section};
    use pretty_assertions::assert_eq;

    /// Three games as sections; Skyrim has a page with todo and list
    /// contexts.
    fn games_session() -> Session {
        let mut nb = Notebook::new();
        let mut skyrim = Section::new("Skyrim");
        let mut quests = Page::new("Quests");
        let mut main = Context::new("Main quests", ContextKind::Todo);
        main.items.push(Item::todo("Reach High Hrothgar"));
        main.items.push(Item::Todo {
            title: "Find the Golden Claw".into(),
            done: true,
        });
        quests.contexts.push(main);
        let mut shopping = Context::new("Shopping", ContextKind::Ul);
        shopping.items.push(Item::entry("Iron ingots"));
        quests.contexts.push(shopping);
        skyrim.pages.push(quests);
        nb.sections.push(skyrim);
        nb.sections.push(Section::new("Halo"));
        nb.sections.push(Section::new("FF7"));
        Session::new(nb)
    }

    fn titles(items: &[SearchItem]) -> Vec<&str> {
        items.iter().map(|i| i.title.as_str()).collect()
    }

    fn assert_unmixed(items: &[SearchItem]) {
        let exact = items.iter().filter(|i| i.exact).count();
        assert!(
            exact == 0 || exact == items.len(),
            "mixed exact/ranked result: {items:?}"
        );
    }

    #[test]
    fn empty_notebook_offers_exactly_new_section() {
        let session = Session::new(Notebook::new());
        let items = get_search_items(&session, "");
        assert_eq!(titles(&items), vec!["New section"]);
    }

    #[test]
    fn empty_input_lists_section_candidates_sorted_by_title() {
        let session = games_session();
        let items = get_search_items(&session, "");
        assert_eq!(
            titles(&items),
            vec![
                "New section",
                "Select section: FF7",
                "Select section: Halo",
                "Select section: Skyrim",
            ]
        );
        assert_unmixed(&items);
    }

    #[test]
    fn select_code_with_text_resolves_one_exact_section() {
        let session = games_session();
        let items = get_search_items(&session, "s skyrim");
        assert_eq!(titles(&items), vec!["Select section: Skyrim"]);
        assert!(items[0].exact);
        assert_eq!(items[0].command, Command::SelectSection { section: 0 });
    }

    #[test]
    fn new_context_with_kind_resolves_one_exact_candidate() {
        let mut session = games_session();
        session.select_section(0);
        let items = get_search_items(&session, "nc todo Work");
        assert_eq!(titles(&items), vec!["New context: Work"]);
        assert!(items[0].exact);
        assert_eq!(
            items[0].command,
            Command::NewContext {
                kind: Some(ContextKind::Todo),
                title: Some("Work".into()),
            }
        );
    }

    #[test]
    fn descent_stops_at_the_first_unselected_level() {
        let session = games_session();
        // nothing selected: page/context/item candidates never appear
        let items = get_search_items(&session, "");
        assert!(items.iter().all(|i| !i.title.contains("page")));
        assert!(items.iter().all(|i| !i.title.contains("context")));
    }

    #[test]
    fn full_selection_accumulates_all_levels_for_free_text() {
        let mut session = games_session();
        session.select_section(0);
        assert!(session.context().is_some());
        let items = get_search_items(&session, "");
        let t = titles(&items);
        assert!(t.contains(&"New section"));
        assert!(t.contains(&"New page"));
        assert!(t.contains(&"New context"));
        assert!(t.contains(&"New todo"));
        assert!(t.contains(&"Select context: Shopping"));
        assert!(t.contains(&"Mark done: Reach High Hrothgar"));
        assert_unmixed(&items);
    }

    #[test]
    fn deeper_exact_match_discards_shallower_ranked_output() {
        let mut session = games_session();
        session.select_section(0);
        // "n" fuzzy-matches plenty of shallower titles, but the item level
        // resolves it exactly
        let items = get_search_items(&session, "n");
        assert_eq!(titles(&items), vec!["New todo"]);
        assert!(items[0].exact);
    }

    #[test]
    fn done_candidates_cover_done_and_undone_todos() {
        let mut session = games_session();
        session.select_section(0);
        let items = get_search_items(&session, "d");
        assert_eq!(
            titles(&items),
            vec![
                "Mark done: Reach High Hrothgar",
                "Mark done: Find the Golden Claw",
            ]
        );
        assert!(items.iter().all(|i| i.exact));
    }

    #[test]
    fn free_text_with_failed_code_prefix_becomes_item_title() {
        let mut session = games_session();
        session.select_section(0);
        let items = get_search_items(&session, "d zzz read the books");
        assert_eq!(titles(&items), vec!["New todo: d zzz read the books"]);
        assert!(items[0].exact);
    }

    #[test]
    fn global_escapes_resolve_alone() {
        let mut session = games_session();
        session.select_section(0);
        for (input, tag) in [
            ("ex", "clipboard.export"),
            ("export", "clipboard.export"),
            ("im", "clipboard.import"),
            ("import", "clipboard.import"),
            ("help", "help"),
        ] {
            let items = get_search_items(&session, input);
            assert_eq!(items.len(), 1, "input {input:?}");
            assert!(items[0].exact);
            assert_eq!(items[0].command.tag(), tag);
        }
    }

    #[test]
    fn escapes_with_remainders_degrade_to_free_text() {
        let session = games_session();
        let items = get_search_items(&session, "help me");
        assert!(items.iter().all(|i| i.command.tag() != "help"));
    }

    #[test]
    fn results_are_never_mixed_across_a_spread_of_inputs() {
        let mut session = games_session();
        session.select_section(0);
        for input in [
            "", "s", "ns", "np", "p", "nc", "c", "n", "d", "rc", "rp", "sort", "sky", "quest",
            "s sky", "p que", "c shop", "d claw", "random words", "rp trailing", "x",
        ] {
            let items = get_search_items(&session, input);
            assert_unmixed(&items);
        }
    }

    #[test]
    fn selecting_the_list_context_switches_the_new_item_noun() {
        let mut session = games_session();
        session.select_section(0);
        session.select_context(1); // Shopping (ul)
        let items = get_search_items(&session, "n Leather strips");
        assert_eq!(titles(&items), vec!["New list item: Leather strips"]);
        assert_eq!(
            items[0].command,
            Command::NewListItem {
                title: Some("Leather strips".into())
            }
        );
    }
}
