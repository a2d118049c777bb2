use serde::{Deserialize, Serialize};

use crate::model::{Notebook, Section, Session};

/// The transport form of a notebook: the whole tree plus the selection
/// path recorded as titles. Selection is re-resolved by title on
/// restore, so structural edits between save and load degrade to a
/// shallower selection instead of failing the load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub all_sections: Vec<Section>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_section_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_page_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_context_title: Option<String>,
}

/// Error type for snapshot encoding and decoding
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("invalid notebook data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid notebook data: items in context '{0}' do not match its type")]
    KindMismatch(String),
}

pub fn capture(session: &Session) -> Snapshot {
    let (section, page, context) = session.selected_titles();
    Snapshot {
        all_sections: session.notebook.sections.clone(),
        selected_section_title: section,
        selected_page_title: page,
        selected_context_title: context,
    }
}

pub fn encode(snapshot: &Snapshot) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Parse and validate a transport string. Beyond the JSON shape itself,
/// every context's items must match its declared type.
pub fn decode(text: &str) -> Result<Snapshot, SnapshotError> {
    let snapshot: Snapshot = serde_json::from_str(text)?;
    for section in &snapshot.all_sections {
        for page in &section.pages {
            for context in &page.contexts {
                if !context.items_match_kind() {
                    return Err(SnapshotError::KindMismatch(context.title.clone()));
                }
            }
        }
    }
    Ok(snapshot)
}

/// Replace the session's tree and selection with the snapshot's. Stale
/// selection titles truncate the stored path at the first missing level;
/// the usual cascade fills in below it.
pub fn restore(session: &mut Session, snapshot: Snapshot) {
    session.notebook = Notebook {
        sections: snapshot.all_sections,
    };
    session.select_by_titles(
        snapshot.selected_section_title.as_deref(),
        snapshot.selected_page_title.as_deref(),
        snapshot.selected_context_title.as_deref(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Context, ContextKind, Item, Page};
    use pretty_assertions::assert_eq;

    fn sample_session() -> Session {
        let mut quests = Page::new("Quests");
        let mut main = Context::new("Main", ContextKind::Todo);
        main.items.push(Item::todo("Reach High Hrothgar"));
        quests.contexts.push(main);
        quests.contexts.push(Context::new("Side", ContextKind::Todo));

        let mut skyrim = Section::new("Skyrim");
        skyrim.pages.push(quests);
        skyrim.pages.push(Page::new("Builds"));

        let mut nb = Notebook::new();
        nb.sections.push(skyrim);
        nb.sections.push(Section::new("Halo"));
        Session::new(nb)
    }

    #[test]
    fn capture_records_tree_and_selection() {
        let mut session = sample_session();
        session.select_section(0);
        session.select_context(1);
        let snapshot = capture(&session);
        assert_eq!(snapshot.all_sections.len(), 2);
        assert_eq!(snapshot.selected_section_title.as_deref(), Some("Skyrim"));
        assert_eq!(snapshot.selected_page_title.as_deref(), Some("Quests"));
        assert_eq!(snapshot.selected_context_title.as_deref(), Some("Side"));
    }

    #[test]
    fn encode_uses_camel_case_and_omits_empty_selection() {
        let session = sample_session();
        let text = encode(&capture(&session)).unwrap();
        assert!(text.contains("\"allSections\""));
        assert!(!text.contains("selectedSectionTitle"));
    }

    #[test]
    fn decode_accepts_a_minimal_payload() {
        let snapshot = decode(r#"{"allSections":[]}"#).unwrap();
        assert!(snapshot.all_sections.is_empty());
        assert_eq!(snapshot.selected_section_title, None);
    }

    #[test]
    fn decode_rejects_items_that_contradict_the_context_type() {
        let text = r#"{
            "allSections": [{
                "title": "S",
                "pages": [{
                    "title": "P",
                    "contexts": [{
                        "title": "Chores",
                        "type": "todo",
                        "items": [{"title": "no done flag"}]
                    }]
                }]
            }]
        }"#;
        let err = decode(text).unwrap_err();
        assert!(err.to_string().contains("Chores"));
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = decode("definitely not json").unwrap_err();
        assert!(err.to_string().starts_with("invalid notebook data"));
    }

    #[test]
    fn selection_survives_a_round_trip() {
        let mut session = sample_session();
        session.select_section(0);
        session.select_page(1);
        let text = encode(&capture(&session)).unwrap();

        let mut fresh = Session::new(Notebook::new());
        restore(&mut fresh, decode(&text).unwrap());
        assert_eq!(
            fresh.selected_titles(),
            (Some("Skyrim".into()), Some("Builds".into()), None)
        );
    }

    #[test]
    fn restore_truncates_stale_titles() {
        let mut session = sample_session();
        let mut snapshot = capture(&session);
        snapshot.selected_section_title = Some("skyrim".into());
        snapshot.selected_page_title = Some("Renamed Away".into());
        snapshot.selected_context_title = Some("Side".into());

        restore(&mut session, snapshot);
        // the stale page title falls back to the cascade; the stored
        // context below it is ignored
        assert_eq!(
            session.selected_titles(),
            (Some("Skyrim".into()), Some("Quests".into()), Some("Main".into()))
        );
    }
}
