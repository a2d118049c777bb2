use crate::io::merge::merge_snapshots;
use crate::io::snapshot;
use crate::model::{ContextKind, Session};
use crate::resolve::{Command, SearchItem, help_text};

use super::host::Host;
use super::notebook_ops::{self, OpError};

/// Execute the command behind a chosen candidate. Returns true when the
/// notebook or the selection changed, so the caller knows to persist.
///
/// Nothing here is fatal: validation conflicts and bad payloads alert
/// through the host and leave the session untouched.
pub fn apply(session: &mut Session, item: &SearchItem, host: &mut dyn Host) -> bool {
    match &item.command {
        Command::NewSection { title } => {
            let Some(title) = obtain(host, title, "New section title") else {
                return false;
            };
            report(host, notebook_ops::new_section(session, &title))
        }
        Command::SelectSection { section } => session.select_section(*section),
        Command::NewPage { title } => {
            let Some(title) = obtain(host, title, "New page title") else {
                return false;
            };
            report(host, notebook_ops::new_page(session, &title))
        }
        Command::SelectPage { page } => session.select_page(*page),
        Command::RemoveDonePage => report_count(host, notebook_ops::remove_done_page(session)),
        Command::NewContext { kind, title } => {
            let Some(kind) = obtain_kind(host, *kind) else {
                return false;
            };
            let Some(title) = obtain(host, title, "New context title") else {
                return false;
            };
            report(host, notebook_ops::new_context(session, &title, kind))
        }
        Command::SelectContext { context } => session.select_context(*context),
        Command::RemoveDoneContext => {
            report_count(host, notebook_ops::remove_done_context(session))
        }
        Command::SortContext => report_count(host, notebook_ops::sort_context(session)),
        Command::NewTodo { title } => {
            let Some(title) = obtain(host, title, "New todo") else {
                return false;
            };
            report(host, notebook_ops::add_todo(session, &title))
        }
        Command::NewListItem { title } => {
            let Some(title) = obtain(host, title, "New list item") else {
                return false;
            };
            report(host, notebook_ops::add_list_item(session, &title))
        }
        Command::MarkDone { item } => report(host, notebook_ops::mark_done(session, *item)),
        Command::Export => {
            match snapshot::encode(&snapshot::capture(session)) {
                Ok(text) => {
                    host.write_text(&text);
                    host.alert("notebook copied to clipboard");
                }
                Err(e) => host.alert(&e.to_string()),
            }
            false
        }
        Command::Import => {
            let Some(text) = host.read_text() else {
                return false;
            };
            let pasted = match snapshot::decode(&text) {
                Ok(pasted) => pasted,
                Err(e) => {
                    host.alert(&e.to_string());
                    return false;
                }
            };
            let merged = merge_snapshots(snapshot::capture(session), pasted);
            snapshot::restore(session, merged);
            host.alert("notebook imported from clipboard");
            true
        }
        Command::Help => {
            host.alert(&help_text());
            false
        }
    }
}

/// Take the inline payload or prompt for one. A cancelled prompt or a
/// blank answer aborts the command.
fn obtain(host: &mut dyn Host, inline: &Option<String>, prompt: &str) -> Option<String> {
    let text = match inline {
        Some(text) => text.clone(),
        None => host.ask(prompt, "")?,
    };
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn obtain_kind(host: &mut dyn Host, inline: Option<ContextKind>) -> Option<ContextKind> {
    if let Some(kind) = inline {
        return Some(kind);
    }
    let answer = host.ask("Context type (todo, ol or ul)", "todo")?;
    let answer = answer.trim();
    if answer.is_empty() {
        return None;
    }
    match ContextKind::from_token(answer) {
        Some(kind) => Some(kind),
        None => {
            host.alert(&OpError::UnknownKind(answer.to_string()).to_string());
            None
        }
    }
}

fn report(host: &mut dyn Host, outcome: Result<(), OpError>) -> bool {
    match outcome {
        Ok(()) => true,
        Err(e) => {
            host.alert(&e.to_string());
            false
        }
    }
}

/// Like `report`, but "nothing affected" does not count as a change
fn report_count(host: &mut dyn Host, outcome: Result<usize, OpError>) -> bool {
    match outcome {
        Ok(n) => n > 0,
        Err(e) => {
            host.alert(&e.to_string());
            false
        }
    }
}
