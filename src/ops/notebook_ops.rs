use crate::model::{Context, ContextKind, Item, Page, Section, Session};

/// Error type for notebook mutations
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum OpError {
    #[error("section '{0}' already exists")]
    DuplicateSection(String),
    #[error("page '{0}' already exists")]
    DuplicatePage(String),
    #[error("context '{0}' already exists")]
    DuplicateContext(String),
    #[error("unknown context type '{0}' (expected todo, ol, or ul)")]
    UnknownKind(String),
    #[error("no section selected")]
    NoSection,
    #[error("no page selected")]
    NoPage,
    #[error("no context selected")]
    NoContext,
    #[error("the selected context does not hold todos")]
    NotTodoContext,
    #[error("the selected context holds todos, not list items")]
    NotListContext,
    #[error("no todo at that position")]
    NoSuchTodo,
}

// ---------------------------------------------------------------------------
// Create + select
// ---------------------------------------------------------------------------

/// Append a section and select it. Titles are unique case-insensitively;
/// the typed casing is stored.
pub fn new_section(session: &mut Session, title: &str) -> Result<(), OpError> {
    if session.notebook.find_section(title).is_some() {
        return Err(OpError::DuplicateSection(title.to_string()));
    }
    session.notebook.sections.push(Section::new(title));
    let idx = session.notebook.sections.len() - 1;
    session.select_section(idx);
    Ok(())
}

/// Append a page under the selected section and select it
pub fn new_page(session: &mut Session, title: &str) -> Result<(), OpError> {
    let section = session.section().ok_or(OpError::NoSection)?;
    if section.find_page(title).is_some() {
        return Err(OpError::DuplicatePage(title.to_string()));
    }
    let section = session.section_mut().ok_or(OpError::NoSection)?;
    section.pages.push(Page::new(title));
    let idx = section.pages.len() - 1;
    session.select_page(idx);
    Ok(())
}

/// Append a context under the selected page and select it
pub fn new_context(session: &mut Session, title: &str, kind: ContextKind) -> Result<(), OpError> {
    let page = session.page().ok_or(OpError::NoPage)?;
    if page.find_context(title).is_some() {
        return Err(OpError::DuplicateContext(title.to_string()));
    }
    let page = session.page_mut().ok_or(OpError::NoPage)?;
    page.contexts.push(Context::new(title, kind));
    let idx = page.contexts.len() - 1;
    session.select_context(idx);
    Ok(())
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// Add a todo to the selected context. Re-adding an existing title
/// (case-insensitively) resets its done flag instead of duplicating.
pub fn add_todo(session: &mut Session, title: &str) -> Result<(), OpError> {
    let context = session.context_mut().ok_or(OpError::NoContext)?;
    if context.kind != ContextKind::Todo {
        return Err(OpError::NotTodoContext);
    }
    if let Some(Item::Todo { done, .. }) = context.find_todo_mut(title) {
        *done = false;
        return Ok(());
    }
    context.items.push(Item::todo(title));
    Ok(())
}

/// Add a list entry to the selected context. Duplicates are allowed.
pub fn add_list_item(session: &mut Session, title: &str) -> Result<(), OpError> {
    let context = session.context_mut().ok_or(OpError::NoContext)?;
    if context.kind == ContextKind::Todo {
        return Err(OpError::NotListContext);
    }
    context.items.push(Item::entry(title));
    Ok(())
}

/// Mark the todo at `item` done. Idempotent.
pub fn mark_done(session: &mut Session, item: usize) -> Result<(), OpError> {
    let context = session.context_mut().ok_or(OpError::NoContext)?;
    match context.items.get_mut(item) {
        Some(Item::Todo { done, .. }) => {
            *done = true;
            Ok(())
        }
        _ => Err(OpError::NoSuchTodo),
    }
}

// ---------------------------------------------------------------------------
// Cleanup
// ---------------------------------------------------------------------------

/// Drop done todos from the selected context. Returns the number
/// removed; a non-todo context is a no-op.
pub fn remove_done_context(session: &mut Session) -> Result<usize, OpError> {
    let context = session.context_mut().ok_or(OpError::NoContext)?;
    Ok(drop_done(context))
}

/// Drop done todos from every todo context of the selected page
pub fn remove_done_page(session: &mut Session) -> Result<usize, OpError> {
    let page = session.page_mut().ok_or(OpError::NoPage)?;
    Ok(page.contexts.iter_mut().map(drop_done).sum())
}

fn drop_done(context: &mut Context) -> usize {
    if context.kind != ContextKind::Todo {
        return 0;
    }
    let before = context.items.len();
    context.items.retain(|item| !item.is_done());
    before - context.items.len()
}

/// Sort the selected context's items by title ascending. Empty contexts
/// are a no-op. Returns the number of items.
pub fn sort_context(session: &mut Session) -> Result<usize, OpError> {
    let context = session.context_mut().ok_or(OpError::NoContext)?;
    context.items.sort_by(|a, b| a.title().cmp(b.title()));
    Ok(context.items.len())
}
