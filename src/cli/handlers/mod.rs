mod init;
pub use init::cmd_init;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::cli::commands::{Commands, FindArgs, ImportArgs};
use crate::cli::output;
use crate::io::lock::FileLock;
use crate::io::merge::merge_snapshots;
use crate::io::snapshot::{self, Snapshot};
use crate::io::store;
use crate::model::{Notebook, Session};
use crate::resolve::{get_search_items, help_text};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(command: Commands, dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Init(args) => cmd_init(args, dir),
        Commands::Export => cmd_export(dir),
        Commands::Import(args) => cmd_import(args, dir),
        Commands::Find(args) => cmd_find(args, dir),
        Commands::Tree => cmd_tree(dir),
        Commands::Codes => cmd_codes(),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Walk up from the -C directory (or the working directory) to the
/// nearest jotter.json.
fn load_notebook_at(dir: Option<&Path>) -> Result<(PathBuf, Snapshot), Box<dyn std::error::Error>> {
    let start = match dir {
        Some(d) => d.to_path_buf(),
        None => std::env::current_dir()?,
    };
    let path = store::discover_notebook(&start)?;
    let loaded = store::load_notebook(&path)?;
    Ok((path, loaded))
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_export(dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let (_, loaded) = load_notebook_at(dir)?;
    println!("{}", snapshot::encode(&loaded)?);
    Ok(())
}

fn cmd_import(args: ImportArgs, dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let (path, ours) = load_notebook_at(dir)?;

    let text = match &args.file {
        Some(file) => std::fs::read_to_string(file)
            .map_err(|e| format!("could not read {}: {e}", file.display()))?,
        None => io::read_to_string(io::stdin())?,
    };
    let pasted = snapshot::decode(&text)?;

    // stdin already carries the payload, so only file imports can prompt
    if args.file.is_some() && !args.yes && !confirm_merge(&pasted, &path)? {
        println!("aborted");
        return Ok(());
    }

    let lock_dir = path.parent().unwrap_or(Path::new("."));
    let _lock = FileLock::acquire_default(lock_dir)?;
    let backup = store::backup_notebook(&path)?;
    let merged = merge_snapshots(ours, pasted);
    store::save_notebook(&path, &merged)?;
    println!(
        "merged into {} ({} sections, backup {})",
        path.display(),
        merged.all_sections.len(),
        backup.display()
    );
    Ok(())
}

fn confirm_merge(pasted: &Snapshot, path: &Path) -> Result<bool, io::Error> {
    eprint!(
        "merge {} pasted section(s) into {}? [y/N] ",
        pasted.all_sections.len(),
        path.display()
    );
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_lowercase().starts_with('y'))
}

fn cmd_find(args: FindArgs, dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let (_, loaded) = load_notebook_at(dir)?;
    let mut session = Session::new(Notebook::new());
    snapshot::restore(&mut session, loaded);

    if let Some(at) = &args.at {
        select_at_path(&mut session, at);
    }

    let items = get_search_items(&session, &args.input);
    print!("{}", output::format_candidates(&items));
    Ok(())
}

/// Override the saved selection with a slash-separated title path
fn select_at_path(session: &mut Session, at: &str) {
    let mut parts = at.split('/').map(str::trim);
    let section = parts.next().filter(|s| !s.is_empty());
    let page = parts.next().filter(|s| !s.is_empty());
    let context = parts.next().filter(|s| !s.is_empty());
    session.select_by_titles(section, page, context);
}

fn cmd_tree(dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let (_, loaded) = load_notebook_at(dir)?;
    print!("{}", output::format_tree(&loaded));
    Ok(())
}

fn cmd_codes() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", help_text());
    Ok(())
}

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::model::{Context, ContextKind, Notebook, Page, Section, Session};

    use super::*;

    fn session_at_depth() -> Session {
        let mut quests = Page::new("Quests");
        quests
            .contexts
            .push(Context::new("Main", ContextKind::Todo));
        let mut skyrim = Section::new("Skyrim");
        skyrim.pages.push(quests);
        let mut nb = Notebook::new();
        nb.sections.push(skyrim);
        nb.sections.push(Section::new("Halo"));
        Session::new(nb)
    }

    #[test]
    fn at_path_selects_each_named_level() {
        let mut session = session_at_depth();
        select_at_path(&mut session, "skyrim/quests/main");
        let (section, page, context) = session.selected_titles();
        assert_eq!(section.as_deref(), Some("Skyrim"));
        assert_eq!(page.as_deref(), Some("Quests"));
        assert_eq!(context.as_deref(), Some("Main"));
    }

    #[test]
    fn a_partial_at_path_cascades_below_the_named_level() {
        let mut session = session_at_depth();
        select_at_path(&mut session, "Skyrim");
        let (section, page, context) = session.selected_titles();
        assert_eq!(section.as_deref(), Some("Skyrim"));
        assert_eq!(page.as_deref(), Some("Quests"));
        assert_eq!(context.as_deref(), Some("Main"));
    }

    #[test]
    fn an_unknown_at_path_clears_the_selection() {
        let mut session = session_at_depth();
        session.select_section(0);
        select_at_path(&mut session, "Zelda/anything");
        assert_eq!(session.section_index(), None);
    }
}
