use std::path::Path;
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use super::store::NOTEBOOK_FILE;

/// Events sent from the file watcher to the TUI event loop
#[derive(Debug)]
pub enum FileEvent {
    /// jotter.json changed on disk
    Changed,
}

/// Watches the notebook's directory for external edits to jotter.json.
///
/// Saves land as a rename, so creates and removes matter as much as
/// plain modifications.
pub struct NotebookWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<FileEvent>,
}

impl NotebookWatcher {
    /// Start watching the directory containing the notebook file.
    /// `poll()` should be called once per tick.
    pub fn start(dir: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(e) => e,
                    Err(_) => return,
                };
                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
                    _ => return,
                }
                let relevant = event
                    .paths
                    .iter()
                    .any(|p| p.file_name().and_then(|n| n.to_str()) == Some(NOTEBOOK_FILE));
                if relevant {
                    let _ = tx.send(FileEvent::Changed);
                }
            },
            Config::default(),
        )?;

        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        Ok(NotebookWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking check for a pending change. Queued duplicates
    /// collapse into one.
    pub fn changed(&self) -> bool {
        let mut changed = false;
        while let Ok(FileEvent::Changed) = self.rx.try_recv() {
            changed = true;
        }
        changed
    }
}
