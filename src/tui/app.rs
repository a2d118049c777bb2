use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io::read_config;
use crate::io::lock::FileLock;
use crate::io::snapshot;
use crate::io::store::{self, discover_notebook, load_notebook, save_notebook};
use crate::io::watcher::NotebookWatcher;
use crate::model::{JotterConfig, Notebook, Session};
use crate::ops::{self, Host};
use crate::resolve::{Command, SearchItem, get_search_items};

use super::input::InputState;
use super::prompt::TermHost;
use super::render;
use super::theme::Theme;

/// A modal text box over the candidate list
pub enum Overlay {
    Help(String),
    Notice(String),
}

/// Main application state
pub struct App {
    pub session: Session,
    pub config: JotterConfig,
    pub theme: Theme,
    /// Absolute path of the jotter.json this session edits
    pub data_path: PathBuf,
    pub input: InputState,
    /// Candidates for the current input, already ordered
    pub results: Vec<SearchItem>,
    /// Index into `results`
    pub selected: usize,
    /// One-line message for the status row, replaced on the next key
    pub status: Option<String>,
    pub overlay: Option<Overlay>,
    pub should_quit: bool,
}

impl App {
    pub fn new(session: Session, config: JotterConfig, data_path: PathBuf) -> App {
        let theme = Theme::from_config(&config.ui);
        let mut app = App {
            session,
            config,
            theme,
            data_path,
            input: InputState::new(),
            results: Vec::new(),
            selected: 0,
            status: None,
            overlay: None,
            should_quit: false,
        };
        app.refresh_results();
        app
    }

    /// Re-resolve the input; the cursor snaps back to the top
    pub fn refresh_results(&mut self) {
        self.results = get_search_items(&self.session, self.input.text());
        self.selected = 0;
    }

    /// The query behind the current ranked results, for highlighting.
    /// Exact candidates were resolved by code, not by match, so they
    /// highlight nothing.
    pub fn highlight_query(&self) -> Option<String> {
        match self.results.first() {
            Some(item) if !item.exact => Some(self.input.text().trim().to_string()),
            _ => None,
        }
    }
}

/// Run the interactive search screen
pub fn run(dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let start = match dir {
        Some(d) => d.to_path_buf(),
        None => std::env::current_dir()?,
    };
    let data_path = discover_notebook(&start)?;
    let loaded = load_notebook(&data_path)?;
    let notebook_dir = data_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let config = read_config(&notebook_dir)?;
    let _lock = FileLock::acquire_default(&notebook_dir)?;

    let mut session = Session::new(Notebook::new());
    snapshot::restore(&mut session, loaded);
    let mut app = App::new(session, config, data_path);

    // Reload when another process writes the file; a dead watcher only
    // costs us that
    let watcher = NotebookWatcher::start(&notebook_dir).ok();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&NotebookWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key(app, terminal, key);
                }
                Event::Paste(text) => {
                    // the search box is one line; fold pasted newlines away
                    let flat = text.replace(['\r', '\n'], " ");
                    app.input.insert_str(flat.trim_end());
                    app.refresh_results();
                }
                _ => {}
            }
        }

        if let Some(w) = watcher
            && w.changed()
        {
            reload_from_disk(app);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, key: KeyEvent) {
    if app.overlay.is_some() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            app.overlay = None;
        }
        return;
    }

    app.status = None;
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => app.should_quit = true,
        (_, KeyCode::Esc) => {
            if app.input.is_empty() {
                app.should_quit = true;
            } else {
                app.input.clear();
                app.refresh_results();
            }
        }
        (_, KeyCode::Up) => app.selected = app.selected.saturating_sub(1),
        (_, KeyCode::Down) => {
            if app.selected + 1 < app.results.len() {
                app.selected += 1;
            }
        }
        (_, KeyCode::Enter) => run_selected(app, terminal),
        (_, KeyCode::Backspace) => {
            app.input.backspace();
            app.refresh_results();
        }
        (_, KeyCode::Delete) => {
            app.input.delete();
            app.refresh_results();
        }
        (_, KeyCode::Left) => app.input.left(),
        (_, KeyCode::Right) => app.input.right(),
        (_, KeyCode::Home) => app.input.home(),
        (_, KeyCode::End) => app.input.end(),
        (mods, KeyCode::Char(c)) if !mods.contains(KeyModifiers::CONTROL) => {
            app.input.insert_char(c);
            app.refresh_results();
        }
        _ => {}
    }
}

/// Dispatch the highlighted candidate, then persist and report
fn run_selected(app: &mut App, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    let Some(item) = app.results.get(app.selected).cloned() else {
        return;
    };

    let mut host = TermHost::new(terminal, &app.theme);

    if matches!(item.command, Command::Import) {
        if app.config.import.confirm && !confirm_import(&mut host) {
            return;
        }
        // no backup, no merge
        if !backup_before_import(&app.data_path, &mut app.status) {
            return;
        }
    }

    let changed = ops::apply(&mut app.session, &item, &mut host);
    let alerts = host.take_alerts();

    show_alerts(app, &item, alerts);
    if changed {
        save(app);
    }

    app.input.clear();
    app.refresh_results();
}

fn confirm_import(host: &mut TermHost) -> bool {
    match host.ask("Merge pasted data into this notebook? (y/n)", "y") {
        Some(answer) => answer.trim().to_lowercase().starts_with('y'),
        None => false,
    }
}

/// Copy the data file aside before a merge touches it. `false` means the
/// backup failed and the import must not run.
fn backup_before_import(data_path: &Path, status: &mut Option<String>) -> bool {
    match store::backup_notebook(data_path) {
        Ok(backup) => {
            if let Some(name) = backup.file_name() {
                *status = Some(format!("saved backup {}", name.to_string_lossy()));
            }
            true
        }
        Err(e) => {
            *status = Some(format!("import aborted: {e}"));
            false
        }
    }
}

/// Single-line alerts go to the status row, anything longer becomes an
/// overlay; help is always the overlay.
fn show_alerts(app: &mut App, item: &SearchItem, alerts: Vec<String>) {
    if matches!(item.command, Command::Help) {
        if let Some(text) = alerts.into_iter().next() {
            app.overlay = Some(Overlay::Help(text));
        }
        return;
    }
    if alerts.is_empty() {
        return;
    }
    if alerts.len() == 1 && !alerts[0].contains('\n') {
        let message = alerts.into_iter().next().unwrap_or_default();
        match app.status.take() {
            Some(prior) => app.status = Some(format!("{message} \u{00B7} {prior}")),
            None => app.status = Some(message),
        }
    } else {
        app.overlay = Some(Overlay::Notice(alerts.join("\n")));
    }
}

fn save(app: &mut App) {
    let snapshot = snapshot::capture(&app.session);
    if let Err(e) = save_notebook(&app.data_path, &snapshot) {
        app.status = Some(e.to_string());
    }
}

/// Another process wrote jotter.json; adopt its tree unless it matches
/// what we already have (our own save echoes back through the watcher)
fn reload_from_disk(app: &mut App) {
    match load_notebook(&app.data_path) {
        Ok(loaded) => {
            if loaded != snapshot::capture(&app.session) {
                snapshot::restore(&mut app.session, loaded);
                app.status = Some("notebook reloaded from disk".into());
                app.refresh_results();
            }
        }
        Err(e) => app.status = Some(e.to_string()),
    }
}

// ---------------------------------------------------------------------------
