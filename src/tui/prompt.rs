use std::io::{self, Write};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::ops::Host;

use super::input::InputState;
use super::theme::Theme;

/// Terminal-backed capability host.
///
/// Prompts take over the screen as a modal box with their own small
/// event loop, which makes `ask` synchronous from the dispatcher's point
/// of view. Alerts are only collected here; the app decides afterwards
/// whether they land in the status row or an overlay.
pub struct TermHost<'a> {
    terminal: &'a mut Terminal<CrosstermBackend<io::Stdout>>,
    theme: &'a Theme,
    alerts: Vec<String>,
}

impl<'a> TermHost<'a> {
    pub fn new(
        terminal: &'a mut Terminal<CrosstermBackend<io::Stdout>>,
        theme: &'a Theme,
    ) -> TermHost<'a> {
        TermHost {
            terminal,
            theme,
            alerts: Vec::new(),
        }
    }

    /// Alerts accumulated while a command ran
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    /// Modal input loop shared by `ask` and `read_text`. Returns None on
    /// Esc or Ctrl-C.
    fn prompt_loop(&mut self, prompt: &str, default: &str, hint: &str) -> Option<String> {
        let mut input = InputState::with_text(default);
        let theme = self.theme;
        loop {
            let drawn = self
                .terminal
                .draw(|frame| render_prompt(frame, theme, prompt, &input, hint));
            if drawn.is_err() {
                return None;
            }
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    match (key.modifiers, key.code) {
                        (_, KeyCode::Esc) => return None,
                        (KeyModifiers::CONTROL, KeyCode::Char('c')) => return None,
                        (_, KeyCode::Enter) => return Some(input.text().to_string()),
                        (_, KeyCode::Backspace) => input.backspace(),
                        (_, KeyCode::Delete) => input.delete(),
                        (_, KeyCode::Left) => input.left(),
                        (_, KeyCode::Right) => input.right(),
                        (_, KeyCode::Home) => input.home(),
                        (_, KeyCode::End) => input.end(),
                        (mods, KeyCode::Char(c)) if !mods.contains(KeyModifiers::CONTROL) => {
                            input.insert_char(c)
                        }
                        _ => {}
                    }
                }
                Ok(Event::Paste(text)) => input.insert_str(&text),
                Ok(_) => {}
                Err(_) => return None,
            }
        }
    }
}

impl Host for TermHost<'_> {
    fn ask(&mut self, prompt: &str, default: &str) -> Option<String> {
        self.prompt_loop(prompt, default, "Enter confirm \u{00B7} Esc cancel")
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn read_text(&mut self) -> Option<String> {
        self.prompt_loop(
            "Paste notebook data",
            "",
            "paste, then Enter \u{00B7} Esc cancel",
        )
    }

    /// OSC 52 escape: the terminal emulator owns the clipboard write, so
    /// this also works across ssh. Emulators without OSC 52 support drop
    /// the sequence silently.
    fn write_text(&mut self, text: &str) {
        let encoded = STANDARD.encode(text);
        let mut out = io::stdout();
        let _ = write!(out, "\x1b]52;c;{encoded}\x07");
        let _ = out.flush();
    }
}

fn render_prompt(frame: &mut Frame, theme: &Theme, prompt: &str, input: &InputState, hint: &str) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        area,
    );

    let bg = theme.background;
    let popup_w = area.width.saturating_sub(4).min(62);
    let popup_h = 5u16.min(area.height);
    let x = area.x + area.width.saturating_sub(popup_w) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 3;
    let popup = Rect::new(x, y, popup_w, popup_h);

    let inner_w = popup_w.saturating_sub(2) as usize;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        format!(" {prompt}"),
        Style::default()
            .fg(theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )));

    // multiline pastes would wreck a one-line box; show a summary
    if input.text().contains('\n') {
        lines.push(Line::from(Span::styled(
            format!(" > ({} characters pasted)", input.text().chars().count()),
            Style::default().fg(theme.text).bg(bg),
        )));
    } else {
        let (before, after) = input.split_at_cursor();
        lines.push(Line::from(vec![
            Span::styled(
                " > ",
                Style::default()
                    .fg(theme.highlight)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(before.to_string(), Style::default().fg(theme.text_bright).bg(bg)),
            Span::styled("\u{258C}", Style::default().fg(theme.highlight).bg(bg)),
            Span::styled(after.to_string(), Style::default().fg(theme.text_bright).bg(bg)),
        ]));
    }

    let pad = inner_w.saturating_sub(hint.width());
    lines.push(Line::from(vec![
        Span::styled(" ".repeat(pad), Style::default().bg(bg)),
        Span::styled(hint.to_string(), Style::default().fg(theme.dim).bg(bg)),
    ]));

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}
