use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::resolve::fuzzy::fuzzy_score;

use super::app::{App, Overlay};

/// Candidate rows drawn at most; the selection scrolls the window
pub const MAX_VISIBLE: usize = 10;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(app.theme.background)),
        area,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // breadcrumbs
            Constraint::Length(1), // search box
            Constraint::Length(1), // separator
            Constraint::Min(0),    // candidates
            Constraint::Length(1), // status
        ])
        .split(area);

    render_breadcrumbs(frame, app, rows[0]);
    render_search_box(frame, app, rows[1]);
    render_separator(frame, app, rows[2]);
    render_candidates(frame, app, rows[3]);
    render_status(frame, app, rows[4]);

    if let Some(overlay) = &app.overlay {
        render_overlay(frame, app, overlay, area);
    }
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// Selection path, e.g. ` Games ▸ Skyrim ▸ Quests`
fn render_breadcrumbs(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let (section, page, context) = app.session.selected_titles();

    let mut spans = vec![Span::styled(" ", Style::default().bg(bg))];
    let mut first = true;
    for title in [section, page, context].into_iter().flatten() {
        if !first {
            spans.push(Span::styled(
                " \u{25B8} ",
                Style::default().fg(app.theme.dim).bg(bg),
            ));
        }
        spans.push(Span::styled(
            title,
            Style::default().fg(app.theme.breadcrumb).bg(bg),
        ));
        first = false;
    }
    if first {
        spans.push(Span::styled(
            "jotter",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

fn render_search_box(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let (before, after) = app.input.split_at_cursor();
    let spans = vec![
        Span::styled(
            " > ",
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            before.to_string(),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ),
        Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
        Span::styled(
            after.to_string(),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ),
    ];
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

fn render_separator(frame: &mut Frame, app: &App, area: Rect) {
    let line = "\u{2500}".repeat(area.width as usize);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            line,
            Style::default().fg(app.theme.dim).bg(app.theme.background),
        ))),
        area,
    );
}

fn render_candidates(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    if app.results.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "   nothing matches",
                Style::default().fg(app.theme.dim).bg(bg),
            ))),
            area,
        );
        return;
    }

    let visible = app.results.len().min(MAX_VISIBLE).min(area.height as usize);
    if visible == 0 {
        return;
    }
    let scroll = if app.selected >= visible {
        app.selected - visible + 1
    } else {
        0
    };
    let highlight_query = app.highlight_query();
    let width = area.width as usize;

    let mut lines: Vec<Line> = Vec::with_capacity(visible);
    for row in 0..visible {
        let idx = scroll + row;
        let Some(item) = app.results.get(idx) else {
            break;
        };
        let is_selected = idx == app.selected;
        let row_bg = if is_selected { app.theme.selected_bg } else { bg };

        let mut base = Style::default().fg(app.theme.text).bg(row_bg);
        if is_selected {
            base = base.fg(app.theme.text_bright).add_modifier(Modifier::BOLD);
        }
        let matched_style = Style::default()
            .fg(app.theme.highlight)
            .bg(row_bg)
            .add_modifier(Modifier::BOLD);

        let indicator = if is_selected { " \u{25B6} " } else { "   " };
        let mut spans = vec![Span::styled(
            indicator.to_string(),
            Style::default().fg(app.theme.highlight).bg(row_bg),
        )];

        let matched = highlight_query
            .as_deref()
            .and_then(|q| fuzzy_score(q, &item.title))
            .map(|(_, positions)| positions)
            .unwrap_or_default();
        push_highlighted_chars(&mut spans, &item.title, &matched, base, matched_style);

        // bare code, right aligned, a reminder of the shortcut
        let token = item.code.token();
        let used = indicator.width() + item.title.as_str().width();
        let tail = token.width() + 2;
        if width > used + tail {
            spans.push(Span::styled(
                " ".repeat(width - used - tail),
                Style::default().bg(row_bg),
            ));
            spans.push(Span::styled(
                format!("{token}  "),
                Style::default().fg(app.theme.dim).bg(row_bg),
            ));
        }

        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

/// Left: transient message or the match count. Right: key hints.
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let (left, left_style) = match &app.status {
        Some(message) => (
            format!(" {message}"),
            Style::default().fg(app.theme.status).bg(bg),
        ),
        None => (
            format!(" {} actions", app.results.len()),
            Style::default().fg(app.theme.dim).bg(bg),
        ),
    };
    let hints = "\u{2191}\u{2193} move \u{00B7} Enter run \u{00B7} Esc quit ";

    let pad = width.saturating_sub(left.as_str().width() + hints.width()).max(1);

    let line = Line::from(vec![
        Span::styled(left, left_style),
        Span::styled(" ".repeat(pad), Style::default().bg(bg)),
        Span::styled(hints.to_string(), Style::default().fg(app.theme.dim).bg(bg)),
    ]);
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}

fn render_overlay(frame: &mut Frame, app: &App, overlay: &Overlay, area: Rect) {
    let bg = app.theme.background;
    let (title, body) = match overlay {
        Overlay::Help(text) => (" help ", text.as_str()),
        Overlay::Notice(text) => (" notice ", text.as_str()),
    };

    let popup = centered_rect(70, 80, area);
    frame.render_widget(Clear, popup);

    let mut lines: Vec<Line> = body
        .lines()
        .map(|l| {
            Line::from(Span::styled(
                format!(" {l}"),
                Style::default().fg(app.theme.text).bg(bg),
            ))
        })
        .collect();
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        " Esc to close",
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Split `text` into spans, styling the chars at `matched` positions
fn push_highlighted_chars(
    spans: &mut Vec<Span<'static>>,
    text: &str,
    matched: &[usize],
    base: Style,
    matched_style: Style,
) {
    let mut run = String::new();
    let mut run_matched = false;
    for (i, ch) in text.chars().enumerate() {
        let is_match = matched.contains(&i);
        if is_match != run_matched && !run.is_empty() {
            let style = if run_matched { matched_style } else { base };
            spans.push(Span::styled(std::mem::take(&mut run), style));
        }
        run_matched = is_match;
        run.push(ch);
    }
    if !run.is_empty() {
        let style = if run_matched { matched_style } else { base };
        spans.push(Span::styled(run, style));
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

// ---------------------------------------------------------------------------
