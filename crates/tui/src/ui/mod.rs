pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Section};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();

    // Main layout: info bar, tabs, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state.section, &theme);

    match state.section {
        Section::Summary => screens::summary::render(frame, layout[2], state),
        Section::Details => screens::transactions::render(frame, layout[2], state),
        Section::AddTransaction => screens::add_transaction::render(frame, layout[2], state),
        Section::AddMethod => screens::add_method::render(frame, layout[2], state),
    }

    render_bottom_bar(frame, layout[3], state, &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let refresh = state
        .last_refresh
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let ok = state.summary.error.is_none() && state.list.error.is_none();
    let status = if ok { "OK" } else { "ERR" };
    let status_style = if ok {
        Style::default().fg(theme.positive)
    } else {
        Style::default().fg(theme.error)
    };

    let mut line = vec![
        Span::styled("Store", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("Refresh", Style::default().fg(theme.dim)),
        Span::raw(format!(": {refresh}  ")),
        Span::styled(status, status_style),
    ];

    if let Some(status) = &state.status {
        line.push(Span::raw("  "));
        line.push(Span::styled(
            status.as_str(),
            Style::default().fg(theme.error),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(line)), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = components::tabs::tab_shortcuts(theme);

    let context_hints = get_context_hints(state, theme);
    if !context_hints.is_empty() {
        parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
        parts.extend(context_hints);
    }

    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("q", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" quit"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

/// Returns context-specific keyboard hints for the current section and mode.
fn get_context_hints(state: &AppState, theme: &Theme) -> Vec<Span<'static>> {
    let hint = |key: &'static str, text: &'static str| {
        [
            Span::styled(key, Style::default().fg(theme.accent)),
            Span::raw(text),
        ]
    };

    match state.section {
        Section::Summary => hint("r", " refresh").to_vec(),
        Section::Details => {
            let editing = state
                .list
                .visible_rows()
                .get(state.details.selected)
                .map(|tx| state.list.is_editing(tx.id))
                .unwrap_or(false);

            if editing {
                [
                    hint("Tab", " field  "),
                    hint("↑/↓", " choose  "),
                    hint("Enter", " save  "),
                    hint("Esc", " cancel"),
                ]
                .concat()
            } else {
                [
                    hint("j/k", " select  "),
                    hint("n/p", " page  "),
                    hint("e", " edit  "),
                    hint("f/i/o", " filters  "),
                    hint("c", " clear  "),
                    hint("r", " refresh"),
                ]
                .concat()
            }
        }
        Section::AddTransaction | Section::AddMethod => [
            hint("Tab", " field  "),
            hint("↑/↓", " choose  "),
            hint("Enter", " submit"),
        ]
        .concat(),
    }
}
