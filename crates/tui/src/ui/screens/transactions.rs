use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use api_types::{
    method::Method,
    transaction::{RepeatInterval, Transaction, TransactionKind},
};

use crate::{
    app::AppState,
    categories,
    controller::{EditField, EditSession, PAGE_SIZE, controls_visible},
    ui::{components::money, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, layout[0], state, &theme);
    render_table(frame, layout[1], state, &theme);
    render_pagination(frame, layout[2], state, &theme);
}

fn render_header(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let criteria = state.list.criteria();

    let month_label = match criteria.month {
        None => "All time".to_string(),
        Some(m) => state
            .list
            .months()
            .iter()
            .find(|entry| entry.month == m)
            .map(|entry| entry.label.clone())
            .unwrap_or_else(|| format!("{}/{}", m.month, m.year)),
    };
    let kind_label = criteria
        .kind
        .map(|kind| kind.label().to_string())
        .unwrap_or_else(|| "All".to_string());
    let method_label = match criteria.method_id {
        None => "All".to_string(),
        Some(id) => state
            .methods
            .iter()
            .find(|method| method.id == id)
            .map(|method| capitalize(&method.name))
            .unwrap_or_else(|| id.to_string()),
    };

    let mut line = vec![
        Span::styled("Time", Style::default().fg(theme.dim)),
        Span::raw(format!(": {month_label}   ")),
        Span::styled("Type", Style::default().fg(theme.dim)),
        Span::raw(format!(": {kind_label}   ")),
        Span::styled("Method", Style::default().fg(theme.dim)),
        Span::raw(format!(": {method_label}")),
    ];

    if let Some(err) = &state.list.error {
        line.push(Span::raw("   "));
        line.push(Span::styled(err.as_str(), Style::default().fg(theme.error)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Recent transactions");
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn render_table(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let rows = state.list.visible_rows();

    if rows.is_empty() {
        let block = Block::default().borders(Borders::ALL);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "No transactions found",
                Style::default().fg(theme.dim),
            )))
            .block(block)
            .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let items = rows
        .iter()
        .map(|tx| match state.list.session(tx.id) {
            Some(session) => editing_row(session, &state.methods, theme),
            None => view_row(tx, theme),
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(state.details.selected.min(rows.len() - 1)));

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn view_row(tx: &Transaction, theme: &Theme) -> ListItem<'static> {
    let kind_color = match tx.kind {
        TransactionKind::Income => theme.positive,
        TransactionKind::Expense => theme.negative,
    };
    let date = tx.date.format("%a %d %b %Y").to_string();

    ListItem::new(Line::from(vec![
        Span::raw(format!("{:<18.18} ", capitalize(&tx.method_name))),
        Span::styled(
            format!("{:<8} ", tx.kind.label()),
            Style::default().fg(kind_color),
        ),
        Span::raw(format!("{:>10} ", money::dollars(tx.amount))),
        Span::raw(format!("{:<18.18} ", categories::label(&tx.category))),
        Span::raw(format!("{:<10} ", tx.repeat_interval.label())),
        Span::styled(date, Style::default().fg(theme.dim)),
    ]))
}

fn editing_row(session: &EditSession, methods: &[Method], theme: &Theme) -> ListItem<'static> {
    let fields = [
        EditField::Method,
        EditField::Kind,
        EditField::Amount,
        EditField::Category,
        EditField::Repeat,
    ];

    let mut spans = Vec::new();
    for field in fields {
        let focused = session.focus == field;
        let label_style = if focused {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim)
        };
        let value_style = if focused {
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme.text)
        };

        spans.push(Span::styled(format!("{}:", field.label()), label_style));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            display_value(session, field, methods),
            value_style,
        ));
        spans.push(Span::raw("  "));
    }

    if let Some(err) = &session.error {
        spans.push(Span::styled(err.clone(), Style::default().fg(theme.error)));
    }

    ListItem::new(Line::from(spans))
}

fn display_value(session: &EditSession, field: EditField, methods: &[Method]) -> String {
    let raw = session.draft.field(field);
    if raw.trim().is_empty() {
        return "_".to_string();
    }

    match field {
        EditField::Method => raw
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|id| methods.iter().find(|method| method.id == id))
            .map(|method| capitalize(&method.name))
            .unwrap_or_else(|| raw.to_string()),
        EditField::Kind => TransactionKind::parse(raw.trim())
            .map(|kind| kind.label().to_string())
            .unwrap_or_else(|| raw.to_string()),
        EditField::Amount => format!("${raw}"),
        EditField::Category => categories::label(raw).to_string(),
        EditField::Repeat => RepeatInterval::parse(raw.trim())
            .map(|interval| interval.label().to_string())
            .unwrap_or_else(|| raw.to_string()),
    }
}

fn render_pagination(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let total = state.list.filtered().len();
    if !controls_visible(total, PAGE_SIZE) {
        return;
    }

    let line = Line::from(vec![
        Span::styled(
            format!("Page {}/{}", state.list.page(), state.list.page_count()),
            Style::default().fg(theme.text),
        ),
        Span::raw("   "),
        Span::styled("n", Style::default().fg(theme.accent)),
        Span::raw(" next   "),
        Span::styled("p", Style::default().fg(theme.accent)),
        Span::raw(" prev"),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
