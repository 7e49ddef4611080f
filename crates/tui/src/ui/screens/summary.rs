use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use crate::{
    app::AppState,
    ui::{
        components::{
            card::{Card, StatCard},
            money,
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Error line
            Constraint::Length(5), // Monthly totals
            Constraint::Length(5), // Expense split and balance
            Constraint::Min(0),    // Per-method balances
        ])
        .split(area);

    if let Some(err) = &state.summary.error {
        frame.render_widget(
            Paragraph::new(Span::styled(
                err.as_str(),
                Style::default().fg(theme.error),
            )),
            layout[0],
        );
    }

    let Some(summary) = &state.summary.data else {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Loading summary...",
                Style::default().fg(theme.dim),
            )),
            layout[1],
        );
        return;
    };

    let totals = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(layout[1]);

    StatCard::new(
        "Total monthly expenses",
        money::dollars(summary.expense_amount),
        &theme,
    )
    .render(frame, totals[0]);
    StatCard::new(
        "Monthly Income",
        money::dollars(summary.income_amount),
        &theme,
    )
    .render(frame, totals[1]);

    let split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(layout[2]);

    StatCard::new(
        "Total variable expenses",
        money::dollars(summary.variable_expense_amount),
        &theme,
    )
    .subtitle("One time payments")
    .render(frame, split[0]);

    StatCard::new(
        "Total fixed expenses",
        money::dollars(summary.fixed_expense_amount),
        &theme,
    )
    .subtitle("Recurring payments")
    .render(frame, split[1]);

    let balance_color = if summary.balance.is_negative() {
        theme.negative
    } else {
        theme.positive
    };
    StatCard::new("Balance", money::dollars(summary.balance), &theme)
        .value_style(Style::default().fg(balance_color))
        .subtitle("* The more the better")
        .render(frame, split[2]);

    render_method_balances(frame, layout[3], state, &theme);
}

fn render_method_balances(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let card = Card::new("Payment method balances", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let balances = state
        .summary
        .data
        .as_ref()
        .and_then(|summary| summary.payment_method_balances.as_deref())
        .unwrap_or(&[]);

    if balances.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No per-method balances reported",
                Style::default().fg(theme.dim),
            )),
            inner,
        );
        return;
    }

    let items: Vec<ListItem> = balances
        .iter()
        .take(inner.height as usize)
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<24.24} ", entry.name),
                    Style::default().fg(theme.text),
                ),
                money::styled_balance(entry.balance, theme),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}
