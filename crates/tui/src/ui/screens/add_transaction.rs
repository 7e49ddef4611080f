use ratatui::{
    Frame,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use api_types::transaction::{RepeatInterval, TransactionKind};

use crate::{
    app::{AppState, forms::TransactionField},
    categories,
    ui::{
        components::form::{FieldValue, display_or_placeholder, field_line, message_line},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let form = &state.transaction_form;

    let mut fields = vec![
        TransactionField::Kind,
        TransactionField::Category,
        TransactionField::Method,
        TransactionField::Amount,
        TransactionField::Repeating,
    ];
    if form.repeating {
        fields.push(TransactionField::Repetition);
    }

    let mut lines = Vec::new();
    for field in fields {
        let focused = form.focus == field;
        let value = match field {
            TransactionField::Kind => display_or_placeholder(
                TransactionKind::parse(form.kind.trim()).map(|kind| kind.label().to_string()),
                "Transaction Type",
            ),
            TransactionField::Category => display_or_placeholder(
                (!form.category.trim().is_empty())
                    .then(|| categories::label(&form.category).to_string()),
                "Category",
            ),
            TransactionField::Method => display_or_placeholder(
                form.payment_method
                    .trim()
                    .parse::<i64>()
                    .ok()
                    .and_then(|id| state.methods.iter().find(|method| method.id == id))
                    .map(|method| method.name.clone()),
                "Payment method",
            ),
            TransactionField::Amount => {
                if form.amount.is_empty() {
                    FieldValue::Placeholder("0.00".to_string())
                } else {
                    FieldValue::Chosen(format!("${}", form.amount))
                }
            }
            TransactionField::Repeating => {
                FieldValue::Chosen(if form.repeating { "[x]" } else { "[ ]" }.to_string())
            }
            TransactionField::Repetition => display_or_placeholder(
                RepeatInterval::parse(form.repetition.trim())
                    .map(|interval| interval.label().to_string()),
                "Repetition",
            ),
        };

        lines.push(field_line(field.label(), value, focused, &theme));
        lines.push(Line::from(""));
    }

    if let Some(message) = &form.message {
        lines.push(message_line(message, &theme));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Add transaction");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
