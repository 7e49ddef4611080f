use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
};

use api_types::method::{MethodProcessor, MethodType};

use crate::{
    app::{AppState, forms::MethodField},
    ui::{
        components::form::{FieldValue, display_or_placeholder, field_line, message_line},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let form = &state.method_form;

    let fields = [MethodField::Name, MethodField::Kind, MethodField::Processor];

    let mut lines = Vec::new();
    for field in fields {
        let focused = form.focus == field;
        let value = match field {
            MethodField::Name => {
                if form.name.is_empty() {
                    FieldValue::Placeholder("Card Name".to_string())
                } else {
                    FieldValue::Chosen(form.name.clone())
                }
            }
            MethodField::Kind => display_or_placeholder(
                MethodType::parse(form.kind.trim()).map(|kind| kind.label().to_string()),
                "Type",
            ),
            MethodField::Processor => display_or_placeholder(
                MethodProcessor::parse(form.processor.trim())
                    .map(|processor| processor.label().to_string()),
                "Card Processor",
            ),
        };

        lines.push(field_line(field.label(), value, focused, &theme));
        lines.push(ratatui::text::Line::from(""));
    }

    if let Some(message) = &form.message {
        lines.push(message_line(message, &theme));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Add Payment Method");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
