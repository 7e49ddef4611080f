use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::{app::forms::FormMessage, ui::theme::Theme};

/// A form field's display value: chosen values render as text, placeholders
/// render dim like an unselected option.
pub enum FieldValue {
    Chosen(String),
    Placeholder(String),
}

pub fn display_or_placeholder(value: Option<String>, placeholder: &str) -> FieldValue {
    match value {
        Some(value) => FieldValue::Chosen(value),
        None => FieldValue::Placeholder(placeholder.to_string()),
    }
}

pub fn field_line(
    label: &'static str,
    value: FieldValue,
    focused: bool,
    theme: &Theme,
) -> Line<'static> {
    let marker = if focused { "» " } else { "  " };
    let label_style = if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim)
    };

    let value_span = match value {
        FieldValue::Chosen(text) => {
            let style = if focused {
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::UNDERLINED)
            } else {
                Style::default().fg(theme.text)
            };
            Span::styled(text, style)
        }
        FieldValue::Placeholder(text) => Span::styled(text, Style::default().fg(theme.dim)),
    };

    Line::from(vec![
        Span::styled(marker.to_string(), Style::default().fg(theme.accent)),
        Span::styled(format!("{label:<18} "), label_style),
        value_span,
    ])
}

pub fn message_line(message: &FormMessage, theme: &Theme) -> Line<'static> {
    match message {
        FormMessage::Info(text) => {
            Span::styled(text.clone(), Style::default().fg(theme.positive)).into()
        }
        FormMessage::Error(text) => {
            Span::styled(text.clone(), Style::default().fg(theme.error)).into()
        }
    }
}
