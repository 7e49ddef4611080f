use api_types::Amount;
use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// Formats an amount as dollars, keeping the sign ahead of the `$`.
pub fn dollars(amount: Amount) -> String {
    if amount.is_negative() {
        format!("-${}", Amount::new(amount.cents().abs()))
    } else {
        format!("${amount}")
    }
}

/// Colors an amount by sign: positive green, negative red, zero neutral.
pub fn styled_balance(amount: Amount, theme: &Theme) -> Span<'static> {
    let color = if amount.is_negative() {
        theme.negative
    } else if amount.is_zero() {
        theme.text
    } else {
        theme.positive
    };

    Span::styled(dollars(amount), Style::default().fg(color))
}
