use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::ui::theme::Theme;

/// Bordered container used by the summary panels.
pub struct Card<'a> {
    title: &'a str,
    theme: &'a Theme,
}

impl<'a> Card<'a> {
    pub fn new(title: &'a str, theme: &'a Theme) -> Self {
        Self { title, theme }
    }

    pub fn block(&self) -> Block<'a> {
        Block::default()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(self.theme.accent),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.theme.border))
    }

    /// Returns the inner area after accounting for borders.
    pub fn inner(&self, area: Rect) -> Rect {
        self.block().inner(area)
    }

    pub fn render_frame(&self, frame: &mut Frame<'_>, area: Rect) {
        frame.render_widget(self.block(), area);
    }

    pub fn render_with<W: Widget>(&self, frame: &mut Frame<'_>, area: Rect, content: W) {
        let inner = self.inner(area);
        frame.render_widget(self.block(), area);
        frame.render_widget(content, inner);
    }
}

/// A stat card showing a label, a value, and an optional description line.
pub struct StatCard<'a> {
    title: &'a str,
    value: String,
    value_style: Style,
    subtitle: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> StatCard<'a> {
    pub fn new(title: &'a str, value: impl Into<String>, theme: &'a Theme) -> Self {
        Self {
            title,
            value: value.into(),
            value_style: Style::default().fg(theme.text),
            subtitle: None,
            theme,
        }
    }

    /// Overrides the value color (e.g. the balance is green or red).
    pub fn value_style(mut self, style: Style) -> Self {
        self.value_style = style;
        self
    }

    pub fn subtitle(mut self, subtitle: &'a str) -> Self {
        self.subtitle = Some(subtitle);
        self
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let card = Card::new(self.title, self.theme);
        let inner = card.inner(area);
        card.render_frame(frame, area);

        let mut lines = vec![Line::from(Span::styled(
            self.value.clone(),
            self.value_style.add_modifier(Modifier::BOLD),
        ))];

        if let Some(sub) = self.subtitle {
            lines.push(Line::from(Span::styled(
                sub.to_string(),
                Style::default().fg(self.theme.dim),
            )));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
