use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub positive: Color,
    pub negative: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Rgb(220, 220, 220),
            dim: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(95, 155, 190),
            border: Color::Rgb(70, 78, 86),
            positive: Color::Rgb(110, 180, 110),
            negative: Color::Rgb(205, 95, 95),
            error: Color::Rgb(205, 95, 95),
        }
    }
}
