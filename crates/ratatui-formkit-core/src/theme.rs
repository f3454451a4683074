use ratatui::style::Style;

/// Base styles shared by every widget in the crate.
///
/// Widget options carry their own styles; an option left at `Style::default()` falls back to the
/// matching theme entry at render time.
#[derive(Clone, Debug)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    pub accent: Style,
    pub danger: Style,
    pub border: Style,
    pub focus_border: Style,
    pub surface: Style,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default(),
            text_muted: Style::default().dark_gray(),
            accent: Style::default().cyan(),
            danger: Style::default().red(),
            border: Style::default().gray(),
            focus_border: Style::default().cyan(),
            surface: Style::default().on_black(),
        }
    }
}
