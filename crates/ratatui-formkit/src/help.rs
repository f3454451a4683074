use crate::keymap::Binding;
use crate::render;
use crate::theme::Theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;

#[derive(Clone, Debug)]
pub struct HelpBarOptions {
    pub style: Style,
    /// Falls back to the theme accent when left at `Style::default()`.
    pub key_style: Style,
    pub separator: String,
    pub space: String,
}

impl Default for HelpBarOptions {
    fn default() -> Self {
        Self {
            style: Style::default(),
            key_style: Style::default(),
            separator: " • ".to_string(),
            space: " ".to_string(),
        }
    }
}

/// One-line `key desc • key desc` hint bar, usually fed from a widget's `help()` bindings.
#[derive(Clone, Debug, Default)]
pub struct HelpBar {
    bindings: Vec<Binding>,
    options: HelpBarOptions,
}

impl HelpBar {
    pub fn new(bindings: Vec<Binding>) -> Self {
        Self {
            bindings,
            options: HelpBarOptions::default(),
        }
    }

    pub fn with_options(bindings: Vec<Binding>, options: HelpBarOptions) -> Self {
        Self { bindings, options }
    }

    pub fn set_bindings(&mut self, bindings: Vec<Binding>) {
        self.bindings = bindings;
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let style = theme.text_muted.patch(self.options.style);
        let key_style = if self.options.key_style == Style::default() {
            theme.accent
        } else {
            self.options.key_style
        };
        buf.set_style(area, style);
        let spans = self.to_spans(style, key_style);
        render::render_spans_clipped(area.x, area.y, 0, area.width, buf, &spans, style);
    }

    fn to_spans(&self, style: Style, key_style: Style) -> Vec<Span<'static>> {
        let mut spans: Vec<Span<'static>> = Vec::new();
        for (i, b) in self.bindings.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(self.options.separator.clone(), style));
            }
            spans.push(Span::styled(b.help_key.clone(), key_style));
            spans.push(Span::styled(self.options.space.clone(), style));
            spans.push(Span::styled(b.help_desc.clone(), style));
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap;
    use crate::table::DataTableBindings;

    fn row_text(buf: &Buffer) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn joins_bindings_with_separator() {
        let bindings = DataTableBindings::default().help(false);
        let hb = HelpBar::new(bindings);
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        hb.render(area, &mut buf, &Theme::default());
        assert_eq!(row_text(&buf), "s sort • enter open");
    }

    #[test]
    fn clips_to_narrow_width() {
        let hb = HelpBar::new(vec![keymap::Binding::new(
            "q",
            "quit",
            vec![keymap::key_char('q')],
        )]);
        let area = Rect::new(0, 0, 3, 1);
        let mut buf = Buffer::empty(area);
        hb.render(area, &mut buf, &Theme::default());
        assert_eq!(row_text(&buf), "q q");
    }
}
