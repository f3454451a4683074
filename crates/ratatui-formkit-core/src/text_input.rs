use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::MouseEvent;
use crate::keymap;
use crate::keymap::Binding;
use crate::render;
use crate::theme::Theme;
use crate::viewport::ViewportState;
use log::debug;
use ratatui::buffer::Buffer;
use ratatui::layout::Position;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

const CLEAR_GLYPH: &str = "✕";
const SHOW_LABEL: &str = "show";
const HIDE_LABEL: &str = "hide";

/// Horizontal padding inside the field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl InputSize {
    fn padding(self) -> u16 {
        match self {
            InputSize::Small => 0,
            InputSize::Medium => 1,
            InputSize::Large => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputVariant {
    /// Rounded border on all sides (3 rows).
    #[default]
    Outline,
    /// No border; the field row gets the theme's surface background.
    Filled,
    /// A bottom rule under the text (2 rows).
    Underline,
}

impl InputVariant {
    fn field_height(self) -> u16 {
        match self {
            InputVariant::Outline => 3,
            InputVariant::Filled => 1,
            InputVariant::Underline => 2,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TextInputOptions {
    pub label: Option<String>,
    pub placeholder: String,
    pub helper_text: Option<String>,
    /// Mask the value; the reveal binding/glyph toggles it.
    pub password: bool,
    /// Show the clear glyph and honour the clear binding.
    pub clearable: bool,
    pub disabled: bool,
    /// Maximum length in characters.
    pub max_length: Option<usize>,
    pub size: InputSize,
    pub variant: InputVariant,
    pub mask_char: char,
    pub style: Style,
}

impl Default for TextInputOptions {
    fn default() -> Self {
        Self {
            label: None,
            placeholder: String::new(),
            helper_text: None,
            password: false,
            clearable: false,
            disabled: false,
            max_length: None,
            size: InputSize::default(),
            variant: InputVariant::default(),
            mask_char: '•',
            style: Style::default(),
        }
    }
}

/// Key bindings for the input's affordances.
#[derive(Clone, Debug)]
pub struct TextInputBindings {
    pub clear: Binding,
    pub reveal: Binding,
}

impl Default for TextInputBindings {
    fn default() -> Self {
        Self {
            clear: Binding::new("ctrl+u", "clear", vec![keymap::key_ctrl('u')]),
            reveal: Binding::new("ctrl+r", "show/hide", vec![keymap::key_ctrl('r')]),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextInputAction {
    None,
    Changed,
    Cleared,
    /// Password visibility changed; `true` means the value is now shown.
    VisibilityToggled(bool),
    Submitted(String),
}

#[derive(Clone, Copy, Debug, Default)]
struct HitAreas {
    text: Rect,
    clear: Option<Rect>,
    reveal: Option<Rect>,
}

/// Single-line text field with label, helper/error text, password masking, and a clear button.
#[derive(Clone, Debug)]
pub struct TextInput {
    value: String,
    cursor: usize, // char index
    revealed: bool,
    focused: bool,
    error: Option<String>,
    pub state: ViewportState,
    options: TextInputOptions,
    bindings: TextInputBindings,
    hits: HitAreas,
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl TextInput {
    pub fn new() -> Self {
        Self::with_options(TextInputOptions::default())
    }

    pub fn with_options(options: TextInputOptions) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            revealed: false,
            focused: false,
            error: None,
            state: ViewportState::default(),
            options,
            bindings: TextInputBindings::default(),
            hits: HitAreas::default(),
        }
    }

    pub fn options(&self) -> &TextInputOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: TextInputOptions) {
        self.options = options;
        if !self.options.password {
            self.revealed = false;
        }
    }

    pub fn set_bindings(&mut self, bindings: TextInputBindings) {
        self.bindings = bindings;
    }

    /// Help bar entries for the affordances this input currently has.
    pub fn help(&self) -> Vec<Binding> {
        let mut out = Vec::new();
        if self.options.clearable {
            out.push(self.bindings.clear.clone());
        }
        if self.options.password {
            out.push(self.bindings.reveal.clone());
        }
        out
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the value (newlines dropped, truncated to `max_length`) and moves the cursor to
    /// the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = single_line(&value.into());
        if let Some(max) = self.options.max_length {
            self.value = self.value.chars().take(max).collect();
        }
        self.cursor = self.char_len();
        self.recompute_content_size();
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
        self.state.x = 0;
        self.recompute_content_size();
    }

    /// Cursor position as a char index into the value.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// An error replaces the helper text and switches the border to the danger style.
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Rows needed to render label, field, and helper/error line.
    pub fn height(&self) -> u16 {
        let label = u16::from(self.options.label.is_some());
        let helper = u16::from(self.error.is_some() || self.options.helper_text.is_some());
        label + self.options.variant.field_height() + helper
    }

    /// The text as displayed: masked for a hidden password.
    pub fn display_value(&self) -> String {
        if self.options.password && !self.revealed {
            std::iter::repeat_n(self.options.mask_char, self.char_len()).collect()
        } else {
            self.value.clone()
        }
    }

    pub fn input(&mut self, event: InputEvent) -> TextInputAction {
        if self.options.disabled {
            return TextInputAction::None;
        }
        match event {
            InputEvent::Paste(s) => {
                if self.insert_str(&single_line(&s)) {
                    TextInputAction::Changed
                } else {
                    TextInputAction::None
                }
            }
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Mouse(m) => self.handle_mouse(m),
        }
    }

    /// Terminal cursor position for a focused input, given the area passed to `render`.
    pub fn cursor_pos(&self) -> Option<(u16, u16)> {
        if !self.focused || self.options.disabled {
            return None;
        }
        let text = self.hits.text;
        if text.width == 0 || text.height == 0 {
            return None;
        }
        let x = (self.cursor_display_x() as u32).saturating_sub(self.state.x);
        if x >= text.width as u32 {
            return None;
        }
        Some((text.x + x as u16, text.y))
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let base = if self.options.style == Style::default() {
            theme.text_primary
        } else {
            self.options.style
        };
        let base = if self.options.disabled {
            base.patch(theme.text_muted)
        } else {
            base
        };
        let border_style = if self.error.is_some() {
            theme.danger
        } else if self.options.disabled {
            theme.text_muted
        } else if self.focused {
            theme.focus_border
        } else {
            theme.border
        };

        let mut y = area.y;
        if let Some(label) = &self.options.label {
            let style = if self.error.is_some() {
                theme.danger
            } else {
                base.add_modifier(Modifier::BOLD)
            };
            render::render_str_clipped(area.x, y, 0, area.width, buf, label, style);
            y += 1;
        }

        let field_h = self
            .options
            .variant
            .field_height()
            .min(area.bottom().saturating_sub(y));
        let field = Rect::new(area.x, y, area.width, field_h);
        y += field_h;

        let text_row = match self.options.variant {
            InputVariant::Outline => {
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(border_style);
                let inner = block.inner(field);
                block.render(field, buf);
                inner
            }
            InputVariant::Filled => {
                buf.set_style(field, theme.surface);
                field
            }
            InputVariant::Underline => {
                let block = Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(border_style);
                let inner = block.inner(field);
                block.render(field, buf);
                inner
            }
        };
        self.render_text_row(text_row, buf, base, theme);

        if y < area.bottom() {
            let (message, style) = match (&self.error, &self.options.helper_text) {
                (Some(err), _) => (Some(err.as_str()), theme.danger),
                (None, Some(help)) => (Some(help.as_str()), theme.text_muted),
                (None, None) => (None, base),
            };
            if let Some(message) = message {
                render::render_str_clipped(area.x, y, 0, area.width, buf, message, style);
            }
        }
    }

    fn render_text_row(&mut self, row: Rect, buf: &mut Buffer, base: Style, theme: &Theme) {
        if row.width == 0 || row.height == 0 {
            self.hits = HitAreas::default();
            return;
        }
        let pad = self.options.size.padding().min(row.width / 2);
        let inner = Rect::new(row.x + pad, row.y, row.width - 2 * pad, 1);

        // Affordances are laid out from the right edge: [text] [✕] [show]
        let mut right = inner.right();
        let mut reveal = None;
        if self.options.password {
            let label = if self.revealed { HIDE_LABEL } else { SHOW_LABEL };
            let w = UnicodeWidthStr::width(label) as u16;
            if w + 1 < right.saturating_sub(inner.x) {
                right -= w;
                let rect = Rect::new(right, inner.y, w, 1);
                render::render_str_clipped(rect.x, rect.y, 0, w, buf, label, theme.accent);
                reveal = Some(rect);
                right -= 1;
            }
        }
        let mut clear = None;
        if self.options.clearable && !self.value.is_empty() && !self.options.disabled {
            let w = UnicodeWidthStr::width(CLEAR_GLYPH) as u16;
            if w + 1 < right.saturating_sub(inner.x) {
                right -= w;
                let rect = Rect::new(right, inner.y, w, 1);
                render::render_str_clipped(
                    rect.x,
                    rect.y,
                    0,
                    w,
                    buf,
                    CLEAR_GLYPH,
                    theme.text_muted,
                );
                clear = Some(rect);
                right -= 1;
            }
        }

        let text = Rect::new(inner.x, inner.y, right.saturating_sub(inner.x), 1);
        self.hits = HitAreas {
            text,
            clear,
            reveal,
        };
        self.state.set_viewport(text.width, 1);
        self.recompute_content_size();
        self.ensure_cursor_visible();

        if self.value.is_empty() {
            let placeholder = base.patch(theme.text_muted);
            render::render_str_clipped(
                text.x,
                text.y,
                0,
                text.width,
                buf,
                &self.options.placeholder,
                placeholder,
            );
        } else {
            render::render_str_clipped(
                text.x,
                text.y,
                self.state.x,
                text.width,
                buf,
                &self.display_value(),
                base,
            );
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> TextInputAction {
        if self.bindings.clear.matches(&key) {
            return self.clear_action();
        }
        if self.bindings.reveal.matches(&key) {
            return self.toggle_reveal();
        }
        if let Some(c) = key.plain_char() {
            return if self.insert_char(c) {
                TextInputAction::Changed
            } else {
                TextInputAction::None
            };
        }
        match key.code {
            KeyCode::Enter => TextInputAction::Submitted(self.value.clone()),
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return TextInputAction::None;
                }
                self.remove_char_at(self.cursor - 1);
                self.cursor -= 1;
                self.after_edit();
                TextInputAction::Changed
            }
            KeyCode::Delete => {
                if self.cursor >= self.char_len() {
                    return TextInputAction::None;
                }
                self.remove_char_at(self.cursor);
                self.after_edit();
                TextInputAction::Changed
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                self.ensure_cursor_visible();
                TextInputAction::None
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                self.ensure_cursor_visible();
                TextInputAction::None
            }
            KeyCode::Home => {
                self.cursor = 0;
                self.ensure_cursor_visible();
                TextInputAction::None
            }
            KeyCode::End => {
                self.cursor = self.char_len();
                self.ensure_cursor_visible();
                TextInputAction::None
            }
            _ => TextInputAction::None,
        }
    }

    fn handle_mouse(&mut self, m: MouseEvent) -> TextInputAction {
        if !m.is_left_click() {
            return TextInputAction::None;
        }
        let pos = Position::new(m.x, m.y);
        if self.hits.clear.is_some_and(|r| r.contains(pos)) {
            return self.clear_action();
        }
        if self.hits.reveal.is_some_and(|r| r.contains(pos)) {
            return self.toggle_reveal();
        }
        if self.hits.text.contains(pos) {
            let target = self.state.x as usize + (m.x - self.hits.text.x) as usize;
            self.cursor = col_from_display_x(&self.display_value(), target);
            self.focused = true;
        }
        TextInputAction::None
    }

    fn clear_action(&mut self) -> TextInputAction {
        if !self.options.clearable || self.value.is_empty() {
            return TextInputAction::None;
        }
        debug!("text input: cleared");
        self.clear();
        TextInputAction::Cleared
    }

    fn toggle_reveal(&mut self) -> TextInputAction {
        if !self.options.password {
            return TextInputAction::None;
        }
        self.revealed = !self.revealed;
        debug!("text input: password revealed = {}", self.revealed);
        TextInputAction::VisibilityToggled(self.revealed)
    }

    fn after_edit(&mut self) {
        self.recompute_content_size();
        self.ensure_cursor_visible();
    }

    fn insert_char(&mut self, ch: char) -> bool {
        if self
            .options
            .max_length
            .is_some_and(|max| self.char_len() >= max)
        {
            return false;
        }
        let byte_idx = byte_index_from_char_index(&self.value, self.cursor);
        self.value.insert(byte_idx, ch);
        self.cursor += 1;
        self.after_edit();
        true
    }

    fn insert_str(&mut self, s: &str) -> bool {
        let mut inserted = false;
        for ch in s.chars() {
            if !self.insert_char(ch) {
                break;
            }
            inserted = true;
        }
        inserted
    }

    fn remove_char_at(&mut self, char_idx: usize) {
        let start = byte_index_from_char_index(&self.value, char_idx);
        let end = byte_index_from_char_index(&self.value, char_idx + 1);
        self.value.replace_range(start..end, "");
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn recompute_content_size(&mut self) {
        let w = UnicodeWidthStr::width(self.display_value().as_str()) as u32;
        self.state.set_content(w, 1);
    }

    fn ensure_cursor_visible(&mut self) {
        self.state.ensure_visible_x(self.cursor_display_x() as u32);
    }

    fn cursor_display_x(&self) -> usize {
        self.display_value()
            .chars()
            .take(self.cursor)
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
            .sum()
    }
}

fn col_from_display_x(line: &str, target_x: usize) -> usize {
    let mut cols = 0usize;
    let mut col = 0usize;
    for ch in line.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if cols + w > target_x {
            break;
        }
        cols += w;
        col += 1;
    }
    col
}

fn byte_index_from_char_index(s: &str, char_idx: usize) -> usize {
    match s.char_indices().nth(char_idx) {
        Some((i, _)) => i,
        None => s.len(),
    }
}

fn single_line(s: &str) -> String {
    s.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}
