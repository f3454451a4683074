/// Scroll offsets plus the viewport/content sizes they are clamped against.
///
/// `y` counts rows (table rows, for the data table) and `x` counts display columns.
#[derive(Clone, Copy, Debug, Default)]
pub struct ViewportState {
    pub x: u32,
    pub y: u32,
    pub viewport_w: u16,
    pub viewport_h: u16,
    pub content_w: u32,
    pub content_h: u32,
}

impl ViewportState {
    pub fn set_viewport(&mut self, w: u16, h: u16) {
        self.viewport_w = w;
        self.viewport_h = h;
        self.clamp();
    }

    pub fn set_content(&mut self, w: u32, h: u32) {
        self.content_w = w;
        self.content_h = h;
        self.clamp();
    }

    pub fn clamp(&mut self) {
        self.y = self.y.min(self.max_y());
        self.x = self.x.min(self.max_x());
    }

    pub fn scroll_y_by(&mut self, delta: i32) {
        let next = self.y as i64 + delta as i64;
        self.y = next.clamp(0, self.max_y() as i64) as u32;
    }

    /// Scrolls the minimum amount needed for row `y` to be inside the viewport.
    pub fn ensure_visible_y(&mut self, y: u32) {
        if y < self.y {
            self.y = y;
        } else if self.viewport_h > 0 && y >= self.y.saturating_add(self.viewport_h as u32) {
            self.y = y.saturating_sub(self.viewport_h.saturating_sub(1) as u32);
        }
        self.clamp();
    }

    /// Same as [`Self::ensure_visible_y`] for the horizontal axis.
    pub fn ensure_visible_x(&mut self, x: u32) {
        if x < self.x {
            self.x = x;
        } else if self.viewport_w > 0 && x >= self.x.saturating_add(self.viewport_w as u32) {
            self.x = x.saturating_sub(self.viewport_w.saturating_sub(1) as u32);
        }
        self.clamp();
    }

    fn max_y(&self) -> u32 {
        self.content_h.saturating_sub(self.viewport_h as u32)
    }

    // One extra column so a cursor can sit after the last character.
    fn max_x(&self) -> u32 {
        (self.content_w + 1).saturating_sub(self.viewport_w as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_clamps_both_axes() {
        let mut s = ViewportState::default();
        s.set_viewport(10, 5);
        s.set_content(12, 6);
        s.x = 99;
        s.y = 99;
        s.clamp();
        assert_eq!(s.x, 3);
        assert_eq!(s.y, 1);
    }

    #[test]
    fn ensure_visible_scrolls_minimally() {
        let mut s = ViewportState::default();
        s.set_viewport(10, 4);
        s.set_content(10, 20);
        s.ensure_visible_y(6);
        assert_eq!(s.y, 3);
        s.ensure_visible_y(4);
        assert_eq!(s.y, 3);
        s.ensure_visible_y(1);
        assert_eq!(s.y, 1);
    }

    #[test]
    fn ensure_visible_x_leaves_room_for_trailing_cursor() {
        let mut s = ViewportState::default();
        s.set_viewport(5, 1);
        s.set_content(8, 1);
        s.ensure_visible_x(8);
        assert_eq!(s.x, 4);
    }
}
