use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::keymap;
use crate::keymap::Binding;

/// Key bindings for [`crate::table::DataTableView`] actions.
///
/// Cursor movement (arrows, `hjkl`, `g`/`G`, Home/End, PageUp/PageDown) is fixed; the
/// sort/selection keys below can be rebound. [`DataTableBindings::help`] lists them for a help
/// bar.
#[derive(Clone, Debug)]
pub struct DataTableBindings {
    pub sort: Binding,
    pub toggle_row: Binding,
    pub toggle_all: Binding,
    pub clear: Binding,
    pub activate: Binding,
}

impl Default for DataTableBindings {
    fn default() -> Self {
        Self {
            sort: Binding::new("s", "sort", vec![keymap::key_char('s')]),
            toggle_row: Binding::new("space", "select", vec![keymap::key_char(' ')]),
            toggle_all: Binding::new("a", "select all", vec![keymap::key_char('a')]),
            clear: Binding::new("esc", "clear", vec![KeyEvent::new(KeyCode::Esc)]),
            activate: Binding::new("enter", "open", vec![KeyEvent::new(KeyCode::Enter)]),
        }
    }
}

impl DataTableBindings {
    /// Bindings to show in a help bar. Selection keys are only listed for selectable tables.
    pub fn help(&self, selectable: bool) -> Vec<Binding> {
        let mut out = vec![self.sort.clone()];
        if selectable {
            out.push(self.toggle_row.clone());
            out.push(self.toggle_all.clone());
            out.push(self.clear.clone());
        }
        out.push(self.activate.clone());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_hides_selection_keys_when_not_selectable() {
        let b = DataTableBindings::default();
        let keys: Vec<String> = b.help(false).into_iter().map(|b| b.help_key).collect();
        assert_eq!(keys, ["s", "enter"]);
        assert_eq!(b.help(true).len(), 5);
    }
}
