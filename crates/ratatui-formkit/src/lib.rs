//! Styled form inputs and a sortable, selectable data table for `ratatui`.
//!
//! This crate re-exports [`ratatui_formkit_core`] and adds app-level helpers such as the
//! [`help::HelpBar`]. Enable the `crossterm` feature to convert crossterm events with
//! [`crossterm_input`].
pub use ratatui_formkit_core::error;
pub use ratatui_formkit_core::input;
pub use ratatui_formkit_core::keymap;
pub use ratatui_formkit_core::render;
pub use ratatui_formkit_core::table;
pub use ratatui_formkit_core::text_input;
pub use ratatui_formkit_core::theme;
pub use ratatui_formkit_core::viewport;

#[cfg(feature = "crossterm")]
pub use ratatui_formkit_core::crossterm_input;

pub mod help;
