//! `ratatui-formkit-core` provides the building blocks behind `ratatui-formkit`: a styled
//! single-line [`text_input::TextInput`] and a sortable, selectable [`table::DataTableView`].
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input + rendering from your app.
//! - No async runtime: all components run on the main thread.
//! - The table's sort/selection logic is usable without any rendering: see
//!   [`table::DataTable`] and the pure [`table::build_model`] orchestrator.
//!
//! ## Getting started
//!
//! Most users should depend on the facade crate `ratatui-formkit`. Use this crate directly if you
//! only need the core widgets/primitives.
//!
//! Useful entry points:
//! - [`table::DataTable`]: rows + columns + sort state + selection set, no rendering.
//! - [`table::DataTableView`]: keyboard/mouse driven widget over a [`table::DataTable`].
//! - [`text_input::TextInput`]: single-line input with password reveal and a clear affordance.
//!
//! ## Row data
//!
//! Tables are generic over the row type. Implement [`table::Record`] for your own structs, or use
//! the provided [`table::Row`] map, which deserializes from JSON objects.
pub mod error;
pub mod theme;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod input;
pub mod keymap;
pub mod render;
pub mod viewport;

pub mod table;
pub mod text_input;
