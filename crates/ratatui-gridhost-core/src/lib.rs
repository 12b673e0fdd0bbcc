//! `ratatui-gridhost-core` provides the building blocks behind an editable data-grid page.
//!
//! Most users should depend on the facade crate `ratatui-gridhost`, which adds the
//! [`GridHost`](https://docs.rs/ratatui-gridhost) state container on top of these primitives.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you feed [`input::InputEvent`]s in and render into a ratatui `Buffer`.
//! - Single-threaded: no async runtime, no locks.
//! - Editors are stateless: all edit state lives in [`session::EditSession`].
//!
//! Useful entry points:
//! - [`selection::SelectionOverlay`]: drag-selection rectangle.
//! - [`column::ColumnSpec`] / [`column::EditorSpec`]: column and editor descriptions.
//! - [`editor::CellEditor`]: the editor interface, with five stock implementations.
//! - [`session::EditSession`]: the edit-session contract editors talk to.
//!
//! ## Logging
//!
//! Components emit `tracing` events under the targets in [`targets`]. Install a subscriber in
//! your app to see them.
pub mod theme;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod geometry;
pub mod input;
pub mod keymap;
pub mod render;
pub mod selection;

pub mod column;
pub mod editor;
pub mod session;
pub mod value;

/// `tracing` targets used by this crate.
pub mod targets {
    pub const SELECTION: &str = "ratatui_gridhost::selection";
    pub const EDIT: &str = "ratatui_gridhost::edit";
}
