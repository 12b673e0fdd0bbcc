//! `ratatui-gridhost` hosts an editable data grid in a ratatui app.
//!
//! [`host::GridHost`] owns columns, rows, scroll and selection state, and applies the grid's
//! callbacks ([`event::GridEvent`]) as state transitions. [`view::GridView`] draws the
//! [`event::GridProps`] snapshot the host hands out, and [`selection::SelectionOverlay`] draws a
//! drag-selection box on top.
//!
//! The primitives (editors, edit session, values, input types) live in
//! `ratatui-gridhost-core` and are re-exported here.
//!
//! ```
//! use ratatui_gridhost::event::GridEvent;
//! use ratatui_gridhost::event::SelectedEvent;
//! use ratatui_gridhost::page::inline_edit_page;
//! use ratatui_gridhost::options::GridHostOptions;
//!
//! let mut host = inline_edit_page().into_host(GridHostOptions::default())?;
//! host.add_row();
//! assert_eq!(host.rows().len(), 7);
//!
//! host.handle_event(GridEvent::ChangeSelected(SelectedEvent { selected_indexes: vec![6] }));
//! host.remove_rows();
//! assert_eq!(host.rows().len(), 6);
//! # Ok::<(), ratatui_gridhost::error::GridError>(())
//! ```
pub use ratatui_gridhost_core::column;
pub use ratatui_gridhost_core::editor;
pub use ratatui_gridhost_core::geometry;
pub use ratatui_gridhost_core::input;
pub use ratatui_gridhost_core::keymap;
pub use ratatui_gridhost_core::render;
pub use ratatui_gridhost_core::selection;
pub use ratatui_gridhost_core::session;
pub use ratatui_gridhost_core::theme;
pub use ratatui_gridhost_core::value;

#[cfg(feature = "crossterm")]
pub use ratatui_gridhost_core::crossterm_input;

pub mod error;
pub mod event;
pub mod host;
pub mod options;
pub mod page;
pub mod resize;
pub mod view;

/// `tracing` targets used by this crate and `ratatui-gridhost-core`.
pub mod targets {
    pub use ratatui_gridhost_core::targets::EDIT;
    pub use ratatui_gridhost_core::targets::SELECTION;

    pub const HOST: &str = "ratatui_gridhost::host";
}
