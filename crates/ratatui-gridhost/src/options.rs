use ratatui_gridhost_core::column::Align;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderOptions {
    pub align: Align,
}

/// Configuration handed to the grid alongside columns and rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridOptions {
    /// Show a leading checkbox column for row selection.
    pub show_row_selector: bool,
    pub header: HeaderOptions,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            show_row_selector: true,
            header: HeaderOptions {
                align: Align::Center,
            },
        }
    }
}

/// Options for [`crate::host::GridHost`].
///
/// `width`, `height` and `row_height` are only starting values; the container measurement and
/// the grid's scroll-size callbacks overwrite them.
#[derive(Clone, Debug, PartialEq)]
pub struct GridHostOptions {
    pub width: u16,
    pub height: u16,
    pub row_height: f64,
    pub grid: GridOptions,
}

impl Default for GridHostOptions {
    fn default() -> Self {
        Self {
            width: 300,
            height: 300,
            row_height: 24.0,
            grid: GridOptions::default(),
        }
    }
}
