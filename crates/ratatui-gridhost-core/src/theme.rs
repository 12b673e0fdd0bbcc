use ratatui::style::Style;

/// Styles shared by the grid snapshot renderer, the selection overlay, and cell editors.
///
/// This plays the role of a grid's CSS class map: components pick a named slot instead of
/// hard-coding colors.
#[derive(Clone, Debug)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    pub accent: Style,
    pub danger: Style,
    pub header: Style,
    pub focused_cell: Style,
    pub selected_row: Style,
    pub editing_cell: Style,
    pub cell_selector: Style,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default(),
            text_muted: Style::default().dark_gray(),
            accent: Style::default().cyan(),
            danger: Style::default().red(),
            header: Style::default().bold().cyan(),
            focused_cell: Style::default().reversed(),
            selected_row: Style::default().bold(),
            editing_cell: Style::default().black().on_yellow(),
            cell_selector: Style::default().on_blue(),
        }
    }
}
