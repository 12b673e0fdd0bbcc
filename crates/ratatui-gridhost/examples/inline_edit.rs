use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Widget;
use ratatui_gridhost::crossterm_input::input_event_from_crossterm;
use ratatui_gridhost::editor::CellEditor;
use ratatui_gridhost::event::GridEvent;
use ratatui_gridhost::event::GridSelection;
use ratatui_gridhost::event::ScrollEvent;
use ratatui_gridhost::event::ScrollSizeEvent;
use ratatui_gridhost::event::SelectedEvent;
use ratatui_gridhost::geometry::Cell;
use ratatui_gridhost::geometry::Point;
use ratatui_gridhost::host::GridHost;
use ratatui_gridhost::host::MountedGridHost;
use ratatui_gridhost::input::InputEvent;
use ratatui_gridhost::input::KeyCode;
use ratatui_gridhost::input::KeyEvent;
use ratatui_gridhost::input::MouseButton;
use ratatui_gridhost::input::MouseEvent;
use ratatui_gridhost::input::MouseEventKind;
use ratatui_gridhost::keymap;
use ratatui_gridhost::keymap::Binding;
use ratatui_gridhost::options::GridHostOptions;
use ratatui_gridhost::page::inline_edit_page;
use ratatui_gridhost::resize::ContainerRect;
use ratatui_gridhost::resize::ResizeBus;
use ratatui_gridhost::selection::SelectionOverlay;
use ratatui_gridhost::selection::SelectionOverlayProps;
use ratatui_gridhost::session::ActivationTrigger;
use ratatui_gridhost::session::EditSession;
use ratatui_gridhost::targets;
use ratatui_gridhost::theme::Theme;
use ratatui_gridhost::view::GridView;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::io;
use std::rc::Rc;
use std::time::Duration;
use std::time::Instant;

const INTRO: &str = "Columns with an editor are editable. Enter or double-click opens it; \
                     date/select/search/checkbox columns open as soon as they are focused.";
const DOUBLE_CLICK: Duration = Duration::from_millis(400);

fn main() -> io::Result<()> {
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(io::stderr)
            .init();
    }

    let host = inline_edit_page()
        .into_host(GridHostOptions::default())
        .map_err(io::Error::other)?;
    let bus = ResizeBus::new();
    let container = ContainerRect::new(Rect::new(0, 0, 300, 300));
    let mounted = host.mount(&bus, container.clone());

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(mounted, bus, container);
    let res = app.run(&mut terminal);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    res
}

struct Bindings {
    add: Binding,
    remove: Binding,
    top: Binding,
    toggle: Binding,
    quit: Binding,
}

impl Bindings {
    fn new() -> Self {
        Self {
            add: Binding::new("a", "add item", vec![keymap::key_char('a')]),
            remove: Binding::new("d", "remove item", vec![keymap::key_char('d')]),
            top: Binding::new("t", "scroll top (0)", vec![keymap::key_char('t')]),
            toggle: Binding::new("space", "select row", vec![keymap::key_char(' ')]),
            quit: Binding::new(
                "q",
                "quit",
                vec![keymap::key_char('q'), keymap::key_ctrl('c')],
            ),
        }
    }

    fn help(&self) -> String {
        let all = [
            self.add.clone(),
            self.remove.clone(),
            self.top.clone(),
            self.toggle.clone(),
            self.quit.clone(),
        ];
        format!(
            "{} • arrows move • enter edit • tab leave cell",
            keymap::help_line(&all)
        )
    }
}

/// Plays the grid's part: turns terminal input into grid callbacks and edit-session calls.
struct App {
    mounted: MountedGridHost,
    bus: ResizeBus,
    container: ContainerRect,
    view: GridView,
    session: EditSession,
    overlay: SelectionOverlay,
    theme: Theme,
    bindings: Bindings,
    checked: BTreeSet<usize>,
    grid_area: Rect,
    resize_pending: bool,
    drag_from: Option<Cell>,
    last_click: Option<(Instant, u16, u16)>,
}

impl App {
    fn new(mounted: MountedGridHost, bus: ResizeBus, container: ContainerRect) -> Self {
        Self {
            mounted,
            bus,
            container,
            view: GridView::new(),
            session: EditSession::new(),
            overlay: SelectionOverlay::new(),
            theme: Theme::default(),
            bindings: Bindings::new(),
            checked: BTreeSet::new(),
            grid_area: Rect::default(),
            resize_pending: true,
            drag_from: None,
            last_click: None,
        }
    }

    fn host(&self) -> Rc<RefCell<GridHost>> {
        self.mounted.host().clone()
    }

    fn run<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| {
                let area = f.area();
                self.draw(area, f.buffer_mut());
            })?;
            self.report_scroll_size();

            if !crossterm::event::poll(Duration::from_millis(50))? {
                continue;
            }
            let Some(ev) = input_event_from_crossterm(crossterm::event::read()?) else {
                continue;
            };
            match ev {
                InputEvent::Key(key) => {
                    if self.on_key(&key) {
                        return Ok(());
                    }
                }
                InputEvent::Mouse(m) => self.on_mouse(m),
                // re-measured against the new layout on the next draw
                InputEvent::Resize { .. } => self.resize_pending = true,
                InputEvent::Paste(_) => {}
            }
        }
    }

    fn draw(&mut self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().title("Inline Edit").borders(Borders::ALL);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 5 {
            return;
        }

        let intro = Rect::new(inner.x, inner.y, inner.width, 1);
        self.grid_area = Rect::new(inner.x, inner.y + 2, inner.width, inner.height - 4);
        let help = Rect::new(inner.x, inner.bottom() - 2, inner.width, 1);
        let status = Rect::new(inner.x, inner.bottom() - 1, inner.width, 1);

        self.container.set(self.grid_area);
        if self.resize_pending {
            self.resize_pending = false;
            self.bus.emit();
        }

        let host = self.host();
        let mut host = host.borrow_mut();
        host.set_height(self.grid_area.height);

        let props = host.props();
        let grid = Rect {
            width: props.width.min(self.grid_area.width),
            ..self.grid_area
        };
        self.view
            .render_ref(grid, buf, &props, &self.session, &self.theme);
        self.overlay
            .render_ref(GridView::body_area(grid), buf, &self.theme);

        buf.set_span(
            intro.x,
            intro.y,
            &Span::styled(INTRO, self.theme.text_muted),
            intro.width,
        );
        buf.set_span(
            help.x,
            help.y,
            &Span::styled(self.bindings.help(), self.theme.text_muted),
            help.width,
        );

        let focused = host
            .selection()
            .focused_cell()
            .map(|c| format!("r{} c{}", c.row, c.col))
            .unwrap_or_else(|| "-".to_string());
        let editing = if self.session.is_editing() { "editing" } else { "idle" };
        let line = format!(
            "rows={}  selected={:?}  focus={focused}  scroll_top={}  {editing}",
            host.rows().len(),
            host.selected_indexes(),
            host.scroll_top(),
        );
        buf.set_span(
            status.x,
            status.y,
            &Span::styled(line, self.theme.accent),
            status.width,
        );
    }

    fn body_height(&self) -> u16 {
        GridView::body_area(self.grid_area).height
    }

    /// Reports content height (one line per row) and resolves a "scroll to bottom" request.
    fn report_scroll_size(&mut self) {
        let host = self.host();
        let mut host = host.borrow_mut();
        let content = host.rows().len() as f64;
        if host.scroll_content_height() != content || host.row_height() != 1.0 {
            host.handle_event(GridEvent::ChangeScrollSize(ScrollSizeEvent {
                scroll_content_height: Some(content),
                body_tr_height: Some(1.0),
            }));
        }
        if host.scroll_top() < 0.0 {
            let first = GridView::first_row(&host.props(), self.body_height());
            host.handle_event(GridEvent::Scroll(ScrollEvent {
                scroll_top: first as f64,
            }));
        }
    }

    fn on_key(&mut self, key: &KeyEvent) -> bool {
        if self.session.is_editing() {
            if key.code == KeyCode::Tab {
                self.session.reset();
                let dc = if key.modifiers.shift { -1 } else { 1 };
                self.move_focus(0, dc);
                return false;
            }
            if let Some(editor) = self.editing_editor() {
                self.session.dispatch_key(editor.as_ref(), key);
                self.apply_commits();
            }
            return false;
        }

        if self.bindings.quit.matches(key) {
            return true;
        }
        if self.bindings.add.matches(key) {
            self.session.reset();
            self.host().borrow_mut().add_row();
            self.activate_focused(ActivationTrigger::Focus);
        } else if self.bindings.remove.matches(key) {
            self.session.reset();
            self.host().borrow_mut().remove_rows();
            self.checked.clear();
        } else if self.bindings.top.matches(key) {
            self.host().borrow_mut().scroll_to_top();
        } else if self.bindings.toggle.matches(key) {
            let row = self.host().borrow().selection().focused_cell().map(|c| c.row);
            if let Some(row) = row {
                self.toggle_checked(row);
            }
        } else {
            match key.code {
                KeyCode::Up => self.move_focus(-1, 0),
                KeyCode::Down => self.move_focus(1, 0),
                KeyCode::Left => self.move_focus(0, -1),
                KeyCode::Right | KeyCode::Tab => self.move_focus(0, 1),
                KeyCode::Enter => self.activate_focused(ActivationTrigger::Enter),
                KeyCode::PageUp => self.scroll_by(-(self.body_height() as f64)),
                KeyCode::PageDown => self.scroll_by(self.body_height() as f64),
                _ => {}
            }
        }
        false
    }

    fn on_mouse(&mut self, m: MouseEvent) {
        let host = self.host();
        let area = self.grid_area;
        let body = GridView::body_area(area);
        let local = Point::new(
            i32::from(m.x) - i32::from(body.x),
            i32::from(m.y) - i32::from(body.y),
        );

        match m.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let (selector, cell) = {
                    let host = host.borrow();
                    let props = host.props();
                    (
                        self.view.selector_at(area, &props, m.x, m.y),
                        self.view.cell_at(area, &props, m.x, m.y),
                    )
                };
                if let Some(row) = selector {
                    self.toggle_checked(row);
                    return;
                }
                let Some(cell) = cell else {
                    return;
                };

                let now = Instant::now();
                let double = self.last_click.is_some_and(|(at, x, y)| {
                    x == m.x && y == m.y && now.duration_since(at) <= DOUBLE_CLICK
                });
                self.last_click = Some((now, m.x, m.y));
                if double {
                    self.activate(cell, ActivationTrigger::DoubleClick);
                    return;
                }

                self.focus(cell);
                self.drag_from = Some(cell);
                self.overlay
                    .set_props(SelectionOverlayProps::new(true, local, local));
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.drag_from.is_some() {
                    let start = self.overlay.props().start;
                    self.overlay
                        .set_props(SelectionOverlayProps::new(true, start, local));
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.overlay.set_props(SelectionOverlayProps::idle());
                let Some(from) = self.drag_from.take() else {
                    return;
                };
                let to = {
                    let host = host.borrow();
                    self.view.cell_at(area, &host.props(), m.x, m.y)
                };
                if let Some(to) = to.filter(|to| *to != from) {
                    host.borrow_mut()
                        .handle_event(GridEvent::ChangeSelection(GridSelection {
                            rows: span(from.row, to.row),
                            cols: span(from.col, to.col),
                            focused_row: from.row as i64,
                            focused_col: from.col as i64,
                        }));
                }
            }
            MouseEventKind::ScrollUp => self.scroll_by(-3.0),
            MouseEventKind::ScrollDown => self.scroll_by(3.0),
            MouseEventKind::DoubleClick(_)
            | MouseEventKind::Down(_)
            | MouseEventKind::Drag(_)
            | MouseEventKind::Up(_) => {}
        }
    }

    fn toggle_checked(&mut self, row: usize) {
        if !self.checked.remove(&row) {
            self.checked.insert(row);
        }
        self.host()
            .borrow_mut()
            .handle_event(GridEvent::ChangeSelected(SelectedEvent {
                selected_indexes: self.checked.iter().copied().collect(),
            }));
    }

    fn scroll_by(&mut self, delta: f64) {
        let host = self.host();
        let mut host = host.borrow_mut();
        let max = host.rows().len().saturating_sub(self.body_height() as usize) as f64;
        let next = (host.scroll_top().max(0.0) + delta).clamp(0.0, max);
        host.handle_event(GridEvent::Scroll(ScrollEvent { scroll_top: next }));
    }

    fn move_focus(&mut self, dr: i64, dc: i64) {
        let (rows, cols, current) = {
            let host = self.host();
            let host = host.borrow();
            (
                host.rows().len() as i64,
                host.columns().len() as i64,
                host.selection().focused_cell(),
            )
        };
        if rows == 0 || cols == 0 {
            return;
        }
        let next = match current {
            Some(c) => Cell::new(
                (c.row as i64 + dr).clamp(0, rows - 1) as usize,
                (c.col as i64 + dc).clamp(0, cols - 1) as usize,
            ),
            None => Cell::new(0, 0),
        };
        self.focus(next);
    }

    /// Moves focus to `cell`, scrolls it into view, and opens `Always` editors.
    fn focus(&mut self, cell: Cell) {
        if self.session.cell() != Some(cell) {
            self.session.reset();
        }
        {
            let host = self.host();
            let mut host = host.borrow_mut();
            host.handle_event(GridEvent::ChangeSelection(GridSelection::focus(cell)));

            let first = host.scroll_top().max(0.0) as usize;
            let height = self.body_height().max(1) as usize;
            let scroll_top = if cell.row < first {
                Some(cell.row)
            } else if cell.row >= first + height {
                Some(cell.row + 1 - height)
            } else {
                None
            };
            if let Some(top) = scroll_top {
                host.handle_event(GridEvent::Scroll(ScrollEvent {
                    scroll_top: top as f64,
                }));
            }
        }
        self.activate(cell, ActivationTrigger::Focus);
    }

    fn activate_focused(&mut self, trigger: ActivationTrigger) {
        let cell = self.host().borrow().selection().focused_cell();
        if let Some(cell) = cell {
            self.activate(cell, trigger);
        }
    }

    fn activate(&mut self, cell: Cell, trigger: ActivationTrigger) {
        let host = self.host();
        let host = host.borrow();
        let Some(column) = host.columns().get(cell.col) else {
            return;
        };
        let (Some(spec), Some(row)) = (&column.editor, host.rows().get(cell.row)) else {
            return;
        };
        let value = row.get(&column.key).clone();
        self.session.activate(cell, spec, trigger, value);
    }

    fn editing_editor(&self) -> Option<Rc<dyn CellEditor>> {
        let cell = self.session.cell()?;
        let host = self.host();
        let host = host.borrow();
        let spec = host.columns().get(cell.col)?.editor.as_ref()?;
        Some(spec.editor())
    }

    fn apply_commits(&mut self) {
        let host = self.host();
        let mut host = host.borrow_mut();
        for commit in self.session.take_commits() {
            if let Err(err) = host.apply_commit(commit) {
                tracing::warn!(target: targets::HOST, %err, "commit rejected");
            }
        }
    }
}

fn span(a: usize, b: usize) -> Vec<usize> {
    (a.min(b)..=a.max(b)).collect()
}
