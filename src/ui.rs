use anyhow::Result;
use arboard::Clipboard;
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::ops::Range;
use std::time::{Duration, Instant};
use tally_board::{
    CellPos, ColumnTotals, Mode, Session, StrokeState, TallyError, TallyResult, SLOT_COUNT,
};
use tracing::{info, warn};

/// Width of the row label gutter
const LABEL_WIDTH: u16 = 11;
/// Four characters of value plus one separator
const CELL_WIDTH: u16 = 5;
/// How long "Copied!" stays up
const COPIED_FEEDBACK: Duration = Duration::from_secs(2);
const TICK: Duration = Duration::from_millis(250);
const WHEEL_STEP: usize = 3;
/// Horizontal wheel moves a half-hour pair at a time
const COLUMN_STEP: isize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Board,
    Summary,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Board => Page::Summary,
            Page::Summary => Page::Board,
        }
    }

    pub fn previous(&self) -> Self {
        // two pages: same as next
        self.next()
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Board => "Board",
            Page::Summary => "Summary",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    ConfirmClear,
    Notice(String),
}

/// Clickable parts of the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderTarget {
    Mode(Mode),
    Shift,
    Clear,
    Page,
}

/// Where the copied summary goes
pub trait ClipboardSink {
    fn set_text(&mut self, text: String) -> TallyResult<()>;
}

/// System clipboard, opened on first copy and kept open afterwards
#[derive(Default)]
pub struct SystemClipboard {
    handle: Option<Clipboard>,
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: String) -> TallyResult<()> {
        let mut clipboard = match self.handle.take() {
            Some(clipboard) => clipboard,
            None => Clipboard::new().map_err(|e| TallyError::Clipboard(e.to_string()))?,
        };
        let result = clipboard
            .set_text(text)
            .map_err(|e| TallyError::Clipboard(e.to_string()));
        // keep the handle alive: on X11 the selection dies with it
        self.handle = Some(clipboard);
        result
    }
}

/// One display line of the board body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridLine {
    Counter { row: usize, last_in_zone: bool },
    Subtotal { zone: usize },
    Total,
    Motor { row: usize },
}

/// Counter rows zone by zone, each zone closed by its subtotal,
/// then the car total and the motorbike row
pub fn grid_lines(mode: Mode) -> Vec<GridLine> {
    let mut lines = Vec::with_capacity(mode.total_rows() + mode.zone_sizes().len() + 1);

    for (zone, range) in mode.zone_ranges().into_iter().enumerate() {
        let last = range.end - 1;
        for row in range {
            lines.push(GridLine::Counter {
                row,
                last_in_zone: row == last,
            });
        }
        lines.push(GridLine::Subtotal { zone });
    }

    lines.push(GridLine::Total);
    lines.push(GridLine::Motor {
        row: mode.motor_row(),
    });
    lines
}

/// Whole time-slot columns that fit beside the label gutter
pub fn visible_cols(area: Rect) -> usize {
    ((area.width.saturating_sub(LABEL_WIDTH) / CELL_WIDTH) as usize).clamp(1, SLOT_COUNT)
}

/// Map a terminal position inside the grid area to a cell.
/// The first line of `area` is the column header; `scroll` is the index of
/// the first body line shown under it, `col_scroll` the first slot column.
pub fn cell_at(
    area: Rect,
    lines: &[GridLine],
    scroll: usize,
    col_scroll: usize,
    x: u16,
    y: u16,
) -> Option<CellPos> {
    if x < area.x + LABEL_WIDTH || x >= area.x + area.width {
        return None;
    }
    if y <= area.y || y >= area.y + area.height {
        return None;
    }

    let visible = ((x - area.x - LABEL_WIDTH) / CELL_WIDTH) as usize;
    if visible >= visible_cols(area) {
        return None;
    }
    let col = col_scroll + visible;
    if col >= SLOT_COUNT {
        return None;
    }

    let index = scroll + (y - area.y - 1) as usize;
    match lines.get(index)? {
        GridLine::Counter { row, .. } | GridLine::Motor { row } => Some(CellPos::new(*row, col)),
        GridLine::Subtotal { .. } | GridLine::Total => None,
    }
}

pub struct App {
    pub session: Session,
    pub current_page: Page,
    pub cursor: CellPos,
    pub scroll: usize,
    /// First slot column drawn when the terminal is too narrow for all 24
    pub col_scroll: usize,
    pub summary_scroll: u16,
    pub dialog: Option<Dialog>,
    pub copied_until: Option<Instant>,
    pub should_quit: bool,
    /// Inner grid area of the last frame, for mouse hit-testing
    pub grid_area: Rect,
    /// Summary body height of the last frame
    pub summary_height: usize,
    /// Clickable header parts of the last frame: (target, x start, x end, y)
    header_regions: Vec<(HeaderTarget, u16, u16, u16)>,
    clipboard: Box<dyn ClipboardSink>,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self::with_clipboard(session, Box::new(SystemClipboard::default()))
    }

    pub fn with_clipboard(session: Session, clipboard: Box<dyn ClipboardSink>) -> Self {
        Self {
            session,
            current_page: Page::Board,
            cursor: CellPos::new(0, 0),
            scroll: 0,
            col_scroll: 0,
            summary_scroll: 0,
            dialog: None,
            copied_until: None,
            should_quit: false,
            grid_area: Rect::default(),
            summary_height: 0,
            header_regions: Vec::new(),
            clipboard,
        }
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    pub fn switch_mode(&mut self, mode: Mode) {
        self.session.set_mode(mode);
        let last_row = mode.total_rows() - 1;
        if self.cursor.row > last_row {
            self.cursor.row = last_row;
        }
        self.summary_scroll = 0;
        self.scroll_to_cursor();
    }

    pub fn toggle_shift(&mut self) {
        let shift = self.session.shift().toggled();
        self.session.set_shift(shift);
    }

    pub fn copied_visible(&self) -> bool {
        self.copied_until.is_some_and(|until| Instant::now() < until)
    }

    /// Called once per loop iteration
    pub fn tick(&mut self) {
        if self.copied_until.is_some() && !self.copied_visible() {
            self.copied_until = None;
        }
    }

    fn body_height(&self) -> usize {
        self.grid_area.height.saturating_sub(1) as usize
    }

    fn max_scroll(&self) -> usize {
        grid_lines(self.session.mode())
            .len()
            .saturating_sub(self.body_height())
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let next = self.scroll as isize + delta;
        self.scroll = next.clamp(0, self.max_scroll() as isize) as usize;
    }

    fn max_col_scroll(&self) -> usize {
        SLOT_COUNT - visible_cols(self.grid_area)
    }

    pub fn scroll_cols_by(&mut self, delta: isize) {
        let next = self.col_scroll as isize + delta;
        self.col_scroll = next.clamp(0, self.max_col_scroll() as isize) as usize;
    }

    fn max_summary_scroll(&mut self) -> u16 {
        let lines = self.session.summary().lines().count();
        lines
            .saturating_sub(self.summary_height)
            .min(u16::MAX as usize) as u16
    }

    pub fn scroll_summary(&mut self, delta: isize) {
        let max = self.max_summary_scroll() as isize;
        self.summary_scroll = (self.summary_scroll as isize + delta).clamp(0, max) as u16;
    }

    /// Keep the keyboard cursor inside the visible body
    pub fn scroll_to_cursor(&mut self) {
        if self.grid_area.width > 0 {
            let visible = visible_cols(self.grid_area);
            if self.cursor.col < self.col_scroll {
                self.col_scroll = self.cursor.col;
            } else if self.cursor.col >= self.col_scroll + visible {
                self.col_scroll = self.cursor.col + 1 - visible;
            }
        }

        let height = self.body_height();
        if height == 0 {
            return;
        }
        let lines = grid_lines(self.session.mode());
        let Some(index) = lines.iter().position(|line| match line {
            GridLine::Counter { row, .. } | GridLine::Motor { row } => *row == self.cursor.row,
            _ => false,
        }) else {
            return;
        };

        if index < self.scroll {
            self.scroll = index;
        } else if index >= self.scroll + height {
            self.scroll = index + 1 - height;
        }
    }

    pub fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let rows = self.session.mode().total_rows() as isize;
        let row = (self.cursor.row as isize + d_row).clamp(0, rows - 1);
        let col = (self.cursor.col as isize + d_col).clamp(0, SLOT_COUNT as isize - 1);
        self.cursor = CellPos::new(row as usize, col as usize);
        self.scroll_to_cursor();
    }

    pub fn toggle_at_cursor(&mut self) {
        self.session.toggle_cell(self.cursor);
    }

    pub fn request_clear(&mut self) {
        self.session.end_stroke();
        self.dialog = Some(Dialog::ConfirmClear);
    }

    fn confirm_clear(&mut self) {
        self.session.clear_current();
        self.dialog = Some(Dialog::Notice(format!(
            "{} data cleared successfully!",
            self.session.mode().title()
        )));
    }

    pub fn copy_summary(&mut self) {
        let text = self.session.summary();
        match self.clipboard.set_text(text) {
            Ok(()) => {
                info!(mode = self.session.mode().as_str(), "Summary copied");
                self.copied_until = Some(Instant::now() + COPIED_FEEDBACK);
            }
            Err(e) => {
                warn!(error = %e, "Clipboard write failed");
                self.dialog = Some(Dialog::Notice(format!("Copy failed: {}", e)));
            }
        }
    }

    fn header_target_at(&self, x: u16, y: u16) -> Option<HeaderTarget> {
        self.header_regions
            .iter()
            .find(|(_, start, end, row)| y == *row && x >= *start && x < *end)
            .map(|(target, ..)| *target)
    }

    fn activate(&mut self, target: HeaderTarget) {
        match target {
            HeaderTarget::Mode(mode) => self.switch_mode(mode),
            HeaderTarget::Shift => self.toggle_shift(),
            HeaderTarget::Clear => self.request_clear(),
            HeaderTarget::Page => self.next_page(),
        }
    }

    fn cell_at(&self, x: u16, y: u16) -> Option<CellPos> {
        if self.current_page != Page::Board {
            return None;
        }
        let lines = grid_lines(self.session.mode());
        cell_at(self.grid_area, &lines, self.scroll, self.col_scroll, x, y)
    }

    // ========================================================================
    // INPUT
    // ========================================================================

    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(dialog) = self.dialog.clone() {
            match dialog {
                Dialog::ConfirmClear => match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') => self.confirm_clear(),
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.dialog = None,
                    _ => {}
                },
                Dialog::Notice(_) => self.dialog = None,
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.session.end_stroke();
                self.should_quit = true;
            }
            KeyCode::Tab => self.next_page(),
            KeyCode::BackTab => self.previous_page(),
            KeyCode::Char('a') | KeyCode::Char('1') => self.switch_mode(Mode::Arrival),
            KeyCode::Char('d') | KeyCode::Char('2') => self.switch_mode(Mode::Departure),
            KeyCode::Char('s') => self.toggle_shift(),
            KeyCode::Char('x') => self.request_clear(),
            KeyCode::Char('c') => self.copy_summary(),
            _ => match self.current_page {
                Page::Board => self.handle_board_key(key),
                Page::Summary => self.handle_summary_key(key),
            },
        }
    }

    fn handle_board_key(&mut self, key: KeyEvent) {
        let step = if key.modifiers.contains(KeyModifiers::SHIFT) { 2 } else { 1 };
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, step),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -step),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_at_cursor(),
            KeyCode::PageDown => self.scroll_by(self.body_height().max(1) as isize),
            KeyCode::PageUp => self.scroll_by(-(self.body_height().max(1) as isize)),
            KeyCode::Home => {
                self.scroll = 0;
                self.col_scroll = 0;
            }
            KeyCode::End => self.scroll = self.max_scroll(),
            _ => {}
        }
    }

    fn handle_summary_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.scroll_summary(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_summary(-1),
            KeyCode::PageDown => self.scroll_summary(self.summary_height.max(1) as isize),
            KeyCode::PageUp => self.scroll_summary(-(self.summary_height.max(1) as isize)),
            KeyCode::Home => self.summary_scroll = 0,
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.dialog.is_some() {
            return;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(target) = self.header_target_at(mouse.column, mouse.row) {
                    self.activate(target);
                } else if let Some(cell) = self.cell_at(mouse.column, mouse.row) {
                    self.cursor = cell;
                    self.session.begin_stroke(cell);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.session.is_stroke_active() {
                    if let Some(cell) = self.cell_at(mouse.column, mouse.row) {
                        self.session.extend_stroke(cell);
                    }
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.session.end_stroke(),
            MouseEventKind::ScrollDown => match self.current_page {
                Page::Board => self.scroll_by(WHEEL_STEP as isize),
                Page::Summary => self.scroll_summary(WHEEL_STEP as isize),
            },
            MouseEventKind::ScrollUp => match self.current_page {
                Page::Board => self.scroll_by(-(WHEEL_STEP as isize)),
                Page::Summary => self.scroll_summary(-(WHEEL_STEP as isize)),
            },
            MouseEventKind::ScrollRight => self.scroll_cols_by(COLUMN_STEP),
            MouseEventKind::ScrollLeft => self.scroll_cols_by(-COLUMN_STEP),
            _ => {}
        }
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        // poll so the copy feedback can expire without input
        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::FocusLost => app.session.end_stroke(),
                _ => {}
            }
        }

        app.tick();
        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Mode tabs + shift
            Constraint::Min(0),    // Board or summary
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Board => render_board(f, chunks[1], app),
        Page::Summary => render_summary(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);

    if let Some(dialog) = &app.dialog {
        render_dialog(f, dialog, app.session.mode());
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &mut App) {
    let current = app.session.mode();
    let mut spans = vec![];
    let mut regions = vec![];
    // inside the left border
    let mut x = area.x + 1;
    let y = area.y + 1;

    let mut push = |text: String, style: Style, target: Option<HeaderTarget>| {
        let width = text.chars().count() as u16;
        if let Some(target) = target {
            regions.push((target, x, x + width, y));
        }
        x += width;
        spans.push(Span::styled(text, style));
    };

    for (i, mode) in Mode::ALL.iter().enumerate() {
        if i > 0 {
            push(" │ ".to_string(), Style::default(), None);
        }

        let style = if *mode == current {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        push(mode.title().to_string(), style, Some(HeaderTarget::Mode(*mode)));
    }

    push("  |  ".to_string(), Style::default(), None);
    push(
        format!("Shift: {}", app.session.shift().title()),
        Style::default().fg(Color::White),
        Some(HeaderTarget::Shift),
    );
    push("  |  ".to_string(), Style::default(), None);
    push(
        format!("Clear All ({})", current.title()),
        Style::default().fg(Color::Red),
        Some(HeaderTarget::Clear),
    );
    push("  |  ".to_string(), Style::default(), None);
    push(
        app.current_page.title().to_string(),
        Style::default().fg(Color::Cyan),
        Some(HeaderTarget::Page),
    );

    app.header_regions = regions;

    let header = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

/// Heavy rule between half-hour pairs, light inside a pair
fn separator(col: usize) -> Span<'static> {
    if col % 2 == 1 {
        Span::styled("┃", Style::default().fg(Color::White))
    } else {
        Span::styled("┆", Style::default().fg(Color::DarkGray))
    }
}

fn label(text: String, style: Style) -> Span<'static> {
    Span::styled(format!("{:<width$}", text, width = LABEL_WIDTH as usize), style)
}

fn render_board(f: &mut Frame, area: Rect, app: &mut App) {
    let mode = app.session.mode();
    let inner = Block::default().borders(Borders::ALL).inner(area);
    app.grid_area = inner;

    let lines = grid_lines(mode);
    let body_height = inner.height.saturating_sub(1) as usize;
    app.scroll = app.scroll.min(lines.len().saturating_sub(body_height));
    let cols = visible_cols(inner);
    app.col_scroll = app.col_scroll.min(SLOT_COUNT - cols);
    let shown = app.col_scroll..app.col_scroll + cols;

    let headers = app.session.column_headers().to_vec();
    let totals = app.session.totals();
    let matrix = app.session.current_matrix().clone();
    let cursor = app.cursor;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(format!(
            " {} · {} · {}-{} ",
            mode.title(),
            app.session.shift().title(),
            headers[shown.start],
            headers[shown.end - 1]
        ));

    let mut text = Vec::with_capacity(body_height + 1);

    let mut header_spans = vec![label(String::new(), Style::default())];
    for (col, h) in headers.iter().enumerate().skip(shown.start).take(cols) {
        header_spans.push(Span::styled(
            format!("{:>4}", h),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        header_spans.push(separator(col));
    }
    text.push(Line::from(header_spans));

    for line in lines.iter().skip(app.scroll).take(body_height) {
        let spans = match *line {
            GridLine::Counter { row, last_in_zone } => {
                let extra = if last_in_zone {
                    Modifier::UNDERLINED
                } else {
                    Modifier::empty()
                };
                cell_spans(
                    label(format!("{:>4}", row + 1), Style::default().fg(Color::Gray)),
                    &matrix.rows()[row],
                    shown.clone(),
                    (cursor.row == row).then_some(cursor.col),
                    extra,
                )
            }
            GridLine::Motor { row } => cell_spans(
                label(
                    format!("{:>4} Motor", row + 1),
                    Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
                ),
                &matrix.rows()[row],
                shown.clone(),
                (cursor.row == row).then_some(cursor.col),
                Modifier::empty(),
            ),
            GridLine::Subtotal { zone } => total_spans(
                label(format!("Zone {}", zone + 1), Style::default().fg(Color::Yellow)),
                &totals[shown.clone()],
                shown.start,
                |t| t.zone_subtotals.get(zone).copied().unwrap_or(0),
                Style::default().fg(Color::Yellow),
            ),
            GridLine::Total => total_spans(
                label("Total(Car)".to_string(), Style::default().fg(Color::Cyan)),
                &totals[shown.clone()],
                shown.start,
                |t| t.cars,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        };
        text.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(text).block(block), area);
}

fn cell_spans(
    gutter: Span<'static>,
    values: &[u8],
    shown: Range<usize>,
    cursor_col: Option<usize>,
    extra: Modifier,
) -> Vec<Span<'static>> {
    let mut spans = vec![gutter];
    for col in shown {
        let value = &values[col];
        let mut style = if *value == 1 {
            Style::default().fg(Color::White).bg(Color::Blue)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        style = style.add_modifier(extra);
        if cursor_col == Some(col) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        spans.push(Span::styled(format!("{:^4}", value), style));
        spans.push(separator(col));
    }
    spans
}

fn total_spans(
    gutter: Span<'static>,
    totals: &[ColumnTotals],
    first_col: usize,
    value: impl Fn(&ColumnTotals) -> u32,
    style: Style,
) -> Vec<Span<'static>> {
    let mut spans = vec![gutter];
    for (col, column) in (first_col..).zip(totals) {
        spans.push(Span::styled(format!("{:^4}", value(column)), style));
        spans.push(separator(col));
    }
    spans
}

fn render_summary(f: &mut Frame, area: Rect, app: &mut App) {
    app.summary_height = area.height.saturating_sub(2) as usize;
    let max = app.max_summary_scroll();
    app.summary_scroll = app.summary_scroll.min(max);
    let text = app.session.summary();

    let summary = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(
                    " Summary ({}) ",
                    app.session.mode().summary_prefix()
                )),
        )
        .scroll((app.summary_scroll, 0));

    f.render_widget(summary, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let cursor = app.cursor;
    let mut status_spans = vec![Span::styled(
        format!(
            " Cell: {}/{} ",
            cursor.row + 1,
            app.session.column_headers()[cursor.col]
        ),
        Style::default().fg(Color::Cyan),
    )];

    let stroke = app.session.stroke_state();
    if let Some(origin) = stroke.origin() {
        let axis = match stroke {
            StrokeState::Horizontal { .. } => "along row",
            StrokeState::Vertical { .. } => "down column",
            _ => "pick a direction",
        };
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(
            format!(
                "Painting from {}/{} ({})",
                origin.row + 1,
                app.session.column_headers()[origin.col],
                axis
            ),
            Style::default().fg(Color::Blue),
        ));
    }

    if app.copied_visible() {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(
            "Copied!",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ));
    }

    for (key, action) in [
        ("Space", " Toggle"),
        ("a/d", " Mode"),
        ("s", " Shift"),
        ("Tab", " Page"),
        ("c", " Copy"),
        ("x", " Clear"),
    ] {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(key, Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(action));
    }
    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn render_dialog(f: &mut Frame, dialog: &Dialog, mode: Mode) {
    let (title, body, hint, color) = match dialog {
        Dialog::ConfirmClear => (
            " Clear All ",
            format!(
                "Are you sure you want to clear all data for {}? This cannot be undone.",
                mode.title()
            ),
            "[y] Yes   [n] No",
            Color::Red,
        ),
        Dialog::Notice(message) => (" Notice ", message.clone(), "Press any key", Color::Yellow),
    };

    let area = centered_rect(50, 7, f.size());
    let text = vec![
        Line::from(body),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().fg(Color::Yellow))),
    ];
    let popup = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(title),
    );

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

/// Rect of `percent_x`% width and `height` lines centred in `r`
fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
