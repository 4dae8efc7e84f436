use ratatui::layout::{Position, Rect};
use tracing::{debug, info, trace, warn};

use colfilter::{Column, ColumnFilterHandlers, Filter, FilterIcon, MenuMessage, Theme};

use crate::domain::{AppError, Config, Message};

#[derive(Debug, PartialEq)]
pub enum Status {
    READY,
    QUITTING,
}

/// Owner of the per column filter lists. This is the "external collaborator"
/// side of the dropdown contract: it decides what an add, toggle or remove
/// actually does and treats every call as total.
pub struct FilterStore {
    pub columns: Vec<Column>,
}

impl FilterStore {
    fn column_mut(&mut self, column_id: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.key == column_id)
    }
}

impl ColumnFilterHandlers for FilterStore {
    fn on_add_column_filter(&mut self, column_id: &str, value: String) {
        let Some(column) = self.column_mut(column_id) else {
            warn!("Ignoring filter add for unknown column \"{column_id}\"");
            return;
        };
        debug!("Adding filter {:?} to column \"{column_id}\"", value);
        column.filters.get_or_insert_with(Vec::new).push(Filter::user(value));
    }

    fn on_remove_column_filter(&mut self, column_id: &str, index: usize) {
        let Some(filters) = self.column_mut(column_id).and_then(|c| c.filters.as_mut()) else {
            warn!("Ignoring filter remove on \"{column_id}\", no filter list");
            return;
        };
        match filters.get(index) {
            Some(filter) if filter.predefined => {
                warn!("Ignoring remove of predefined filter {index} on \"{column_id}\"");
            }
            Some(_) => {
                debug!("Removing filter {index} from column \"{column_id}\"");
                filters.remove(index);
            }
            None => warn!("Ignoring remove of unknown filter {index} on \"{column_id}\""),
        }
    }

    fn on_toggle_column_filter(&mut self, column_id: &str, index: usize) {
        let Some(filter) = self
            .column_mut(column_id)
            .and_then(|c| c.filters.as_mut())
            .and_then(|filters| filters.get_mut(index))
        else {
            warn!("Ignoring toggle of unknown filter {index} on \"{column_id}\"");
            return;
        };
        filter.enabled = !filter.enabled;
        debug!(
            "Filter {index} on \"{column_id}\" is now {}",
            if filter.enabled { "enabled" } else { "disabled" }
        );
    }
}

pub struct Model {
    config: Config,
    pub status: Status,
    pub theme: Theme,
    pub store: FilterStore,
    pub icons: Vec<FilterIcon>,
    pub widths: Vec<u16>,
    pub rows: Vec<Vec<String>>,
    pub visible_rows: Vec<usize>,
    pub cursor_column: usize,
    pub offset_row: usize,
    pub screen: Rect,
    pub header_cells: Vec<Rect>,
    pub triggers: Vec<Rect>,
    pub show_help: bool,
    pub status_message: String,
}

impl Model {
    pub fn init(config: &Config, width: u16, height: u16) -> Self {
        let columns = sample_columns();
        let rows = sample_rows();
        let widths = columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                Self::content_width(config, &column.key, rows.iter().map(|r| r[idx].as_str()))
            })
            .collect();
        let icons = columns.iter().map(|_| FilterIcon::new()).collect();

        let mut model = Model {
            config: config.clone(),
            status: Status::READY,
            theme: Theme::default(),
            store: FilterStore { columns },
            icons,
            widths,
            rows,
            visible_rows: Vec::new(),
            cursor_column: 0,
            offset_row: 0,
            screen: Rect::new(0, 0, width, height),
            header_cells: Vec::new(),
            triggers: Vec::new(),
            show_help: false,
            status_message: "Press ? for help".to_string(),
        };
        model.apply_filters();
        model.relayout();
        info!(
            "Prepared demo table with {} columns and {} rows",
            model.store.columns.len(),
            model.rows.len()
        );
        model
    }

    fn content_width<'a>(
        config: &Config,
        name: &str,
        cells: impl Iterator<Item = &'a str>,
    ) -> u16 {
        let widest = cells
            .map(|c| c.chars().count())
            .max()
            .unwrap_or(0)
            .max(name.chars().count()) as u16;
        // One extra cell for the trigger at the right edge
        (widest + 2).clamp(config.min_column_width, config.max_column_width)
    }

    pub fn update(&mut self, message: Message) -> Result<(), AppError> {
        match message {
            Message::Quit => self.status = Status::QUITTING,
            Message::Help => self.show_help = true,
            Message::Exit => self.show_help = false,
            Message::Resize(width, height) => {
                trace!(
                    "UI was resized! w:{}->{}, h:{}->{}",
                    self.screen.width, width, self.screen.height, height
                );
                self.screen = Rect::new(0, 0, width, height);
                self.clamp_scroll();
                self.relayout();
            }
            Message::SelectLeft => {
                self.cursor_column = self.cursor_column.saturating_sub(1);
            }
            Message::SelectRight => {
                self.cursor_column = (self.cursor_column + 1).min(self.store.columns.len() - 1);
            }
            Message::SelectColumn(idx) => {
                if idx < self.store.columns.len() {
                    self.cursor_column = idx;
                }
            }
            Message::ScrollUp => {
                self.offset_row = self.offset_row.saturating_sub(1);
            }
            Message::ScrollDown => {
                self.offset_row += 1;
                self.clamp_scroll();
            }
            Message::GrowColumn => {
                let width = &mut self.widths[self.cursor_column];
                *width = (*width + 2).min(self.config.max_column_width);
                self.relayout();
            }
            Message::ShrinkColumn => {
                let width = &mut self.widths[self.cursor_column];
                *width = width.saturating_sub(2).max(self.config.min_column_width);
                self.relayout();
            }
            Message::MoveColumnLeft => self.move_column(false),
            Message::MoveColumnRight => self.move_column(true),
            Message::Menu(idx, menu_message) => self.menu_message(idx, menu_message),
        }
        Ok(())
    }

    fn menu_message(&mut self, idx: usize, message: MenuMessage) {
        if idx >= self.store.columns.len() {
            warn!("Dropping menu message for unknown column {idx}");
            return;
        }
        // Hand the icon a snapshot of its column; the store receives the
        // mutations and the next frame renders the updated list.
        let column = self.store.columns[idx].clone();
        self.icons[idx].update(message, &column, &mut self.store);
        self.apply_filters();
        self.relayout();
    }

    fn move_column(&mut self, to_right: bool) {
        let from = self.cursor_column;
        let to = if to_right { from + 1 } else { from.wrapping_sub(1) };
        if to >= self.store.columns.len() {
            return;
        }
        self.store.columns.swap(from, to);
        self.icons.swap(from, to);
        self.widths.swap(from, to);
        for row in &mut self.rows {
            row.swap(from, to);
        }
        self.cursor_column = to;
        debug!("Moved column {from} to {to}");
        self.relayout();
    }

    /// Re-derive the visible row set from the enabled filters. A row stays
    /// visible when every filtered column matches at least one of its
    /// enabled filter values (substring match; demo grade on purpose).
    fn apply_filters(&mut self) {
        self.visible_rows = (0..self.rows.len())
            .filter(|&ridx| {
                self.store
                    .columns
                    .iter()
                    .enumerate()
                    .all(|(cidx, column)| Self::row_matches(&self.rows[ridx][cidx], column))
            })
            .collect();
        self.clamp_scroll();
        self.status_message = format!("{}/{} rows", self.visible_rows.len(), self.rows.len());
        trace!(
            "Filters applied, {} of {} rows visible",
            self.visible_rows.len(),
            self.rows.len()
        );
    }

    fn row_matches(cell: &str, column: &Column) -> bool {
        let Some(filters) = column.filters.as_deref() else {
            return true;
        };
        let mut enabled = filters.iter().filter(|f| f.enabled).peekable();
        if enabled.peek().is_none() {
            return true;
        }
        enabled.any(|f| cell.contains(f.value.as_str()))
    }

    fn clamp_scroll(&mut self) {
        let height = self.table_height();
        let max_offset = self.visible_rows.len().saturating_sub(height);
        self.offset_row = self.offset_row.min(max_offset);
    }

    pub fn table_height(&self) -> usize {
        // Header line and status line
        self.screen.height.saturating_sub(2) as usize
    }

    /// Recompute header cells and trigger rects, plus the menu geometry of
    /// an open dropdown. Index resolution for mouse events always runs
    /// against these rects, so they are rebuilt after every mutation.
    fn relayout(&mut self) {
        self.header_cells.clear();
        self.triggers.clear();
        let mut x = 0u16;
        for width in &self.widths {
            let width = (*width).min(self.screen.width.saturating_sub(x));
            let cell = Rect::new(x, 0, width, 1);
            self.header_cells.push(cell);
            let trigger = if cell.width > 0 {
                Rect::new(cell.right() - 1, 0, 1, 1)
            } else {
                Rect::default()
            };
            self.triggers.push(trigger);
            x = x.saturating_add(width + 1);
        }

        if let Some(idx) = self.open_menu() {
            self.icons[idx].relayout(self.triggers[idx], &self.store.columns[idx], self.screen);
        }
        trace!("Relayout done for screen {:?}", self.screen);
    }

    pub fn open_menu(&self) -> Option<usize> {
        self.icons.iter().position(|icon| icon.is_open())
    }

    /// The trigger cell under a click, counting only visible (active)
    /// triggers. A hidden trigger keeps its place in the header but does
    /// not react to the mouse.
    pub fn trigger_at(&self, pos: Position) -> Option<usize> {
        self.triggers
            .iter()
            .position(|t| t.contains(pos))
            .filter(|&idx| self.store.columns[idx].is_active())
    }

    pub fn header_cell_at(&self, pos: Position) -> Option<usize> {
        self.header_cells.iter().position(|c| c.contains(pos))
    }
}

fn sample_columns() -> Vec<Column> {
    vec![
        // Never had filters vs. had-and-lost-them: "time" carries no list
        // at all, "tag" an empty one. Both show the menu's empty state.
        Column::new("time"),
        Column::with_filters(
            "level",
            vec![
                Filter::predefined("error", "error", false),
                Filter::predefined("warn", "warn", false),
            ],
        ),
        Column::with_filters("tag", Vec::new()),
        Column::new("message"),
    ]
}

fn sample_rows() -> Vec<Vec<String>> {
    let raw: [[&str; 4]; 22] = [
        ["09:12:01", "info", "net", "listening on 0.0.0.0:8080"],
        ["09:12:01", "info", "store", "opened database in 12ms"],
        ["09:12:03", "debug", "net", "accepted connection from 10.0.0.7"],
        ["09:12:04", "info", "auth", "session created for user alice"],
        ["09:12:08", "warn", "net", "slow handshake, took 1.4s"],
        ["09:12:09", "debug", "store", "compaction started"],
        ["09:12:11", "error", "store", "write failed: disk full"],
        ["09:12:11", "warn", "store", "retrying write in 500ms"],
        ["09:12:12", "info", "store", "write ok after retry"],
        ["09:12:15", "debug", "auth", "token refresh for alice"],
        ["09:12:19", "info", "net", "accepted connection from 10.0.0.9"],
        ["09:12:20", "error", "auth", "invalid token from 10.0.0.9"],
        ["09:12:20", "warn", "auth", "rate limiting 10.0.0.9"],
        ["09:12:24", "info", "job", "nightly cleanup scheduled"],
        ["09:12:31", "debug", "job", "cleanup scanned 120 entries"],
        ["09:12:32", "info", "job", "cleanup removed 7 entries"],
        ["09:12:40", "debug", "net", "connection 10.0.0.7 closed"],
        ["09:12:44", "warn", "net", "connection reset by peer"],
        ["09:12:51", "info", "auth", "session closed for user alice"],
        ["09:12:55", "error", "job", "cleanup lock timeout"],
        ["09:12:56", "info", "job", "cleanup finished with errors"],
        ["09:13:02", "info", "net", "listening socket drained"],
    ];
    raw.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}
