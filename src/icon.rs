use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Margin, Position, Rect};
use tracing::{debug, trace};

use crate::filter::{Column, ColumnFilterHandlers};
use crate::input::FilterInput;

/// Messages the dropdown understands. Produced by `FilterIcon::intercept`
/// or sent directly by the host (e.g. `Open` from a trigger click).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuMessage {
    Open,
    Close,
    CursorUp,
    CursorDown,
    Select(usize),
    /// Commit the selected row: add on the input row, toggle on a filter row.
    Commit,
    Add,
    Toggle(usize),
    Remove(usize),
    Input(KeyEvent),
}

/// Routing decision for one terminal event while a menu is open.
///
/// `Pass` is only ever returned while the menu is closed; an open menu
/// keeps every key and mouse event to itself so that interactions inside
/// the popover can not reach the host's column resize/reorder bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intercept {
    Menu(MenuMessage),
    Consumed,
    Pass,
}

/// Hit rects for one filter row. `remove` is only laid out for rows the
/// user may remove, so predefined filters simply have no remove affordance.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RowLayout {
    pub toggle: Rect,
    pub remove: Option<Rect>,
}

/// Computed menu geometry, in screen coordinates. Recomputed by the host
/// whenever the filter list, the anchor or the screen changes; mouse hit
/// testing always runs against the rects of the current frame.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MenuLayout {
    pub menu: Rect,
    pub input: Rect,
    pub add: Rect,
    pub divider: Rect,
    pub body: Rect,
    pub rows: Vec<RowLayout>,
}

// "[x] " prefix plus some breathing room for the remove glyph
const ROW_DECORATION_WIDTH: u16 = 7;
const MIN_INNER_WIDTH: u16 = 24;
const ADD_BUTTON_WIDTH: u16 = 5;

impl MenuLayout {
    pub fn from_values(anchor: Rect, column: &Column, screen: Rect) -> Self {
        let filters = column.filters.as_deref().unwrap_or(&[]);

        let label_width = filters
            .iter()
            .map(|f| f.label.chars().count())
            .max()
            .unwrap_or(0) as u16;
        let inner_width = (label_width + ROW_DECORATION_WIDTH)
            .max(MIN_INNER_WIDTH)
            .min(screen.width.saturating_sub(2).max(1));
        let inner_height = (filters.len().max(1) as u16) + 2;

        let menu_width = inner_width + 2;
        let menu_height = inner_height + 2;

        // Below the anchor, shifted left at the screen edge; above it when
        // there is no room underneath.
        let x = anchor.x.min(screen.right().saturating_sub(menu_width));
        let mut y = anchor.y + 1;
        if y + menu_height > screen.bottom() && anchor.y >= menu_height {
            y = anchor.y - menu_height;
        }
        let menu = Rect::new(x, y, menu_width, menu_height).intersection(screen);
        let inner = menu.inner(Margin::new(1, 1));

        let add_width = ADD_BUTTON_WIDTH.min(inner.width);
        let input = Rect::new(
            inner.x,
            inner.y,
            inner.width.saturating_sub(add_width + 1),
            inner.height.min(1),
        );
        let add = Rect::new(
            inner.right().saturating_sub(add_width),
            inner.y,
            add_width,
            inner.height.min(1),
        );
        let divider = Rect::new(inner.x, inner.y + 1, inner.width, 1).intersection(inner);
        let body = Rect::new(
            inner.x,
            inner.y + 2,
            inner.width,
            inner.height.saturating_sub(2),
        );

        let rows = filters
            .iter()
            .enumerate()
            .take(body.height as usize)
            .map(|(idx, filter)| {
                let y = body.y + idx as u16;
                let remove = (!filter.predefined)
                    .then(|| Rect::new(body.right().saturating_sub(2), y, 2, 1));
                let toggle_width = body
                    .width
                    .saturating_sub(if filter.predefined { 0 } else { 2 });
                RowLayout {
                    toggle: Rect::new(body.x, y, toggle_width, 1),
                    remove,
                }
            })
            .collect();

        let layout = MenuLayout {
            menu,
            input,
            add,
            divider,
            body,
            rows,
        };
        trace!("Menu layout for \"{}\": {:?}", column.key, layout.menu);
        layout
    }
}

/// The per column filter dropdown.
///
/// One instance per column. Owns only the transient input text and the
/// dropdown mechanics (open flag, menu cursor, hit rects); the filter list
/// itself stays with the host and is mutated exclusively through the
/// `ColumnFilterHandlers` passed into `update`.
#[derive(Debug, Default, Clone)]
pub struct FilterIcon {
    open: bool,
    cursor: usize,
    input: FilterInput,
    layout: MenuLayout,
}

impl FilterIcon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Selected menu row: 0 is the input row, 1..=n are filter rows.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn input(&self) -> &FilterInput {
        &self.input
    }

    pub fn layout(&self) -> &MenuLayout {
        &self.layout
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Recompute menu geometry against the current filter list. The host
    /// calls this after every mutation and resize while the menu is open.
    pub fn relayout(&mut self, anchor: Rect, column: &Column, screen: Rect) {
        self.layout = MenuLayout::from_values(anchor, column, screen);
        self.cursor = self.cursor.min(column.filter_count());
    }

    pub fn update(
        &mut self,
        message: MenuMessage,
        column: &Column,
        handlers: &mut dyn ColumnFilterHandlers,
    ) {
        match message {
            MenuMessage::Open => {
                self.open = true;
                self.cursor = 0;
            }
            MenuMessage::Close => self.open = false,
            MenuMessage::CursorUp => self.cursor = self.cursor.saturating_sub(1),
            MenuMessage::CursorDown => {
                self.cursor = (self.cursor + 1).min(column.filter_count());
            }
            MenuMessage::Select(row) => self.cursor = row.min(column.filter_count()),
            MenuMessage::Commit => {
                if self.cursor == 0 {
                    self.add(column, handlers);
                } else {
                    handlers.on_toggle_column_filter(&column.key, self.cursor - 1);
                }
            }
            MenuMessage::Add => self.add(column, handlers),
            MenuMessage::Toggle(index) => handlers.on_toggle_column_filter(&column.key, index),
            MenuMessage::Remove(index) => handlers.on_remove_column_filter(&column.key, index),
            MenuMessage::Input(key) => self.input.handle(key),
        }
    }

    // Callback plus input reset happen inside one update step, so no frame
    // can observe the submitted text still sitting in the field.
    fn add(&mut self, column: &Column, handlers: &mut dyn ColumnFilterHandlers) {
        let value = self.input.take();
        debug!("Submitting filter {:?} for column \"{}\"", value, column.key);
        handlers.on_add_column_filter(&column.key, value);
    }

    /// Classify a terminal event while this menu is open.
    ///
    /// Open menu: every key and mouse event maps to a menu message or is
    /// consumed, never passed through. Closed menu: everything passes.
    /// Terminal resize is not a pointer/keyboard interaction and always
    /// stays with the host.
    pub fn intercept(&self, event: &Event, column: &Column) -> Intercept {
        if !self.open {
            return Intercept::Pass;
        }
        match event {
            Event::Resize(_, _) => Intercept::Pass,
            Event::Key(key) if key.kind == KeyEventKind::Press => self.map_key(*key, column),
            Event::Key(_) => Intercept::Consumed,
            Event::Mouse(mouse) => self.map_mouse(mouse),
            _ => Intercept::Consumed,
        }
    }

    fn map_key(&self, key: KeyEvent, column: &Column) -> Intercept {
        match key.code {
            KeyCode::Esc => Intercept::Menu(MenuMessage::Close),
            KeyCode::Up => Intercept::Menu(MenuMessage::CursorUp),
            KeyCode::Down => Intercept::Menu(MenuMessage::CursorDown),
            KeyCode::Enter => Intercept::Menu(MenuMessage::Commit),
            _ if self.cursor == 0 => Intercept::Menu(MenuMessage::Input(key)),
            KeyCode::Char(' ') => Intercept::Menu(MenuMessage::Toggle(self.cursor - 1)),
            KeyCode::Delete => {
                let index = self.cursor - 1;
                if column.filter(index).is_some_and(|f| !f.predefined) {
                    Intercept::Menu(MenuMessage::Remove(index))
                } else {
                    Intercept::Consumed
                }
            }
            _ => Intercept::Consumed,
        }
    }

    fn map_mouse(&self, mouse: &MouseEvent) -> Intercept {
        let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
            return Intercept::Consumed;
        };
        let pos = Position::new(mouse.column, mouse.row);
        if !self.layout.menu.contains(pos) {
            // Standard click-outside dismissal; the click is swallowed.
            return Intercept::Menu(MenuMessage::Close);
        }
        if self.layout.input.contains(pos) {
            return Intercept::Menu(MenuMessage::Select(0));
        }
        if self.layout.add.contains(pos) {
            return Intercept::Menu(MenuMessage::Add);
        }
        for (index, row) in self.layout.rows.iter().enumerate() {
            if row.remove.is_some_and(|r| r.contains(pos)) {
                return Intercept::Menu(MenuMessage::Remove(index));
            }
            if row.toggle.contains(pos) {
                return Intercept::Menu(MenuMessage::Toggle(index));
            }
        }
        // Border, divider or placeholder area
        Intercept::Consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Filter;
    use ratatui::crossterm::event::KeyModifiers;

    #[derive(Debug, Default, PartialEq)]
    struct Recorder {
        adds: Vec<(String, String)>,
        removes: Vec<(String, usize)>,
        toggles: Vec<(String, usize)>,
    }

    impl ColumnFilterHandlers for Recorder {
        fn on_add_column_filter(&mut self, column_id: &str, value: String) {
            self.adds.push((column_id.to_string(), value));
        }
        fn on_remove_column_filter(&mut self, column_id: &str, index: usize) {
            self.removes.push((column_id.to_string(), index));
        }
        fn on_toggle_column_filter(&mut self, column_id: &str, index: usize) {
            self.toggles.push((column_id.to_string(), index));
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn sample_column() -> Column {
        Column::with_filters(
            "level",
            vec![
                Filter::predefined("error", "error", true),
                Filter {
                    enabled: false,
                    ..Filter::user("warn")
                },
            ],
        )
    }

    fn open_icon(column: &Column) -> (FilterIcon, Recorder) {
        let mut icon = FilterIcon::new();
        let mut recorder = Recorder::default();
        icon.update(MenuMessage::Open, column, &mut recorder);
        icon.relayout(
            Rect::new(10, 0, 1, 1),
            column,
            Rect::new(0, 0, 80, 24),
        );
        (icon, recorder)
    }

    #[test]
    fn add_submits_once_and_resets_input() {
        let column = sample_column();
        let (mut icon, mut recorder) = open_icon(&column);
        for chr in "abc".chars() {
            icon.update(MenuMessage::Input(key(KeyCode::Char(chr))), &column, &mut recorder);
        }
        icon.update(MenuMessage::Add, &column, &mut recorder);

        assert_eq!(recorder.adds, vec![("level".to_string(), "abc".to_string())]);
        assert!(recorder.toggles.is_empty());
        assert!(recorder.removes.is_empty());
        assert_eq!(icon.input().value(), "");
    }

    #[test]
    fn commit_on_input_row_submits_empty_value() {
        let column = sample_column();
        let (mut icon, mut recorder) = open_icon(&column);
        icon.update(MenuMessage::Commit, &column, &mut recorder);
        assert_eq!(recorder.adds, vec![("level".to_string(), String::new())]);
    }

    #[test]
    fn commit_on_filter_row_toggles_it() {
        let column = sample_column();
        let (mut icon, mut recorder) = open_icon(&column);
        icon.update(MenuMessage::CursorDown, &column, &mut recorder);
        icon.update(MenuMessage::CursorDown, &column, &mut recorder);
        icon.update(MenuMessage::Commit, &column, &mut recorder);
        assert_eq!(recorder.toggles, vec![("level".to_string(), 1)]);
        assert!(recorder.adds.is_empty());
    }

    #[test]
    fn toggle_calls_no_other_handler() {
        let column = sample_column();
        let (mut icon, mut recorder) = open_icon(&column);
        icon.update(MenuMessage::Toggle(0), &column, &mut recorder);
        assert_eq!(recorder.toggles, vec![("level".to_string(), 0)]);
        assert!(recorder.adds.is_empty());
        assert!(recorder.removes.is_empty());
    }

    #[test]
    fn cursor_is_clamped_to_the_row_count() {
        let column = sample_column();
        let (mut icon, mut recorder) = open_icon(&column);
        for _ in 0..5 {
            icon.update(MenuMessage::CursorDown, &column, &mut recorder);
        }
        assert_eq!(icon.cursor(), 2);
        icon.update(MenuMessage::CursorUp, &column, &mut recorder);
        assert_eq!(icon.cursor(), 1);
    }

    #[test]
    fn relayout_clamps_a_stale_cursor() {
        let column = sample_column();
        let (mut icon, mut recorder) = open_icon(&column);
        icon.update(MenuMessage::Select(2), &column, &mut recorder);

        let shrunk = Column::with_filters("level", vec![Filter::user("warn")]);
        icon.relayout(Rect::new(10, 0, 1, 1), &shrunk, Rect::new(0, 0, 80, 24));
        assert_eq!(icon.cursor(), 1);
    }

    #[test]
    fn delete_key_never_removes_predefined_filters() {
        let column = sample_column();
        let (mut icon, mut recorder) = open_icon(&column);
        icon.update(MenuMessage::Select(1), &column, &mut recorder);
        let intercept = icon.intercept(&Event::Key(key(KeyCode::Delete)), &column);
        assert_eq!(intercept, Intercept::Consumed);

        icon.update(MenuMessage::Select(2), &column, &mut recorder);
        let intercept = icon.intercept(&Event::Key(key(KeyCode::Delete)), &column);
        assert_eq!(intercept, Intercept::Menu(MenuMessage::Remove(1)));
    }

    #[test]
    fn closed_menu_passes_events_through() {
        let column = sample_column();
        let icon = FilterIcon::new();
        let event = Event::Key(key(KeyCode::Char('q')));
        assert_eq!(icon.intercept(&event, &column), Intercept::Pass);
    }

    #[test]
    fn layout_offers_no_remove_rect_for_predefined_rows() {
        let column = sample_column();
        let layout = MenuLayout::from_values(
            Rect::new(10, 0, 1, 1),
            &column,
            Rect::new(0, 0, 80, 24),
        );
        assert_eq!(layout.rows.len(), 2);
        assert!(layout.rows[0].remove.is_none());
        assert!(layout.rows[1].remove.is_some());
    }

    #[test]
    fn layout_stays_on_screen() {
        let column = sample_column();
        let screen = Rect::new(0, 0, 30, 10);
        let layout = MenuLayout::from_values(Rect::new(28, 0, 1, 1), &column, screen);
        assert!(screen.contains(Position::new(
            layout.menu.right().saturating_sub(1),
            layout.menu.bottom().saturating_sub(1),
        )));
    }

    #[test]
    fn layout_opens_upward_near_the_bottom_edge() {
        let column = sample_column();
        let screen = Rect::new(0, 0, 80, 24);
        let layout = MenuLayout::from_values(Rect::new(10, 22, 1, 1), &column, screen);
        assert!(layout.menu.bottom() <= 22, "menu must sit above its anchor");
    }
}
