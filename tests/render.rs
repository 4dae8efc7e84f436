use ratatui::buffer::Buffer;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Position, Rect};

use colfilter::{Column, ColumnFilterHandlers, Filter, FilterIcon, MenuMessage, Theme, ui};

const SCREEN: Rect = Rect {
    x: 0,
    y: 0,
    width: 80,
    height: 24,
};

struct Sink;

impl ColumnFilterHandlers for Sink {
    fn on_add_column_filter(&mut self, _column_id: &str, _value: String) {}
    fn on_remove_column_filter(&mut self, _column_id: &str, _index: usize) {}
    fn on_toggle_column_filter(&mut self, _column_id: &str, _index: usize) {}
}

fn open_icon(column: &Column) -> FilterIcon {
    let mut icon = FilterIcon::new();
    icon.update(MenuMessage::Open, column, &mut Sink);
    icon.relayout(Rect::new(10, 0, 1, 1), column, SCREEN);
    icon
}

fn row_text(buf: &Buffer, y: u16) -> String {
    (0..buf.area.width)
        .map(|x| buf.cell(Position::new(x, y)).unwrap().symbol())
        .collect()
}

#[test]
fn active_trigger_is_visible_in_the_primary_color() {
    let theme = Theme::default();
    let area = Rect::new(3, 0, 1, 1);
    let mut buf = Buffer::empty(SCREEN);
    let column = Column::with_filters("level", vec![Filter::user("error")]);

    ui::render_trigger(&column, &theme, area, &mut buf);
    let cell = buf.cell(Position::new(3, 0)).unwrap();
    assert_eq!(cell.symbol(), ui::TRIGGER_SYMBOL);
    assert_eq!(cell.style().fg, Some(theme.primary_color));
}

#[test]
fn inactive_trigger_is_hidden_but_keeps_its_cell() {
    let theme = Theme::default();
    let area = Rect::new(3, 0, 1, 1);

    // Zero enabled entries, an empty list and an absent list all hide it
    let disabled = Column::with_filters(
        "level",
        vec![Filter::predefined("error", "error", false)],
    );
    for column in [disabled, Column::with_filters("tag", Vec::new()), Column::new("time")] {
        let mut buf = Buffer::empty(SCREEN);
        ui::render_trigger(&column, &theme, area, &mut buf);
        let cell = buf.cell(Position::new(3, 0)).unwrap();
        assert_eq!(cell.symbol(), " ");
        assert_eq!(cell.style().fg, Some(theme.disabled_color));
        assert_eq!(cell.style().bg, Some(theme.background_wash));
    }
}

#[test]
fn menu_shows_checkbox_state_and_remove_affordance_per_row() {
    let theme = Theme::default();
    let column = Column::with_filters(
        "level",
        vec![
            Filter::predefined("a", "a", true),
            Filter {
                enabled: false,
                ..Filter::user("b")
            },
        ],
    );
    let icon = open_icon(&column);
    let mut buf = Buffer::empty(SCREEN);
    ui::render_menu(&icon, &column, &theme, &mut buf);

    let rows = &icon.layout().rows;
    let first = row_text(&buf, rows[0].toggle.y);
    assert!(first.contains("[x] a"), "got: {first:?}");
    assert!(
        !first.contains(ui::REMOVE_SYMBOL),
        "predefined rows have no remove affordance"
    );

    let second = row_text(&buf, rows[1].toggle.y);
    assert!(second.contains("[ ] b"), "got: {second:?}");
    assert!(second.contains(ui::REMOVE_SYMBOL));
}

#[test]
fn empty_and_absent_lists_render_the_placeholder() {
    let theme = Theme::default();
    for column in [Column::new("time"), Column::with_filters("tag", Vec::new())] {
        let icon = open_icon(&column);
        let mut buf = Buffer::empty(SCREEN);
        ui::render_menu(&icon, &column, &theme, &mut buf);

        let body = icon.layout().body;
        let text = row_text(&buf, body.y);
        assert!(text.contains(ui::NO_ACTIVE_FILTERS), "got: {text:?}");
        assert!(!text.contains("[ ]"), "no filter rows in the empty state");
        assert!(
            row_text(&buf, icon.layout().input.y).contains(ui::INPUT_PLACEHOLDER),
            "the add-filter row is shown above the divider"
        );
    }
}

#[test]
fn typed_text_replaces_the_input_placeholder() {
    let theme = Theme::default();
    let column = Column::new("message");
    let mut icon = open_icon(&column);
    for chr in "disk".chars() {
        let key = KeyEvent::new(KeyCode::Char(chr), KeyModifiers::NONE);
        icon.update(MenuMessage::Input(key), &column, &mut Sink);
    }
    let mut buf = Buffer::empty(SCREEN);
    ui::render_menu(&icon, &column, &theme, &mut buf);
    let input_row = row_text(&buf, icon.layout().input.y);
    assert!(input_row.contains("disk"), "got: {input_row:?}");
    assert!(!input_row.contains(ui::INPUT_PLACEHOLDER));
    assert!(input_row.contains(ui::ADD_LABEL.trim()));
}

#[test]
fn closed_menus_render_nothing() {
    let theme = Theme::default();
    let column = Column::new("message");
    let icon = FilterIcon::new();
    let mut buf = Buffer::empty(SCREEN);
    ui::render_menu(&icon, &column, &theme, &mut buf);
    assert_eq!(buf, Buffer::empty(SCREEN));
}
