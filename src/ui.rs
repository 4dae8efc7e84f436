use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Clear, Widget};

use crate::filter::Column;
use crate::icon::FilterIcon;
use crate::theme::Theme;

pub const TRIGGER_SYMBOL: &str = "▼";
pub const REMOVE_SYMBOL: &str = "⊖";
pub const CHECKBOX_CHECKED: &str = "[x]";
pub const CHECKBOX_CLEAR: &str = "[ ]";
pub const NO_ACTIVE_FILTERS: &str = "No active filters";
pub const INPUT_PLACEHOLDER: &str = "Filter by value";
pub const ADD_LABEL: &str = " Add ";

/// A one cell button face for table headers. Presentational only.
pub struct HeaderButton<'a> {
    pub symbol: &'a str,
    pub style: Style,
}

impl Widget for HeaderButton<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        buf.set_style(area, self.style);
        buf.set_stringn(area.x, area.y, self.symbol, area.width as usize, self.style);
    }
}

pub fn trigger_style(active: bool, theme: &Theme) -> Style {
    let color = if active {
        theme.primary_color
    } else {
        theme.disabled_color
    };
    Style::new().fg(color).bg(theme.background_wash)
}

/// The always present trigger cell. Active columns show the symbol in the
/// primary color; inactive ones keep the cell blank so the header layout
/// never shifts.
pub fn render_trigger(column: &Column, theme: &Theme, area: Rect, buf: &mut Buffer) {
    let active = column.is_active();
    let symbol = if active { TRIGGER_SYMBOL } else { " " };
    HeaderButton {
        symbol,
        style: trigger_style(active, theme),
    }
    .render(area, buf);
}

/// Draw the open dropdown menu over whatever is underneath it.
pub fn render_menu(icon: &FilterIcon, column: &Column, theme: &Theme, buf: &mut Buffer) {
    if !icon.is_open() {
        return;
    }
    let layout = icon.layout();
    if layout.menu.is_empty() {
        return;
    }

    Clear.render(layout.menu, buf);
    Block::bordered()
        .border_style(Style::new().fg(theme.disabled_color))
        .render(layout.menu, buf);

    render_input_row(icon, theme, buf);

    if !layout.divider.is_empty() {
        let line = "─".repeat(layout.divider.width as usize);
        buf.set_string(
            layout.divider.x,
            layout.divider.y,
            line,
            Style::new().fg(theme.disabled_color),
        );
    }

    if layout.body.is_empty() {
        return;
    }
    match column.filters.as_deref() {
        None | Some([]) => {
            buf.set_stringn(
                layout.body.x + 1,
                layout.body.y,
                NO_ACTIVE_FILTERS,
                layout.body.width.saturating_sub(1) as usize,
                Style::new().fg(theme.disabled_color),
            );
        }
        Some(filters) => {
            for (index, (filter, row)) in filters.iter().zip(layout.rows.iter()).enumerate() {
                let mark = if filter.enabled {
                    CHECKBOX_CHECKED
                } else {
                    CHECKBOX_CLEAR
                };
                buf.set_stringn(
                    row.toggle.x,
                    row.toggle.y,
                    format!("{mark} {}", filter.label),
                    row.toggle.width as usize,
                    Style::new(),
                );
                if filter.enabled {
                    let mark_area =
                        Rect::new(row.toggle.x, row.toggle.y, 3, 1).intersection(row.toggle);
                    buf.set_style(mark_area, Style::new().fg(theme.primary_color));
                }
                if let Some(remove) = row.remove {
                    buf.set_stringn(
                        remove.x,
                        remove.y,
                        format!(" {REMOVE_SYMBOL}"),
                        remove.width as usize,
                        Style::new().fg(theme.disabled_color),
                    );
                }
                if icon.cursor() == index + 1 {
                    let full_row = Rect::new(layout.body.x, row.toggle.y, layout.body.width, 1);
                    buf.set_style(full_row, Style::new().add_modifier(Modifier::REVERSED));
                }
            }
        }
    }
}

fn render_input_row(icon: &FilterIcon, theme: &Theme, buf: &mut Buffer) {
    let layout = icon.layout();
    if layout.input.is_empty() {
        return;
    }
    let input = icon.input();
    if input.is_empty() {
        buf.set_stringn(
            layout.input.x,
            layout.input.y,
            INPUT_PLACEHOLDER,
            layout.input.width as usize,
            Style::new().fg(theme.disabled_color),
        );
    } else {
        buf.set_stringn(
            layout.input.x,
            layout.input.y,
            input.value(),
            layout.input.width as usize,
            Style::new(),
        );
    }
    if icon.cursor() == 0 {
        let x = layout.input.x + (input.cursor() as u16).min(layout.input.width - 1);
        buf.set_style(
            Rect::new(x, layout.input.y, 1, 1),
            Style::new().add_modifier(Modifier::REVERSED),
        );
    }
    if !layout.add.is_empty() {
        buf.set_stringn(
            layout.add.x,
            layout.add.y,
            ADD_LABEL,
            layout.add.width as usize,
            Style::new().bg(theme.background_wash),
        );
    }
}
