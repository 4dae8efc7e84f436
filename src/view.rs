use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use colfilter::ui;

use crate::domain::HELP_TEXT;
use crate::model::Model;

pub fn draw(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let buf = frame.buffer_mut();

    draw_header(model, buf);
    draw_rows(model, area, buf);
    draw_status(model, area, buf);

    if let Some(idx) = model.open_menu() {
        ui::render_menu(
            &model.icons[idx],
            &model.store.columns[idx],
            &model.theme,
            buf,
        );
    }
    if model.show_help {
        draw_help(area, buf);
    }
}

fn draw_header(model: &Model, buf: &mut Buffer) {
    for (idx, cell) in model.header_cells.iter().enumerate() {
        if cell.is_empty() {
            continue;
        }
        let mut style = Style::new().add_modifier(Modifier::BOLD);
        if idx == model.cursor_column {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        let name = visible_name(&model.store.columns[idx].key, cell.width.saturating_sub(1));
        buf.set_stringn(
            cell.x,
            cell.y,
            name,
            cell.width.saturating_sub(1) as usize,
            style,
        );
        ui::render_trigger(
            &model.store.columns[idx],
            &model.theme,
            model.triggers[idx],
            buf,
        );
    }
}

fn visible_name(name: &str, width: u16) -> String {
    let width = width as usize;
    if width < 3 {
        return String::new();
    }
    if name.chars().count() > width {
        let mut reduced: String = name.chars().take(width - 3).collect();
        reduced.push_str("...");
        return reduced;
    }
    name.to_string()
}

fn draw_rows(model: &Model, area: Rect, buf: &mut Buffer) {
    let height = model.table_height();
    let rows = model
        .visible_rows
        .iter()
        .skip(model.offset_row)
        .take(height);
    for (line, &ridx) in rows.enumerate() {
        let y = area.y + 1 + line as u16;
        for (cidx, cell) in model.header_cells.iter().enumerate() {
            if cell.width > 1 {
                buf.set_stringn(
                    cell.x,
                    y,
                    &model.rows[ridx][cidx],
                    cell.width.saturating_sub(1) as usize,
                    Style::new(),
                );
            }
        }
    }
}

fn draw_status(model: &Model, area: Rect, buf: &mut Buffer) {
    if area.height < 2 {
        return;
    }
    let status = Rect::new(area.x, area.bottom() - 1, area.width, 1);
    buf.set_style(status, Style::new().bg(model.theme.background_wash));
    let line = format!(" {}  |  q:quit  ?:help  f:filter", model.status_message);
    buf.set_stringn(status.x, status.y, line, status.width as usize, Style::new());
}

fn draw_help(area: Rect, buf: &mut Buffer) {
    let popup = centered(area, 46, 20);
    Clear.render(popup, buf);
    Paragraph::new(HELP_TEXT)
        .block(Block::bordered().title(" Help "))
        .render(popup, buf);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_names_are_shortened() {
        assert_eq!(visible_name("message", 20), "message");
        assert_eq!(visible_name("a_very_long_header", 8), "a_ver...");
        assert_eq!(visible_name("ab", 2), "");
    }

    #[test]
    fn centered_rects_stay_inside() {
        let area = Rect::new(0, 0, 10, 5);
        let popup = centered(area, 46, 20);
        assert_eq!(popup, area);
    }
}
