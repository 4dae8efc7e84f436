use derive_setters::Setters;
use ratatui::style::Color;

/// Shared colors the widget reads, never writes.
///
/// `background_wash` fills button faces, `primary_color` marks active
/// state, `disabled_color` is used for everything muted (hidden trigger,
/// placeholders, borders, dividers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Setters)]
pub struct Theme {
    pub background_wash: Color,
    pub primary_color: Color,
    pub disabled_color: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background_wash: Color::Indexed(236),
            primary_color: Color::Cyan,
            disabled_color: Color::DarkGray,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_chain() {
        let theme = Theme::default()
            .primary_color(Color::Magenta)
            .disabled_color(Color::Gray);
        assert_eq!(theme.primary_color, Color::Magenta);
        assert_eq!(theme.disabled_color, Color::Gray);
        assert_eq!(theme.background_wash, Theme::default().background_wash);
    }
}
