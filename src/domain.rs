use std::io::Error;

use colfilter::MenuMessage;

#[derive(Debug)]
pub enum AppError {
    Io(Error),
    Logging(String),
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        AppError::Io(err)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub event_poll_time: u64,
    pub min_column_width: u16,
    pub max_column_width: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            event_poll_time: 100,
            min_column_width: 6,
            max_column_width: 32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Quit,
    Help,
    Exit,
    Resize(u16, u16),
    SelectLeft,
    SelectRight,
    SelectColumn(usize),
    ScrollUp,
    ScrollDown,
    GrowColumn,
    ShrinkColumn,
    MoveColumnLeft,
    MoveColumnRight,
    Menu(usize, MenuMessage),
}

pub const HELP_TEXT: &str = "\
 q        quit
 ?        this help
 ←/→      select column
 ↑/↓      scroll rows
 +/-      resize the selected column
 </>      reorder the selected column
 f        open the filter menu
          (or click a ▼ trigger)

 Inside the filter menu:
 ↑/↓      move between rows
 Enter    add the typed value, or
          toggle the selected filter
 Space    toggle the selected filter
 Del      remove the selected filter
 Esc      close the menu
";
