use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Transient text for a filter that has not been added yet.
///
/// One instance lives inside each dropdown. It starts empty and is cleared
/// again by `take()` when the value is committed; nothing else resets it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterInput {
    value: String,
    cursor: usize,
}

impl FilterInput {
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position in characters, 0..=len.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Hand the committed value to the caller and reset to empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }

    pub fn handle(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Backspace, KeyModifiers::NONE) => self.backspace(),
            (KeyCode::Delete, KeyModifiers::NONE) => self.delete(),
            (KeyCode::Left, KeyModifiers::NONE) => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            (KeyCode::Right, KeyModifiers::NONE) => {
                if self.cursor < self.char_count() {
                    self.cursor += 1;
                }
            }
            (KeyCode::Home, KeyModifiers::NONE) => self.cursor = 0,
            (KeyCode::End, KeyModifiers::NONE) => self.cursor = self.char_count(),
            (KeyCode::Char(chr), modifiers)
                if modifiers.is_empty() || modifiers == KeyModifiers::SHIFT =>
            {
                self.value.insert(self.byte_pos(), chr);
                self.cursor += 1;
            }
            _ => {}
        }
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let pos = self.byte_pos();
            self.value.remove(pos);
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.char_count() {
            self.value.remove(self.byte_pos());
        }
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_pos(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.value.len())
    }
}
