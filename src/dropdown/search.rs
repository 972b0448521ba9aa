//! Search box text and key handling.
//!
//! Keystrokes are captured by the host view and fed in here; the dropdown
//! never owns a real text input.

/// Search text with a byte cursor.
#[derive(Debug, Clone, Default)]
pub struct SearchBuffer {
    text: String,
    cursor: usize,
}

/// What a keystroke did to an open dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    /// Search text changed; the option list must be re-filtered.
    Edited,
    /// Cursor moved, text unchanged.
    Moved,
    /// Highlight the next selectable row.
    Next,
    /// Highlight the previous selectable row.
    Previous,
    /// Pick the highlighted row.
    Confirm,
    /// Close the panel.
    Dismiss,
    /// Not ours; let the host handle it.
    Ignored,
}

impl SearchBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Replaces the text and puts the cursor at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    pub fn insert_str(&mut self, s: &str) {
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    fn backspace(&mut self) -> bool {
        match self.text[..self.cursor].char_indices().next_back() {
            Some((at, _)) => {
                self.text.remove(at);
                self.cursor = at;
                true
            }
            None => false,
        }
    }

    fn delete(&mut self) -> bool {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
            true
        } else {
            false
        }
    }

    fn delete_word_backward(&mut self) -> bool {
        let before = &self.text[..self.cursor];
        let trimmed = before.trim_end();
        let start = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        if start == self.cursor {
            return false;
        }
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
        true
    }

    fn move_left(&mut self) {
        if let Some((at, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.cursor = at;
        }
    }

    fn move_right(&mut self) {
        if let Some(c) = self.text[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    /// Applies a keystroke.
    ///
    /// `key` is the key name ("backspace", "down", "a"); `typed` is the text
    /// the keystroke produced, if any. `command` is set when ctrl or the
    /// platform modifier is held.
    pub fn process_key(&mut self, key: &str, typed: Option<&str>, command: bool) -> SearchKey {
        match key {
            "backspace" => {
                let changed = if command {
                    self.delete_word_backward()
                } else {
                    self.backspace()
                };
                if changed {
                    SearchKey::Edited
                } else {
                    SearchKey::Moved
                }
            }
            "delete" => {
                if self.delete() {
                    SearchKey::Edited
                } else {
                    SearchKey::Moved
                }
            }
            "left" => {
                self.move_left();
                SearchKey::Moved
            }
            "right" => {
                self.move_right();
                SearchKey::Moved
            }
            "home" => {
                self.cursor = 0;
                SearchKey::Moved
            }
            "end" => {
                self.cursor = self.text.len();
                SearchKey::Moved
            }
            "down" => SearchKey::Next,
            "up" => SearchKey::Previous,
            "enter" => SearchKey::Confirm,
            "escape" => SearchKey::Dismiss,
            "tab" => SearchKey::Ignored,
            "space" if !command => {
                self.insert_str(" ");
                SearchKey::Edited
            }
            _ if command => SearchKey::Ignored,
            _ => {
                let typed = typed.unwrap_or(key);
                if typed.chars().count() == 1 && typed.chars().all(|c| !c.is_control()) {
                    self.insert_str(typed);
                    SearchKey::Edited
                } else {
                    SearchKey::Ignored
                }
            }
        }
    }
}
