use std::borrow::Cow;

use modal_engine::traits::TextOps;
use modal_engine::types::{Command, Position};
use ropey::Rope;
use unicode_segmentation::UnicodeSegmentation;

/// A rope-backed buffer that only answers the two required queries, so every
/// other `TextOps` method runs its default implementation.
pub struct MockBuffer {
    rope: Rope,
}

impl MockBuffer {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    pub fn contents(&self) -> String {
        self.rope.to_string()
    }

    /// Apply an edit the engine emitted. Cursor and selection commands are
    /// the caller's business.
    pub fn apply(&mut self, cmd: &Command) {
        match cmd {
            Command::Delete { range } => {
                let start = self.char_idx(range.start);
                let end = self.char_idx(range.end);
                self.rope.remove(start..end);
            }
            Command::InsertText { at, text } => {
                let idx = self.char_idx(*at);
                self.rope.insert(idx, text);
            }
            Command::SetCursor(_) | Command::SetSelection(_) => {}
        }
    }

    fn char_idx(&self, pos: Position) -> usize {
        if pos.line as usize >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        let line = self.line_text(pos.line);
        let head: usize = line
            .graphemes(true)
            .take(pos.col as usize)
            .map(|g| g.chars().count())
            .sum();
        self.rope.line_to_char(pos.line as usize) + head
    }
}

impl TextOps for MockBuffer {
    fn line_count(&self) -> u32 {
        self.rope.len_lines() as u32
    }

    fn line_text(&self, line: u32) -> Cow<'_, str> {
        if line as usize >= self.rope.len_lines() {
            return Cow::Borrowed("");
        }
        let mut s = self.rope.line(line as usize).to_string();
        if s.ends_with('\n') {
            s.pop();
            if s.ends_with('\r') {
                s.pop();
            }
        }
        Cow::Owned(s)
    }
}
