#![allow(dead_code)]

pub mod mock_buffer;
pub mod mock_clipboard;

use modal_engine::{Command, Engine, InputEvent, KeyCode, Position, Selection};

use self::mock_buffer::MockBuffer;
use self::mock_clipboard::MockClipboard;

pub fn key(c: char) -> InputEvent {
    InputEvent::char_key(c)
}

pub fn esc() -> InputEvent {
    InputEvent::key(KeyCode::Esc)
}

pub fn enter() -> InputEvent {
    InputEvent::key(KeyCode::Enter)
}

/// An engine wired to a live buffer: commands are applied as they come.
pub struct Session {
    pub buf: MockBuffer,
    pub eng: Engine,
    pub clip: MockClipboard,
    pub cursor: Position,
    pub selection: Option<Selection>,
}

impl Session {
    pub fn new(text: &str) -> Self {
        Self::with_engine(text, Engine::new())
    }

    pub fn with_engine(text: &str, eng: Engine) -> Self {
        Self {
            buf: MockBuffer::new(text),
            eng,
            clip: MockClipboard::new(),
            cursor: Position::ZERO,
            selection: None,
        }
    }

    pub fn at(mut self, line: u32, col: u32) -> Self {
        self.cursor = Position::new(line, col);
        self
    }

    pub fn send(&mut self, ev: InputEvent) -> Vec<Command> {
        let (cursor, cmds) = self.eng.handle_event(&self.buf, &mut self.clip, self.cursor, ev);
        for cmd in &cmds {
            match cmd {
                Command::SetSelection(sel) => self.selection = *sel,
                other => self.buf.apply(other),
            }
        }
        self.cursor = cursor;
        cmds.into_vec()
    }

    /// Feed every character of `keys` as a key press.
    pub fn keys(&mut self, keys: &str) -> Vec<Command> {
        keys.chars().flat_map(|c| self.send(key(c))).collect()
    }

    /// Feed `s` as received text, for insert mode and the search prompt.
    pub fn type_text(&mut self, s: &str) -> Vec<Command> {
        s.chars()
            .flat_map(|c| self.send(InputEvent::ReceivedChar(c)))
            .collect()
    }

    pub fn text(&self) -> String {
        self.buf.contents()
    }
}
