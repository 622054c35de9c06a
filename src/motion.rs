//! Motion tokens and their resolution against the host's text.

use crate::key::KeyCode;
use crate::traits::TextOps;
use crate::types::Position;

/// Represents a motion that can move the cursor or give an operator its range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    // Character motions
    Left, // h
    Right, // l
    Up, // k
    Down, // j

    // Word motions
    WordForward, // w
    WordBackward, // b

    // Paragraph motions
    ParagraphForward, // }
    ParagraphBackward, // {

    // Line motions
    LineStart, // 0
    FirstNonBlank, // ^
    LineEnd, // $

    // Buffer motions; with a count both go to that line
    BufferStart, // gg
    BufferEnd, // G

    /// `f`, `t`, `F`, `T` with their target character.
    FindChar { target: char, forward: bool, till: bool },
}

/// Whether an operator range includes the motion's end position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inclusivity {
    Inclusive,
    Exclusive,
}

/// Whether an operator range snaps to whole lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wise {
    Characterwise,
    Linewise,
}

impl Motion {
    /// The single-key motion bound to `code`, if any.
    pub(crate) fn from_key(code: KeyCode) -> Option<Motion> {
        let motion = match code {
            KeyCode::Char('h') | KeyCode::Left => Motion::Left,
            KeyCode::Char('l') | KeyCode::Right => Motion::Right,
            KeyCode::Char('k') | KeyCode::Up => Motion::Up,
            KeyCode::Char('j') | KeyCode::Down => Motion::Down,
            KeyCode::Char('w') => Motion::WordForward,
            KeyCode::Char('b') => Motion::WordBackward,
            KeyCode::Char('}') => Motion::ParagraphForward,
            KeyCode::Char('{') => Motion::ParagraphBackward,
            KeyCode::Char('0') => Motion::LineStart,
            KeyCode::Char('^') => Motion::FirstNonBlank,
            KeyCode::Char('$') => Motion::LineEnd,
            KeyCode::Char('G') => Motion::BufferEnd,
            _ => return None,
        };
        Some(motion)
    }

    pub fn inclusivity(&self) -> Inclusivity {
        match self {
            Motion::LineEnd | Motion::FindChar { forward: true, .. } => Inclusivity::Inclusive,
            _ => Inclusivity::Exclusive,
        }
    }

    pub fn wise(&self) -> Wise {
        match self {
            Motion::Up | Motion::Down | Motion::BufferStart | Motion::BufferEnd => Wise::Linewise,
            _ => Wise::Characterwise,
        }
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, Motion::Up | Motion::Down)
    }

    /// Resolve the motion from `from`.
    ///
    /// `count` is `None` when no digits were typed; only `gg` and `G` treat
    /// that differently from a count of one. Results are clamped to the
    /// buffer and may sit one past the last character of a line. Only a
    /// character search that finds nothing fails.
    pub fn resolve<T: TextOps + ?Sized>(
        &self,
        text: &T,
        from: Position,
        count: Option<u32>,
        preferred_col: Option<u32>,
    ) -> Option<Position> {
        let n = count.unwrap_or(1).max(1);
        let last = text.last_line();
        let to_line = |n: u32| n.saturating_sub(1).min(last);

        let target = match *self {
            Motion::Left => text.move_left(from, n),
            Motion::Right => text.move_right(from, n),
            Motion::Up => text.move_up(from, n, preferred_col),
            Motion::Down => text.move_down(from, n, preferred_col),
            Motion::WordForward => text.next_word_start(from, n),
            Motion::WordBackward => text.prev_word_start(from, n),
            Motion::ParagraphForward => text.next_paragraph_start(from, n),
            Motion::ParagraphBackward => text.prev_paragraph_start(from, n),
            Motion::LineStart => text.line_start(from.line),
            Motion::FirstNonBlank => text.first_non_blank(from.line),
            Motion::LineEnd => text.line_end(from.line.saturating_add(n - 1).min(last)),
            Motion::BufferStart => text.line_start(count.map_or(0, to_line)),
            Motion::BufferEnd => text.line_start(count.map_or(last, to_line)),
            Motion::FindChar {
                target,
                forward,
                till,
            } => {
                let hit = text.find_in_line(from, target, forward, n)?;
                match (till, forward) {
                    (false, _) => hit,
                    (true, true) => text.move_left(hit, 1),
                    (true, false) => text.move_right(hit, 1),
                }
            }
        };
        Some(text.clamp(target))
    }
}
