use smallvec::SmallVec;

/// A position within a text buffer.
///
/// Positions are zero-indexed and column values are counted in grapheme clusters,
/// not bytes or chars. Ordering is line-major.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Zero-based line number.
    pub line: u32,
    /// Zero-based column position in grapheme clusters.
    pub col: u32,
}

impl Position {
    /// The origin position (0, 0).
    pub const ZERO: Position = Position { line: 0, col: 0 };

    pub const fn new(line: u32, col: u32) -> Self {
        Position { line, col }
    }
}

/// A range of text defined by start and end positions.
///
/// Ranges are half-open intervals [start, end), meaning the start position
/// is included but the end position is excluded. An end at column 0 of the
/// following line covers the line terminator of the previous line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    /// The start position (inclusive).
    pub start: Position,
    /// The end position (exclusive).
    pub end: Position,
}

impl Range {
    /// Builds a range from two positions in either order.
    pub fn ordered(a: Position, b: Position) -> Self {
        if a <= b {
            Range { start: a, end: b }
        } else {
            Range { start: b, end: a }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// The current mode of the engine.
///
/// Exactly one mode is active at a time. The same keys perform different
/// actions depending on it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Normal mode - for navigation and operators.
    #[default]
    Normal,
    /// Insert mode - for typing text.
    Insert,
    /// Visual mode - for selecting text.
    Visual(VisualKind),
    /// Search prompt mode - entering a search query.
    SearchPrompt,
}

impl Mode {
    pub fn is_visual(&self) -> bool {
        matches!(self, Mode::Visual(_))
    }
}

/// The type of visual selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VisualKind {
    /// Character-wise selection (v).
    CharWise,
    /// Line-wise selection (V).
    LineWise,
}

/// An active visual selection.
///
/// The anchor stays where visual mode was entered; the active end follows
/// the cursor. Either end may come first in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    /// Where the selection was started.
    pub anchor: Position,
    /// The end that tracks the cursor.
    pub active: Position,
    /// The type of selection (character or line).
    pub kind: VisualKind,
}

impl Selection {
    /// The selection ends in buffer order.
    pub fn ordered(&self) -> (Position, Position) {
        if self.anchor <= self.active {
            (self.anchor, self.active)
        } else {
            (self.active, self.anchor)
        }
    }

    /// The first and last selected line.
    pub fn lines(&self) -> (u32, u32) {
        let (start, end) = self.ordered();
        (start.line, end.line)
    }
}

/// Commands emitted by the engine for the host to execute.
///
/// These are advisory: the engine never assumes they were applied and
/// derives its next state from the cursor passed to the next call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Update the cursor position.
    SetCursor(Position),
    /// Set or clear the current selection.
    SetSelection(Option<Selection>),

    /// Delete text in the specified range.
    Delete { range: Range },
    /// Insert text at the specified position.
    InsertText { at: Position, text: String },
}

/// The batch of commands produced by a single event.
///
/// A key emits at most a handful of commands, so the batch stays on the stack.
pub type Commands = SmallVec<[Command; 4]>;
