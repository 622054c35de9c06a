//! Turning motions and selections into buffer edits.

use tracing::trace;

use crate::key::KeyCode;
use crate::motion::{Inclusivity, Motion, Wise};
use crate::text;
use crate::traits::{Clipboard, TextOps};
use crate::types::{Command, Commands, Position, Range, Selection, VisualKind};

/// Operators that can be combined with motions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Delete, // d
    Yank, // y
}

impl Operator {
    pub(crate) fn from_key(code: KeyCode) -> Option<Operator> {
        match code {
            KeyCode::Char('d') => Some(Operator::Delete),
            KeyCode::Char('y') => Some(Operator::Yank),
            _ => None,
        }
    }
}

/// The text an operator acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Span {
    /// An exact half-open character range.
    Chars(Range),
    /// Whole lines, terminators included.
    Lines { first: u32, last: u32 },
}

impl Span {
    /// The span a motion from `cursor` to `target` covers.
    pub(crate) fn from_motion<T: TextOps + ?Sized>(
        text: &T,
        motion: Motion,
        cursor: Position,
        target: Position,
    ) -> Span {
        if motion.wise() == Wise::Linewise {
            return Span::lines(cursor.line, target.line);
        }
        let Range { start, mut end } = Range::ordered(cursor, target);
        match motion.inclusivity() {
            Inclusivity::Inclusive => end = text.move_right(end, 1),
            // An exclusive range ending at the start of a later line stops at
            // the end of the line before it instead. For `w` the start of the
            // line includes its indentation.
            Inclusivity::Exclusive if end.line > start.line => {
                let line_start = match motion {
                    Motion::WordForward => text.first_non_blank(end.line).col,
                    _ => 0,
                };
                if end.col <= line_start {
                    let line = end.line - 1;
                    end = Position::new(line, text.line_len(line));
                }
            }
            Inclusivity::Exclusive => {}
        }
        Span::Chars(Range { start, end })
    }

    /// The span a visual selection covers: linewise for `V`, inclusive for `v`.
    pub(crate) fn from_selection<T: TextOps + ?Sized>(text: &T, selection: &Selection) -> Span {
        match selection.kind {
            VisualKind::LineWise => {
                let (first, last) = selection.lines();
                Span::lines(first, last)
            }
            VisualKind::CharWise => {
                let (start, end) = selection.ordered();
                Span::Chars(Range {
                    start,
                    end: text.move_right(end, 1),
                })
            }
        }
    }

    pub(crate) fn lines(a: u32, b: u32) -> Span {
        Span::Lines {
            first: a.min(b),
            last: a.max(b),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        match self {
            Span::Chars(range) => range.is_empty(),
            Span::Lines { .. } => false,
        }
    }

    /// The range a delete must remove.
    ///
    /// Deleting lines takes the terminator after the last one; when the span
    /// reaches the end of the buffer the terminator before the first line is
    /// taken instead.
    pub(crate) fn delete_range<T: TextOps + ?Sized>(&self, text: &T) -> Range {
        match *self {
            Span::Chars(range) => range,
            Span::Lines { first, last } => {
                let last_line = text.last_line();
                let last = last.min(last_line);
                if last < last_line {
                    Range {
                        start: Position::new(first, 0),
                        end: Position::new(last + 1, 0),
                    }
                } else if first > 0 {
                    Range {
                        start: Position::new(first - 1, text.line_len(first - 1)),
                        end: Position::new(last, text.line_len(last)),
                    }
                } else {
                    Range {
                        start: Position::ZERO,
                        end: Position::new(last, text.line_len(last)),
                    }
                }
            }
        }
    }

    /// What gets written to the clipboard. Line content always ends in a
    /// newline, which is how a later paste recognises it as lines.
    pub(crate) fn content<T: TextOps + ?Sized>(&self, text: &T) -> String {
        match *self {
            Span::Chars(range) => text.slice_to_string(range),
            Span::Lines { first, last } => {
                let last = last.min(text.last_line());
                let mut s = text.slice_to_string(Range {
                    start: Position::new(first, 0),
                    end: Position::new(last, text.line_len(last)),
                });
                s.push('\n');
                s
            }
        }
    }
}

/// Run `op` over `span`, writing the affected text to the clipboard.
///
/// `origin` is where the command started; yanking whole lines keeps its
/// column. Returns the cursor afterwards, or `None` for an empty span.
pub(crate) fn apply<T, C>(
    op: Operator,
    text: &T,
    clipboard: &mut C,
    span: Span,
    origin: Position,
    out: &mut Commands,
) -> Option<Position>
where
    T: TextOps + ?Sized,
    C: Clipboard + ?Sized,
{
    if span.is_empty() {
        return None;
    }
    clipboard.set(span.content(text));

    let cursor = match (op, span) {
        (Operator::Delete, span) => {
            let range = span.delete_range(text);
            trace!(?range, "delete");
            out.push(Command::Delete { range });
            match span {
                // The line left behind is the head before the range joined to
                // the tail after it; settle on a character of it.
                Span::Chars(range) => {
                    let tail = text.line_len(range.end.line).saturating_sub(range.end.col);
                    let joined = range.start.col + tail;
                    Position::new(range.start.line, range.start.col.min(joined.saturating_sub(1)))
                }
                Span::Lines { first, last } => {
                    let removed = last.min(text.last_line()).saturating_sub(first) + 1;
                    let remaining = text.line_count().saturating_sub(removed);
                    Position::new(first.min(remaining.saturating_sub(1)), 0)
                }
            }
        }
        (Operator::Yank, Span::Chars(range)) => {
            trace!(?range, "yank");
            text.clamp_to_char(range.start)
        }
        (Operator::Yank, Span::Lines { first, last }) => {
            trace!(first, last, "yank lines");
            text.clamp_to_char(Position::new(first, origin.col))
        }
    };
    Some(cursor)
}

/// Insert the clipboard after (or before) the cursor `count` times.
///
/// Returns the cursor afterwards, or `None` when the clipboard is empty.
pub(crate) fn paste<T, C>(
    text: &T,
    clipboard: &mut C,
    cursor: Position,
    before: bool,
    count: u32,
    out: &mut Commands,
) -> Option<Position>
where
    T: TextOps + ?Sized,
    C: Clipboard + ?Sized,
{
    let content = clipboard.get().filter(|s| !s.is_empty())?;
    let body = content.repeat(count.max(1) as usize);

    if content.ends_with('\n') {
        let (at, text_to_insert, line) = if before {
            (text.line_start(cursor.line), body, cursor.line)
        } else if cursor.line < text.last_line() {
            (text.line_start(cursor.line + 1), body, cursor.line + 1)
        } else {
            // No line below to insert in front of: break the last line instead.
            let at = Position::new(cursor.line, text.line_len(cursor.line));
            let mut moved = String::with_capacity(body.len());
            moved.push('\n');
            moved.push_str(&body[..body.len() - 1]);
            (at, moved, cursor.line + 1)
        };
        out.push(Command::InsertText {
            at,
            text: text_to_insert,
        });
        return Some(Position::new(line, 0));
    }

    let at = if before {
        cursor
    } else {
        text.move_right(cursor, 1)
    };
    // Land on the last pasted character when the paste stays on this line.
    let after = if body.contains('\n') {
        at
    } else {
        Position::new(at.line, at.col + text::grapheme_len(&body).saturating_sub(1))
    };
    out.push(Command::InsertText { at, text: body });
    Some(after)
}
