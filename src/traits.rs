use std::borrow::Cow;

use unicode_segmentation::UnicodeSegmentation;

use crate::text::{self, CharClass};
use crate::types::{Position, Range};

/// Read-only text-shape queries the engine asks of the host's buffer.
///
/// Only [`line_count`](TextOps::line_count) and
/// [`line_text`](TextOps::line_text) are required. Every other query has a
/// grapheme-aware default built on those two; hosts with an index over their
/// storage can override any of them. All queries must be pure and agree
/// with each other between calls.
pub trait TextOps {
    // Basic queries
    fn line_count(&self) -> u32;

    /// Contents of `line` without its terminator. Lines past the end read as empty.
    fn line_text(&self, line: u32) -> Cow<'_, str>;

    /// Length of `line` in grapheme columns.
    fn line_len(&self, line: u32) -> u32 {
        text::grapheme_len(&self.line_text(line))
    }

    fn last_line(&self) -> u32 {
        self.line_count().saturating_sub(1)
    }

    // Grapheme-aware relative moves (count >= 1). Horizontal moves stay on
    // the line; `move_right` may land one past the last character.
    fn move_left(&self, pos: Position, count: u32) -> Position {
        Position::new(pos.line, pos.col.saturating_sub(count))
    }

    fn move_right(&self, pos: Position, count: u32) -> Position {
        let max = self.line_len(pos.line);
        Position::new(pos.line, pos.col.saturating_add(count).min(max))
    }

    // Vertical moves aim for `preferred_col` when given, else the current column.
    fn move_up(&self, pos: Position, count: u32, preferred_col: Option<u32>) -> Position {
        let line = pos.line.saturating_sub(count);
        let col = preferred_col.unwrap_or(pos.col);
        Position::new(line, col.min(self.line_end(line).col))
    }

    fn move_down(&self, pos: Position, count: u32, preferred_col: Option<u32>) -> Position {
        let line = pos.line.saturating_add(count).min(self.last_line());
        let col = preferred_col.unwrap_or(pos.col);
        Position::new(line, col.min(self.line_end(line).col))
    }

    fn line_start(&self, line: u32) -> Position {
        Position::new(line, 0)
    }

    /// The last character of `line` (before the terminator), column 0 when empty.
    fn line_end(&self, line: u32) -> Position {
        Position::new(line, self.line_len(line).saturating_sub(1))
    }

    fn first_non_blank(&self, line: u32) -> Position {
        let text = self.line_text(line);
        match text
            .graphemes(true)
            .position(|g| text::classify(g) != CharClass::Blank)
        {
            Some(col) => Position::new(line, col as u32),
            None => self.line_end(line),
        }
    }

    /// Clamp onto valid buffer coordinates; the column may sit one past the
    /// last character.
    fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.min(self.last_line());
        let col = pos.col.min(self.line_len(line));
        Position { line, col }
    }

    /// Clamp onto an existing character, as normal mode requires.
    fn clamp_to_char(&self, pos: Position) -> Position {
        let pos = self.clamp(pos);
        Position::new(pos.line, pos.col.min(self.line_end(pos.line).col))
    }

    // Word motions. A word is a run of word characters or a run of other
    // non-blank characters; an empty line also counts as a word. Past the
    // last word both land at the buffer edge.
    fn next_word_start(&self, pos: Position, count: u32) -> Position {
        (0..count).fold(pos, |p, _| word_forward(self, p))
    }

    fn prev_word_start(&self, pos: Position, count: u32) -> Position {
        (0..count).fold(pos, |p, _| word_backward(self, p))
    }

    // Paragraph motions land on the empty line that bounds a paragraph.
    fn next_paragraph_start(&self, pos: Position, count: u32) -> Position {
        (0..count).fold(pos, |p, _| paragraph_forward(self, p))
    }

    fn prev_paragraph_start(&self, pos: Position, count: u32) -> Position {
        (0..count).fold(pos, |p, _| paragraph_backward(self, p))
    }

    /// Position of the `count`th occurrence of `ch` after (`forward`) or
    /// before the cursor on its line.
    fn find_in_line(&self, pos: Position, ch: char, forward: bool, count: u32) -> Option<Position> {
        let text = self.line_text(pos.line);
        let nth = count.max(1) as usize - 1;
        let col = if forward {
            text.graphemes(true)
                .enumerate()
                .skip(pos.col as usize + 1)
                .filter(|(_, g)| is_char(g, ch))
                .nth(nth)?
                .0 as u32
        } else {
            let head = &text[..text::byte_offset(&text, pos.col)];
            let mut col = text::grapheme_len(head);
            head.graphemes(true)
                .rev()
                .filter_map(|g| {
                    col -= 1;
                    is_char(g, ch).then_some(col)
                })
                .nth(nth)?
        };
        Some(Position::new(pos.line, col))
    }

    /// The text covered by `range`, with `'\n'` between lines.
    fn slice_to_string(&self, range: Range) -> String {
        let Range { start, end } = Range::ordered(range.start, range.end);
        let last = self.last_line();
        let mut out = String::new();
        for line in start.line..=end.line.min(last) {
            let text = self.line_text(line);
            let from = if line == start.line {
                text::byte_offset(&text, start.col)
            } else {
                0
            };
            let to = if line == end.line {
                text::byte_offset(&text, end.col)
            } else {
                text.len()
            };
            out.push_str(&text[from..to.max(from)]);
            if line < end.line && line < last {
                out.push('\n');
            }
        }
        out
    }

    // Literal, case-sensitive, single-line search. The match under the cursor
    // itself is only found again after wrapping.
    fn search_forward(&self, from: Position, needle: &str, wrap: bool) -> Option<Position> {
        if needle.is_empty() || self.line_count() == 0 {
            return None;
        }
        let from = self.clamp(from);
        let last = self.last_line();

        first_match(self, from.line, needle, |c| c > from.col)
            .or_else(|| {
                ((from.line + 1)..=last).find_map(|l| first_match(self, l, needle, |_| true))
            })
            .or_else(|| {
                if !wrap {
                    return None;
                }
                (0..from.line)
                    .find_map(|l| first_match(self, l, needle, |_| true))
                    .or_else(|| first_match(self, from.line, needle, |c| c <= from.col))
            })
    }

    fn search_backward(&self, from: Position, needle: &str, wrap: bool) -> Option<Position> {
        if needle.is_empty() || self.line_count() == 0 {
            return None;
        }
        let from = self.clamp(from);
        let last = self.last_line();

        last_match(self, from.line, needle, |c| c < from.col)
            .or_else(|| (0..from.line).rev().find_map(|l| last_match(self, l, needle, |_| true)))
            .or_else(|| {
                if !wrap {
                    return None;
                }
                ((from.line + 1)..=last)
                    .rev()
                    .find_map(|l| last_match(self, l, needle, |_| true))
                    .or_else(|| last_match(self, from.line, needle, |c| c >= from.col))
            })
    }
}

/// Storage for the last yanked or deleted text.
pub trait Clipboard {
    fn get(&mut self) -> Option<String>;
    fn set(&mut self, text: String);
}

/// Whether the grapheme cluster `g` is exactly the character `ch`.
fn is_char(g: &str, ch: char) -> bool {
    g.chars().eq(std::iter::once(ch))
}

fn first_match<T: TextOps + ?Sized>(
    text: &T,
    line: u32,
    needle: &str,
    keep: impl Fn(u32) -> bool,
) -> Option<Position> {
    let content = text.line_text(line);
    let col = text::match_columns(&content, needle).find(|&c| keep(c))?;
    Some(Position::new(line, col))
}

fn last_match<T: TextOps + ?Sized>(
    text: &T,
    line: u32,
    needle: &str,
    keep: impl Fn(u32) -> bool,
) -> Option<Position> {
    let content = text.line_text(line);
    let col = text::match_columns(&content, needle).filter(|&c| keep(c)).last()?;
    Some(Position::new(line, col))
}

fn word_forward<T: TextOps + ?Sized>(text: &T, pos: Position) -> Position {
    let last = text.last_line();
    let line = text.line_text(pos.line);
    let mut rest = line
        .graphemes(true)
        .map(text::classify)
        .enumerate()
        .skip(pos.col as usize);

    if let Some((_, start)) = rest.next() {
        let mut crossed_blank = start == CharClass::Blank;
        for (col, class) in rest {
            if class == CharClass::Blank {
                crossed_blank = true;
            } else if crossed_blank || class != start {
                return Position::new(pos.line, col as u32);
            }
        }
    }

    for l in (pos.line + 1)..=last {
        let next = text.line_text(l);
        if next.is_empty() {
            return Position::new(l, 0);
        }
        if let Some(col) = next
            .graphemes(true)
            .position(|g| text::classify(g) != CharClass::Blank)
        {
            return Position::new(l, col as u32);
        }
    }
    Position::new(last, text.line_len(last))
}

fn word_backward<T: TextOps + ?Sized>(text: &T, pos: Position) -> Position {
    let mut line = pos.line;
    let mut limit = pos.col;
    loop {
        let content = text.line_text(line);
        let head = &content[..text::byte_offset(&content, limit)];
        let mut col = text::grapheme_len(head);
        let mut run: Option<(CharClass, u32)> = None;
        for g in head.graphemes(true).rev() {
            col -= 1;
            let class = text::classify(g);
            match run {
                None if class != CharClass::Blank => run = Some((class, col)),
                Some((k, _)) if class == k => run = Some((k, col)),
                Some(_) => break,
                None => {}
            }
        }
        if let Some((_, col)) = run {
            return Position::new(line, col);
        }
        if line == 0 {
            return Position::ZERO;
        }
        line -= 1;
        if text.line_len(line) == 0 {
            return Position::new(line, 0);
        }
        limit = u32::MAX;
    }
}

fn paragraph_forward<T: TextOps + ?Sized>(text: &T, pos: Position) -> Position {
    let last = text.last_line();
    let blank = |l: u32| text.line_len(l) == 0;
    let mut line = pos.line.min(last);
    while line < last && blank(line) {
        line += 1;
    }
    while line < last && !blank(line) {
        line += 1;
    }
    if blank(line) && line != pos.line {
        Position::new(line, 0)
    } else {
        Position::new(last, text.line_len(last))
    }
}

fn paragraph_backward<T: TextOps + ?Sized>(text: &T, pos: Position) -> Position {
    let blank = |l: u32| text.line_len(l) == 0;
    let mut line = pos.line.min(text.last_line());
    while line > 0 && blank(line) {
        line -= 1;
    }
    while line > 0 && !blank(line) {
        line -= 1;
    }
    if blank(line) && line != pos.line {
        Position::new(line, 0)
    } else {
        Position::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::StrText;

    #[test]
    fn word_forward_stops_at_class_changes() {
        let text = StrText::new("hello, world! test-case");
        let p = text.next_word_start(Position::ZERO, 1);
        assert_eq!(p, Position::new(0, 5));
        assert_eq!(text.next_word_start(p, 1), Position::new(0, 7));
        assert_eq!(text.next_word_start(Position::ZERO, 4), Position::new(0, 14));
    }

    #[test]
    fn word_forward_crosses_lines_and_stops_on_empty_lines() {
        let text = StrText::new("one\n\n   two");
        let p = text.next_word_start(Position::ZERO, 1);
        assert_eq!(p, Position::new(1, 0));
        assert_eq!(text.next_word_start(p, 1), Position::new(2, 3));
        // past the last word: buffer end
        assert_eq!(text.next_word_start(Position::new(2, 3), 1), Position::new(2, 6));
    }

    #[test]
    fn word_backward() {
        let text = StrText::new("hello world rust\nprogramming is fun");
        let p = text.prev_word_start(Position::new(1, 15), 1);
        assert_eq!(p, Position::new(1, 12));
        assert_eq!(text.prev_word_start(p, 2), Position::new(0, 12));
        assert_eq!(text.prev_word_start(Position::new(0, 3), 5), Position::ZERO);
    }

    #[test]
    fn word_motions_treat_emoji_as_one_column() {
        let text = StrText::new("a 😀😀 b");
        assert_eq!(text.next_word_start(Position::ZERO, 1), Position::new(0, 2));
        assert_eq!(text.next_word_start(Position::new(0, 2), 1), Position::new(0, 5));
        assert_eq!(text.prev_word_start(Position::new(0, 5), 1), Position::new(0, 2));
    }

    #[test]
    fn paragraphs() {
        let text = StrText::new("a\nb\n\nc\nd\n\n\ne");
        assert_eq!(text.next_paragraph_start(Position::ZERO, 1), Position::new(2, 0));
        assert_eq!(text.next_paragraph_start(Position::ZERO, 2), Position::new(5, 0));
        assert_eq!(text.next_paragraph_start(Position::ZERO, 3), Position::new(7, 1));
        assert_eq!(text.prev_paragraph_start(Position::new(7, 0), 1), Position::new(6, 0));
        assert_eq!(text.prev_paragraph_start(Position::new(4, 0), 1), Position::new(2, 0));
        assert_eq!(text.prev_paragraph_start(Position::new(2, 0), 1), Position::ZERO);
    }

    #[test]
    fn find_in_line_both_directions() {
        let text = StrText::new("hello world, look at those books");
        let books = Position::new(0, 14);
        assert_eq!(text.find_in_line(Position::ZERO, 'o', true, 3), Some(books));
        assert_eq!(text.find_in_line(books, 'o', false, 1), Some(Position::new(0, 7)));
        assert_eq!(text.find_in_line(books, 'o', false, 2), Some(Position::new(0, 4)));
        assert_eq!(text.find_in_line(Position::ZERO, 'z', true, 1), None);
        assert_eq!(text.find_in_line(Position::ZERO, 'h', false, 1), None);
    }

    #[test]
    fn vertical_moves_clamp_to_last_character() {
        let text = StrText::new("abcdef\nxy\n");
        let p = text.move_down(Position::new(0, 5), 1, None);
        assert_eq!(p, Position::new(1, 1));
        assert_eq!(text.move_down(p, 1, Some(5)), Position::new(2, 0));
        assert_eq!(text.move_up(Position::new(2, 0), 10, Some(5)), Position::new(0, 5));
    }

    #[test]
    fn slices_span_line_terminators() {
        let text = StrText::new("line one\nline two\nline three");
        let r = Range::ordered(Position::new(0, 5), Position::new(1, 4));
        assert_eq!(text.slice_to_string(r), "one\nline");
        let r = Range::ordered(Position::new(1, 0), Position::new(2, 0));
        assert_eq!(text.slice_to_string(r), "line two\n");
        let r = Range::ordered(Position::new(2, 5), Position::new(9, 0));
        assert_eq!(text.slice_to_string(r), "three");
    }

    #[test]
    fn search_wraps_unless_disabled() {
        let text = StrText::new("first line\nsecond foo\nthird line");
        let from = Position::new(2, 6);
        assert_eq!(text.search_forward(from, "line", true), Some(Position::new(0, 6)));
        assert_eq!(text.search_forward(from, "line", false), None);
        let second = Position::new(0, 6);
        assert_eq!(text.search_backward(second, "line", true), Some(Position::new(2, 6)));
        assert_eq!(text.search_backward(second, "line", false), None);
    }

    #[test]
    fn lone_match_is_found_after_wrapping() {
        let text = StrText::new("foo bar");
        let at = Position::new(0, 4);
        assert_eq!(text.search_forward(at, "bar", true), Some(at));
        assert_eq!(text.search_backward(at, "bar", true), Some(at));
        assert_eq!(text.search_forward(at, "", true), None);
    }
}
