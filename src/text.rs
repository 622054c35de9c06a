//! Grapheme arithmetic over single lines of text.
//!
//! Columns everywhere in this crate count extended grapheme clusters. The
//! helpers here translate between those columns and byte offsets, and
//! classify clusters for word motions.

use std::borrow::Cow;

use unicode_segmentation::UnicodeSegmentation;

use crate::traits::TextOps;

/// Number of grapheme clusters in `s`.
pub fn grapheme_len(s: &str) -> u32 {
    s.graphemes(true).count() as u32
}

/// Byte offset of grapheme column `col`, or `s.len()` past the end.
pub fn byte_offset(s: &str, col: u32) -> usize {
    s.grapheme_indices(true)
        .nth(col as usize)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Columns at which `needle` starts on a grapheme boundary.
pub(crate) fn match_columns<'a>(line: &'a str, needle: &'a str) -> impl Iterator<Item = u32> + 'a {
    line.grapheme_indices(true)
        .enumerate()
        .filter(move |(_, (b, _))| line[*b..].starts_with(needle))
        .map(|(col, _)| col as u32)
}

/// Whether typing `ch` at `col` merges it into the cluster before it, as a
/// combining mark or joiner does.
pub(crate) fn extends_previous(line: &str, col: u32, ch: char) -> bool {
    if ch.is_ascii() {
        return false;
    }
    let head = &line[..byte_offset(line, col)];
    let Some(prev) = head.graphemes(true).next_back() else {
        return false;
    };
    let mut joined = String::with_capacity(prev.len() + ch.len_utf8());
    joined.push_str(prev);
    joined.push(ch);
    grapheme_len(&joined) == 1
}

/// Character classes used by word motions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CharClass {
    Blank,
    /// Alphanumerics and underscore.
    Word,
    /// Everything else that is not blank.
    Punct,
}

pub(crate) fn classify(grapheme: &str) -> CharClass {
    match grapheme.chars().next() {
        None => CharClass::Blank,
        Some(c) if c.is_whitespace() => CharClass::Blank,
        Some(c) if c.is_alphanumeric() || c == '_' => CharClass::Word,
        Some(_) => CharClass::Punct,
    }
}

/// A read-only [`TextOps`] view over a borrowed string.
///
/// Lines are split on `'\n'`; a trailing `'\r'` is not part of the line. A
/// string ending in a newline has a final empty line, the way rope-backed
/// buffers report it.
///
/// ```
/// use modal_engine::text::StrText;
/// use modal_engine::TextOps;
///
/// let text = StrText::new("héllo\nwörld");
/// assert_eq!(text.line_count(), 2);
/// assert_eq!(text.line_len(0), 5);
/// ```
#[derive(Debug, Clone)]
pub struct StrText<'a> {
    lines: Vec<&'a str>,
}

impl<'a> StrText<'a> {
    pub fn new(text: &'a str) -> Self {
        let lines = text
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .collect();
        StrText { lines }
    }
}

impl TextOps for StrText<'_> {
    fn line_count(&self) -> u32 {
        self.lines.len() as u32
    }

    fn line_text(&self, line: u32) -> Cow<'_, str> {
        Cow::Borrowed(self.lines.get(line as usize).copied().unwrap_or(""))
    }
}
