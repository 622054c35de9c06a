//! `/` and `?` search: prompt editing, committed queries, `n` and `N`.
//!
//! Queries are literal and case-sensitive, matched within single lines.

use tracing::{debug, trace};

use crate::traits::TextOps;
use crate::types::Position;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchDirection {
    /// `/`
    #[default]
    Forward,
    /// `?`
    Backward,
}

impl SearchDirection {
    pub fn reversed(self) -> Self {
        match self {
            SearchDirection::Forward => SearchDirection::Backward,
            SearchDirection::Backward => SearchDirection::Forward,
        }
    }
}

/// The most recently committed search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastSearch {
    pub query: String,
    pub direction: SearchDirection,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct SearchState {
    prompt: String,
    direction: SearchDirection,
    last: Option<LastSearch>,
}

impl SearchState {
    pub(crate) fn begin(&mut self, direction: SearchDirection) {
        self.prompt.clear();
        self.direction = direction;
    }

    pub(crate) fn push(&mut self, ch: char) {
        self.prompt.push(ch);
    }

    /// Remove the last character; `false` if the prompt was already empty.
    pub(crate) fn backspace(&mut self) -> bool {
        self.prompt.pop().is_some()
    }

    pub(crate) fn cancel(&mut self) {
        self.prompt.clear();
    }

    pub(crate) fn prompt(&self) -> &str {
        &self.prompt
    }

    pub(crate) fn direction(&self) -> SearchDirection {
        self.direction
    }

    pub(crate) fn last(&self) -> Option<&LastSearch> {
        self.last.as_ref()
    }

    /// Store the prompt as the last search and look for it from `cursor`.
    ///
    /// An empty prompt keeps the previous search and finds nothing.
    pub(crate) fn commit<T: TextOps + ?Sized>(
        &mut self,
        text: &T,
        cursor: Position,
        wrap: bool,
    ) -> Option<Position> {
        if self.prompt.is_empty() {
            return None;
        }
        let last = LastSearch {
            query: self.prompt.clone(),
            direction: self.direction,
        };
        self.prompt.clear();
        trace!(query = %last.query, direction = ?last.direction, "search committed");
        let found = find(text, cursor, &last.query, last.direction, 1, wrap);
        self.last = Some(last);
        found
    }

    /// `n` (or `N` with `reverse`) repeated `count` times.
    pub(crate) fn repeat<T: TextOps + ?Sized>(
        &self,
        text: &T,
        cursor: Position,
        reverse: bool,
        count: u32,
        wrap: bool,
    ) -> Option<Position> {
        let last = self.last.as_ref()?;
        let direction = if reverse {
            last.direction.reversed()
        } else {
            last.direction
        };
        find(text, cursor, &last.query, direction, count, wrap)
    }
}

fn find<T: TextOps + ?Sized>(
    text: &T,
    from: Position,
    needle: &str,
    direction: SearchDirection,
    count: u32,
    wrap: bool,
) -> Option<Position> {
    let mut pos = from;
    for _ in 0..count.max(1) {
        let next = match direction {
            SearchDirection::Forward => text.search_forward(pos, needle, wrap),
            SearchDirection::Backward => text.search_backward(pos, needle, wrap),
        };
        match next {
            Some(p) => pos = p,
            None => {
                debug!(needle, ?direction, "pattern not found");
                return None;
            }
        }
    }
    Some(pos)
}
