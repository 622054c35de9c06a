//! Key sequence parsing for Normal and Visual mode.
//!
//! The parser owns the typed count and the [`PendingInput`] and turns each
//! key into an [`Action`] once a sequence is complete. It knows nothing about
//! the buffer; the engine resolves actions against the host's text.

use tracing::debug;

use crate::key::{KeyCode, KeyEvent};
use crate::motion::Motion;
use crate::operator::Operator;
use crate::pending::{self, Count, FindSpec, PendingInput, PendingOperator, Prefix};
use crate::search::SearchDirection;
use crate::types::VisualKind;

/// Which key bindings apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Context {
    Normal,
    Visual,
}

/// Where `i`, `a` and friends start inserting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InsertAt {
    Cursor,
    AfterCursor,
    /// `I` starts at column 0, not the first non-blank.
    LineStart,
    LineEnd,
    NewLineBelow,
    NewLineAbove,
}

/// Single-key commands that are neither motions nor operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verb {
    DeleteChar, // x
    DeleteCharBefore, // X
    DeleteToLineEnd, // D
    YankLine, // Y
    Paste { before: bool },
    Insert(InsertAt),
    Visual(VisualKind),
    Search(SearchDirection),
    RepeatSearch { reverse: bool },
}

impl Verb {
    fn from_key(code: KeyCode, ctx: Context) -> Option<Verb> {
        let KeyCode::Char(c) = code else {
            return None;
        };
        let verb = match (ctx, c) {
            (_, 'v') => Verb::Visual(VisualKind::CharWise),
            (_, 'V') => Verb::Visual(VisualKind::LineWise),
            (Context::Visual, _) => return None,
            (Context::Normal, c) => match c {
                'x' => Verb::DeleteChar,
                'X' => Verb::DeleteCharBefore,
                'D' => Verb::DeleteToLineEnd,
                'Y' => Verb::YankLine,
                'p' => Verb::Paste { before: false },
                'P' => Verb::Paste { before: true },
                'i' => Verb::Insert(InsertAt::Cursor),
                'a' => Verb::Insert(InsertAt::AfterCursor),
                'I' => Verb::Insert(InsertAt::LineStart),
                'A' => Verb::Insert(InsertAt::LineEnd),
                'o' => Verb::Insert(InsertAt::NewLineBelow),
                'O' => Verb::Insert(InsertAt::NewLineAbove),
                '/' => Verb::Search(SearchDirection::Forward),
                '?' => Verb::Search(SearchDirection::Backward),
                'n' => Verb::RepeatSearch { reverse: false },
                'N' => Verb::RepeatSearch { reverse: true },
                _ => return None,
            },
        };
        Some(verb)
    }
}

/// The outcome of feeding one key to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    /// More keys are needed.
    Pending,
    /// Move the cursor (or the active end of a selection).
    Move { motion: Motion, count: Option<u32> },
    /// Apply an operator over a motion's range.
    Operate {
        op: Operator,
        motion: Motion,
        count: Option<u32>,
    },
    /// A doubled operator key (`dd`, `yy`) over `count` lines.
    OperateLines { op: Operator, count: Option<u32> },
    /// An operator key while a selection is active.
    OperateSelection(Operator),
    Verb { verb: Verb, count: Option<u32> },
    /// The sequence was not recognised and has been dropped.
    Discard,
}

fn prefix_for(code: KeyCode) -> Option<Prefix> {
    let how = |forward, till| Prefix::Find(FindSpec { forward, till });
    match code {
        KeyCode::Char('g') => Some(Prefix::G),
        KeyCode::Char('f') => Some(how(true, false)),
        KeyCode::Char('t') => Some(how(true, true)),
        KeyCode::Char('F') => Some(how(false, false)),
        KeyCode::Char('T') => Some(how(false, true)),
        _ => None,
    }
}

#[derive(Debug, Default, Clone)]
pub(crate) struct Parser {
    count: Count,
    pending: PendingInput,
}

impl Parser {
    pub(crate) fn feed(&mut self, key: KeyEvent, ctx: Context, max_count: u32) -> Action {
        let code = match key.command_char() {
            Some(c) => KeyCode::Char(c),
            // Chorded character keys are not bound.
            None if matches!(key.code, KeyCode::Char(_)) => return self.discard(key.code),
            None => key.code,
        };

        match self.pending {
            PendingInput::Prefix {
                prefix: Prefix::Find(how),
                operator,
            } => {
                return match code {
                    KeyCode::Char(target) => self.find(target, how, operator, max_count),
                    _ => self.discard(code),
                };
            }
            PendingInput::Prefix {
                prefix: Prefix::G,
                operator,
            } => {
                return match code {
                    KeyCode::Char('g') => self.complete(Motion::BufferStart, operator, max_count),
                    _ => self.discard(code),
                };
            }
            _ => {}
        }

        if let KeyCode::Char(c @ '0'..='9') = code
            && (c != '0' || self.count.is_started())
        {
            self.count.push_digit(c as u32 - '0' as u32, max_count);
            return Action::Pending;
        }

        if let PendingInput::Operator(pending) = self.pending {
            if Operator::from_key(code) == Some(pending.op) {
                let count = pending::combine(pending.count, self.count.take(), max_count);
                self.pending = PendingInput::Idle;
                return Action::OperateLines {
                    op: pending.op,
                    count,
                };
            }
            if let Some(motion) = Motion::from_key(code) {
                return self.complete(motion, Some(pending), max_count);
            }
            if let Some(prefix) = prefix_for(code) {
                self.pending = PendingInput::Prefix {
                    prefix,
                    operator: Some(pending),
                };
                return Action::Pending;
            }
            return self.discard(code);
        }

        let op = match (ctx, code) {
            (Context::Visual, KeyCode::Char('x')) => Some(Operator::Delete),
            _ => Operator::from_key(code),
        };
        if let Some(op) = op {
            if ctx == Context::Visual {
                self.count.clear();
                return Action::OperateSelection(op);
            }
            self.pending = PendingInput::Operator(PendingOperator {
                op,
                count: self.count.take(),
            });
            return Action::Pending;
        }
        if let Some(motion) = Motion::from_key(code) {
            return self.complete(motion, None, max_count);
        }
        if let Some(prefix) = prefix_for(code) {
            self.pending = PendingInput::Prefix {
                prefix,
                operator: None,
            };
            return Action::Pending;
        }
        if let Some(verb) = Verb::from_key(code, ctx) {
            return Action::Verb {
                verb,
                count: self.count.take(),
            };
        }
        self.discard(code)
    }

    /// A received character; only meaningful as the target of `f`/`t`.
    pub(crate) fn feed_char(&mut self, ch: char, max_count: u32) -> Action {
        match self.pending {
            PendingInput::Prefix {
                prefix: Prefix::Find(how),
                operator,
            } => self.find(ch, how, operator, max_count),
            _ => Action::Pending,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.count.clear();
        self.pending = PendingInput::Idle;
    }

    pub(crate) fn pending_count(&self) -> Option<u32> {
        self.count.peek()
    }

    pub(crate) fn pending_operator(&self) -> Option<Operator> {
        self.pending.operator().map(|p| p.op)
    }

    pub(crate) fn awaits_char(&self) -> bool {
        self.pending.awaits_char()
    }

    fn find(
        &mut self,
        target: char,
        how: FindSpec,
        operator: Option<PendingOperator>,
        max_count: u32,
    ) -> Action {
        let motion = Motion::FindChar {
            target,
            forward: how.forward,
            till: how.till,
        };
        self.complete(motion, operator, max_count)
    }

    fn complete(
        &mut self,
        motion: Motion,
        operator: Option<PendingOperator>,
        max_count: u32,
    ) -> Action {
        self.pending = PendingInput::Idle;
        let count = self.count.take();
        match operator {
            Some(pending) => Action::Operate {
                op: pending.op,
                motion,
                count: pending::combine(pending.count, count, max_count),
            },
            None => Action::Move { motion, count },
        }
    }

    fn discard(&mut self, code: KeyCode) -> Action {
        debug!(
            ?code,
            pending = ?self.pending,
            count = ?self.count.peek(),
            "discarding key sequence"
        );
        self.reset();
        Action::Discard
    }
}
