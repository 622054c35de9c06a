use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::key::{InputEvent, KeyCode, KeyEvent};
use crate::motion::Motion;
use crate::operator::{self, Operator, Span};
use crate::parser::{Action, Context, InsertAt, Parser, Verb};
use crate::search::{LastSearch, SearchDirection, SearchState};
use crate::text;
use crate::traits::{Clipboard, TextOps};
use crate::types::{Command, Commands, Mode, Position, Range, Selection, VisualKind};
use crate::visual::VisualSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    Insert,
    Visual(VisualSession),
    SearchPrompt,
}

impl State {
    fn mode(&self) -> Mode {
        match self {
            State::Normal => Mode::Normal,
            State::Insert => Mode::Insert,
            State::Visual(session) => Mode::Visual(session.kind()),
            State::SearchPrompt => Mode::SearchPrompt,
        }
    }
}

/// The modal state of one editing session.
///
/// The engine never holds on to the host's text or clipboard; both are
/// passed to every [`handle_event`](Engine::handle_event) call together with
/// the current cursor.
#[derive(Debug, Clone)]
pub struct Engine {
    state: State,
    preferred_col: Option<u32>,
    parser: Parser,
    search: SearchState,
    config: EngineConfig,
}

/// Read-only view of the engine for status lines and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSnapshot {
    pub mode: Mode,
    /// Column vertical motions aim for; `u32::MAX` after `$`.
    pub preferred_col: Option<u32>,
    pub pending_count: Option<u32>,
    pub pending_operator: Option<Operator>,
    /// The next character is taken as an `f`/`t` target.
    pub awaiting_char: bool,
}

#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    mode: Mode,
    anchor: Position,
    config: EngineConfig,
}

impl EngineBuilder {
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Where the selection is anchored when starting in a visual mode.
    pub fn anchor(mut self, anchor: Position) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn wrap_scan(mut self, wrap: bool) -> Self {
        self.config.wrap_scan = wrap;
        self
    }

    pub fn max_count(mut self, max: u32) -> Self {
        self.config.max_count = max;
        self
    }

    /// Build the engine, raising a zero count limit to one.
    pub fn build(mut self) -> Engine {
        self.config.max_count = self.config.max_count.max(1);
        self.finish()
    }

    pub fn try_build(self) -> Result<Engine, ConfigError> {
        self.config.validate()?;
        Ok(self.finish())
    }

    fn finish(self) -> Engine {
        let state = match self.mode {
            Mode::Normal => State::Normal,
            Mode::Insert => State::Insert,
            Mode::Visual(kind) => State::Visual(VisualSession::start(self.anchor, kind)),
            Mode::SearchPrompt => State::SearchPrompt,
        };
        Engine {
            state,
            preferred_col: None,
            parser: Parser::default(),
            search: SearchState::default(),
            config: self.config,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        EngineBuilder::default().build()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The active selection with `cursor` as its moving end, if in visual mode.
    pub fn selection(&self, cursor: Position) -> Option<Selection> {
        match self.state {
            State::Visual(session) => Some(session.selection(cursor)),
            _ => None,
        }
    }

    /// The query being typed, while the search prompt is open.
    pub fn search_prompt(&self) -> Option<(SearchDirection, &str)> {
        match self.state {
            State::SearchPrompt => Some((self.search.direction(), self.search.prompt())),
            _ => None,
        }
    }

    pub fn last_search(&self) -> Option<&LastSearch> {
        self.search.last()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            mode: self.mode(),
            preferred_col: self.preferred_col,
            pending_count: self.parser.pending_count(),
            pending_operator: self.parser.pending_operator(),
            awaiting_char: self.parser.awaits_char(),
        }
    }

    /// Process one input event.
    ///
    /// Returns the new cursor and the commands the host must apply, in
    /// order. The incoming cursor is clamped to the text first. Key
    /// handling never fails: unknown sequences are dropped and impossible
    /// motions leave the cursor where it is.
    pub fn handle_event<T, C>(
        &mut self,
        text: &T,
        clipboard: &mut C,
        cursor: Position,
        input: InputEvent,
    ) -> (Position, Commands)
    where
        T: TextOps + ?Sized,
        C: Clipboard + ?Sized,
    {
        let cursor = text.clamp(cursor);
        let mut out = Commands::new();

        if let InputEvent::Key(KeyEvent {
            code: KeyCode::Esc, ..
        }) = input
        {
            return (self.escape(cursor, &mut out), out);
        }

        let cursor = match self.state {
            State::Insert => self.insert(text, cursor, input, &mut out),
            State::SearchPrompt => self.search_prompt_input(text, cursor, input, &mut out),
            State::Normal | State::Visual(_) => {
                self.command(text, clipboard, cursor, input, &mut out)
            }
        };
        (cursor, out)
    }

    fn set_state(&mut self, state: State) {
        if self.state != state {
            trace!(from = ?self.state.mode(), to = ?state.mode(), "mode change");
        }
        self.state = state;
    }

    fn escape(&mut self, cursor: Position, out: &mut Commands) -> Position {
        if let State::Visual(_) = self.state {
            out.push(Command::SetSelection(None));
        }
        self.parser.reset();
        self.search.cancel();
        self.set_state(State::Normal);
        cursor
    }

    fn insert<T: TextOps + ?Sized>(
        &mut self,
        text: &T,
        cursor: Position,
        input: InputEvent,
        out: &mut Commands,
    ) -> Position {
        let key = match input {
            InputEvent::ReceivedChar('\n' | '\r') => KeyCode::Enter,
            InputEvent::ReceivedChar(ch) if ch.is_control() && ch != '\t' => return cursor,
            InputEvent::ReceivedChar(ch) => {
                let line = text.line_text(cursor.line);
                let col = if text::extends_previous(&line, cursor.col, ch) {
                    cursor.col
                } else {
                    cursor.col + 1
                };
                out.push(Command::InsertText {
                    at: cursor,
                    text: ch.to_string(),
                });
                return Position::new(cursor.line, col);
            }
            // Typed text arrives as received characters.
            InputEvent::Key(key) => key.code,
        };

        match key {
            KeyCode::Enter => {
                out.push(Command::InsertText {
                    at: cursor,
                    text: "\n".to_string(),
                });
                Position::new(cursor.line + 1, 0)
            }
            KeyCode::Backspace if cursor.col > 0 => {
                let start = Position::new(cursor.line, cursor.col - 1);
                out.push(Command::Delete {
                    range: Range { start, end: cursor },
                });
                start
            }
            KeyCode::Backspace if cursor.line > 0 => {
                let prev = cursor.line - 1;
                let start = Position::new(prev, text.line_len(prev));
                out.push(Command::Delete {
                    range: Range { start, end: cursor },
                });
                start
            }
            KeyCode::Left => text.move_left(cursor, 1),
            KeyCode::Right => text.move_right(cursor, 1),
            KeyCode::Up => text.move_up(cursor, 1, None),
            KeyCode::Down => text.move_down(cursor, 1, None),
            _ => cursor,
        }
    }

    fn search_prompt_input<T: TextOps + ?Sized>(
        &mut self,
        text: &T,
        cursor: Position,
        input: InputEvent,
        out: &mut Commands,
    ) -> Position {
        match input {
            InputEvent::ReceivedChar('\n' | '\r')
            | InputEvent::Key(KeyEvent {
                code: KeyCode::Enter, ..
            }) => {
                let found = self.search.commit(text, cursor, self.config.wrap_scan);
                self.set_state(State::Normal);
                match found {
                    Some(pos) => self.jump(pos, out),
                    None => cursor,
                }
            }
            InputEvent::Key(KeyEvent {
                code: KeyCode::Backspace,
                ..
            }) => {
                if !self.search.backspace() {
                    self.set_state(State::Normal);
                }
                cursor
            }
            InputEvent::ReceivedChar(ch) if ch == '\t' || !ch.is_control() => {
                self.search.push(ch);
                cursor
            }
            _ => cursor,
        }
    }

    fn command<T, C>(
        &mut self,
        text: &T,
        clipboard: &mut C,
        cursor: Position,
        input: InputEvent,
        out: &mut Commands,
    ) -> Position
    where
        T: TextOps + ?Sized,
        C: Clipboard + ?Sized,
    {
        let ctx = match self.state {
            State::Visual(_) => Context::Visual,
            _ => Context::Normal,
        };
        let max = self.config.max_count;
        let action = match input {
            InputEvent::Key(key) => self.parser.feed(key, ctx, max),
            InputEvent::ReceivedChar(ch) => self.parser.feed_char(ch, max),
        };

        match action {
            Action::Pending | Action::Discard => cursor,
            Action::Move { motion, count } => self.move_cursor(text, cursor, motion, count, out),
            Action::Operate { op, motion, count } => {
                let want = self.vertical_column(motion, cursor);
                let Some(target) = motion.resolve(text, cursor, count, want) else {
                    debug!(?motion, ?cursor, "motion failed");
                    return cursor;
                };
                let span = Span::from_motion(text, motion, cursor, target);
                self.operate(text, clipboard, cursor, op, span, cursor, out)
            }
            Action::OperateLines { op, count } => {
                let n = count.unwrap_or(1);
                let last = cursor.line.saturating_add(n - 1).min(text.last_line());
                let span = Span::lines(cursor.line, last);
                self.operate(text, clipboard, cursor, op, span, cursor, out)
            }
            Action::OperateSelection(op) => {
                let State::Visual(session) = self.state else {
                    return cursor;
                };
                let (span, origin) = session.span(text, cursor);
                self.set_state(State::Normal);
                let pos = self.operate(text, clipboard, cursor, op, span, origin, out);
                out.push(Command::SetSelection(None));
                pos
            }
            Action::Verb { verb, count } => self.verb(text, clipboard, cursor, verb, count, out),
        }
    }

    /// Column a vertical motion aims for; sets it from `from` on first use.
    fn vertical_column(&mut self, motion: Motion, from: Position) -> Option<u32> {
        motion
            .is_vertical()
            .then(|| *self.preferred_col.get_or_insert(from.col))
    }

    fn move_cursor<T: TextOps + ?Sized>(
        &mut self,
        text: &T,
        cursor: Position,
        motion: Motion,
        count: Option<u32>,
        out: &mut Commands,
    ) -> Position {
        let want = self.vertical_column(motion, cursor);
        let Some(target) = motion.resolve(text, cursor, count, want) else {
            debug!(?motion, ?cursor, "motion failed");
            return cursor;
        };
        let target = text.clamp_to_char(target);
        if !motion.is_vertical() {
            self.preferred_col = (motion == Motion::LineEnd).then_some(u32::MAX);
        }
        out.push(Command::SetCursor(target));
        if let State::Visual(session) = self.state {
            out.push(Command::SetSelection(Some(session.selection(target))));
        }
        target
    }

    #[allow(clippy::too_many_arguments)]
    fn operate<T, C>(
        &mut self,
        text: &T,
        clipboard: &mut C,
        cursor: Position,
        op: Operator,
        span: Span,
        origin: Position,
        out: &mut Commands,
    ) -> Position
    where
        T: TextOps + ?Sized,
        C: Clipboard + ?Sized,
    {
        match operator::apply(op, text, clipboard, span, origin, out) {
            Some(pos) => self.jump(pos, out),
            None => cursor,
        }
    }

    /// Move to `pos` as the result of a command rather than a motion.
    fn jump(&mut self, pos: Position, out: &mut Commands) -> Position {
        self.preferred_col = None;
        out.push(Command::SetCursor(pos));
        pos
    }

    fn verb<T, C>(
        &mut self,
        text: &T,
        clipboard: &mut C,
        cursor: Position,
        verb: Verb,
        count: Option<u32>,
        out: &mut Commands,
    ) -> Position
    where
        T: TextOps + ?Sized,
        C: Clipboard + ?Sized,
    {
        let n = count.unwrap_or(1);
        let chars = |motion: Motion| {
            let target = motion.resolve(text, cursor, count, None).unwrap_or(cursor);
            Span::from_motion(text, motion, cursor, target)
        };

        let delete = Operator::Delete;
        match verb {
            Verb::DeleteChar => {
                let span = chars(Motion::Right);
                self.operate(text, clipboard, cursor, delete, span, cursor, out)
            }
            Verb::DeleteCharBefore => {
                let span = chars(Motion::Left);
                self.operate(text, clipboard, cursor, delete, span, cursor, out)
            }
            Verb::DeleteToLineEnd => {
                let span = chars(Motion::LineEnd);
                self.operate(text, clipboard, cursor, delete, span, cursor, out)
            }
            Verb::YankLine => {
                let last = cursor.line.saturating_add(n - 1).min(text.last_line());
                let span = Span::lines(cursor.line, last);
                self.operate(text, clipboard, cursor, Operator::Yank, span, cursor, out)
            }
            Verb::Paste { before } => {
                match operator::paste(text, clipboard, cursor, before, n, out) {
                    Some(pos) => self.jump(pos, out),
                    None => {
                        debug!("nothing to paste");
                        cursor
                    }
                }
            }
            Verb::Insert(at) => {
                self.set_state(State::Insert);
                let pos = match at {
                    InsertAt::Cursor => return cursor,
                    InsertAt::AfterCursor => text.move_right(cursor, 1),
                    InsertAt::LineStart => text.line_start(cursor.line),
                    InsertAt::LineEnd => Position::new(cursor.line, text.line_len(cursor.line)),
                    InsertAt::NewLineBelow => {
                        out.push(Command::InsertText {
                            at: Position::new(cursor.line, text.line_len(cursor.line)),
                            text: "\n".to_string(),
                        });
                        Position::new(cursor.line + 1, 0)
                    }
                    InsertAt::NewLineAbove => {
                        out.push(Command::InsertText {
                            at: text.line_start(cursor.line),
                            text: "\n".to_string(),
                        });
                        text.line_start(cursor.line)
                    }
                };
                self.jump(pos, out)
            }
            Verb::Visual(kind) => self.toggle_visual(cursor, kind, out),
            Verb::Search(direction) => {
                self.search.begin(direction);
                self.set_state(State::SearchPrompt);
                cursor
            }
            Verb::RepeatSearch { reverse } => {
                let wrap = self.config.wrap_scan;
                match self.search.repeat(text, cursor, reverse, n, wrap) {
                    Some(pos) => self.jump(pos, out),
                    None => cursor,
                }
            }
        }
    }

    /// `v`/`V`: start a session, switch its kind, or end it when the kind matches.
    fn toggle_visual(
        &mut self,
        cursor: Position,
        kind: VisualKind,
        out: &mut Commands,
    ) -> Position {
        match self.state {
            State::Visual(session) if session.kind() == kind => {
                out.push(Command::SetSelection(None));
                self.set_state(State::Normal);
            }
            State::Visual(mut session) => {
                session.switch(kind);
                out.push(Command::SetSelection(Some(session.selection(cursor))));
                self.set_state(State::Visual(session));
            }
            _ => {
                let session = VisualSession::start(cursor, kind);
                out.push(Command::SetSelection(Some(session.selection(cursor))));
                self.set_state(State::Visual(session));
            }
        }
        cursor
    }
}
