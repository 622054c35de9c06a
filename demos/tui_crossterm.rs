//! Terminal host for the modal engine using crossterm and ratatui.
//!
//! The buffer is a rope that only answers the two required `TextOps`
//! queries. Run with `cargo run --example tui_crossterm`; quit with Ctrl-C.
//! Set `RUST_LOG=modal_engine=trace` to write engine logs to
//! `modal_engine.log`.

use std::borrow::Cow;
use std::fs::File;
use std::io;
use std::sync::Mutex;

use crossterm::{
    event::{self, Event, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use modal_engine::clipboard::MemoryClipboard;
use modal_engine::{
    Command, Engine, InputEvent, KeyCode, KeyEvent, Mode, Modifiers, Position, SearchDirection,
    Selection, TextOps, VisualKind,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use ropey::Rope;
use tracing_subscriber::EnvFilter;
use unicode_segmentation::UnicodeSegmentation;

const WELCOME: &str = "Welcome to modal_engine!\n\n\
Press 'i' to enter insert mode and Esc to return to normal mode.\n\
Press Ctrl-C to quit.\n\n\
Try commands like:\n\
- hjkl, w, b, {, } and f<char> for movement\n\
- dd to delete a line, dw to delete a word\n\
- yy to yank a line and p to paste it\n\
- v or V to select, then d or y\n\
- /pattern then n and N to search\n";

struct RopeBuffer {
    rope: Rope,
}

impl RopeBuffer {
    fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    fn apply(&mut self, cmd: &Command) {
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
        let head: usize = self
            .line_text(pos.line)
            .graphemes(true)
            .take(pos.col as usize)
            .map(|g| g.chars().count())
            .sum();
        self.rope.line_to_char(pos.line as usize) + head
    }
}

impl TextOps for RopeBuffer {
    fn line_count(&self) -> u32 {
        self.rope.len_lines() as u32
    }

    fn line_text(&self, line: u32) -> Cow<'_, str> {
        let Some(slice) = self.rope.get_line(line as usize) else {
            return Cow::Borrowed("");
        };
        let mut s = slice.to_string();
        while s.ends_with(['\n', '\r']) {
            s.pop();
        }
        Cow::Owned(s)
    }
}

struct App {
    engine: Engine,
    buffer: RopeBuffer,
    clipboard: MemoryClipboard,
    cursor: Position,
    selection: Option<Selection>,
}

impl App {
    fn new() -> Self {
        Self {
            engine: Engine::new(),
            buffer: RopeBuffer::new(WELCOME),
            clipboard: MemoryClipboard::new(),
            cursor: Position::ZERO,
            selection: None,
        }
    }

    fn handle_key(&mut self, key: CKeyEvent) {
        let Some(input) = convert_key(key, self.engine.mode()) else {
            return;
        };
        let (cursor, commands) =
            self.engine
                .handle_event(&self.buffer, &mut self.clipboard, self.cursor, input);
        for cmd in &commands {
            match cmd {
                Command::SetSelection(sel) => self.selection = *sel,
                other => self.buffer.apply(other),
            }
        }
        self.cursor = cursor;
    }

    fn status(&self) -> String {
        if let Some((direction, query)) = self.engine.search_prompt() {
            let prefix = match direction {
                SearchDirection::Forward => '/',
                SearchDirection::Backward => '?',
            };
            return format!("{prefix}{query}");
        }
        let mode = match self.engine.mode() {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Visual(VisualKind::CharWise) => "VISUAL",
            Mode::Visual(VisualKind::LineWise) => "VISUAL LINE",
            Mode::SearchPrompt => "SEARCH",
        };
        let snap = self.engine.snapshot();
        let pending = snap.pending_count.map(|n| n.to_string()).unwrap_or_default();
        format!(
            "-- {mode} --  {pending}  {}:{}",
            self.cursor.line + 1,
            self.cursor.col + 1
        )
    }
}

/// Text for insert mode and the search prompt travels as received characters;
/// everything else is a key press.
fn convert_key(key: CKeyEvent, mode: Mode) -> Option<InputEvent> {
    let mut mods = Modifiers::empty();
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        mods |= Modifiers::SHIFT;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        mods |= Modifiers::CTRL;
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        mods |= Modifiers::ALT;
    }

    let code = match key.code {
        CKeyCode::Char(c) => {
            let typing = matches!(mode, Mode::Insert | Mode::SearchPrompt);
            if typing && !mods.intersects(Modifiers::CTRL | Modifiers::ALT) {
                return Some(InputEvent::ReceivedChar(c));
            }
            KeyCode::Char(c)
        }
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        _ => return None,
    };
    Some(KeyEvent::new(code, mods).into())
}

fn selected(sel: &Selection, line: u32, col: u32) -> bool {
    let (start, end) = sel.ordered();
    match sel.kind {
        VisualKind::LineWise => (start.line..=end.line).contains(&line),
        VisualKind::CharWise => {
            let pos = Position::new(line, col);
            start <= pos && pos <= end
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(f.size());

    let highlight = Style::default().bg(Color::Blue);
    let lines: Vec<Line> = (0..app.buffer.line_count())
        .map(|i| {
            let text = app.buffer.line_text(i).into_owned();
            match &app.selection {
                Some(sel) => Line::from(
                    text.graphemes(true)
                        .enumerate()
                        .map(|(col, g)| {
                            let style = if selected(sel, i, col as u32) {
                                highlight
                            } else {
                                Style::default()
                            };
                            Span::styled(g.to_string(), style)
                        })
                        .collect::<Vec<_>>(),
                ),
                None => Line::from(text),
            }
        })
        .collect();

    let text = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("modal_engine"));
    f.render_widget(text, chunks[0]);

    let status = Paragraph::new(app.status())
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[1]);

    f.set_cursor(
        chunks[0].x + 1 + app.cursor.col as u16,
        chunks[0].y + 1 + app.cursor.line as u16,
    );
}

fn init_logging() -> io::Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    let file = File::create("modal_engine.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<(), io::Error> {
    init_logging()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();

    loop {
        terminal.draw(|f| ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.code == CKeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }
            app.handle_key(key);
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
