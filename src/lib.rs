//! A Vim-style modal input engine for embedding in host text editors.
//!
//! The [`Engine`] owns modes, pending key sequences, counts, visual
//! selections and search state. It reads the host's buffer only through
//! [`TextOps`], and reports edits as [`Command`]s for the host to apply; it
//! never stores text, renders, or keeps undo history.
//!
//! ```
//! use modal_engine::clipboard::MemoryClipboard;
//! use modal_engine::text::StrText;
//! use modal_engine::{Command, Engine, InputEvent, Position};
//!
//! let text = StrText::new("hello world\nsecond line");
//! let mut clipboard = MemoryClipboard::new();
//! let mut engine = Engine::new();
//!
//! let mut cursor = Position::ZERO;
//! let mut commands = Vec::new();
//! for c in "dw".chars() {
//!     let event = InputEvent::char_key(c);
//!     let (next, cmds) = engine.handle_event(&text, &mut clipboard, cursor, event);
//!     cursor = next;
//!     commands.extend(cmds);
//! }
//! assert!(matches!(commands[0], Command::Delete { .. }));
//! ```

pub mod clipboard;
pub mod config;
pub mod engine;
pub mod error;
pub mod key;
pub mod motion;
pub mod operator;
pub mod search;
pub mod text;
pub mod traits;
pub mod types;

mod parser;
mod pending;
mod visual;

pub use crate::config::EngineConfig;
pub use crate::engine::{Engine, EngineBuilder, EngineSnapshot};
pub use crate::error::{ClipboardError, ConfigError};
pub use crate::key::{InputEvent, KeyCode, KeyEvent, Modifiers};
pub use crate::motion::{Inclusivity, Motion, Wise};
pub use crate::operator::Operator;
pub use crate::search::{LastSearch, SearchDirection};
pub use crate::traits::{Clipboard, TextOps};
pub use crate::types::{Command, Commands, Mode, Position, Range, Selection, VisualKind};
