/// Key codes representing individual keys on the keyboard.
///
/// Hosts map their platform-specific key events to these codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// A character key, already shifted by the host ('G' rather than SHIFT+'g').
    Char(char),
    /// The Escape key, used to exit modes and cancel operations.
    Esc,
    /// The Enter/Return key. Commits a search, breaks a line in insert mode.
    Enter,
    /// The Backspace key for deleting characters in insert/search modes.
    Backspace,
    Left,
    Right,
    Up,
    Down,
}

bitflags::bitflags! {
    /// Keyboard modifier flags.
    ///
    /// These can be combined to represent multiple modifiers held simultaneously.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const META  = 0b1000;
    }
}

/// A key press event with optional modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifier keys held during the key press.
    pub mods: Modifiers,
}

impl KeyEvent {
    pub const fn new(code: KeyCode, mods: Modifiers) -> Self {
        KeyEvent { code, mods }
    }

    /// A key press without modifiers.
    pub const fn plain(code: KeyCode) -> Self {
        KeyEvent {
            code,
            mods: Modifiers::empty(),
        }
    }

    /// The character this key stands for in a command sequence.
    ///
    /// SHIFT is ignored since hosts deliver shifted characters; any other
    /// modifier makes the key a chord the engine does not bind.
    pub(crate) fn command_char(&self) -> Option<char> {
        const CHORD: Modifiers = Modifiers::CTRL.union(Modifiers::ALT).union(Modifiers::META);

        match self.code {
            KeyCode::Char(c) if !self.mods.intersects(CHORD) => Some(c),
            _ => None,
        }
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        KeyEvent::plain(code)
    }
}

/// Input events that can be processed by the engine.
///
/// Key presses drive commands and navigation; received characters carry
/// literal text for insert mode and the search prompt, so hosts can feed
/// composed characters and IME input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key press event, typically used for commands and navigation.
    Key(KeyEvent),
    /// A character received in text input mode (insert or search).
    ReceivedChar(char),
}

impl InputEvent {
    /// A plain key press of a character key.
    pub const fn char_key(c: char) -> Self {
        InputEvent::Key(KeyEvent::plain(KeyCode::Char(c)))
    }

    pub const fn key(code: KeyCode) -> Self {
        InputEvent::Key(KeyEvent::plain(code))
    }
}

impl From<KeyEvent> for InputEvent {
    fn from(ev: KeyEvent) -> Self {
        InputEvent::Key(ev)
    }
}
