//! Ready-made [`Clipboard`] implementations.

use crate::traits::Clipboard;

/// An in-process register holding the last yanked or deleted text.
#[derive(Default, Debug, Clone)]
pub struct MemoryClipboard {
    content: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
        }
    }

    pub fn clear(&mut self) {
        self.content = None;
    }
}

impl Clipboard for MemoryClipboard {
    fn get(&mut self) -> Option<String> {
        self.content.clone()
    }

    fn set(&mut self, text: String) {
        self.content = Some(text);
    }
}

#[cfg(feature = "clipboard")]
pub use self::system::SystemClipboard;

#[cfg(feature = "clipboard")]
mod system {
    use tracing::warn;

    use crate::error::ClipboardError;
    use crate::traits::Clipboard;

    /// The operating system clipboard, via `arboard`.
    ///
    /// As a [`Clipboard`] failures are logged and treated as an empty
    /// clipboard; use [`try_get`](Self::try_get) and
    /// [`try_set`](Self::try_set) to observe them.
    pub struct SystemClipboard {
        inner: arboard::Clipboard,
    }

    impl SystemClipboard {
        pub fn new() -> Result<Self, ClipboardError> {
            Ok(Self {
                inner: arboard::Clipboard::new()?,
            })
        }

        pub fn try_get(&mut self) -> Result<String, ClipboardError> {
            match self.inner.get_text() {
                Ok(text) => Ok(text),
                Err(arboard::Error::ContentNotAvailable) => Err(ClipboardError::NotText),
                Err(e) => Err(e.into()),
            }
        }

        pub fn try_set(&mut self, text: String) -> Result<(), ClipboardError> {
            self.inner.set_text(text)?;
            Ok(())
        }
    }

    impl Clipboard for SystemClipboard {
        fn get(&mut self) -> Option<String> {
            match self.try_get() {
                Ok(text) => Some(text),
                Err(ClipboardError::NotText) => None,
                Err(e) => {
                    warn!(error = %e, "failed to read system clipboard");
                    None
                }
            }
        }

        fn set(&mut self, text: String) {
            if let Err(e) = self.try_set(text) {
                warn!(error = %e, "failed to write system clipboard");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clipboard_keeps_last_write() {
        let mut clip = MemoryClipboard::new();
        assert_eq!(clip.get(), None);
        clip.set("one".to_string());
        clip.set("two".to_string());
        assert_eq!(clip.get().as_deref(), Some("two"));
        clip.clear();
        assert_eq!(clip.get(), None);
    }
}
