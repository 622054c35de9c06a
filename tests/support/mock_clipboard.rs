use modal_engine::traits::Clipboard;

/// Records every write so tests can check what operators stored.
#[derive(Default, Debug, Clone)]
pub struct MockClipboard {
    content: Option<String>,
    pub writes: usize,
}

impl MockClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            content: Some(text.to_string()),
            writes: 0,
        }
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

impl Clipboard for MockClipboard {
    fn get(&mut self) -> Option<String> {
        self.content.clone()
    }

    fn set(&mut self, text: String) {
        self.writes += 1;
        self.content = Some(text);
    }
}
