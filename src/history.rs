/// In-memory session history: a list of urls and a cursor into it.
#[derive(Debug, Clone)]
pub struct SessionHistory {
    entries: Vec<String>,
    index: usize,
}

impl SessionHistory {
    pub fn new(initial_url: impl Into<String>) -> Self {
        Self {
            entries: vec![initial_url.into()],
            index: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.entries[self.index]
    }

    /// Appends `url` after the current entry, dropping any forward entries.
    pub fn push(&mut self, url: impl Into<String>) {
        self.entries.truncate(self.index + 1);
        self.entries.push(url.into());
        self.index += 1;
    }

    pub fn back(&mut self) -> Option<&str> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&str> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
