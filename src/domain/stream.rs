//! Fixed-size chunking of finished text for typing-style display.

/// Iterator over consecutive slices of at most `chunk_chars` characters.
///
/// Cloning the iterator (or calling [`TextChunks::restart`]) replays the sequence.
#[derive(Debug, Clone)]
pub struct TextChunks<'a> {
    text: &'a str,
    chunk_chars: usize,
    offset: usize,
}

impl<'a> TextChunks<'a> {
    /// A `chunk_chars` of zero is treated as one.
    pub fn new(text: &'a str, chunk_chars: usize) -> Self {
        Self { text, chunk_chars: chunk_chars.max(1), offset: 0 }
    }

    pub fn restart(&self) -> Self {
        Self::new(self.text, self.chunk_chars)
    }
}

impl<'a> Iterator for TextChunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.text[self.offset..];
        if rest.is_empty() {
            return None;
        }
        let end =
            rest.char_indices().nth(self.chunk_chars).map(|(idx, _)| idx).unwrap_or(rest.len());
        self.offset += end;
        Some(&rest[..end])
    }
}
