use crate::error::Rejection;

use super::Receiver;

/// Plain text buffer used as the reference receiver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
}

/// Owned copy of a `TextBuffer`'s content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSnapshot {
    text: String,
}

impl TextSnapshot {
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl TextBuffer {
    pub fn new() -> Self {
        Self { text: String::new() }
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append `words` at the end of the buffer
    pub fn type_text(&mut self, words: &str) {
        self.text.push_str(words);
    }

    /// Remove `words` from the end of the buffer. Rejected unless the buffer ends with it.
    pub fn delete_last(&mut self, words: &str) -> Result<(), Rejection> {
        if !self.text.ends_with(words) {
            return Err(Rejection::new(format!(
                "buffer does not end with {:?}",
                words
            )));
        }
        let new_len = self.text.len() - words.len();
        self.text.truncate(new_len);
        Ok(())
    }

    /// Insert `words` before the char at `char_idx` (`len_chars()` appends)
    pub fn insert(&mut self, char_idx: usize, words: &str) -> Result<(), Rejection> {
        let byte_idx = self.byte_idx(char_idx)?;
        self.text.insert_str(byte_idx, words);
        Ok(())
    }

    /// Remove `words` starting at `char_idx`. Rejected unless exactly that text is there.
    pub fn remove(&mut self, char_idx: usize, words: &str) -> Result<(), Rejection> {
        let start = self.byte_idx(char_idx)?;
        if !self.text[start..].starts_with(words) {
            return Err(Rejection::new(format!(
                "{:?} not found at position {}",
                words, char_idx
            )));
        }
        self.text.replace_range(start..start + words.len(), "");
        Ok(())
    }

    /// Convert a char index to a byte index, accepting one-past-the-end
    fn byte_idx(&self, char_idx: usize) -> Result<usize, Rejection> {
        self.text
            .char_indices()
            .map(|(b, _)| b)
            .chain(std::iter::once(self.text.len()))
            .nth(char_idx)
            .ok_or_else(|| {
                Rejection::new(format!(
                    "position {} is past the end of the buffer ({} chars)",
                    char_idx,
                    self.len_chars()
                ))
            })
    }
}

impl Receiver for TextBuffer {
    type Memento = TextSnapshot;

    fn snapshot(&self) -> TextSnapshot {
        TextSnapshot { text: self.text.clone() }
    }

    fn restore(&mut self, memento: TextSnapshot) {
        self.text = memento.text;
    }
}
