use crate::error::Rejection;
use crate::receiver::TextBuffer;

use super::Command;

/// Represents a reversible edit of a `TextBuffer`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    /// Append text at the end
    Type { text: String },
    /// Remove text from the end (rejected if the buffer doesn't end with it)
    DeleteLast { text: String },
    /// Insert text before the char at idx
    Insert { idx: usize, text: String },
    /// Remove the given text starting at char idx
    Remove { idx: usize, text: String },
}

impl TextEdit {
    pub fn type_text(text: impl Into<String>) -> Self {
        TextEdit::Type { text: text.into() }
    }

    pub fn delete_last(text: impl Into<String>) -> Self {
        TextEdit::DeleteLast { text: text.into() }
    }

    pub fn insert(idx: usize, text: impl Into<String>) -> Self {
        TextEdit::Insert { idx, text: text.into() }
    }

    pub fn remove(idx: usize, text: impl Into<String>) -> Self {
        TextEdit::Remove { idx, text: text.into() }
    }

    pub fn inverse(&self) -> TextEdit {
        match self {
            TextEdit::Type { text } => TextEdit::DeleteLast { text: text.clone() },
            TextEdit::DeleteLast { text } => TextEdit::Type { text: text.clone() },
            TextEdit::Insert { idx, text } => TextEdit::Remove { idx: *idx, text: text.clone() },
            TextEdit::Remove { idx, text } => TextEdit::Insert { idx: *idx, text: text.clone() },
        }
    }

    fn perform(&self, buffer: &mut TextBuffer) -> Result<(), Rejection> {
        match self {
            TextEdit::Type { text } => {
                buffer.type_text(text);
                Ok(())
            }
            TextEdit::DeleteLast { text } => buffer.delete_last(text),
            TextEdit::Insert { idx, text } => buffer.insert(*idx, text),
            TextEdit::Remove { idx, text } => buffer.remove(*idx, text),
        }
    }
}

impl Command<TextBuffer> for TextEdit {
    fn apply(&mut self, buffer: &mut TextBuffer) -> Result<(), Rejection> {
        self.perform(buffer)
    }

    fn reverse(&mut self, buffer: &mut TextBuffer) -> Result<(), Rejection> {
        self.inverse().perform(buffer)
    }

    fn label(&self) -> String {
        match self {
            TextEdit::Type { text } => format!("type {:?}", text),
            TextEdit::DeleteLast { text } => format!("delete {:?}", text),
            TextEdit::Insert { idx, text } => format!("insert {:?} at {}", text, idx),
            TextEdit::Remove { idx, text } => format!("remove {:?} at {}", text, idx),
        }
    }
}
