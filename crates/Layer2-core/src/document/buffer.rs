//! In-memory document

use super::{Document, DocumentError, DocumentId};
use std::ops::Range;

/// `String`-backed document
#[derive(Debug, Clone)]
pub struct TextBuffer {
    id: DocumentId,
    language_id: String,
    file_name: String,
    text: String,
    modified: bool,
}

impl TextBuffer {
    pub fn new(
        file_name: impl Into<String>,
        language_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        let file_name = file_name.into();
        Self {
            id: DocumentId::new(file_name.clone()),
            language_id: language_id.into(),
            file_name,
            text: text.into(),
            modified: false,
        }
    }

    /// Override the identity (defaults to the file name)
    pub fn with_id(mut self, id: DocumentId) -> Self {
        self.id = id;
        self
    }

    /// Whether any edit was applied since creation
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    fn check(&self, offset: usize) -> Result<(), DocumentError> {
        if offset > self.text.len() {
            return Err(DocumentError::OutOfRange {
                offset,
                len: self.text.len(),
            });
        }
        if !self.text.is_char_boundary(offset) {
            return Err(DocumentError::NotCharBoundary(offset));
        }
        Ok(())
    }
}

impl Document for TextBuffer {
    fn id(&self) -> DocumentId {
        self.id.clone()
    }

    fn language_id(&self) -> &str {
        &self.language_id
    }

    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn insert(&mut self, offset: usize, text: &str) -> Result<(), DocumentError> {
        self.check(offset)?;
        self.text.insert_str(offset, text);
        self.modified = true;
        Ok(())
    }

    fn replace(&mut self, range: Range<usize>, text: &str) -> Result<(), DocumentError> {
        self.check(range.start)?;
        self.check(range.end)?;
        if range.start > range.end {
            return Err(DocumentError::OutOfRange {
                offset: range.start,
                len: self.text.len(),
            });
        }
        self.text.replace_range(range, text);
        self.modified = true;
        Ok(())
    }
}
