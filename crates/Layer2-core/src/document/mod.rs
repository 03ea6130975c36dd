//! Document model - 호스트 편집기 버퍼 추상화
//!
//! 호스트(편집기, CLI)는 `Document`를 구현해 텍스트 읽기/삽입/치환을 제공한다.
//! 오프셋은 모두 UTF-8 바이트 기준이다.

mod buffer;

pub use buffer::TextBuffer;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// Stable identity of an open document (e.g. canonical path or editor URI)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Edit rejected by the document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Offset {offset} is outside the document (length {len})")]
    OutOfRange { offset: usize, len: usize },

    #[error("Offset {0} is not on a character boundary")]
    NotCharBoundary(usize),
}

/// Editable text document supplied by the host
pub trait Document: Send {
    fn id(&self) -> DocumentId;

    /// Language identifier (`python`, `typescript`, ...)
    fn language_id(&self) -> &str;

    /// File name or path; only the base name is used for topic detection
    fn file_name(&self) -> &str;

    /// Full current text
    fn text(&self) -> &str;

    /// Insert `text` at byte `offset`
    fn insert(&mut self, offset: usize, text: &str) -> Result<(), DocumentError>;

    /// Replace the byte `range` with `text`
    fn replace(&mut self, range: Range<usize>, text: &str) -> Result<(), DocumentError>;

    fn len(&self) -> usize {
        self.text().len()
    }

    fn is_empty(&self) -> bool {
        self.text().is_empty()
    }

    fn contains(&self, needle: &str) -> bool {
        self.text().contains(needle)
    }

    fn line_count(&self) -> usize {
        self.text().lines().count()
    }

    /// Line at 0-based `index`, without its line terminator
    fn line(&self, index: usize) -> Option<&str> {
        self.text().lines().nth(index)
    }

    /// Byte offset where the 0-based line `index` starts
    fn line_start(&self, index: usize) -> Option<usize> {
        if index >= self.line_count() {
            return None;
        }
        if index == 0 {
            return Some(0);
        }
        self.text()
            .match_indices('\n')
            .nth(index - 1)
            .map(|(pos, _)| pos + 1)
    }
}
