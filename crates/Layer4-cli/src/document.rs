//! File-backed document
//!
//! 파일 전체를 메모리로 읽어 `TextBuffer`로 편집하고, 변경된 경우에만 다시 쓴다.

use codeforgex_core::{Document, DocumentError, DocumentId, TextBuffer};
use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Language identifier for a file extension
pub fn language_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "py" | "pyw" => "python",
        "js" | "mjs" | "cjs" | "jsx" => "javascript",
        "ts" | "tsx" => "typescript",
        "java" => "java",
        "c" | "h" => "c",
        "cpp" | "cc" | "cxx" | "hpp" => "cpp",
        "cs" => "csharp",
        "go" => "go",
        "rs" => "rust",
        "rb" => "ruby",
        "php" => "php",
        "kt" | "kts" => "kotlin",
        "swift" => "swift",
        "scala" => "scala",
        _ => "plaintext",
    }
}

/// Source file opened for one command run
#[derive(Debug)]
pub struct FileDocument {
    path: PathBuf,
    buffer: TextBuffer,
}

impl FileDocument {
    /// Read `path`; the document id is its canonical path
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = std::fs::canonicalize(path.as_ref())?;
        let text = std::fs::read_to_string(&path)?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let buffer = TextBuffer::new(file_name, language_for_path(&path), text)
            .with_id(DocumentId::new(path.display().to_string()));

        tracing::debug!(path = %path.display(), language = buffer.language_id(), "document opened");
        Ok(Self { path, buffer })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write back if any edit was applied; returns whether the file was written
    pub fn save(&self) -> io::Result<bool> {
        if !self.buffer.is_modified() {
            return Ok(false);
        }
        std::fs::write(&self.path, self.buffer.text())?;
        tracing::info!(path = %self.path.display(), "document saved");
        Ok(true)
    }
}

impl Document for FileDocument {
    fn id(&self) -> DocumentId {
        self.buffer.id()
    }

    fn language_id(&self) -> &str {
        self.buffer.language_id()
    }

    fn file_name(&self) -> &str {
        self.buffer.file_name()
    }

    fn text(&self) -> &str {
        self.buffer.text()
    }

    fn insert(&mut self, offset: usize, text: &str) -> Result<(), DocumentError> {
        self.buffer.insert(offset, text)
    }

    fn replace(&mut self, range: Range<usize>, text: &str) -> Result<(), DocumentError> {
        self.buffer.replace(range, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_language_for_path() {
        assert_eq!(language_for_path(Path::new("quicksort.py")), "python");
        assert_eq!(language_for_path(Path::new("tree/bst.TS")), "typescript");
        assert_eq!(language_for_path(Path::new("main.go")), "go");
        assert_eq!(language_for_path(Path::new("Makefile")), "plaintext");
    }

    #[test]
    fn test_open_uses_canonical_id() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("binarySearch.js");
        std::fs::write(&path, "let a = 1;\n").unwrap();

        let doc = FileDocument::open(&path).unwrap();
        let canonical = std::fs::canonicalize(&path).unwrap();

        assert_eq!(doc.id().as_str(), canonical.display().to_string());
        assert_eq!(doc.file_name(), "binarySearch.js");
        assert_eq!(doc.language_id(), "javascript");
        assert_eq!(doc.text(), "let a = 1;\n");
    }

    #[test]
    fn test_save_only_when_modified() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.py");
        std::fs::write(&path, "x = 1\n").unwrap();

        let mut doc = FileDocument::open(&path).unwrap();
        assert!(!doc.save().unwrap());

        doc.insert(0, "# header\n").unwrap();
        assert!(doc.save().unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# header\nx = 1\n");
    }

    #[test]
    fn test_open_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(FileDocument::open(dir.path().join("nope.py")).is_err());
    }
}
