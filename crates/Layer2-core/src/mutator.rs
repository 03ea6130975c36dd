//! Document mutator - 중복 검사 후 삽입/치환
//!
//! 모든 삽입은 먼저 문서 전체에서 기존 마커를 찾고, 있으면 아무것도 쓰지 않는다.
//!
//! Layout (`<c>` = `# ` for python, `// ` otherwise):
//!
//! ```text
//! <c>Question (Medium)            ← document start
//! <c>Topic: Sorting
//! <c>...question lines...
//!
//! ...user code...
//!
//! <c>Hint: ...                    ← appended
//!
//! <c>Solution                     ← appended, code left uncommented
//! ...solution code...
//!
//! <c>----                         ← appended
//! <c>Code Evaluation Summary:
//! <c>...
//! <c>----
//! ```

use crate::document::{Document, DocumentError};
use crate::language::CommentStyle;
use crate::parse::{Suggestion, EVALUATION_HEADER};
use crate::request::GenerationRequest;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// Marker for hint presence
pub const HINT_MARKER: &str = "Hint:";

/// Marker for an inserted suggestion
pub const SUGGESTION_MARKER: &str = "Suggestion:";

lazy_static! {
    static ref QUESTION_HEADER_RE: Regex =
        Regex::new(r"(?i)question \((easy|medium|hard)\)").expect("valid header regex");
}

/// Insertion refused or failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("{0} is already present in the document.")]
    AlreadyPresent(&'static str),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

// ============================================================================
// Guards
// ============================================================================

pub fn has_question_header(text: &str) -> bool {
    QUESTION_HEADER_RE.is_match(text)
}

pub fn has_hint(text: &str) -> bool {
    text.contains(HINT_MARKER)
}

pub fn has_evaluation(text: &str) -> bool {
    text.contains(EVALUATION_HEADER)
}

// ============================================================================
// Insertions
// ============================================================================

/// Insert the question header block at the start of the document
pub fn insert_question(
    doc: &mut dyn Document,
    request: &GenerationRequest,
    question: &str,
) -> Result<(), MutationError> {
    if has_question_header(doc.text()) {
        return Err(MutationError::AlreadyPresent("A practice question"));
    }

    let style = CommentStyle::for_language(doc.language_id());
    let mut block = String::new();
    block.push_str(&style.line(&format!("Question ({})", request.difficulty.label())));
    block.push('\n');
    block.push_str(&style.line(&format!("Topic: {}", request.topic)));
    block.push('\n');
    block.push_str(&style.block(question));
    block.push('\n');

    doc.insert(0, &block)?;
    tracing::info!(document = %doc.id(), "question inserted");
    Ok(())
}

/// Append the hint as a comment block
pub fn append_hint(doc: &mut dyn Document, hint: &str) -> Result<(), MutationError> {
    if has_hint(doc.text()) {
        return Err(MutationError::AlreadyPresent("The hint"));
    }

    let style = CommentStyle::for_language(doc.language_id());
    let mut lines = hint.lines();
    let first = lines.next().unwrap_or_default();

    let mut block = style.line(&format!("{} {}", HINT_MARKER, first.trim()));
    block.push('\n');
    for line in lines {
        block.push_str(&style.line(line));
        block.push('\n');
    }

    append_block(doc, &block)?;
    tracing::info!(document = %doc.id(), "hint appended");
    Ok(())
}

/// Append the solution as raw code; returns the offset of the code
pub fn append_solution(doc: &mut dyn Document, solution: &str) -> Result<usize, MutationError> {
    if doc.contains(solution) {
        return Err(MutationError::AlreadyPresent("The solution"));
    }

    let style = CommentStyle::for_language(doc.language_id());
    let caption = format!("{}\n", style.line("Solution"));
    let block = format!("{}{}\n", caption, solution);

    let start = append_block(doc, &block)?;
    let offset = start + caption.len();
    tracing::info!(document = %doc.id(), offset, "solution appended");
    Ok(offset)
}

/// Append the evaluation summary between comment rules
pub fn append_evaluation(doc: &mut dyn Document, summary: &str) -> Result<(), MutationError> {
    if has_evaluation(doc.text()) {
        return Err(MutationError::AlreadyPresent("A code evaluation"));
    }

    let style = CommentStyle::for_language(doc.language_id());
    let rule = style.line("----");
    let mut block = String::new();
    block.push_str(&rule);
    block.push('\n');
    block.push_str(&style.line(EVALUATION_HEADER));
    block.push('\n');
    block.push_str(&style.block(summary));
    block.push_str(&rule);
    block.push('\n');

    append_block(doc, &block)?;
    tracing::info!(document = %doc.id(), "evaluation summary appended");
    Ok(())
}

/// Insert suggestions before their target lines; returns how many were applied
///
/// Line numbers refer to the document before any suggestion is inserted, so
/// suggestions are applied from the highest line down. Several suggestions
/// for one line are inserted together, in reply order. A line is skipped when
/// it is out of range or the line above it already holds a suggestion.
pub fn insert_suggestions(
    doc: &mut dyn Document,
    suggestions: &[Suggestion],
) -> Result<usize, MutationError> {
    let style = CommentStyle::for_language(doc.language_id());

    // stable sort: same-line entries keep reply order
    let mut ordered: Vec<&Suggestion> = suggestions.iter().collect();
    ordered.sort_by(|a, b| b.line.cmp(&a.line));

    let mut applied = 0;
    let mut rest = ordered.as_slice();
    while let Some(first) = rest.first() {
        let line = first.line;
        let split = rest.iter().position(|s| s.line != line).unwrap_or(rest.len());
        let (group, tail) = rest.split_at(split);
        rest = tail;

        let index = line.saturating_sub(1);
        if line == 0 || index >= doc.line_count() {
            tracing::debug!(line, "suggestion target out of range");
            continue;
        }
        if index > 0
            && doc
                .line(index - 1)
                .is_some_and(|prev| prev.contains(SUGGESTION_MARKER))
        {
            tracing::debug!(line, "suggestion already present");
            continue;
        }

        let target = doc.line(index).unwrap_or_default();
        let indent: String = target.chars().take_while(|c| c.is_whitespace()).collect();

        let mut text = String::new();
        for suggestion in group {
            let mut body = suggestion.body.lines();
            let head = body.next().unwrap_or_default();
            text.push_str(&indent);
            text.push_str(&style.line(&format!("{} {}", SUGGESTION_MARKER, head)));
            text.push('\n');
            for extra in body {
                text.push_str(&indent);
                text.push_str(&style.line(extra));
                text.push('\n');
            }
        }

        let Some(at) = doc.line_start(index) else {
            continue;
        };
        doc.insert(at, &text)?;
        applied += group.len();
    }

    tracing::info!(document = %doc.id(), applied, "suggestions inserted");
    Ok(applied)
}

// ============================================================================
// Replacement
// ============================================================================

/// Replace a previously written block; returns its new offset
///
/// The tracked `offset` is used when the text there still equals `expected`.
/// Otherwise the first exact occurrence of `expected` is used. When the text
/// cannot be found at all nothing changes and `None` is returned.
pub fn replace_block(
    doc: &mut dyn Document,
    offset: Option<usize>,
    expected: &str,
    replacement: &str,
) -> Result<Option<usize>, MutationError> {
    if expected.is_empty() {
        return Ok(None);
    }

    let text = doc.text();
    let tracked = offset.filter(|&at| text.get(at..at + expected.len()) == Some(expected));
    if offset.is_some() && tracked.is_none() {
        tracing::debug!(document = %doc.id(), "tracked block moved, searching by content");
    }

    let Some(at) = tracked.or_else(|| text.find(expected)) else {
        tracing::warn!(document = %doc.id(), "block to replace not found; leaving document unchanged");
        return Ok(None);
    };

    doc.replace(at..at + expected.len(), replacement)?;
    Ok(Some(at))
}

// ============================================================================
// Helpers
// ============================================================================

/// Append `block` after a blank line; returns where the block starts
fn append_block(doc: &mut dyn Document, block: &str) -> Result<usize, DocumentError> {
    let text = doc.text();
    let separator = if text.trim().is_empty() || text.ends_with("\n\n") {
        ""
    } else if text.ends_with('\n') {
        "\n"
    } else {
        "\n\n"
    };

    let at = doc.len();
    doc.insert(at, &format!("{}{}", separator, block))?;
    Ok(at + separator.len())
}
