//! Evaluation reply parser
//!
//! ```text
//! Code Evaluation Summary:
//! Correctness: ...
//! ...
//! Suggestions:
//! LINE 3: ...
//!   (continues until the next LINE entry)
//! LINE 7: ...
//! ```

use lazy_static::lazy_static;
use regex::Regex;

/// Header that opens the summary and marks an evaluated document
pub const EVALUATION_HEADER: &str = "Code Evaluation Summary:";

lazy_static! {
    static ref SUMMARY_RE: Regex =
        Regex::new(r"(?i)code\s+evaluation\s+summary\s*:").expect("valid summary regex");
    static ref SUGGESTIONS_RE: Regex =
        Regex::new(r"(?im)^[ \t]*suggestions[ \t]*:").expect("valid suggestions regex");
    static ref LINE_RE: Regex =
        Regex::new(r"(?im)^[ \t]*line[ \t]+(\d+)[ \t]*:").expect("valid line regex");
}

/// Per-line suggestion from an evaluation reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// 1-based line in the evaluated document
    pub line: usize,
    pub body: String,
}

impl Suggestion {
    pub fn new(line: usize, body: impl Into<String>) -> Self {
        Self {
            line,
            body: body.into(),
        }
    }
}

/// Parsed evaluation reply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationReport {
    /// Summary body without the header line
    pub summary: Option<String>,
    pub suggestions: Vec<Suggestion>,
}

impl EvaluationReport {
    pub fn is_empty(&self) -> bool {
        self.summary.is_none() && self.suggestions.is_empty()
    }
}

/// Split an evaluation reply into summary and suggestions. Never fails.
pub fn parse_evaluation(raw: &str) -> EvaluationReport {
    let suggestions_at = SUGGESTIONS_RE.find(raw);

    let summary = SUMMARY_RE.find(raw).and_then(|header| {
        let end = suggestions_at
            .filter(|s| s.start() >= header.end())
            .map(|s| s.start())
            .unwrap_or(raw.len());
        let body = raw[header.end()..end].trim();
        (!body.is_empty()).then(|| body.to_string())
    });

    let suggestions = suggestions_at
        .map(|s| parse_suggestions(&raw[s.end()..]))
        .unwrap_or_default();

    EvaluationReport {
        summary,
        suggestions,
    }
}

fn parse_suggestions(block: &str) -> Vec<Suggestion> {
    let entries: Vec<(usize, usize, Option<usize>)> = LINE_RE
        .captures_iter(block)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let line = caps.get(1)?.as_str().parse::<usize>().ok();
            Some((whole.start(), whole.end(), line))
        })
        .collect();

    let mut suggestions = Vec::new();
    for (idx, (_, body_start, line)) in entries.iter().enumerate() {
        let body_end = entries
            .get(idx + 1)
            .map(|(start, _, _)| *start)
            .unwrap_or(block.len());

        let Some(line) = line.filter(|n| *n >= 1) else {
            tracing::debug!("dropping suggestion without a valid line number");
            continue;
        };

        let body = block[*body_start..body_end]
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        if body.is_empty() {
            continue;
        }
        suggestions.push(Suggestion::new(line, body));
    }
    suggestions
}
