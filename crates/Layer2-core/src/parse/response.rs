//! Marker-delimited reply parser
//!
//! Grammar: `[QUESTION]`, `[HINT]`, `[SOLUTION]` in any case, each optional
//! and each at the start of a line. Question and hint run to the next marker
//! or the end of the text; the solution always runs to the end, so code such
//! as `seen[solution]` or a repeated `[SOLUTION]` stays inside it. When a
//! marker repeats, the first occurrence wins.

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    static ref MARKER_RE: Regex =
        Regex::new(r"(?im)^[ \t]*\[(question|hint|solution)\]").expect("valid marker regex");
    static ref QUESTION_LABEL_RE: Regex =
        Regex::new(r"(?i)question:").expect("valid label regex");
    static ref FENCE_RE: Regex =
        Regex::new(r"(?s)^```[^\n]*\n(.*?)\n?[ \t]*```$").expect("valid fence regex");
}

/// Reply section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Question,
    Hint,
    Solution,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Question, Section::Hint, Section::Solution];

    /// Literal marker the model is asked to emit
    pub fn marker(&self) -> &'static str {
        match self {
            Section::Question => "[QUESTION]",
            Section::Hint => "[HINT]",
            Section::Solution => "[SOLUTION]",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "question" => Some(Section::Question),
            "hint" => Some(Section::Hint),
            "solution" => Some(Section::Solution),
            _ => None,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Question => "question",
            Section::Hint => "hint",
            Section::Solution => "solution",
        };
        f.write_str(name)
    }
}

/// Sections recovered from a generation reply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedResponse {
    pub question: Option<String>,
    pub hint: Option<String>,
    pub solution: Option<String>,
}

impl ParsedResponse {
    pub fn get(&self, section: Section) -> Option<&str> {
        match section {
            Section::Question => self.question.as_deref(),
            Section::Hint => self.hint.as_deref(),
            Section::Solution => self.solution.as_deref(),
        }
    }

    /// Sections that are absent or empty, in marker order
    pub fn missing(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|s| self.get(*s).is_none())
            .collect()
    }

    /// A reply without a question has nothing to insert
    pub fn has_question(&self) -> bool {
        self.question.is_some()
    }
}

/// Split a raw reply into its sections. Never fails.
pub fn parse_response(raw: &str) -> ParsedResponse {
    let markers: Vec<(Section, usize, usize)> = MARKER_RE
        .captures_iter(raw)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let section = Section::from_name(caps.get(1)?.as_str())?;
            Some((section, whole.start(), whole.end()))
        })
        .collect();

    let body_of = |section: Section| -> Option<&str> {
        let idx = markers.iter().position(|(s, _, _)| *s == section)?;
        let (_, _, body_start) = markers[idx];
        let body_end = match section {
            Section::Solution => raw.len(),
            _ => markers
                .get(idx + 1)
                .map(|(_, start, _)| *start)
                .unwrap_or(raw.len()),
        };
        Some(&raw[body_start..body_end])
    };

    ParsedResponse {
        question: body_of(Section::Question)
            .map(|body| QUESTION_LABEL_RE.replace_all(body, "").into_owned())
            .and_then(|body| clean(&body)),
        hint: body_of(Section::Hint).and_then(clean),
        solution: body_of(Section::Solution)
            .and_then(clean)
            .map(|s| strip_code_fence(&s).to_string())
            .filter(|s| !s.trim().is_empty()),
    }
}

/// Unwrap a markdown code fence around the whole text, if present
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    match FENCE_RE.captures(trimmed).and_then(|caps| caps.get(1)) {
        Some(inner) => inner.as_str(),
        None => trimmed,
    }
}

/// Drop separator lines (`=====`, `-----`) and trim; empty becomes `None`
fn clean(body: &str) -> Option<String> {
    let kept: Vec<&str> = body.lines().filter(|line| !is_separator(line)).collect();
    let joined = kept.join("\n");
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn is_separator(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && (line.chars().all(|c| c == '=') || line.chars().all(|c| c == '-'))
}
