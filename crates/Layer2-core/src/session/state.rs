//! Practice session state machine
//!
//! ```text
//! (none) ─begin─▶ question ─reveal_hint─▶ hint
//!                    │
//!                    └─apply_solution─▶ solution ─apply_explanation─▶ explained
//!                                          ▲                              │
//!                                          └──────remove_explanation──────┘
//! ```
//!
//! 상태는 문서 삽입이 성공한 뒤에만 갱신된다.

use crate::parse::ParsedResponse;
use crate::request::{Difficulty, GenerationRequest, Mode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected transition
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("No practice question has been generated for this document yet.")]
    NoQuestion,

    #[error("This question has no stored hint.")]
    NoHint,

    #[error("The hint has already been revealed.")]
    HintAlreadyRevealed,

    #[error("This question has no stored solution.")]
    NoSolution,

    #[error("The solution has already been inserted.")]
    SolutionAlreadyApplied,

    #[error("Show the solution before using this action.")]
    SolutionNotApplied,

    #[error("The explanation is already applied.")]
    ExplanationAlreadyApplied,

    #[error("There is no applied explanation to remove.")]
    NoExplanation,
}

/// Generated practice material and progression flags for one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeSession {
    pub topic: String,
    pub language: String,
    pub difficulty: Difficulty,
    pub mode: Mode,

    pub question: Option<String>,
    pub hint: Option<String>,
    pub solution: Option<String>,
    pub explanation: Option<String>,

    pub has_question: bool,
    pub hint_revealed: bool,
    pub has_solution: bool,
    pub has_explanation: bool,

    /// Byte offset of the solution block (or the explanation replacing it)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_offset: Option<usize>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PracticeSession {
    /// Start a fresh session after the question was inserted
    ///
    /// A new question discards any previous hint/solution/explanation progress.
    pub fn begin(request: &GenerationRequest, parsed: ParsedResponse) -> Self {
        let now = Utc::now();
        Self {
            topic: request.topic.clone(),
            language: request.language.clone(),
            difficulty: request.difficulty,
            mode: request.mode,
            has_question: parsed.question.is_some(),
            question: parsed.question,
            hint: parsed.hint,
            solution: parsed.solution,
            explanation: None,
            hint_revealed: false,
            has_solution: false,
            has_explanation: false,
            block_offset: None,
            created_at: now,
            updated_at: now,
        }
    }

    // ========================================================================
    // Preconditions
    // ========================================================================

    /// Hint text to insert, if the hint may be revealed now
    pub fn pending_hint(&self) -> Result<&str, SessionError> {
        if !self.has_question {
            return Err(SessionError::NoQuestion);
        }
        if self.hint_revealed {
            return Err(SessionError::HintAlreadyRevealed);
        }
        self.hint.as_deref().ok_or(SessionError::NoHint)
    }

    /// Solution text to insert, if the solution may be shown now
    pub fn pending_solution(&self) -> Result<&str, SessionError> {
        if !self.has_question {
            return Err(SessionError::NoQuestion);
        }
        if self.has_solution {
            return Err(SessionError::SolutionAlreadyApplied);
        }
        self.solution.as_deref().ok_or(SessionError::NoSolution)
    }

    /// Stored solution, once it has been inserted
    pub fn applied_solution(&self) -> Result<&str, SessionError> {
        if !self.has_solution {
            return Err(SessionError::SolutionNotApplied);
        }
        self.solution.as_deref().ok_or(SessionError::NoSolution)
    }

    /// Solution that an explanation would replace
    pub fn explainable_solution(&self) -> Result<&str, SessionError> {
        let solution = self.applied_solution()?;
        if self.has_explanation {
            return Err(SessionError::ExplanationAlreadyApplied);
        }
        Ok(solution)
    }

    /// Applied explanation and the solution that restores it
    pub fn applied_explanation(&self) -> Result<(&str, &str), SessionError> {
        if !self.has_explanation {
            return Err(SessionError::NoExplanation);
        }
        let explanation = self.explanation.as_deref().ok_or(SessionError::NoExplanation)?;
        let solution = self.solution.as_deref().ok_or(SessionError::NoSolution)?;
        Ok((explanation, solution))
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    pub fn reveal_hint(&mut self) -> Result<(), SessionError> {
        self.pending_hint()?;
        self.hint_revealed = true;
        self.touch();
        Ok(())
    }

    pub fn apply_solution(&mut self, offset: usize) -> Result<(), SessionError> {
        self.pending_solution()?;
        self.has_solution = true;
        self.block_offset = Some(offset);
        self.touch();
        Ok(())
    }

    pub fn apply_explanation(
        &mut self,
        explanation: impl Into<String>,
        offset: usize,
    ) -> Result<(), SessionError> {
        self.explainable_solution()?;
        self.explanation = Some(explanation.into());
        self.has_explanation = true;
        self.block_offset = Some(offset);
        self.touch();
        Ok(())
    }

    /// The explanation text is kept so a later explain can reuse it
    pub fn remove_explanation(&mut self, offset: usize) -> Result<(), SessionError> {
        self.applied_explanation()?;
        self.has_explanation = false;
        self.block_offset = Some(offset);
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(hint: Option<&str>, solution: Option<&str>) -> PracticeSession {
        let request =
            GenerationRequest::new("Sorting", "python", Difficulty::Easy, Mode::FullSolution);
        PracticeSession::begin(
            &request,
            ParsedResponse {
                question: Some("Sort a list.".into()),
                hint: hint.map(str::to_string),
                solution: solution.map(str::to_string),
            },
        )
    }

    #[test]
    fn test_begin_sets_question_only() {
        let s = session(Some("h"), Some("s"));
        assert!(s.has_question);
        assert!(!s.hint_revealed && !s.has_solution && !s.has_explanation);
        assert_eq!(s.topic, "Sorting");
    }

    #[test]
    fn test_full_progression() {
        let mut s = session(Some("h"), Some("code"));

        s.reveal_hint().unwrap();
        assert_eq!(s.reveal_hint(), Err(SessionError::HintAlreadyRevealed));

        s.apply_solution(40).unwrap();
        assert_eq!(s.block_offset, Some(40));
        assert_eq!(s.apply_solution(40), Err(SessionError::SolutionAlreadyApplied));

        s.apply_explanation("# explained\ncode", 40).unwrap();
        assert!(s.has_explanation);
        assert_eq!(
            s.apply_explanation("again", 40),
            Err(SessionError::ExplanationAlreadyApplied)
        );

        s.remove_explanation(40).unwrap();
        assert!(!s.has_explanation);
        assert_eq!(s.explanation.as_deref(), Some("# explained\ncode"));
        assert_eq!(s.remove_explanation(40), Err(SessionError::NoExplanation));
    }

    #[test]
    fn test_explanation_requires_solution() {
        let mut s = session(None, Some("code"));
        assert_eq!(
            s.apply_explanation("x", 0),
            Err(SessionError::SolutionNotApplied)
        );
        assert!(!s.has_explanation);
    }

    #[test]
    fn test_missing_material() {
        let mut s = session(None, None);
        assert_eq!(s.reveal_hint(), Err(SessionError::NoHint));
        assert_eq!(s.apply_solution(0), Err(SessionError::NoSolution));
        assert!(!s.hint_revealed && !s.has_solution);
    }

    #[test]
    fn test_serde_roundtrip_keeps_flags() {
        let mut s = session(Some("h"), Some("code"));
        s.apply_solution(12).unwrap();

        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"hasSolution\":true"));
        let back: PracticeSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
