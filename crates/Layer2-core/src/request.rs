//! Generation request - 난이도 / 모드 / 요청 파라미터

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 알 수 없는 선택지 문자열
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind}: '{value}' (expected one of: {expected})")]
pub struct ParseChoiceError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

// ============================================================================
// Difficulty
// ============================================================================

/// Question difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Label shown in pickers and in the question header
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Guidance line embedded in the question prompt
    pub fn guidance(&self) -> &'static str {
        match self {
            Difficulty::Easy => {
                "Make it beginner-friendly: one core concept, small inputs, no tricky edge cases."
            }
            Difficulty::Medium => {
                "Make it intermediate: combine two ideas and expect the common edge cases to be handled."
            }
            Difficulty::Hard => {
                "Make it advanced: require an efficient algorithm and careful handling of edge cases and large inputs."
            }
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "e" | "1" => Ok(Difficulty::Easy),
            "medium" | "m" | "2" => Ok(Difficulty::Medium),
            "hard" | "h" | "3" => Ok(Difficulty::Hard),
            _ => Err(ParseChoiceError {
                kind: "difficulty",
                value: s.to_string(),
                expected: "easy, medium, hard",
            }),
        }
    }
}

// ============================================================================
// Mode
// ============================================================================

/// Requested content shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    QuestionOnly,
    QuestionPlusHint,
    FullSolution,
    MultipleApproaches,
}

impl Mode {
    pub const ALL: [Mode; 4] = [
        Mode::QuestionOnly,
        Mode::QuestionPlusHint,
        Mode::FullSolution,
        Mode::MultipleApproaches,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Mode::QuestionOnly => "Question Only",
            Mode::QuestionPlusHint => "Question + Hint",
            Mode::FullSolution => "Full Solution",
            Mode::MultipleApproaches => "Multiple Approaches",
        }
    }

    /// `[HINT]` 요청 여부
    pub fn wants_hint(&self) -> bool {
        !matches!(self, Mode::QuestionOnly)
    }

    /// `[SOLUTION]` 요청 여부
    pub fn wants_solution(&self) -> bool {
        matches!(self, Mode::FullSolution | Mode::MultipleApproaches)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "question-only" | "question" | "1" => Ok(Mode::QuestionOnly),
            "question-plus-hint" | "question-+-hint" | "question-hint" | "hint" | "2" => {
                Ok(Mode::QuestionPlusHint)
            }
            "full-solution" | "solution" | "3" => Ok(Mode::FullSolution),
            "multiple-approaches" | "multiple" | "4" => Ok(Mode::MultipleApproaches),
            _ => Err(ParseChoiceError {
                kind: "mode",
                value: s.to_string(),
                expected: "question-only, question-plus-hint, full-solution, multiple-approaches",
            }),
        }
    }
}

// ============================================================================
// GenerationRequest
// ============================================================================

/// Parameters of one question generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub topic: String,
    pub language: String,
    pub difficulty: Difficulty,
    pub mode: Mode,
}

impl GenerationRequest {
    pub fn new(
        topic: impl Into<String>,
        language: impl Into<String>,
        difficulty: Difficulty,
        mode: Mode,
    ) -> Self {
        Self {
            topic: topic.into(),
            language: language.into(),
            difficulty,
            mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(" m ".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        let err = "extreme".parse::<Difficulty>().unwrap_err();
        assert!(err.to_string().contains("extreme"));
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("full_solution".parse::<Mode>().unwrap(), Mode::FullSolution);
        assert_eq!("Question Only".parse::<Mode>().unwrap(), Mode::QuestionOnly);
        assert_eq!("hint".parse::<Mode>().unwrap(), Mode::QuestionPlusHint);
        assert_eq!("multiple".parse::<Mode>().unwrap(), Mode::MultipleApproaches);
        assert!("everything".parse::<Mode>().is_err());
    }

    #[test]
    fn test_mode_sections() {
        assert!(!Mode::QuestionOnly.wants_hint());
        assert!(Mode::QuestionPlusHint.wants_hint());
        assert!(!Mode::QuestionPlusHint.wants_solution());
        assert!(Mode::MultipleApproaches.wants_hint());
        assert!(Mode::MultipleApproaches.wants_solution());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Difficulty::Medium).unwrap(), "\"medium\"");
        assert_eq!(
            serde_json::to_string(&Mode::QuestionPlusHint).unwrap(),
            "\"question-plus-hint\""
        );
    }
}
