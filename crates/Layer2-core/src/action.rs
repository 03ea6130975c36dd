//! Action availability - 세션 상태로부터 다음 동작 목록 계산

use crate::session::PracticeSession;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Follow-up action offered after a question exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    ShowHint,
    ShowSolution,
    ExplainCode,
    EvaluateCode,
    RemoveExplanation,
}

impl Action {
    /// Priority order used by the resolver
    pub const ALL: [Action; 5] = [
        Action::ShowHint,
        Action::ShowSolution,
        Action::ExplainCode,
        Action::EvaluateCode,
        Action::RemoveExplanation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Action::ShowHint => "Show Hint",
            Action::ShowSolution => "Show Solution",
            Action::ExplainCode => "Explain Code",
            Action::EvaluateCode => "Evaluate Code",
            Action::RemoveExplanation => "Remove Explanation",
        }
    }

    /// Whether the action is offered for `session`
    pub fn is_available(&self, session: &PracticeSession) -> bool {
        match self {
            Action::ShowHint => session.has_question && !session.hint_revealed,
            Action::ShowSolution => session.has_question && !session.has_solution,
            Action::ExplainCode => session.has_solution && !session.has_explanation,
            Action::EvaluateCode => session.has_solution,
            Action::RemoveExplanation => session.has_explanation,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Actions available for `session`, in fixed priority order
///
/// An empty list is a valid state ("no actions available").
pub fn available_actions(session: &PracticeSession) -> Vec<Action> {
    Action::ALL
        .into_iter()
        .filter(|action| action.is_available(session))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::ParsedResponse;
    use crate::request::{Difficulty, GenerationRequest, Mode};

    fn session() -> PracticeSession {
        let request =
            GenerationRequest::new("Sorting", "rust", Difficulty::Hard, Mode::FullSolution);
        PracticeSession::begin(
            &request,
            ParsedResponse {
                question: Some("q".into()),
                hint: Some("h".into()),
                solution: Some("fn main() {}".into()),
            },
        )
    }

    #[test]
    fn test_fresh_question() {
        assert_eq!(
            available_actions(&session()),
            vec![Action::ShowHint, Action::ShowSolution]
        );
    }

    #[test]
    fn test_after_solution() {
        let mut s = session();
        s.apply_solution(0).unwrap();
        assert_eq!(
            available_actions(&s),
            vec![Action::ShowHint, Action::ExplainCode, Action::EvaluateCode]
        );
    }

    #[test]
    fn test_explained() {
        let mut s = session();
        s.reveal_hint().unwrap();
        s.apply_solution(0).unwrap();
        s.apply_explanation("// why\nfn main() {}", 0).unwrap();
        assert_eq!(
            available_actions(&s),
            vec![Action::EvaluateCode, Action::RemoveExplanation]
        );
    }

    #[test]
    fn test_nothing_left() {
        let mut s = session();
        s.has_question = false;
        assert!(available_actions(&s).is_empty());
    }
}
