//! Host-facing commands and their results

use codeforgex_core::Action;
use std::fmt;

/// The six zero-argument triggers a host registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    StartPractice,
    ShowHint,
    ShowSolution,
    EvaluateCode,
    ExplainCode,
    RemoveExplanation,
}

impl Command {
    pub const ALL: [Command; 6] = [
        Command::StartPractice,
        Command::ShowHint,
        Command::ShowSolution,
        Command::EvaluateCode,
        Command::ExplainCode,
        Command::RemoveExplanation,
    ];

    /// Host command identifier
    pub fn id(&self) -> &'static str {
        match self {
            Command::StartPractice => "codeforgex.startPractice",
            Command::ShowHint => "codeforgex.showHint",
            Command::ShowSolution => "codeforgex.showSolution",
            Command::EvaluateCode => "codeforgex.evaluateCode",
            Command::ExplainCode => "codeforgex.explainCode",
            Command::RemoveExplanation => "codeforgex.removeExplanation",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Command::StartPractice => "Start Practice",
            Command::ShowHint => Action::ShowHint.label(),
            Command::ShowSolution => Action::ShowSolution.label(),
            Command::EvaluateCode => Action::EvaluateCode.label(),
            Command::ExplainCode => Action::ExplainCode.label(),
            Command::RemoveExplanation => Action::RemoveExplanation.label(),
        }
    }
}

impl From<Action> for Command {
    fn from(action: Action) -> Self {
        match action {
            Action::ShowHint => Command::ShowHint,
            Action::ShowSolution => Command::ShowSolution,
            Action::ExplainCode => Command::ExplainCode,
            Action::EvaluateCode => Command::EvaluateCode,
            Action::RemoveExplanation => Command::RemoveExplanation,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a successful command did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    QuestionInserted { topic: String },
    HintShown,
    SolutionShown,
    EvaluationAdded { suggestions: usize },
    ExplanationApplied,
    ExplanationRemoved,
    /// Nothing left to offer for the document
    NoActions,
    /// The tracked block could not be found; the document was left as is
    Unchanged,
}

impl Outcome {
    /// Whether the document text was edited
    pub fn changed_document(&self) -> bool {
        !matches!(self, Outcome::NoActions | Outcome::Unchanged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_to_command() {
        for action in Action::ALL {
            let command = Command::from(action);
            assert_eq!(command.label(), action.label());
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<_> = Command::ALL.iter().map(|c| c.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), Command::ALL.len());
    }
}
