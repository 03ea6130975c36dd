//! Practice command orchestrator
//!
//! 토픽 추론 → LLM 호출 → 파싱 → 문서 수정 → 세션 갱신.
//! 세션은 문서 수정이 성공한 뒤에만 바뀐다.

use crate::command::{Command, Outcome};
use crate::error::PracticeError;
use crate::prompter::{Notice, Prompter, TopicDecision};
use codeforgex_core::{
    available_actions, detect_topic, mutator, parse_evaluation, parse_response, prompt,
    strip_code_fence, Action, Difficulty, Document, GenerationRequest, Mode, ParseChoiceError,
    PracticeSession, Section, SessionError, SessionRegistry,
};
use codeforgex_foundation::PracticeConfig;
use codeforgex_provider::Provider;
use std::sync::Arc;

/// Choices that skip the corresponding prompt when set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PracticeDefaults {
    pub difficulty: Option<Difficulty>,
    pub mode: Option<Mode>,
}

impl PracticeDefaults {
    pub fn from_config(config: &PracticeConfig) -> Result<Self, ParseChoiceError> {
        Ok(Self {
            difficulty: config
                .default_difficulty
                .as_deref()
                .map(str::parse::<Difficulty>)
                .transpose()?,
            mode: config
                .default_mode
                .as_deref()
                .map(str::parse::<Mode>)
                .transpose()?,
        })
    }
}

/// Runs practice commands against one provider and one host UI
pub struct PracticeCommands {
    provider: Arc<dyn Provider>,
    prompter: Arc<dyn Prompter>,
    defaults: PracticeDefaults,
}

impl PracticeCommands {
    pub fn new(provider: Arc<dyn Provider>, prompter: Arc<dyn Prompter>) -> Self {
        Self {
            provider,
            prompter,
            defaults: PracticeDefaults::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: PracticeDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Run `command` on the active document
    ///
    /// Failures are returned and also shown through the prompter; a
    /// cancelled prompt stays silent.
    pub async fn execute(
        &self,
        command: Command,
        doc: Option<&mut dyn Document>,
        sessions: &mut SessionRegistry,
    ) -> Result<Outcome, PracticeError> {
        let result = match doc {
            Some(doc) => self.dispatch(command, doc, sessions).await,
            None => Err(PracticeError::NoActiveDocument),
        };

        match &result {
            Ok(outcome) => tracing::debug!(command = %command, ?outcome, "command finished"),
            Err(err) => {
                tracing::debug!(command = %command, error = %err, "command failed");
                self.report(err).await;
            }
        }
        result
    }

    async fn dispatch(
        &self,
        command: Command,
        doc: &mut dyn Document,
        sessions: &mut SessionRegistry,
    ) -> Result<Outcome, PracticeError> {
        match command {
            Command::StartPractice => self.start_practice(doc, sessions).await,
            Command::ShowHint => self.show_hint(doc, sessions).await,
            Command::ShowSolution => self.show_solution(doc, sessions).await,
            Command::EvaluateCode => self.evaluate_code(doc, sessions).await,
            Command::ExplainCode => self.explain_code(doc, sessions).await,
            Command::RemoveExplanation => self.remove_explanation(doc, sessions).await,
        }
    }

    // ========================================================================
    // Start / action menu
    // ========================================================================

    async fn start_practice(
        &self,
        doc: &mut dyn Document,
        sessions: &mut SessionRegistry,
    ) -> Result<Outcome, PracticeError> {
        if mutator::has_question_header(doc.text()) {
            tracing::info!(document = %doc.id(), "question already present, offering actions");
            return self.choose_action(doc, sessions).await;
        }

        let detected = detect_topic(doc.file_name());
        let topic = match self.prompter.confirm_topic(detected).await {
            None => return Err(PracticeError::Cancelled),
            Some(TopicDecision::Continue) => detected.to_string(),
            Some(TopicDecision::ChangeTopic) => match self.prompter.input_topic().await {
                Some(manual) if !manual.trim().is_empty() => manual.trim().to_string(),
                _ => detected.to_string(),
            },
        };

        let difficulty = match self.defaults.difficulty {
            Some(difficulty) => difficulty,
            None => self
                .prompter
                .pick_difficulty()
                .await
                .ok_or(PracticeError::Cancelled)?,
        };
        let mode = match self.defaults.mode {
            Some(mode) => mode,
            None => self.prompter.pick_mode().await.ok_or(PracticeError::Cancelled)?,
        };

        let request = GenerationRequest::new(topic, doc.language_id(), difficulty, mode);
        self.prompter
            .notify(Notice::info(format!(
                "Language: {} | Topic: {}",
                request.language, request.topic
            )))
            .await;

        let reply = self.ask(&prompt::question_prompt(&request)).await?;
        let mut parsed = parse_response(&reply);
        if !mode.wants_hint() {
            parsed.hint = None;
        }
        if !mode.wants_solution() {
            parsed.solution = None;
        }

        let Some(question) = parsed.question.clone() else {
            tracing::warn!(reply_len = reply.len(), "reply had no question section");
            return Err(PracticeError::MalformedResponse("a question"));
        };

        let missing: Vec<String> = parsed
            .missing()
            .into_iter()
            .filter(|s| match s {
                Section::Question => false,
                Section::Hint => mode.wants_hint(),
                Section::Solution => mode.wants_solution(),
            })
            .map(|s| s.to_string())
            .collect();

        mutator::insert_question(doc, &request, &question)?;
        sessions.insert(doc.id(), PracticeSession::begin(&request, parsed));

        if !missing.is_empty() {
            self.prompter
                .notify(Notice::warning(format!(
                    "The reply did not include: {}.",
                    missing.join(", ")
                )))
                .await;
        }
        self.prompter
            .notify(Notice::info(format!(
                "Practice question added ({}, {}).",
                request.topic, request.difficulty
            )))
            .await;

        Ok(Outcome::QuestionInserted {
            topic: request.topic,
        })
    }

    /// Offer the available follow-up actions and run the chosen one
    pub async fn choose_action(
        &self,
        doc: &mut dyn Document,
        sessions: &mut SessionRegistry,
    ) -> Result<Outcome, PracticeError> {
        let actions = sessions
            .get(&doc.id())
            .map(available_actions)
            .unwrap_or_default();

        if actions.is_empty() {
            self.prompter.notify(Notice::info("No actions available.")).await;
            return Ok(Outcome::NoActions);
        }

        let action = self
            .prompter
            .pick_action(&actions)
            .await
            .ok_or(PracticeError::Cancelled)?;

        match action {
            Action::ShowHint => self.show_hint(doc, sessions).await,
            Action::ShowSolution => self.show_solution(doc, sessions).await,
            Action::ExplainCode => self.explain_code(doc, sessions).await,
            Action::EvaluateCode => self.evaluate_code(doc, sessions).await,
            Action::RemoveExplanation => self.remove_explanation(doc, sessions).await,
        }
    }

    // ========================================================================
    // Reveal
    // ========================================================================

    async fn show_hint(
        &self,
        doc: &mut dyn Document,
        sessions: &mut SessionRegistry,
    ) -> Result<Outcome, PracticeError> {
        let session = sessions
            .get_mut(&doc.id())
            .ok_or(SessionError::NoQuestion)?;
        let hint = session.pending_hint()?.to_string();

        mutator::append_hint(doc, &hint)?;
        session.reveal_hint()?;

        self.prompter.notify(Notice::info("Hint added.")).await;
        Ok(Outcome::HintShown)
    }

    async fn show_solution(
        &self,
        doc: &mut dyn Document,
        sessions: &mut SessionRegistry,
    ) -> Result<Outcome, PracticeError> {
        let session = sessions
            .get_mut(&doc.id())
            .ok_or(SessionError::NoQuestion)?;
        let solution = session.pending_solution()?.to_string();

        let offset = mutator::append_solution(doc, &solution)?;
        session.apply_solution(offset)?;

        self.prompter.notify(Notice::info("Solution added.")).await;
        Ok(Outcome::SolutionShown)
    }

    // ========================================================================
    // Evaluate
    // ========================================================================

    async fn evaluate_code(
        &self,
        doc: &mut dyn Document,
        sessions: &mut SessionRegistry,
    ) -> Result<Outcome, PracticeError> {
        let solution = sessions
            .get(&doc.id())
            .ok_or(SessionError::NoQuestion)?
            .applied_solution()?
            .to_string();

        if mutator::has_evaluation(doc.text()) {
            return Err(PracticeError::AlreadyPresent("A code evaluation"));
        }

        let prompt = prompt::evaluation_prompt(&solution, doc.text(), doc.language_id());
        let reply = self.ask(&prompt).await?;
        let report = parse_evaluation(&reply);
        if report.is_empty() {
            tracing::warn!(reply_len = reply.len(), "evaluation reply had no usable sections");
            return Err(PracticeError::MalformedResponse("an evaluation summary"));
        }

        if let Some(summary) = report.summary.as_deref() {
            mutator::append_evaluation(doc, summary)?;
        }
        let applied = mutator::insert_suggestions(doc, &report.suggestions)?;

        self.prompter
            .notify(Notice::info(format!(
                "Code evaluation added with {} suggestion(s).",
                applied
            )))
            .await;
        Ok(Outcome::EvaluationAdded {
            suggestions: applied,
        })
    }

    // ========================================================================
    // Explain / remove
    // ========================================================================

    async fn explain_code(
        &self,
        doc: &mut dyn Document,
        sessions: &mut SessionRegistry,
    ) -> Result<Outcome, PracticeError> {
        let id = doc.id();
        let (solution, offset, stored) = {
            let session = sessions.get(&id).ok_or(SessionError::NoQuestion)?;
            (
                session.explainable_solution()?.to_string(),
                session.block_offset,
                session.explanation.clone(),
            )
        };

        let explanation = match stored {
            Some(explanation) => explanation,
            None => {
                let reply = self
                    .ask(&prompt::explain_prompt(&solution, doc.language_id()))
                    .await?;
                let code = strip_code_fence(&reply).to_string();
                if code.is_empty() {
                    return Err(PracticeError::MalformedResponse("any code"));
                }
                code
            }
        };

        let Some(at) = mutator::replace_block(doc, offset, &solution, &explanation)? else {
            tracing::warn!(document = %id, "stored solution not found, explanation skipped");
            return Ok(Outcome::Unchanged);
        };

        if let Some(session) = sessions.get_mut(&id) {
            session.apply_explanation(explanation, at)?;
        }
        self.prompter.notify(Notice::info("Explanation applied.")).await;
        Ok(Outcome::ExplanationApplied)
    }

    async fn remove_explanation(
        &self,
        doc: &mut dyn Document,
        sessions: &mut SessionRegistry,
    ) -> Result<Outcome, PracticeError> {
        let id = doc.id();
        let session = sessions.get_mut(&id).ok_or(SessionError::NoQuestion)?;
        let (explanation, solution) = {
            let (explanation, solution) = session.applied_explanation()?;
            (explanation.to_string(), solution.to_string())
        };

        let Some(at) = mutator::replace_block(doc, session.block_offset, &explanation, &solution)?
        else {
            tracing::warn!(document = %id, "applied explanation not found, nothing removed");
            return Ok(Outcome::Unchanged);
        };

        session.remove_explanation(at)?;
        self.prompter.notify(Notice::info("Explanation removed.")).await;
        Ok(Outcome::ExplanationRemoved)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn ask(&self, prompt: &str) -> Result<String, PracticeError> {
        self.provider.ask(prompt).await.map_err(|source| {
            let provider = self.provider.metadata().display_name.clone();
            tracing::error!(provider = %provider, error = %source, "completion failed");
            PracticeError::Provider { provider, source }
        })
    }

    async fn report(&self, err: &PracticeError) {
        let Some(level) = err.notice_level() else {
            return;
        };
        self.prompter
            .notify(Notice {
                level,
                message: err.to_string(),
            })
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_config() {
        let mut config = PracticeConfig::new();
        config.default_difficulty = Some("hard".into());
        config.default_mode = Some("full-solution".into());

        let defaults = PracticeDefaults::from_config(&config).unwrap();
        assert_eq!(defaults.difficulty, Some(Difficulty::Hard));
        assert_eq!(defaults.mode, Some(Mode::FullSolution));
    }

    #[test]
    fn test_defaults_reject_unknown() {
        let mut config = PracticeConfig::new();
        config.default_mode = Some("everything".into());
        assert!(PracticeDefaults::from_config(&config).is_err());
    }

    #[test]
    fn test_defaults_empty_config() {
        let defaults = PracticeDefaults::from_config(&PracticeConfig::new()).unwrap();
        assert_eq!(defaults, PracticeDefaults::default());
    }
}
