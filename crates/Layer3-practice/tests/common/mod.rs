//! Scripted collaborators for practice flow tests (no network)

#![allow(dead_code)]

use async_trait::async_trait;
use codeforgex_core::{Action, Difficulty, Mode};
use codeforgex_practice::{Notice, NoticeLevel, Prompter, TopicDecision};
use codeforgex_provider::{Completion, CompletionRequest, Provider, ProviderError, ProviderMetadata};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

// ============================================================================
// ScriptedProvider
// ============================================================================

/// Provider answering from a fixed queue of replies
pub struct ScriptedProvider {
    metadata: ProviderMetadata,
    replies: Mutex<VecDeque<Result<String, ProviderError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<Result<String, ProviderError>>) -> Arc<Self> {
        Arc::new(Self {
            metadata: ProviderMetadata {
                id: "scripted".to_string(),
                display_name: "OpenAI".to_string(),
                model: "scripted-model".to_string(),
                base_url: String::new(),
            },
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(replies: &[&str]) -> Arc<Self> {
        Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    /// Prompts received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn metadata(&self) -> &ProviderMetadata {
        &self.metadata
    }

    async fn complete(&self, request: CompletionRequest) -> Result<Completion, ProviderError> {
        let prompt = request.last_prompt().unwrap_or_default().to_string();
        self.prompts.lock().unwrap().push(prompt);

        let text = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::InvalidRequest("no scripted reply left".into())))?;

        Ok(Completion::new(text, "scripted-model"))
    }
}

// ============================================================================
// ScriptedPrompter
// ============================================================================

/// Prompter with canned answers that records every notice
pub struct ScriptedPrompter {
    topic_decision: Option<TopicDecision>,
    manual_topic: Option<String>,
    difficulty: Option<Difficulty>,
    mode: Option<Mode>,
    actions: Mutex<VecDeque<Action>>,
    offered: Mutex<Vec<Vec<Action>>>,
    notices: Mutex<Vec<Notice>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self {
            topic_decision: Some(TopicDecision::Continue),
            manual_topic: None,
            difficulty: Some(Difficulty::Easy),
            mode: Some(Mode::FullSolution),
            actions: Mutex::new(VecDeque::new()),
            offered: Mutex::new(Vec::new()),
            notices: Mutex::new(Vec::new()),
        }
    }

    pub fn topic_decision(mut self, decision: Option<TopicDecision>) -> Self {
        self.topic_decision = decision;
        self
    }

    pub fn manual_topic(mut self, topic: &str) -> Self {
        self.manual_topic = Some(topic.to_string());
        self
    }

    pub fn difficulty(mut self, difficulty: Option<Difficulty>) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn mode(mut self, mode: Option<Mode>) -> Self {
        self.mode = mode;
        self
    }

    pub fn actions(self, actions: &[Action]) -> Self {
        self.actions.lock().unwrap().extend(actions.iter().copied());
        self
    }

    pub fn build(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn messages(&self, level: NoticeLevel) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter(|n| n.level == level)
            .map(|n| n.message)
            .collect()
    }

    /// Action lists shown by `pick_action`
    pub fn offered(&self) -> Vec<Vec<Action>> {
        self.offered.lock().unwrap().clone()
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn confirm_topic(&self, _detected: &str) -> Option<TopicDecision> {
        self.topic_decision
    }

    async fn input_topic(&self) -> Option<String> {
        self.manual_topic.clone()
    }

    async fn pick_difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    async fn pick_mode(&self) -> Option<Mode> {
        self.mode
    }

    async fn pick_action(&self, actions: &[Action]) -> Option<Action> {
        self.offered.lock().unwrap().push(actions.to_vec());
        self.actions.lock().unwrap().pop_front()
    }

    async fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

// ============================================================================
// Replies
// ============================================================================

pub const SORT_REPLY: &str = "[QUESTION]
Sort a list of integers.
[HINT]
Python has a built-in for this.
[SOLUTION]
```python
def sort(a):
    return sorted(a)
```
";

pub const SORT_SOLUTION: &str = "def sort(a):\n    return sorted(a)";

pub const USER_CODE: &str = "def sort(a):\n    return a\n";
