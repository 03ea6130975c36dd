//! Completion request sent to a backend

use serde::{Deserialize, Serialize};

/// Speaker of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One conversation turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Instruction plus optional system text
///
/// Practice actions send exactly one user turn; `turns` stays a list so a
/// backend can be exercised with a short exchange in tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionRequest {
    pub system: Option<String>,
    pub turns: Vec<Message>,
}

impl CompletionRequest {
    /// Single user instruction
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            system: None,
            turns: vec![Message::user(text)],
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Text of the last user turn
    pub fn last_prompt(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_request() {
        let request = CompletionRequest::prompt("Generate a question").with_system("plain text");
        assert_eq!(request.system.as_deref(), Some("plain text"));
        assert_eq!(request.turns, vec![Message::user("Generate a question")]);
        assert_eq!(request.last_prompt(), Some("Generate a question"));
    }

    #[test]
    fn test_last_prompt_skips_assistant() {
        let request = CompletionRequest {
            system: None,
            turns: vec![Message::user("first"), Message::assistant("reply")],
        };
        assert_eq!(request.last_prompt(), Some("first"));
    }
}
