//! Session registry - 문서 ID별 세션 보관

use super::PracticeSession;
use crate::document::DocumentId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sessions keyed by document identity
///
/// Handlers receive the registry by `&mut`, so two documents never share
/// progress.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionRegistry {
    #[serde(default)]
    sessions: HashMap<DocumentId, PracticeSession>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &DocumentId) -> Option<&PracticeSession> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: &DocumentId) -> Option<&mut PracticeSession> {
        self.sessions.get_mut(id)
    }

    /// Install a session, replacing any previous one for the document
    pub fn insert(&mut self, id: DocumentId, session: PracticeSession) -> Option<PracticeSession> {
        self.sessions.insert(id, session)
    }

    pub fn contains(&self, id: &DocumentId) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::ParsedResponse;
    use crate::request::{Difficulty, GenerationRequest, Mode};

    fn session(topic: &str) -> PracticeSession {
        let request = GenerationRequest::new(topic, "go", Difficulty::Easy, Mode::QuestionPlusHint);
        PracticeSession::begin(
            &request,
            ParsedResponse {
                question: Some("q".into()),
                hint: Some("h".into()),
                solution: None,
            },
        )
    }

    #[test]
    fn test_documents_are_isolated() {
        let mut registry = SessionRegistry::new();
        let a = DocumentId::new("/tmp/a.go");
        let b = DocumentId::new("/tmp/b.go");

        registry.insert(a.clone(), session("Sorting"));
        registry.insert(b.clone(), session("Searching"));

        registry.get_mut(&a).unwrap().reveal_hint().unwrap();

        assert!(registry.get(&a).unwrap().hint_revealed);
        assert!(!registry.get(&b).unwrap().hint_revealed);
        assert_eq!(registry.get(&b).unwrap().topic, "Searching");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_insert_replaces() {
        let mut registry = SessionRegistry::new();
        let id = DocumentId::new("x");
        registry.insert(id.clone(), session("Sorting"));
        let old = registry.insert(id.clone(), session("Graphs"));

        assert_eq!(old.unwrap().topic, "Sorting");
        assert_eq!(registry.get(&id).unwrap().topic, "Graphs");
    }

    #[test]
    fn test_serialized_as_map() {
        let mut registry = SessionRegistry::new();
        registry.insert(DocumentId::new("/p/a.py"), session("Sorting"));

        let json = serde_json::to_value(&registry).unwrap();
        assert!(json["sessions"]["/p/a.py"]["hasQuestion"].as_bool().unwrap());
    }
}
