//! Session persistence between CLI invocations
//!
//! `.codeforgex/sessions.json` in the working directory, keyed by canonical path.

use codeforgex_core::SessionRegistry;
use codeforgex_foundation::{JsonStore, Result};

/// 세션 파일명
pub const SESSIONS_FILE: &str = "sessions.json";

pub struct SessionStore {
    store: JsonStore,
}

impl SessionStore {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Store under the current project directory
    pub fn current_project() -> Result<Self> {
        Ok(Self::new(JsonStore::current_project()?))
    }

    /// Unreadable or missing files start an empty registry
    pub fn load(&self) -> SessionRegistry {
        self.store.load_or_default(SESSIONS_FILE)
    }

    pub fn save(&self, sessions: &SessionRegistry) -> Result<()> {
        self.store.save(SESSIONS_FILE, sessions)?;
        tracing::debug!(count = sessions.len(), "sessions saved");
        Ok(())
    }
}
