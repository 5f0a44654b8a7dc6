//! Ephemeral in-memory session history

use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::error::Result;
use crate::types::{Role, Turn};

use super::HistoryStore;

/// Process-local history keyed by session id; lost on restart.
///
/// Each session owns a mutex around its turn list, so concurrent appends to
/// one session serialize while unrelated sessions proceed independently.
#[derive(Default)]
pub struct InMemoryHistory {
    sessions: DashMap<String, Arc<Mutex<Vec<Turn>>>>,
}

impl InMemoryHistory {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or lazily create the session's turn list
    fn session(&self, session_id: &str) -> Arc<Mutex<Vec<Turn>>> {
        self.sessions
            .entry(session_id.to_string())
            .or_default()
            .clone()
    }

    fn append(&self, session_id: &str, role: Role, text: &str) {
        let session = self.session(session_id);
        let mut turns = session.lock();
        turns.push(Turn::now(role, text));
    }
}

impl HistoryStore for InMemoryHistory {
    fn messages(&self, session_id: &str) -> Result<Vec<Turn>> {
        // Unknown session reads as empty without creating an entry
        match self.sessions.get(session_id) {
            Some(session) => Ok(session.lock().clone()),
            None => Ok(Vec::new()),
        }
    }

    fn append_user(&self, session_id: &str, text: &str) -> Result<()> {
        self.append(session_id, Role::User, text);
        Ok(())
    }

    fn append_assistant(&self, session_id: &str, text: &str) -> Result<()> {
        self.append(session_id, Role::Assistant, text);
        Ok(())
    }

    fn clear(&self, session_id: &str) -> Result<()> {
        self.sessions.remove(session_id);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_session_is_empty() {
        let store = InMemoryHistory::new();
        assert!(store.messages("nobody").unwrap().is_empty());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let store = InMemoryHistory::new();
        store.append_user("s1", "first").unwrap();
        store.append_assistant("s1", "second").unwrap();
        store.append_user("s1", "third").unwrap();

        let turns = store.messages("s1").unwrap();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].text, "first");
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[1].text, "second");
        assert_eq!(turns[1].role, Role::Assistant);
        assert_eq!(turns[2].text, "third");
    }

    #[test]
    fn test_sessions_are_independent() {
        let store = InMemoryHistory::new();
        store.append_user("a", "hello a").unwrap();
        store.append_user("b", "hello b").unwrap();

        assert_eq!(store.messages("a").unwrap().len(), 1);
        assert_eq!(store.messages("b").unwrap().len(), 1);
        assert_eq!(store.messages("a").unwrap()[0].text, "hello a");
    }

    #[test]
    fn test_clear_removes_all_turns() {
        let store = InMemoryHistory::new();
        store.append_user("s1", "hello").unwrap();
        store.append_assistant("s1", "hi").unwrap();

        store.clear("s1").unwrap();
        assert!(store.messages("s1").unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_appends_lose_nothing() {
        let store = Arc::new(InMemoryHistory::new());
        let mut handles = Vec::new();

        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                for j in 0..25 {
                    store.append_user("shared", &format!("{}-{}", i, j)).unwrap();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.messages("shared").unwrap().len(), 200);
    }
}
