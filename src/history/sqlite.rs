//! Durable SQLite session history

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::types::{Role, Turn};

use super::HistoryStore;

/// SQLite-backed history keyed by session id; survives process restart.
///
/// A single connection behind a mutex serializes all writes, which also
/// serializes appends within one session. Insertion order is recovered from
/// the AUTOINCREMENT row id.
pub struct SqliteHistory {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteHistory {
    /// Create or open the database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)
            .map_err(|e| Error::history_write(format!("Failed to open database: {}", e)))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.migrate()?;
        Ok(db)
    }

    /// Create an in-memory database (for testing)
    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::history_write(format!("Failed to open database: {}", e)))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.migrate()?;
        Ok(db)
    }

    /// Run database migrations
    fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
        "#,
        )
        .map_err(|e| Error::history_write(format!("Failed to set pragmas: {}", e)))?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS chat_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id TEXT NOT NULL,
                role TEXT NOT NULL,
                text TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_chat_history_session
                ON chat_history(session_id);
        "#,
        )
        .map_err(|e| Error::history_write(format!("Failed to run migrations: {}", e)))?;

        Ok(())
    }

    fn append(&self, session_id: &str, role: Role, text: &str) -> Result<()> {
        let turn = Turn::now(role, text);
        let conn = self.conn.lock();

        conn.execute(
            "INSERT INTO chat_history (session_id, role, text, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                session_id,
                role_to_str(turn.role),
                turn.text,
                turn.timestamp.to_rfc3339(),
            ],
        )
        .map_err(|e| Error::history_write(format!("Failed to append turn: {}", e)))?;

        Ok(())
    }
}

fn role_to_str(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

fn role_from_str(value: &str) -> Result<Role> {
    match value {
        "user" => Ok(Role::User),
        "assistant" => Ok(Role::Assistant),
        other => Err(Error::history_write(format!(
            "Unknown role in chat_history: {}",
            other
        ))),
    }
}

impl HistoryStore for SqliteHistory {
    fn messages(&self, session_id: &str) -> Result<Vec<Turn>> {
        let conn = self.conn.lock();

        let mut stmt = conn
            .prepare(
                "SELECT role, text, created_at FROM chat_history
                 WHERE session_id = ?1 ORDER BY id ASC",
            )
            .map_err(|e| Error::history_write(format!("Failed to prepare query: {}", e)))?;

        let rows = stmt
            .query_map(params![session_id], |row| {
                let role: String = row.get(0)?;
                let text: String = row.get(1)?;
                let created_at: String = row.get(2)?;
                Ok((role, text, created_at))
            })
            .map_err(|e| Error::history_write(format!("Failed to query history: {}", e)))?;

        let mut turns = Vec::new();
        for row in rows {
            let (role, text, created_at) =
                row.map_err(|e| Error::history_write(format!("Failed to read row: {}", e)))?;

            let timestamp = DateTime::parse_from_rfc3339(&created_at)
                .map_err(|e| Error::history_write(format!("Invalid timestamp: {}", e)))?
                .with_timezone(&Utc);

            turns.push(Turn {
                role: role_from_str(&role)?,
                text,
                timestamp,
            });
        }

        Ok(turns)
    }

    fn append_user(&self, session_id: &str, text: &str) -> Result<()> {
        self.append(session_id, Role::User, text)
    }

    fn append_assistant(&self, session_id: &str, text: &str) -> Result<()> {
        self.append(session_id, Role::Assistant, text)
    }

    fn clear(&self, session_id: &str) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute(
            "DELETE FROM chat_history WHERE session_id = ?1",
            params![session_id],
        )
        .map_err(|e| Error::history_write(format!("Failed to clear session: {}", e)))?;

        Ok(())
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_session_is_empty() {
        let store = SqliteHistory::in_memory().unwrap();
        assert!(store.messages("nobody").unwrap().is_empty());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let store = SqliteHistory::in_memory().unwrap();
        store.append_user("s1", "first").unwrap();
        store.append_assistant("s1", "second").unwrap();
        store.append_user("s1", "third").unwrap();

        let turns = store.messages("s1").unwrap();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].text, "first");
        assert_eq!(turns[1].role, Role::Assistant);
        assert_eq!(turns[2].text, "third");
    }

    #[test]
    fn test_clear_only_targets_one_session() {
        let store = SqliteHistory::in_memory().unwrap();
        store.append_user("a", "keep").unwrap();
        store.append_user("b", "drop").unwrap();

        store.clear("b").unwrap();

        assert_eq!(store.messages("a").unwrap().len(), 1);
        assert!(store.messages("b").unwrap().is_empty());
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.db");

        {
            let store = SqliteHistory::open(&path).unwrap();
            store.append_user("s1", "hello").unwrap();
            store.append_assistant("s1", "hi there").unwrap();
        }

        let reopened = SqliteHistory::open(&path).unwrap();
        let turns = reopened.messages("s1").unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].text, "hello");
        assert_eq!(turns[1].text, "hi there");
    }
}
