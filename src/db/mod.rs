//! Database module - SQLite key-value storage for profile and workout data

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

/// Key holding the serialized user profile
pub const USER_KEY: &str = "metafit_user";
/// Key holding the serialized workout list
pub const WORKOUTS_KEY: &str = "metafit_workouts";

/// Database wrapper
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init_schema()?;
        debug!(path, "database opened");
        Ok(db)
    }

    /// Throwaway database, used by tests
    pub fn open_in_memory() -> Result<Self> {
        let db = Self {
            conn: Connection::open_in_memory()?,
        };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    /// Overwrite the value under `key` in one statement
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Overwrite several keys in one transaction. Either every value is
    /// stored or none is.
    pub fn set_many(&mut self, entries: &[(&str, String)]) -> Result<()> {
        let tx = self.conn.transaction()?;
        for (key, value) in entries {
            tx.execute(
                "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                params![key, value],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get(USER_KEY).unwrap(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let db = Database::open_in_memory().unwrap();
        db.set(WORKOUTS_KEY, "[]").unwrap();
        db.set(WORKOUTS_KEY, "[1]").unwrap();
        assert_eq!(db.get(WORKOUTS_KEY).unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_remove() {
        let db = Database::open_in_memory().unwrap();
        db.set(USER_KEY, "{}").unwrap();
        db.remove(USER_KEY).unwrap();
        db.remove(USER_KEY).unwrap();
        assert_eq!(db.get(USER_KEY).unwrap(), None);
    }

    #[test]
    fn test_set_many_writes_all_keys() {
        let mut db = Database::open_in_memory().unwrap();
        db.set_many(&[(USER_KEY, "{}".to_string()), (WORKOUTS_KEY, "[]".to_string())])
            .unwrap();
        assert_eq!(db.get(USER_KEY).unwrap().as_deref(), Some("{}"));
        assert_eq!(db.get(WORKOUTS_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_set_many_rolls_back_on_failure() {
        let mut db = Database::open_in_memory().unwrap();
        db.set(USER_KEY, "old").unwrap();
        db.conn
            .execute_batch(
                "CREATE TRIGGER reject_workouts BEFORE INSERT ON kv
                 WHEN NEW.key = 'metafit_workouts'
                 BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
            )
            .unwrap();

        let result = db.set_many(&[(USER_KEY, "new".to_string()), (WORKOUTS_KEY, "[]".to_string())]);
        assert!(result.is_err());
        assert_eq!(db.get(USER_KEY).unwrap().as_deref(), Some("old"));
        assert_eq!(db.get(WORKOUTS_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_database_persists() {
        let path = std::env::temp_dir().join(format!("metafit-test-{}.db", uuid::Uuid::new_v4()));
        let path_str = path.to_str().unwrap();
        {
            let db = Database::open(path_str).unwrap();
            db.set(USER_KEY, "stored").unwrap();
        }
        let db = Database::open(path_str).unwrap();
        assert_eq!(db.get(USER_KEY).unwrap().as_deref(), Some("stored"));
        drop(db);
        let _ = std::fs::remove_file(path);
    }
}
