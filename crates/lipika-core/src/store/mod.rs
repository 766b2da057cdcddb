//! Persistent, frequency-ranked word store backed by SQLite.
//!
//! One table of unique words with an integer frequency, plus a small
//! metadata table written once at creation. WAL journaling keeps
//! concurrent readers working while a single writer transaction is
//! open; callers serialize writers themselves.


use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS words (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    word TEXT NOT NULL UNIQUE,
    frequency INTEGER NOT NULL DEFAULT 1);
CREATE INDEX IF NOT EXISTS idx_word ON words(word);
CREATE TABLE IF NOT EXISTS meta (
    key TEXT PRIMARY KEY,
    value TEXT);
INSERT OR IGNORE INTO meta (key, value) VALUES ('format_version', '1.0');
INSERT OR IGNORE INTO meta (key, value) VALUES ('engine', 'lipika');
INSERT OR IGNORE INTO meta (key, value) VALUES ('type', 'word_frequency');
INSERT OR IGNORE INTO meta (key, value) VALUES ('language', 'ne');
INSERT OR IGNORE INTO meta (key, value) VALUES ('script', 'Devanagari');
INSERT OR IGNORE INTO meta (key, value) VALUES ('created_at', datetime('now'));
";

const ADD_WORD_SQL: &str =
    "INSERT INTO words (word) VALUES (?1) ON CONFLICT(word) DO UPDATE SET frequency = frequency + 1";

/// Frequency reported for a word that is not in the store.
pub const ABSENT: i64 = -1;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("cannot create store directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: io::Error,
    },
}

/// Sort key for paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Word,
    Frequency,
}

pub struct WordStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl WordStore {
    /// Open (creating if needed) a store at `path`. The schema and
    /// metadata are written on first creation only.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.execute_batch(SCHEMA)?;
        debug!(path = %path.display(), "word store opened");
        Ok(WordStore {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// In-memory store, used by tests and dry runs.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(WordStore { conn, path: None })
    }

    /// Insert `word` with frequency 1, or bump its frequency by 1.
    pub fn add_word(&self, word: &str) -> Result<(), StoreError> {
        self.conn.execute(ADD_WORD_SQL, params![word])?;
        Ok(())
    }

    /// Delete the exact word. Deleting an absent word is not an error.
    pub fn remove_word(&self, word: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM words WHERE word = ?1", params![word])?;
        Ok(())
    }

    /// Stored frequency, or [`ABSENT`] when the word is unknown.
    pub fn word_frequency(&self, word: &str) -> Result<i64, StoreError> {
        let freq = self
            .conn
            .query_row(
                "SELECT frequency FROM words WHERE word = ?1",
                params![word],
                |row| row.get(0),
            )
            .optional()?;
        Ok(freq.unwrap_or(ABSENT))
    }

    /// Set an explicit frequency. Returns whether a row changed.
    pub fn update_frequency(&self, word: &str, frequency: i64) -> Result<bool, StoreError> {
        let changed = self.conn.execute(
            "UPDATE words SET frequency = ?1 WHERE word = ?2",
            params![frequency, word],
        )?;
        Ok(changed > 0)
    }

    /// Suggestion lookup: an exact match first, then prefix matches by
    /// descending frequency, capped at `limit` results in total.
    pub fn find_words(&self, prefix: &str, limit: usize) -> Result<Vec<String>, StoreError> {
        let mut results = Vec::new();
        if prefix.is_empty() || limit == 0 {
            return Ok(results);
        }
        let exact: Option<String> = self
            .conn
            .query_row(
                "SELECT word FROM words WHERE word = ?1",
                params![prefix],
                |row| row.get(0),
            )
            .optional()?;
        results.extend(exact);
        if results.len() >= limit {
            return Ok(results);
        }

        let remaining = (limit - results.len()) as i64;
        let mut stmt = self.conn.prepare(
            "SELECT word FROM words WHERE word LIKE ?1 AND word != ?2 \
             ORDER BY frequency DESC LIMIT ?3",
        )?;
        let rows = stmt.query_map(
            params![format!("{prefix}%"), prefix, remaining],
            |row| row.get(0),
        )?;
        for word in rows {
            results.push(word?);
        }
        Ok(results)
    }

    /// Substring search anywhere in the word, by descending frequency.
    pub fn search_words(&self, term: &str) -> Result<Vec<(String, i64)>, StoreError> {
        let mut results = Vec::new();
        if term.is_empty() {
            return Ok(results);
        }
        let mut stmt = self.conn.prepare(
            "SELECT word, frequency FROM words WHERE word LIKE ?1 ORDER BY frequency DESC",
        )?;
        let rows = stmt.query_map(params![format!("%{term}%")], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })?;
        for pair in rows {
            results.push(pair?);
        }
        Ok(results)
    }

    /// Paginated listing for bulk browsing. `limit <= 0` means no limit;
    /// `offset` applies only when positive.
    pub fn all_words(
        &self,
        limit: i64,
        offset: i64,
        sort: SortColumn,
        ascending: bool,
    ) -> Result<Vec<(String, i64)>, StoreError> {
        let column = match sort {
            SortColumn::Word => "word",
            SortColumn::Frequency => "frequency",
        };
        let direction = if ascending { "ASC" } else { "DESC" };
        let mut sql = format!("SELECT word, frequency FROM words ORDER BY {column} {direction}");
        if limit > 0 {
            sql.push_str(" LIMIT ?1");
            if offset > 0 {
                sql.push_str(" OFFSET ?2");
            }
        } else if offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?1");
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let map = |row: &rusqlite::Row<'_>| Ok((row.get(0)?, row.get(1)?));
        let rows = match (limit > 0, offset > 0) {
            (true, true) => stmt.query_map(params![limit, offset], map)?,
            (true, false) => stmt.query_map(params![limit], map)?,
            (false, true) => stmt.query_map(params![offset], map)?,
            (false, false) => stmt.query_map([], map)?,
        };
        let mut results = Vec::new();
        for pair in rows {
            results.push(pair?);
        }
        Ok(results)
    }

    pub fn word_count(&self) -> Result<i64, StoreError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM words", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Delete every word. Confirmation policy belongs to the caller.
    pub fn reset(&self) -> Result<(), StoreError> {
        self.conn.execute("DELETE FROM words", [])?;
        debug!("word store reset");
        Ok(())
    }

    /// Metadata plus word count and the (home-shortened) store path.
    pub fn info(&self) -> Result<Vec<(String, String)>, StoreError> {
        let mut info = Vec::new();
        let mut stmt = self.conn.prepare("SELECT key, value FROM meta")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        for pair in rows {
            info.push(pair?);
        }
        info.push(("word_count".to_string(), self.word_count()?.to_string()));
        if let Some(path) = &self.path {
            info.push(("db_path".to_string(), shorten_home(path)));
        }
        Ok(info)
    }

    /// Begin a write transaction. The returned scope rolls back on drop
    /// unless `commit` is called.
    pub fn transaction(&mut self) -> Result<StoreTransaction<'_>, StoreError> {
        let tx = self.conn.transaction()?;
        Ok(StoreTransaction { tx })
    }
}

/// A scoped write transaction over the word store.
pub struct StoreTransaction<'store> {
    tx: rusqlite::Transaction<'store>,
}

impl StoreTransaction<'_> {
    pub fn add_word(&self, word: &str) -> Result<(), StoreError> {
        self.tx.execute(ADD_WORD_SQL, params![word])?;
        Ok(())
    }

    pub fn commit(self) -> Result<(), StoreError> {
        self.tx.commit()?;
        Ok(())
    }

    pub fn rollback(self) -> Result<(), StoreError> {
        self.tx.rollback()?;
        Ok(())
    }
}

fn shorten_home(path: &Path) -> String {
    let full = path.display().to_string();
    match std::env::var("HOME") {
        Ok(home) if !home.is_empty() && full.starts_with(&home) => {
            format!("~{}", &full[home.len()..])
        }
        _ => full,
    }
}
