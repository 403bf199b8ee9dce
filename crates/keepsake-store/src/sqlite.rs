use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

use crate::schema;
use crate::{KeyValueStore, Quota, Result};

/// Local storage persisted in a single SQLite file.
pub struct SqliteStore {
    conn: Connection,
    quota: Quota,
}

impl SqliteStore {
    pub fn open(path: &Path, quota: Quota) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        schema::init_schema(&conn)?;
        Ok(Self { conn, quota })
    }

    pub fn open_in_memory(quota: Quota) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::init_schema(&conn)?;
        Ok(Self { conn, quota })
    }

    pub fn quota(&self) -> Quota {
        self.quota
    }

    pub fn vacuum(&self) -> Result<()> {
        self.conn.execute_batch("VACUUM")?;
        Ok(())
    }

    fn value_len(&self, key: &str) -> Result<Option<usize>> {
        let len: Option<i64> = self
            .conn
            .query_row(
                "SELECT LENGTH(CAST(value AS BLOB)) FROM entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(len.map(|len| len as usize))
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let used = self.used_bytes()?;
        let existing = self.value_len(key)?;
        self.quota.check(used, key, existing, value)?;

        self.conn.execute(
            r#"
            INSERT INTO entries (key, value)
            VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = ?2
            "#,
            params![key, value],
        )?;

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM entries WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM entries ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    fn used_bytes(&self) -> Result<usize> {
        let used: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(LENGTH(CAST(key AS BLOB)) + LENGTH(CAST(value AS BLOB))), 0) FROM entries",
            [],
            |row| row.get(0),
        )?;
        Ok(used as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_in_memory() {
        let mut store = SqliteStore::open_in_memory(Quota::default()).unwrap();
        store.set("finalAnalytics", "{}").unwrap();

        assert_eq!(store.get("finalAnalytics").unwrap().as_deref(), Some("{}"));
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_used_bytes_counts_utf8() {
        let mut store = SqliteStore::open_in_memory(Quota::unlimited()).unwrap();
        store.set("k", "💕").unwrap();

        assert_eq!(store.used_bytes().unwrap(), 1 + 4);
    }
}
