use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::{OptionalExtension, params};

use crate::db::open_db;

/// The two independently cached provider documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    MatchDetail,
    Timeline,
}

impl DocumentKind {
    fn table(self) -> &'static str {
        match self {
            DocumentKind::MatchDetail => "match_details",
            DocumentKind::Timeline => "timeline",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::MatchDetail => f.write_str("match detail"),
            DocumentKind::Timeline => f.write_str("timeline"),
        }
    }
}

/// Verbatim response bodies keyed by match id.
#[derive(Debug, Clone)]
pub struct RawCache {
    db_path: PathBuf,
}

impl RawCache {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn get(&self, kind: DocumentKind, match_id: &str) -> Result<Option<String>> {
        let conn = open_db(&self.db_path)?;
        let sql = format!("SELECT data FROM {} WHERE match_id = ?1", kind.table());
        conn.query_row(&sql, params![match_id], |row| row.get::<_, String>(0))
            .optional()
            .with_context(|| format!("read cached {kind} {match_id}"))
    }

    pub fn put(&self, kind: DocumentKind, match_id: &str, body: &str) -> Result<()> {
        let conn = open_db(&self.db_path)?;
        let sql = format!(
            "INSERT OR REPLACE INTO {} (match_id, data) VALUES (?1, ?2)",
            kind.table()
        );
        conn.execute(&sql, params![match_id, body])
            .with_context(|| format!("write cached {kind} {match_id}"))?;
        Ok(())
    }

    /// Every cached `(match_id, body)` pair of one kind, in storage order.
    pub fn entries(&self, kind: DocumentKind) -> Result<Vec<(String, String)>> {
        let conn = open_db(&self.db_path)?;
        let sql = format!("SELECT match_id, data FROM {}", kind.table());
        let mut stmt = conn
            .prepare(&sql)
            .with_context(|| format!("prepare {kind} listing"))?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
            .with_context(|| format!("query {kind} listing"))?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row.context("decode cache row")?);
        }
        Ok(out)
    }
}
