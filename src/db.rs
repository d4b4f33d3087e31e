use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Opens the cache database, creating the file, its directory and the schema
/// on first use. Callers keep the connection for a single operation.
pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create db directory {}", parent.display()))?;
    }
    let conn =
        Connection::open(path).with_context(|| format!("open sqlite db {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode = WAL;
        CREATE TABLE IF NOT EXISTS match_details (
            match_id TEXT PRIMARY KEY,
            data TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS timeline (
            match_id TEXT PRIMARY KEY,
            data TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS analysis (
            player_name TEXT NOT NULL,
            match_id TEXT NOT NULL,
            game_datetime TEXT NOT NULL,
            game_duration INTEGER NOT NULL,
            champion TEXT NOT NULL,
            game_mode TEXT NOT NULL,
            minions_at_10 INTEGER NOT NULL,
            kill_participation REAL NOT NULL,
            first_structure_ms INTEGER NULL,
            assists INTEGER NOT NULL,
            scuttle_crabs INTEGER NOT NULL,
            ability_uses INTEGER NOT NULL,
            damage_to_champions INTEGER NOT NULL,
            PRIMARY KEY (player_name, match_id)
        );
        "#,
    )
    .context("create sqlite schema")?;
    Ok(())
}
