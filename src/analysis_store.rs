use std::path::PathBuf;

use anyhow::{Context, Result};
use rusqlite::params;

use crate::db::open_db;
use crate::metrics::{MatchMetrics, game_datetime_label};
use crate::riot_types::MatchDetail;

/// One analyzed match for one player. Keyed by `(player_name, match_id)`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRow {
    pub player_name: String,
    pub match_id: String,
    pub game_datetime: String,
    /// Seconds.
    pub game_duration: i64,
    pub champion: String,
    pub game_mode: String,
    pub minions_at_10: i64,
    pub kill_participation: f64,
    pub first_structure_ms: Option<i64>,
    pub assists: i64,
    pub scuttle_crabs: i64,
    pub ability_uses: i64,
    pub damage_to_champions: i64,
}

impl AnalysisRow {
    pub fn from_metrics(
        player_name: &str,
        match_id: &str,
        detail: &MatchDetail,
        metrics: MatchMetrics,
    ) -> Self {
        Self {
            player_name: player_name.to_string(),
            match_id: match_id.to_string(),
            game_datetime: game_datetime_label(detail.info.game_start_timestamp),
            game_duration: detail.info.game_duration,
            champion: metrics.champion,
            game_mode: metrics.game_mode,
            minions_at_10: metrics.minions_at_10,
            kill_participation: metrics.kill_participation,
            first_structure_ms: metrics.first_structure_ms,
            assists: metrics.assists,
            scuttle_crabs: metrics.scuttle_crabs,
            ability_uses: metrics.ability_uses,
            damage_to_champions: metrics.damage_to_champions,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisStore {
    db_path: PathBuf,
}

impl AnalysisStore {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Writes every column; a second write for the same key replaces the first.
    pub fn upsert(&self, row: &AnalysisRow) -> Result<()> {
        let conn = open_db(&self.db_path)?;
        conn.execute(
            r#"
            INSERT INTO analysis (
                player_name, match_id, game_datetime, game_duration, champion, game_mode,
                minions_at_10, kill_participation, first_structure_ms,
                assists, scuttle_crabs, ability_uses, damage_to_champions
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6,
                ?7, ?8, ?9,
                ?10, ?11, ?12, ?13
            )
            ON CONFLICT(player_name, match_id) DO UPDATE SET
                game_datetime = excluded.game_datetime,
                game_duration = excluded.game_duration,
                champion = excluded.champion,
                game_mode = excluded.game_mode,
                minions_at_10 = excluded.minions_at_10,
                kill_participation = excluded.kill_participation,
                first_structure_ms = excluded.first_structure_ms,
                assists = excluded.assists,
                scuttle_crabs = excluded.scuttle_crabs,
                ability_uses = excluded.ability_uses,
                damage_to_champions = excluded.damage_to_champions
            "#,
            params![
                row.player_name,
                row.match_id,
                row.game_datetime,
                row.game_duration,
                row.champion,
                row.game_mode,
                row.minions_at_10,
                row.kill_participation,
                row.first_structure_ms,
                row.assists,
                row.scuttle_crabs,
                row.ability_uses,
                row.damage_to_champions,
            ],
        )
        .with_context(|| format!("upsert analysis {} {}", row.player_name, row.match_id))?;
        Ok(())
    }

    pub fn rows_for_player(&self, player_name: &str) -> Result<Vec<AnalysisRow>> {
        let conn = open_db(&self.db_path)?;
        let mut stmt = conn
            .prepare(
                r#"
                SELECT
                    player_name, match_id, game_datetime, game_duration, champion, game_mode,
                    minions_at_10, kill_participation, first_structure_ms,
                    assists, scuttle_crabs, ability_uses, damage_to_champions
                FROM analysis
                WHERE player_name = ?1
                "#,
            )
            .context("prepare analysis query")?;

        let rows = stmt
            .query_map(params![player_name], |row| {
                Ok(AnalysisRow {
                    player_name: row.get(0)?,
                    match_id: row.get(1)?,
                    game_datetime: row.get(2)?,
                    game_duration: row.get(3)?,
                    champion: row.get(4)?,
                    game_mode: row.get(5)?,
                    minions_at_10: row.get(6)?,
                    kill_participation: row.get(7)?,
                    first_structure_ms: row.get(8)?,
                    assists: row.get(9)?,
                    scuttle_crabs: row.get(10)?,
                    ability_uses: row.get(11)?,
                    damage_to_champions: row.get(12)?,
                })
            })
            .context("query analysis rows")?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row.context("decode analysis row")?);
        }
        Ok(out)
    }

    /// Distinct names that have at least one stored row, sorted.
    pub fn player_names(&self) -> Result<Vec<String>> {
        let conn = open_db(&self.db_path)?;
        let mut stmt = conn
            .prepare("SELECT DISTINCT player_name FROM analysis ORDER BY player_name")
            .context("prepare player name query")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .context("query player names")?;

        let mut out = Vec::new();
        for name in names {
            out.push(name.context("decode player name")?);
        }
        Ok(out)
    }
}
