use anyhow::{Result, anyhow, bail};

use crate::analysis_store::{AnalysisRow, AnalysisStore};
use crate::match_cache::{MatchCache, MatchSource};
use crate::metrics::MatchMetrics;
use crate::raw_cache::RawCache;
use crate::registry::PlayerRegistry;
use crate::riot_api::RiotClient;

pub const MAX_MATCH_COUNT: u32 = 100;

/// How the operator picked the player to analyze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerSelector {
    /// A name already present in the player registry.
    Known { name: String },
    /// A public Riot ID, resolved through the account endpoint.
    RiotId { game_name: String, tag_line: String },
}

impl PlayerSelector {
    /// Parses `Name#TAG`.
    pub fn parse_riot_id(raw: &str) -> Result<Self> {
        let Some((game_name, tag_line)) = raw.rsplit_once('#') else {
            bail!("riot id must look like gameName#tagLine, got {raw:?}");
        };
        let selector = PlayerSelector::RiotId {
            game_name: game_name.trim().to_string(),
            tag_line: tag_line.trim().to_string(),
        };
        selector.validate()?;
        Ok(selector)
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            PlayerSelector::Known { name } => {
                if name.trim().is_empty() {
                    bail!("no player selected");
                }
            }
            PlayerSelector::RiotId {
                game_name,
                tag_line,
            } => {
                if game_name.trim().is_empty() || tag_line.trim().is_empty() {
                    bail!("missing Riot ID (gameName and tagLine are both required)");
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPlayer {
    pub name: String,
    pub puuid: String,
}

#[derive(Debug, Clone)]
pub struct BatchReport {
    pub player_name: String,
    pub match_ids: Vec<String>,
}

pub fn validate_count(count: u32) -> Result<u32> {
    if count == 0 || count > MAX_MATCH_COUNT {
        bail!("match count must be between 1 and {MAX_MATCH_COUNT}, got {count}");
    }
    Ok(count)
}

/// Looks `name` up in the registry only; never touches the network.
pub fn resolve_known(name: &str, registry: &PlayerRegistry) -> Result<ResolvedPlayer> {
    let puuid = registry
        .lookup(name)?
        .and_then(|p| p.puuid)
        .ok_or_else(|| anyhow!("no puuid available for {name}; resolve it by Riot ID first"))?;
    Ok(ResolvedPlayer {
        name: name.to_string(),
        puuid,
    })
}

/// Registry names need a stored puuid. Riot IDs are looked up upstream and
/// remembered under the returned game name.
pub fn resolve_player(
    selector: &PlayerSelector,
    registry: &PlayerRegistry,
    client: &RiotClient,
) -> Result<ResolvedPlayer> {
    selector.validate()?;
    match selector {
        PlayerSelector::Known { name } => resolve_known(name, registry),
        PlayerSelector::RiotId {
            game_name,
            tag_line,
        } => {
            let account = client.account_by_riot_id(game_name, tag_line)?;
            if account.puuid.is_empty() {
                bail!("account response for {game_name}#{tag_line} carried no puuid");
            }
            let name = account
                .game_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| game_name.clone());
            registry.remember(&name, &account.puuid)?;
            Ok(ResolvedPlayer {
                name,
                puuid: account.puuid,
            })
        }
    }
}

/// Analyzes the player's `count` most recent matches, one at a time. The first
/// failure aborts the batch; rows written before it are kept.
pub fn analyze_recent_matches<S: MatchSource>(
    source: &S,
    cache: &RawCache,
    store: &AnalysisStore,
    player: &ResolvedPlayer,
    count: u32,
) -> Result<BatchReport> {
    let count = validate_count(count)?;
    let match_ids = source.recent_match_ids(&player.puuid, count)?;
    log::info!("{} recent matches for {}", match_ids.len(), player.name);

    let documents = MatchCache::new(cache, source);
    for match_id in &match_ids {
        log::info!("Analyzing match {match_id}");
        let timeline = documents.timeline(match_id)?;
        let detail = documents.match_detail(match_id)?;
        if detail.participant(&player.puuid).is_none() {
            log::warn!("{} not found in {match_id}, storing defaults", player.name);
        }
        let metrics = MatchMetrics::extract(&detail, &timeline, &player.puuid);
        let row = AnalysisRow::from_metrics(&player.name, match_id, &detail, metrics);
        store.upsert(&row)?;
    }

    Ok(BatchReport {
        player_name: player.name.clone(),
        match_ids,
    })
}
