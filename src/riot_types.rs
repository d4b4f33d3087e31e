//! Typed views over the Riot match-v5 / account-v1 payloads.
//!
//! Only the fields the metrics read are modeled. Every field carries a serde
//! default so a sparse document parses to zeros instead of failing.

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MatchDetail {
    pub metadata: MatchMetadata,
    pub info: MatchInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchMetadata {
    pub match_id: String,
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchInfo {
    pub game_id: Option<i64>,
    pub game_start_timestamp: i64,
    /// Seconds.
    pub game_duration: i64,
    pub queue_id: i64,
    pub game_mode: Option<String>,
    pub participants: Vec<Participant>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Participant {
    pub puuid: String,
    pub participant_id: i64,
    pub team_id: i64,
    pub kills: i64,
    pub assists: i64,
    pub champion_name: Option<String>,
    pub total_damage_dealt_to_champions: i64,
    pub challenges: Option<Challenges>,
}

/// Challenge counters arrive as JSON numbers that are sometimes floats.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Challenges {
    pub scuttle_crab_kills: f64,
    pub ability_uses: f64,
}

impl MatchDetail {
    pub fn participant(&self, puuid: &str) -> Option<&Participant> {
        self.info.participants.iter().find(|p| p.puuid == puuid)
    }

    pub fn participant_by_id(&self, participant_id: i64) -> Option<&Participant> {
        self.info
            .participants
            .iter()
            .find(|p| p.participant_id == participant_id)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MatchTimeline {
    pub metadata: TimelineMetadata,
    pub info: TimelineInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimelineMetadata {
    pub match_id: String,
    /// Puuids, ordered by participant slot.
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TimelineInfo {
    pub frames: Vec<TimelineFrame>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimelineFrame {
    pub timestamp: i64,
    /// Keyed by participant slot as a string ("1".."10").
    pub participant_frames: HashMap<String, ParticipantFrame>,
    pub events: Vec<TimelineEvent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParticipantFrame {
    pub minions_killed: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimelineEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub timestamp: Option<i64>,
    pub killer_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RiotAccount {
    pub puuid: String,
    pub game_name: Option<String>,
    pub tag_line: Option<String>,
}

pub fn parse_match_detail_json(raw: &str) -> Result<MatchDetail> {
    parse_or_empty(raw).context("invalid match detail json")
}

pub fn parse_timeline_json(raw: &str) -> Result<MatchTimeline> {
    parse_or_empty(raw).context("invalid match timeline json")
}

pub fn parse_account_json(raw: &str) -> Result<RiotAccount> {
    serde_json::from_str(raw.trim()).context("invalid account json")
}

pub fn parse_match_ids_json(raw: &str) -> Result<Vec<String>> {
    parse_or_empty(raw).context("invalid match id list json")
}

fn parse_or_empty<T>(raw: &str) -> serde_json::Result<T>
where
    T: Default + for<'de> Deserialize<'de>,
{
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(T::default());
    }
    serde_json::from_str(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_participant_defaults_to_zero() {
        let raw = r#"{"info":{"participants":[{"puuid":"p1"}]}}"#;
        let detail = parse_match_detail_json(raw).unwrap();
        let p = detail.participant("p1").unwrap();
        assert_eq!(p.kills, 0);
        assert_eq!(p.team_id, 0);
        assert!(p.challenges.is_none());
        assert!(p.champion_name.is_none());
    }

    #[test]
    fn float_challenge_values_parse() {
        let raw = r#"{"info":{"participants":[{"puuid":"p1","challenges":{"abilityUses":211.0,"scuttleCrabKills":2}}]}}"#;
        let detail = parse_match_detail_json(raw).unwrap();
        let challenges = detail.participant("p1").unwrap().challenges.clone().unwrap();
        assert_eq!(challenges.ability_uses, 211.0);
        assert_eq!(challenges.scuttle_crab_kills, 2.0);
    }

    #[test]
    fn null_documents_are_empty() {
        assert!(parse_timeline_json("null").unwrap().info.frames.is_empty());
        assert!(parse_match_ids_json("").unwrap().is_empty());
    }

    #[test]
    fn event_type_maps_to_kind() {
        let raw = r#"{"info":{"frames":[{"timestamp":60000,"events":[{"type":"BUILDING_KILL","timestamp":55000,"killerId":3}]}]}}"#;
        let timeline = parse_timeline_json(raw).unwrap();
        let event = &timeline.info.frames[0].events[0];
        assert_eq!(event.kind, "BUILDING_KILL");
        assert_eq!(event.killer_id, Some(3));
        assert_eq!(event.timestamp, Some(55000));
    }
}
