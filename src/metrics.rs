//! Per-player statistics derived from one match's detail and timeline.
//!
//! Every extractor is total: an absent player or field yields the documented
//! default (0, `None` or `"Unknown"`), never an error.

use chrono::{Local, TimeZone};

use crate::riot_types::{MatchDetail, MatchTimeline, Participant};

pub const TEN_MINUTES_MS: i64 = 600_000;
pub const STRUCTURE_KILL_EVENT: &str = "BUILDING_KILL";
pub const UNKNOWN: &str = "Unknown";

const QUEUE_LABELS: &[(i64, &str)] = &[
    (400, "Normal Draft"),
    (420, "Ranked Solo"),
    (430, "Normal Blind"),
    (440, "Ranked Flex"),
    (450, "ARAM"),
    (700, "Clash"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct MatchMetrics {
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

impl MatchMetrics {
    pub fn extract(detail: &MatchDetail, timeline: &MatchTimeline, puuid: &str) -> Self {
        Self {
            champion: champion_name(detail, puuid),
            game_mode: game_mode_label(detail),
            minions_at_10: minions_at_ten(timeline, puuid),
            kill_participation: kill_participation(detail, puuid),
            first_structure_ms: first_structure_ms(timeline, detail, puuid),
            assists: assists(detail, puuid),
            scuttle_crabs: scuttle_crab_kills(detail, puuid),
            ability_uses: ability_uses(detail, puuid),
            damage_to_champions: damage_to_champions(detail, puuid),
        }
    }
}

/// 1-based slot of `puuid` in the timeline's participant list.
pub fn participant_slot(timeline: &MatchTimeline, puuid: &str) -> Option<usize> {
    timeline
        .metadata
        .participants
        .iter()
        .position(|p| p == puuid)
        .map(|idx| idx + 1)
}

pub fn minions_at_ten(timeline: &MatchTimeline, puuid: &str) -> i64 {
    let frames = &timeline.info.frames;
    let Some(frame) = frames
        .iter()
        .find(|f| f.timestamp >= TEN_MINUTES_MS)
        .or_else(|| frames.last())
    else {
        return 0;
    };
    let Some(slot) = participant_slot(timeline, puuid) else {
        return 0;
    };
    frame
        .participant_frames
        .get(&slot.to_string())
        .map(|p| p.minions_killed)
        .unwrap_or(0)
}

/// (kills + assists) / team kills, as a percentage.
pub fn kill_participation(detail: &MatchDetail, puuid: &str) -> f64 {
    let Some(player) = detail.participant(puuid) else {
        return 0.0;
    };
    let team_kills: i64 = detail
        .info
        .participants
        .iter()
        .filter(|p| p.team_id == player.team_id)
        .map(|p| p.kills)
        .sum();
    if team_kills == 0 {
        return 0.0;
    }
    (player.kills + player.assists) as f64 / team_kills as f64 * 100.0
}

/// Earliest structure kill credited to a member of the player's team.
pub fn first_structure_ms(
    timeline: &MatchTimeline,
    detail: &MatchDetail,
    puuid: &str,
) -> Option<i64> {
    let team_id = detail.participant(puuid)?.team_id;
    timeline
        .info
        .frames
        .iter()
        .flat_map(|frame| frame.events.iter())
        .filter(|event| event.kind == STRUCTURE_KILL_EVENT)
        .filter(|event| {
            event
                .killer_id
                .and_then(|killer| detail.participant_by_id(killer))
                .is_some_and(|killer| killer.team_id == team_id)
        })
        .filter_map(|event| event.timestamp)
        .min()
}

pub fn assists(detail: &MatchDetail, puuid: &str) -> i64 {
    read_participant(detail, puuid, |p| p.assists)
}

pub fn scuttle_crab_kills(detail: &MatchDetail, puuid: &str) -> i64 {
    read_participant(detail, puuid, |p| {
        p.challenges
            .as_ref()
            .map(|c| c.scuttle_crab_kills.round() as i64)
            .unwrap_or(0)
    })
}

pub fn ability_uses(detail: &MatchDetail, puuid: &str) -> i64 {
    read_participant(detail, puuid, |p| {
        p.challenges
            .as_ref()
            .map(|c| c.ability_uses.round() as i64)
            .unwrap_or(0)
    })
}

pub fn damage_to_champions(detail: &MatchDetail, puuid: &str) -> i64 {
    read_participant(detail, puuid, |p| p.total_damage_dealt_to_champions)
}

pub fn champion_name(detail: &MatchDetail, puuid: &str) -> String {
    detail
        .participant(puuid)
        .and_then(|p| p.champion_name.clone())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

pub fn game_mode_label(detail: &MatchDetail) -> String {
    let queue_id = detail.info.queue_id;
    if let Some((_, label)) = QUEUE_LABELS.iter().find(|(id, _)| *id == queue_id) {
        return (*label).to_string();
    }
    detail
        .info
        .game_mode
        .clone()
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Match start in local time, e.g. `2023-11-14 23:13:20`.
pub fn game_datetime_label(start_ms: i64) -> String {
    Local
        .timestamp_millis_opt(start_ms)
        .earliest()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

fn read_participant(detail: &MatchDetail, puuid: &str, read: impl Fn(&Participant) -> i64) -> i64 {
    detail.participant(puuid).map(read).unwrap_or(0)
}
