use anyhow::{Context, Result};

use crate::raw_cache::{DocumentKind, RawCache};
use crate::riot_types::{MatchDetail, MatchTimeline, parse_match_detail_json, parse_timeline_json};

/// Where match documents come from when the cache misses.
pub trait MatchSource {
    fn recent_match_ids(&self, puuid: &str, count: u32) -> Result<Vec<String>>;

    /// Raw response body for one document.
    fn fetch_document(&self, kind: DocumentKind, match_id: &str) -> Result<String>;
}

/// Cache-or-fetch front for match documents. Only bodies that parse are
/// stored, and a stored entry is trusted forever.
pub struct MatchCache<'a, S: MatchSource> {
    cache: &'a RawCache,
    source: &'a S,
}

impl<'a, S: MatchSource> MatchCache<'a, S> {
    pub fn new(cache: &'a RawCache, source: &'a S) -> Self {
        Self { cache, source }
    }

    pub fn get(&self, kind: DocumentKind, match_id: &str) -> Result<String> {
        if let Some(body) = self.cache.get(kind, match_id)? {
            log::debug!("cache hit: {kind} {match_id}");
            return Ok(body);
        }
        log::debug!("cache miss: {kind} {match_id}");
        let body = self.source.fetch_document(kind, match_id)?;
        check_document(kind, &body)
            .with_context(|| format!("unusable {kind} for {match_id}, not cached"))?;
        self.cache.put(kind, match_id, &body)?;
        Ok(body)
    }

    pub fn match_detail(&self, match_id: &str) -> Result<MatchDetail> {
        parse_match_detail_json(&self.get(DocumentKind::MatchDetail, match_id)?)
    }

    pub fn timeline(&self, match_id: &str) -> Result<MatchTimeline> {
        parse_timeline_json(&self.get(DocumentKind::Timeline, match_id)?)
    }
}

fn check_document(kind: DocumentKind, body: &str) -> Result<()> {
    match kind {
        DocumentKind::MatchDetail => parse_match_detail_json(body).map(drop),
        DocumentKind::Timeline => parse_timeline_json(body).map(drop),
    }
}
