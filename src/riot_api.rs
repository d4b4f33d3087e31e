use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::Url;
use reqwest::blocking::Client;

use crate::config::AppConfig;
use crate::match_cache::MatchSource;
use crate::raw_cache::DocumentKind;
use crate::riot_types::{RiotAccount, parse_account_json, parse_match_ids_json};

const TOKEN_HEADER: &str = "X-Riot-Token";

/// Blocking client for the regional Riot routing host. One GET per call, no retry.
#[derive(Debug, Clone)]
pub struct RiotClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

impl RiotClient {
    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        let api_key = cfg.require_api_key()?;
        Self::new(&cfg.api_base_url(), api_key, cfg.request_timeout)
    }

    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("invalid api base url {base_url}"))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("api base url cannot carry a path: {base_url}"));
        }
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            http,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    pub fn recent_match_ids(&self, puuid: &str, count: u32) -> Result<Vec<String>> {
        let mut url = self.endpoint(&["lol", "match", "v5", "matches", "by-puuid", puuid, "ids"])?;
        url.query_pairs_mut()
            .append_pair("count", &count.to_string());
        let body = self.get_text(url).context("match id list request failed")?;
        parse_match_ids_json(&body)
    }

    pub fn account_by_riot_id(&self, game_name: &str, tag_line: &str) -> Result<RiotAccount> {
        let url = self.endpoint(&[
            "riot",
            "account",
            "v1",
            "accounts",
            "by-riot-id",
            game_name,
            tag_line,
        ])?;
        let body = self
            .get_text(url)
            .with_context(|| format!("account lookup for {game_name}#{tag_line} failed"))?;
        parse_account_json(&body)
    }

    pub fn match_detail_raw(&self, match_id: &str) -> Result<String> {
        let url = self.endpoint(&["lol", "match", "v5", "matches", match_id])?;
        self.get_text(url)
            .with_context(|| format!("match detail request for {match_id} failed"))
    }

    pub fn timeline_raw(&self, match_id: &str) -> Result<String> {
        let url = self.endpoint(&["lol", "match", "v5", "matches", match_id, "timeline"])?;
        self.get_text(url)
            .with_context(|| format!("match timeline request for {match_id} failed"))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("api base url cannot carry a path: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get_text(&self, url: Url) -> Result<String> {
        log::debug!("GET {}", url.path());
        let resp = self
            .http
            .get(url)
            .header(TOKEN_HEADER, &self.api_key)
            .send()
            .context("request failed")?;
        let status = resp.status();
        let body = resp.text().context("failed reading body")?;
        if !status.is_success() {
            return Err(anyhow!("http {}: {}", status, body.trim()));
        }
        Ok(body)
    }
}

impl MatchSource for RiotClient {
    fn recent_match_ids(&self, puuid: &str, count: u32) -> Result<Vec<String>> {
        RiotClient::recent_match_ids(self, puuid, count)
    }

    fn fetch_document(&self, kind: DocumentKind, match_id: &str) -> Result<String> {
        match kind {
            DocumentKind::MatchDetail => self.match_detail_raw(match_id),
            DocumentKind::Timeline => self.timeline_raw(match_id),
        }
    }
}
