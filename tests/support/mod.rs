#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Result, anyhow};

use lol_match_stats::match_cache::MatchSource;
use lol_match_stats::raw_cache::DocumentKind;

pub const ALPHA_PUUID: &str = "puuid-alpha";
pub const FIXTURE_MATCH_ID: &str = "EUW1_6912345678";

pub fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

/// In-memory stand-in for the Riot API that records every call.
#[derive(Default)]
pub struct FakeSource {
    pub match_ids: Vec<String>,
    pub documents: HashMap<(DocumentKind, String), String>,
    pub fail_on: Option<String>,
    pub fetches: RefCell<Vec<(DocumentKind, String)>>,
    pub list_calls: RefCell<usize>,
}

impl FakeSource {
    /// Serves the fixture detail/timeline under each of `match_ids`.
    pub fn with_fixture_matches(match_ids: &[&str]) -> Self {
        let detail = read_fixture("match_detail.json");
        let timeline = read_fixture("timeline.json");
        let mut documents = HashMap::new();
        for id in match_ids {
            documents.insert((DocumentKind::MatchDetail, id.to_string()), detail.clone());
            documents.insert((DocumentKind::Timeline, id.to_string()), timeline.clone());
        }
        Self {
            match_ids: match_ids.iter().map(|id| id.to_string()).collect(),
            documents,
            ..Self::default()
        }
    }

    pub fn fetch_count(&self, kind: DocumentKind, match_id: &str) -> usize {
        self.fetches
            .borrow()
            .iter()
            .filter(|(k, id)| *k == kind && id == match_id)
            .count()
    }

    pub fn total_fetches(&self) -> usize {
        self.fetches.borrow().len()
    }
}

impl MatchSource for FakeSource {
    fn recent_match_ids(&self, _puuid: &str, count: u32) -> Result<Vec<String>> {
        *self.list_calls.borrow_mut() += 1;
        Ok(self
            .match_ids
            .iter()
            .take(count as usize)
            .cloned()
            .collect())
    }

    fn fetch_document(&self, kind: DocumentKind, match_id: &str) -> Result<String> {
        self.fetches
            .borrow_mut()
            .push((kind, match_id.to_string()));
        if self.fail_on.as_deref() == Some(match_id) {
            return Err(anyhow!("http 503 Service Unavailable: upstream down"));
        }
        self.documents
            .get(&(kind, match_id.to_string()))
            .cloned()
            .ok_or_else(|| anyhow!("http 404 Not Found: no {kind} for {match_id}"))
    }
}
