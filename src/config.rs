use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, anyhow};

const APP_DIR: &str = "lol_match_stats";
const DB_FILE: &str = "riot_cache.sqlite";
const REGISTRY_FILE: &str = "custom_summoners.json";
const DEFAULT_REGION: &str = "europe";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Process-wide settings, built once and handed to each component.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub region: String,
    pub api_base: Option<String>,
    pub db_path: PathBuf,
    pub registry_path: PathBuf,
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Reads `.env.local` / `.env` and then the process environment.
    pub fn from_env() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");

        let api_key = env_non_empty("RIOT_API_KEY");
        let region = env_non_empty("RIOT_REGION")
            .map(|r| r.to_ascii_lowercase())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        let api_base = env_non_empty("RIOT_API_BASE");
        let base_dir = app_cache_dir().unwrap_or_else(|| PathBuf::from("."));
        let db_path = env_non_empty("LOL_STATS_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|| base_dir.join(DB_FILE));
        let registry_path = env_non_empty("LOL_STATS_REGISTRY")
            .map(PathBuf::from)
            .unwrap_or_else(|| base_dir.join(REGISTRY_FILE));
        let timeout_secs = env::var("LOL_STATS_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .clamp(1, 120);

        Self {
            api_key,
            region,
            api_base,
            db_path,
            registry_path,
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn api_base_url(&self) -> String {
        match self.api_base.as_deref() {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://{}.api.riotgames.com", self.region),
        }
    }

    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| anyhow!("RIOT_API_KEY is not set (export it or put it in .env)"))
    }
}

pub fn app_cache_dir() -> Option<PathBuf> {
    if let Ok(base) = env::var("XDG_CACHE_HOME")
        && !base.trim().is_empty()
    {
        return Some(PathBuf::from(base).join(APP_DIR));
    }
    let home = env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(home).join(".cache").join(APP_DIR))
}

fn env_non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(region: &str, api_base: Option<&str>) -> AppConfig {
        AppConfig {
            api_key: None,
            region: region.to_string(),
            api_base: api_base.map(str::to_string),
            db_path: PathBuf::from("db.sqlite"),
            registry_path: PathBuf::from("players.json"),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    #[test]
    fn base_url_follows_region() {
        assert_eq!(
            config("americas", None).api_base_url(),
            "https://americas.api.riotgames.com"
        );
    }

    #[test]
    fn base_url_override_drops_trailing_slash() {
        assert_eq!(
            config("europe", Some("http://127.0.0.1:9000/")).api_base_url(),
            "http://127.0.0.1:9000"
        );
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let err = config("europe", None).require_api_key().unwrap_err();
        assert!(err.to_string().contains("RIOT_API_KEY"));
    }
}
