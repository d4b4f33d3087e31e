use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownPlayer {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub puuid: Option<String>,
}

/// JSON file mapping a chosen display name to the player's puuid.
#[derive(Debug, Clone)]
pub struct PlayerRegistry {
    path: PathBuf,
}

impl PlayerRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty registry; an unreadable one is an error so
    /// that a later save cannot clobber it.
    pub fn load(&self) -> Result<BTreeMap<String, KnownPlayer>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("read player registry {}", self.path.display()));
            }
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid player registry {}", self.path.display()))
    }

    pub fn lookup(&self, name: &str) -> Result<Option<KnownPlayer>> {
        Ok(self.load()?.remove(name))
    }

    /// Records `name` only if it is not known yet. Returns whether the file changed.
    pub fn remember(&self, name: &str, puuid: &str) -> Result<bool> {
        let mut players = self.load()?;
        if players.contains_key(name) {
            return Ok(false);
        }
        players.insert(
            name.to_string(),
            KnownPlayer {
                name: name.to_string(),
                puuid: Some(puuid.to_string()),
            },
        );
        self.save(&players)?;
        log::info!("remembered player {name} in {}", self.path.display());
        Ok(true)
    }

    fn save(&self, players: &BTreeMap<String, KnownPlayer>) -> Result<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)
                .with_context(|| format!("create registry directory {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(players).context("serialize player registry")?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).context("write player registry")?;
        fs::rename(&tmp, &self.path).context("swap player registry")?;
        Ok(())
    }
}

/// Registry entries plus names that only exist in the analysis table
/// (those carry no puuid), ordered by name.
pub fn selection_list(
    registry: &BTreeMap<String, KnownPlayer>,
    stored_names: &[String],
) -> Vec<KnownPlayer> {
    let mut merged = registry.clone();
    for name in stored_names {
        merged.entry(name.clone()).or_insert_with(|| KnownPlayer {
            name: name.clone(),
            puuid: None,
        });
    }
    merged.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_list_adds_store_only_names_without_puuid() {
        let mut registry = BTreeMap::new();
        registry.insert(
            "Zed Main".to_string(),
            KnownPlayer {
                name: "Zed Main".to_string(),
                puuid: Some("p-zed".to_string()),
            },
        );
        let stored = vec!["Alpha".to_string(), "Zed Main".to_string()];

        let list = selection_list(&registry, &stored);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].name, "Alpha");
        assert_eq!(list[0].puuid, None);
        assert_eq!(list[1].puuid.as_deref(), Some("p-zed"));
    }
}
