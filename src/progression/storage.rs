//! Persisted session slices. Each slice is a flat JSON document under its
//! own key; the engine only produces and consumes the strings.

use crate::data::provider::CreatureProvider;
use crate::error::Result;
use crate::progression::session::{GameSession, PlayerProgress, Settings, Team, TeamMember, MAX_TEAM_SIZE};
use crate::progression::upgrades::UpgradeLevels;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const PLAYER_KEY: &str = "arena-player-v1";
pub const TEAM_KEY: &str = "arena-team-v1";
pub const UPGRADES_KEY: &str = "arena-upgrades-v1";
pub const SETTINGS_KEY: &str = "arena-settings-v1";

pub const ALL_KEYS: [&str; 4] = [PLAYER_KEY, TEAM_KEY, UPGRADES_KEY, SETTINGS_KEY];

pub trait ProgressStore {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per slice inside a directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl ProgressStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        fs::write(self.path(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct StoredMember {
    id: u32,
    level: u32,
    hp: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTeam {
    #[serde(default)]
    team: Vec<StoredMember>,
    #[serde(default = "default_team_size")]
    max_team_size: usize,
    #[serde(default)]
    active_index: usize,
}

fn default_team_size() -> usize {
    1
}

impl From<&Team> for StoredTeam {
    fn from(team: &Team) -> Self {
        Self {
            team: team
                .members
                .iter()
                .map(|m| StoredMember {
                    id: m.record.id,
                    level: m.level,
                    hp: m.hp,
                })
                .collect(),
            max_team_size: team.max_team_size,
            active_index: team.active_index,
        }
    }
}

impl GameSession {
    pub fn persist(&self, store: &mut dyn ProgressStore) -> Result<()> {
        store.save(PLAYER_KEY, &serde_json::to_string(&self.player)?)?;
        store.save(TEAM_KEY, &serde_json::to_string(&StoredTeam::from(&self.team))?)?;
        store.save(UPGRADES_KEY, &serde_json::to_string(&self.upgrades)?)?;
        store.save(SETTINGS_KEY, &serde_json::to_string(&self.settings)?)?;
        Ok(())
    }

    /// Rebuilds a session from whatever slices are readable. Missing or
    /// corrupt slices keep their defaults; team members whose record cannot
    /// be fetched are dropped.
    pub fn hydrate<P: CreatureProvider>(store: &dyn ProgressStore, provider: &P) -> Self {
        let mut session = GameSession::default();
        if let Some(player) = load_slice::<PlayerProgress>(store, PLAYER_KEY) {
            session.player = player;
        }
        if let Some(upgrades) = load_slice::<UpgradeLevels>(store, UPGRADES_KEY) {
            session.upgrades = upgrades;
        }
        if let Some(settings) = load_slice::<Settings>(store, SETTINGS_KEY) {
            session.settings = settings;
        }
        if let Some(stored) = load_slice::<StoredTeam>(store, TEAM_KEY) {
            session.team = restore_team(stored, provider);
        }
        session
    }

    /// Wipes the session and every persisted slice.
    pub fn reset_persisted(&mut self, store: &mut dyn ProgressStore) -> Result<()> {
        self.reset();
        for key in ALL_KEYS {
            store.remove(key)?;
        }
        Ok(())
    }
}

fn load_slice<T: DeserializeOwned>(store: &dyn ProgressStore, key: &str) -> Option<T> {
    let raw = match store.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            warn!(key, %err, "failed to read persisted slice");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key, %err, "failed to hydrate persisted slice");
            None
        }
    }
}

fn restore_team<P: CreatureProvider>(stored: StoredTeam, provider: &P) -> Team {
    let mut members = Vec::new();
    for item in stored.team {
        let member = provider
            .fetch(item.id)
            .and_then(|record| TeamMember::new(record, item.level));
        match member {
            Ok(mut member) => {
                member.hp = item.hp.min(member.max_hp());
                members.push(member);
            }
            Err(err) => warn!(id = item.id, %err, "failed to hydrate team member"),
        }
    }
    let max_team_size = stored.max_team_size.clamp(1, MAX_TEAM_SIZE).max(members.len().min(MAX_TEAM_SIZE));
    let active_index = if stored.active_index < members.len() {
        stored.active_index
    } else {
        0
    };
    Team {
        members,
        max_team_size,
        active_index,
    }
}
