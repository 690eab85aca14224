//! PokeAPI client used to build the local species file.
//!
//! Fetches `/pokemon/{id}` and normalises the payload into a
//! [`CreatureRecord`]. Results are cached for the lifetime of the client.

use crate::data::provider::check_id;
use crate::data::species::{BaseStats, CreatureRecord, Sprites};
use crate::data::type_chart::Element;
use crate::error::{EngineError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Mutex;
use tracing::{debug, warn};

const POKEAPI_URL: &str = "https://pokeapi.co/api/v2/pokemon";
const MOVE_HINT_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
pub struct RawNamedResource {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RawType {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: RawNamedResource,
}

#[derive(Debug, Deserialize)]
pub struct RawStat {
    pub base_stat: u32,
    pub stat: RawNamedResource,
}

#[derive(Debug, Deserialize)]
pub struct RawMove {
    #[serde(rename = "move")]
    pub entry: RawNamedResource,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawSprites {
    pub front_default: Option<String>,
    pub back_default: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawPokemon {
    pub id: u32,
    pub name: String,
    pub types: Vec<RawType>,
    pub stats: Vec<RawStat>,
    #[serde(default)]
    pub sprites: RawSprites,
    #[serde(default)]
    pub moves: Vec<RawMove>,
}

/// Maps the raw payload onto our record shape. Missing stats default to 1.
pub fn normalise(raw: RawPokemon) -> Result<CreatureRecord> {
    let stat_map: HashMap<&str, u32> = raw
        .stats
        .iter()
        .map(|s| (s.stat.name.as_str(), s.base_stat))
        .collect();
    let stat = |name: &str| stat_map.get(name).copied().unwrap_or(1);

    let mut types: Vec<&RawType> = raw.types.iter().collect();
    types.sort_by_key(|t| t.slot);
    let types = types
        .into_iter()
        .map(|t| Element::from_str(&t.kind.name).map_err(EngineError::Provider))
        .collect::<Result<Vec<_>>>()?;

    let record = CreatureRecord {
        id: raw.id,
        name: raw.name,
        types,
        stats: BaseStats {
            hp: stat("hp"),
            attack: stat("attack"),
            defense: stat("defense"),
            special_attack: stat("special-attack"),
            special_defense: stat("special-defense"),
            speed: stat("speed"),
        },
        sprites: Sprites {
            front: raw.sprites.front_default.unwrap_or_default(),
            back: raw.sprites.back_default.unwrap_or_default(),
        },
        moves: raw
            .moves
            .into_iter()
            .take(MOVE_HINT_LIMIT)
            .map(|m| m.entry.name)
            .collect(),
    };
    record.validate()?;
    Ok(record)
}

pub struct PokeApiClient {
    base_url: String,
    client: reqwest::Client,
    cache: Mutex<HashMap<u32, CreatureRecord>>,
}

impl PokeApiClient {
    pub fn new() -> Self {
        Self::with_base_url(POKEAPI_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn cached(&self, id: u32) -> Option<CreatureRecord> {
        self.cache.lock().ok().and_then(|c| c.get(&id).cloned())
    }

    /// Fetches one creature. No retries; failures go straight to the caller.
    pub async fn fetch(&self, id: u32) -> Result<CreatureRecord> {
        check_id(id)?;
        if let Some(record) = self.cached(id) {
            debug!(id, "pokeapi cache hit");
            return Ok(record);
        }

        let url = format!("{}/{}", self.base_url, id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| EngineError::Provider(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::Provider(format!(
                "failed to fetch creature {}: HTTP {}",
                id, status
            )));
        }
        let raw: RawPokemon = response
            .json()
            .await
            .map_err(|e| EngineError::Provider(e.to_string()))?;
        let record = normalise(raw)?;
        debug!(id, name = %record.name, "fetched creature");

        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(id, record.clone());
        }
        Ok(record)
    }

    /// Fetches ids one after another, skipping (and logging) failures.
    pub async fn preload(&self, ids: &[u32]) -> Vec<CreatureRecord> {
        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            match self.fetch(*id).await {
                Ok(record) => records.push(record),
                Err(err) => warn!(id, %err, "failed to preload creature"),
            }
        }
        records
    }
}

impl Default for PokeApiClient {
    fn default() -> Self {
        Self::new()
    }
}
