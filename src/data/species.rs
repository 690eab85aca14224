use crate::data::provider::{check_id, CreatureProvider};
use crate::data::type_chart::Element;
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const MIN_SPECIES_ID: u32 = 1;
pub const MAX_SPECIES_ID: u32 = 150;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub special_attack: u32,
    pub special_defense: u32,
    pub speed: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front: String,
    #[serde(default)]
    pub back: String,
}

/// Static creature data as supplied by a provider. Never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreatureRecord {
    pub id: u32,
    pub name: String,
    #[serde(alias = "elements")]
    pub types: Vec<Element>,
    pub stats: BaseStats,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub moves: Vec<String>,
}

impl CreatureRecord {
    pub fn primary_element(&self) -> Element {
        self.types.first().copied().unwrap_or(Element::Normal)
    }

    pub fn has_element(&self, element: Element) -> bool {
        self.types.contains(&element)
    }

    /// Rejects records the engine cannot fight with: out-of-range id, zero or
    /// more than two elements, zero HP or defense.
    pub fn validate(&self) -> Result<()> {
        check_id(self.id)?;
        let invalid = |reason: &str| EngineError::InvalidRecord {
            id: self.id,
            reason: reason.to_string(),
        };
        if self.types.is_empty() {
            return Err(invalid("no elements"));
        }
        if self.types.len() > 2 {
            return Err(invalid("more than two elements"));
        }
        if self.stats.hp == 0 {
            return Err(invalid("base hp is zero"));
        }
        if self.stats.defense == 0 {
            return Err(invalid("base defense is zero"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct SpeciesDatabase {
    species: HashMap<u32, CreatureRecord>,
}

impl SpeciesDatabase {
    pub fn new() -> Self {
        Self {
            species: HashMap::new(),
        }
    }

    pub fn insert(&mut self, record: CreatureRecord) {
        self.species.insert(record.id, record);
    }

    pub fn get(&self, id: u32) -> Option<&CreatureRecord> {
        self.species.get(&id)
    }

    pub fn as_map(&self) -> &HashMap<u32, CreatureRecord> {
        &self.species
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Ids in ascending order.
    pub fn ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.species.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Accepts `{"species": [...]}`, a bare list, or a map keyed by id.
    pub fn load_from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let inner = match value {
            Value::Object(mut obj) if obj.contains_key("species") => {
                obj.remove("species").unwrap_or(Value::Null)
            }
            other => other,
        };
        let records: Vec<CreatureRecord> = match inner {
            Value::Array(_) => serde_json::from_value(inner)?,
            _ => {
                let map: HashMap<String, CreatureRecord> = serde_json::from_value(inner)?;
                map.into_values().collect()
            }
        };
        let mut db = Self::new();
        for record in records {
            record.validate()?;
            db.insert(record);
        }
        Ok(db)
    }

    pub fn load_from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::load_from_json_str(&content)
    }

    pub fn load_default() -> Result<Self> {
        const DEFAULT_SPECIES_JSON: &str = include_str!("../../data/species.json");
        Self::load_from_json_str(DEFAULT_SPECIES_JSON)
    }

    pub fn to_json_string(&self) -> Result<String> {
        let records: Vec<&CreatureRecord> = self.ids().iter().filter_map(|id| self.get(*id)).collect();
        Ok(serde_json::to_string_pretty(&serde_json::json!({ "species": records }))?)
    }
}

impl CreatureProvider for SpeciesDatabase {
    fn fetch(&self, id: u32) -> Result<CreatureRecord> {
        check_id(id)?;
        self.get(id).cloned().ok_or(EngineError::UnknownSpecies(id))
    }
}
