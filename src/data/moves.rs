use crate::data::type_chart::Element;
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub name: String,
    #[serde(rename = "type")]
    pub element: Element,
    pub power: u32,
    /// Turns before reuse. Carried for data compatibility, not enforced.
    #[serde(default)]
    pub cooldown: u32,
    #[serde(default, rename = "critBonus")]
    pub crit_bonus: f64,
}

impl Move {
    pub fn new(name: &str, element: Element, power: u32, cooldown: u32) -> Self {
        Self {
            name: name.to_string(),
            element,
            power,
            cooldown,
            crit_bonus: 0.0,
        }
    }

    pub fn with_crit_bonus(mut self, bonus: f64) -> Self {
        self.crit_bonus = bonus;
        self
    }
}

/// On-disk shape: the element is implied by the map key in the grouped form
/// and required in the flat list form.
#[derive(Clone, Debug, Deserialize)]
struct MoveEntry {
    name: String,
    #[serde(default, rename = "type")]
    element: Option<Element>,
    power: u32,
    #[serde(default)]
    cooldown: u32,
    #[serde(default, rename = "critBonus")]
    crit_bonus: f64,
}

impl MoveEntry {
    fn into_move(self, element: Element) -> Move {
        Move {
            name: self.name,
            element: self.element.unwrap_or(element),
            power: self.power,
            cooldown: self.cooldown,
            crit_bonus: self.crit_bonus,
        }
    }
}

/// Ordered move lists keyed by element.
#[derive(Clone, Debug)]
pub struct MoveCatalog {
    moves: HashMap<Element, Vec<Move>>,
}

impl MoveCatalog {
    pub fn new() -> Self {
        Self {
            moves: HashMap::new(),
        }
    }

    pub fn minimal() -> Self {
        let mut catalog = Self::new();
        catalog.insert(Move::new("tackle", Element::Normal, 40, 0));
        catalog.insert(Move::new("slash", Element::Normal, 60, 1).with_crit_bonus(0.1));
        catalog
    }

    pub fn load_default() -> Result<Self> {
        const DEFAULT_MOVES_YAML: &str = include_str!("../../data/moves.yaml");
        Self::load_from_yaml_str(DEFAULT_MOVES_YAML)
    }

    /// Appends to the list of the move's own element.
    pub fn insert(&mut self, mv: Move) {
        self.moves.entry(mv.element).or_default().push(mv);
    }

    pub fn get(&self, element: Element) -> Option<&[Move]> {
        self.moves.get(&element).map(|v| v.as_slice())
    }

    /// Moves for a creature: looked up by its first element, falling back to
    /// the normal set. Empty only when the catalog has neither.
    pub fn moves_for(&self, elements: &[Element]) -> &[Move] {
        let primary = elements.first().copied().unwrap_or(Element::Normal);
        self.get(primary)
            .filter(|moves| !moves.is_empty())
            .or_else(|| self.get(Element::Normal))
            .unwrap_or(&[])
    }

    pub fn as_map(&self) -> &HashMap<Element, Vec<Move>> {
        &self.moves
    }

    /// The top-level node picks the form: a mapping is grouped by element,
    /// a sequence is a flat list where every entry carries its own type.
    pub fn load_from_yaml_str(yaml: &str) -> Result<Self> {
        let document: Value = serde_yaml::from_str(yaml)?;
        let mut catalog = Self::new();
        match document {
            Value::Mapping(_) => {
                let map: HashMap<Element, Vec<MoveEntry>> = serde_yaml::from_value(document)?;
                // Stable element order keeps insertion deterministic.
                let mut elements: Vec<_> = map.into_iter().collect();
                elements.sort_by_key(|(element, _)| *element);
                for (element, entries) in elements {
                    for entry in entries {
                        catalog.insert(entry.into_move(element));
                    }
                }
            }
            Value::Sequence(_) => {
                let entries: Vec<MoveEntry> = serde_yaml::from_value(document)?;
                for entry in entries {
                    let element = entry.element.ok_or_else(|| {
                        EngineError::InvalidMove(format!("move '{}' has no type", entry.name))
                    })?;
                    catalog.insert(entry.into_move(element));
                }
            }
            _ => {
                return Err(EngineError::InvalidMove(
                    "expected a map of element lists or a list of moves".to_string(),
                ))
            }
        }
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load_from_yaml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::load_from_yaml_str(&content)
    }

    fn validate(&self) -> Result<()> {
        for (element, moves) in &self.moves {
            let mut seen = HashSet::new();
            for mv in moves {
                if mv.power == 0 {
                    return Err(EngineError::InvalidMove(format!("'{}' has zero power", mv.name)));
                }
                if !(0.0..=1.0).contains(&mv.crit_bonus) {
                    return Err(EngineError::InvalidMove(format!(
                        "'{}' has crit bonus {} outside 0..=1",
                        mv.name, mv.crit_bonus
                    )));
                }
                if !seen.insert(mv.name.as_str()) {
                    return Err(EngineError::InvalidMove(format!(
                        "duplicate move '{}' in {} list",
                        mv.name, element
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for MoveCatalog {
    fn default() -> Self {
        Self::load_default().unwrap_or_else(|_| Self::minimal())
    }
}
