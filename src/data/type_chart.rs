use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl Element {
    pub const ALL: [Element; 18] = [
        Element::Normal,
        Element::Fire,
        Element::Water,
        Element::Electric,
        Element::Grass,
        Element::Ice,
        Element::Fighting,
        Element::Poison,
        Element::Ground,
        Element::Flying,
        Element::Psychic,
        Element::Bug,
        Element::Rock,
        Element::Ghost,
        Element::Dragon,
        Element::Dark,
        Element::Steel,
        Element::Fairy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Element::Normal => "normal",
            Element::Fire => "fire",
            Element::Water => "water",
            Element::Electric => "electric",
            Element::Grass => "grass",
            Element::Ice => "ice",
            Element::Fighting => "fighting",
            Element::Poison => "poison",
            Element::Ground => "ground",
            Element::Flying => "flying",
            Element::Psychic => "psychic",
            Element::Bug => "bug",
            Element::Rock => "rock",
            Element::Ghost => "ghost",
            Element::Dragon => "dragon",
            Element::Dark => "dark",
            Element::Steel => "steel",
            Element::Fairy => "fairy",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Element {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Element::ALL
            .iter()
            .copied()
            .find(|e| e.as_str() == key)
            .ok_or_else(|| format!("unknown element '{}'", s))
    }
}

/// Attacker → defender multipliers. Pairs that are not listed are neutral.
#[derive(Clone, Debug)]
pub struct TypeChart {
    chart: HashMap<(Element, Element), f64>,
}

impl TypeChart {
    pub fn new() -> Self {
        use Element::*;

        let mut chart = HashMap::new();
        let mut add_entry = |attacker: Element, strong: &[Element], weak: &[Element], immune: &[Element]| {
            for defender in strong {
                chart.insert((attacker, *defender), 2.0);
            }
            for defender in weak {
                chart.insert((attacker, *defender), 0.5);
            }
            for defender in immune {
                chart.insert((attacker, *defender), 0.0);
            }
        };

        add_entry(Fire, &[Grass, Ice, Bug], &[Water, Rock, Poison], &[]);
        add_entry(Water, &[Fire, Ground, Rock], &[Grass, Electric], &[]);
        add_entry(Grass, &[Water, Ground, Rock], &[Fire, Ice, Poison, Flying, Bug], &[]);
        add_entry(Electric, &[Water, Flying], &[Grass], &[Ground]);
        add_entry(Rock, &[Fire, Ice, Flying, Bug], &[Fighting, Ground], &[]);
        add_entry(Ground, &[Fire, Electric, Poison, Rock], &[Water, Grass], &[Flying]);
        add_entry(Ice, &[Grass, Ground, Flying, Dragon], &[Fire, Water], &[]);
        add_entry(Fighting, &[Normal, Rock, Ice, Dark], &[Psychic, Flying], &[]);
        add_entry(Flying, &[Grass, Fighting, Bug], &[Rock, Electric], &[]);
        add_entry(Poison, &[Grass, Fairy], &[Ground, Rock, Ghost], &[]);
        add_entry(Psychic, &[Fighting, Poison], &[Psychic], &[]);
        add_entry(Bug, &[Grass, Psychic, Dark], &[Fire, Fighting], &[]);
        add_entry(Ghost, &[Psychic, Ghost], &[], &[Normal]);
        add_entry(Dragon, &[Dragon], &[], &[]);
        add_entry(Fairy, &[Fighting, Dragon, Dark], &[Fire, Poison], &[]);

        Self { chart }
    }

    /// Single-pair lookup, neutral when unlisted.
    pub fn multiplier(&self, attacker: Element, defender: Element) -> f64 {
        self.chart.get(&(attacker, defender)).copied().unwrap_or(1.0)
    }

    /// Product of the per-element multipliers over every defending element.
    /// Entries are powers of two (or zero), so the product is exact.
    pub fn effectiveness(&self, move_element: Element, target_elements: &[Element]) -> f64 {
        target_elements
            .iter()
            .map(|target| self.multiplier(move_element, *target))
            .product()
    }
}

impl Default for TypeChart {
    fn default() -> Self {
        Self::new()
    }
}
