use crate::core::utils::roll_range;
use crate::progression::rewards::is_boss_encounter;
use serde::{Deserialize, Serialize};

const LEVELS_PER_TIER: u32 = 5;
const SPECIES_PER_TIER: u32 = 50;
const MAX_TIER: u32 = 2;
const VICTORIES_PER_ENEMY_LEVEL: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encounter {
    pub species_id: u32,
    pub level: u32,
    pub is_boss: bool,
}

/// Species tier for a player level: 0 covers ids 1-50, 1 covers 51-100,
/// 2 covers 101-150.
pub fn species_tier(player_level: u32) -> u32 {
    (player_level.saturating_sub(1) / LEVELS_PER_TIER).min(MAX_TIER)
}

pub fn enemy_level(player_level: u32, victories: u32) -> u32 {
    (player_level + victories / VICTORIES_PER_ENEMY_LEVEL).max(1)
}

/// One draw for the species id.
pub fn pick_encounter(player_level: u32, victories: u32, rng: &mut dyn FnMut() -> f64) -> Encounter {
    let start = species_tier(player_level) * SPECIES_PER_TIER + 1;
    let end = start + SPECIES_PER_TIER - 1;
    Encounter {
        species_id: roll_range(rng, start, end),
        level: enemy_level(player_level, victories),
        is_boss: is_boss_encounter(victories),
    }
}
