//! Reward and level formulas. All pure; coin rolls take the random source
//! explicitly.

use crate::core::utils::roll_range;

pub const XP_PER_LEVEL: u64 = 100;
pub const BOSS_INTERVAL: u32 = 10;

const BASE_XP: f64 = 20.0;
const BOSS_XP: f64 = 200.0;
const XP_GROWTH_PER_BATTLE: f64 = 0.05;

const BASE_HEAL_FRACTION: f64 = 0.30;
const HEAL_FRACTION_PER_LEVEL: f64 = 0.10;

/// `battle_count` is the number of victories before this one.
pub fn calc_experience_for_victory(is_boss: bool, battle_count: u32) -> u64 {
    let base = if is_boss { BOSS_XP } else { BASE_XP };
    (base * (1.0 + battle_count as f64 * XP_GROWTH_PER_BATTLE)).round() as u64
}

pub fn calc_coins_for_victory(is_boss: bool, rng: &mut dyn FnMut() -> f64) -> u64 {
    let (min, max) = if is_boss { (100, 200) } else { (10, 20) };
    roll_range(rng, min, max) as u64
}

pub fn calc_level_from_xp(xp: u64) -> u32 {
    (xp / XP_PER_LEVEL + 1).max(1) as u32
}

/// Experience earned inside the current level, for progress bars.
pub fn xp_into_level(xp: u64) -> u64 {
    xp - (calc_level_from_xp(xp) as u64 - 1) * XP_PER_LEVEL
}

pub fn calc_hp_bonus(level: u32) -> u32 {
    20 + level.saturating_sub(1) * 5
}

/// Every tenth victory is a boss: true when the *next* win would be a
/// multiple of ten.
pub fn is_boss_encounter(victories: u32) -> bool {
    (victories + 1) % BOSS_INTERVAL == 0
}

pub fn auto_heal_fraction(auto_heal_level: u32) -> f64 {
    BASE_HEAL_FRACTION + auto_heal_level as f64 * HEAL_FRACTION_PER_LEVEL
}
