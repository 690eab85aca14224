use crate::core::state::{Combatant, DamageResult};
use crate::core::utils::scaled_stat;
use crate::data::moves::Move;
use crate::data::type_chart::TypeChart;

pub const STAB_MULTIPLIER: f64 = 1.25;
pub const BASE_CRIT_CHANCE: f64 = 0.10;
pub const CRIT_MULTIPLIER: f64 = 1.5;
pub const VARIANCE_MIN: f64 = 0.9;
pub const VARIANCE_SPREAD: f64 = 0.2;

/// Resolves one attack. Draws exactly twice from `rng`: the critical roll,
/// then the variance factor. Every hit deals at least 1 damage, including
/// against an immune target; `effectiveness` still reports the raw product.
pub fn calculate_damage(
    attacker: &Combatant,
    defender: &Combatant,
    mv: &Move,
    type_chart: &TypeChart,
    rng: &mut dyn FnMut() -> f64,
) -> DamageResult {
    let attack = scaled_stat(attacker.record.stats.attack, attacker.level);
    // Defense is validated non-zero when the combatant is built.
    let defense = scaled_stat(defender.record.stats.defense.max(1), defender.level);
    let base = (attack / defense) * mv.power as f64;

    let stab = if attacker.record.has_element(mv.element) {
        STAB_MULTIPLIER
    } else {
        1.0
    };
    let effectiveness = type_chart.effectiveness(mv.element, &defender.record.types);

    let crit_chance = BASE_CRIT_CHANCE + mv.crit_bonus;
    let critical = rng() < crit_chance;
    let crit_multiplier = if critical { CRIT_MULTIPLIER } else { 1.0 };

    let variance = VARIANCE_MIN + rng() * VARIANCE_SPREAD;

    let raw = (base * stab * effectiveness * crit_multiplier * variance).round();
    let damage = if raw.is_finite() && raw >= 1.0 { raw as u32 } else { 1 };

    DamageResult {
        damage,
        critical,
        effectiveness,
    }
}
