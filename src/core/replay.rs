use crate::core::battle::BattleEngine;
use crate::core::state::{BattleOutcome, Combatant};
use crate::error::Result;

/// Re-runs a battle against recorded draws. Draws past the end read as 0.5.
pub fn replay_battle(
    engine: &BattleEngine,
    player: &Combatant,
    enemy: &Combatant,
    draws: &[f64],
) -> Result<BattleOutcome> {
    let mut idx = 0usize;
    let mut rng = || {
        let v = draws.get(idx).copied().unwrap_or(0.5);
        idx += 1;
        v
    };
    engine.run_battle(player, enemy, &mut rng)
}
