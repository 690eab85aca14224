use crate::core::state::Combatant;
use crate::data::moves::Move;
use crate::error::{EngineError, Result};

/// Signature shared by move-selection policies.
pub type MoveChooser = for<'a> fn(&'a Combatant) -> Result<&'a Move>;

/// Strictly highest power wins; ties keep the earliest move in the list.
/// Cooldowns are not consulted.
pub fn choose_highest_power(combatant: &Combatant) -> Result<&Move> {
    let mut best: Option<&Move> = None;
    for mv in &combatant.moves {
        match best {
            Some(current) if mv.power <= current.power => {}
            _ => best = Some(mv),
        }
    }
    best.ok_or_else(|| EngineError::EmptyMoveList(combatant.name().to_string()))
}

/// Always the first listed move. Useful as a weak opponent.
pub fn choose_first(combatant: &Combatant) -> Result<&Move> {
    combatant
        .moves
        .first()
        .ok_or_else(|| EngineError::EmptyMoveList(combatant.name().to_string()))
}
