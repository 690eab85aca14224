use crate::core::state::Combatant;
use crate::core::utils::level_multiplier;
use crate::data::moves::MoveCatalog;
use crate::data::species::CreatureRecord;
use crate::error::{EngineError, Result};

/// Max HP for a (record, level) pair. Every caller that needs a max HP
/// (battle setup, healing caps, HP bars) goes through here.
pub fn calc_max_hp(record: &CreatureRecord, level: u32) -> u32 {
    (record.stats.hp as f64 * level_multiplier(level)).round() as u32
}

pub fn create_combatant(record: &CreatureRecord, level: u32, catalog: &MoveCatalog) -> Result<Combatant> {
    if level == 0 {
        return Err(EngineError::InvalidLevel(level));
    }
    record.validate()?;

    let moves = catalog.moves_for(&record.types).to_vec();
    if moves.is_empty() {
        return Err(EngineError::EmptyMoveList(record.name.clone()));
    }

    let max_hp = calc_max_hp(record, level).max(1);
    Ok(Combatant {
        record: record.clone(),
        level,
        max_hp,
        hp: max_hp,
        cooldowns: vec![0; moves.len()],
        moves,
    })
}
