pub mod ai;
pub mod core;
pub mod data;
pub mod error;
pub mod progression;

#[cfg(not(target_arch = "wasm32"))]
pub mod tools;

pub use ai::{choose_first, choose_highest_power, MoveChooser};
pub use core::{
    battle::{run_battle, BattleEngine},
    damage::calculate_damage,
    factory::{calc_max_hp, create_combatant},
    replay::replay_battle,
    state::{BattleLogEntry, BattleOutcome, Combatant, DamageResult, Side},
    utils::{seeded_source, thread_rng_source},
};
pub use data::{
    moves::{Move, MoveCatalog},
    provider::{CachedProvider, CreatureProvider},
    species::{BaseStats, CreatureRecord, SpeciesDatabase, Sprites},
    type_chart::{Element, TypeChart},
};
pub use error::{EngineError, Result};
pub use progression::{
    calc_coins_for_victory, calc_experience_for_victory, calc_level_from_xp, calc_upgrade_cost,
    GameSession, UpgradeKind,
};

#[cfg(target_arch = "wasm32")]
pub mod wasm;
