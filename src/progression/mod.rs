pub mod encounter;
pub mod rewards;
pub mod session;
pub mod storage;
pub mod upgrades;

pub use encounter::{pick_encounter, Encounter};
pub use rewards::{
    auto_heal_fraction, calc_coins_for_victory, calc_experience_for_victory, calc_hp_bonus,
    calc_level_from_xp, is_boss_encounter, xp_into_level,
};
pub use session::{BattleReport, GameSession, Language, PlayerProgress, Settings, Team, TeamMember};
pub use storage::{FileStore, MemoryStore, ProgressStore};
pub use upgrades::{calc_upgrade_cost, UpgradeKind, UpgradeLevels};
