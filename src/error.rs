//! Error types surfaced by the battle engine and progression layer.

use crate::core::state::Side;
use crate::progression::upgrades::UpgradeKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("creature id {0} is outside the supported range 1-150")]
    InvalidCreatureId(u32),

    #[error("level must be at least 1, got {0}")]
    InvalidLevel(u32),

    #[error("malformed creature record #{id}: {reason}")]
    InvalidRecord { id: u32, reason: String },

    #[error("invalid move data: {0}")]
    InvalidMove(String),

    #[error("no moves available for '{0}'")]
    EmptyMoveList(String),

    #[error("{0} combatant has no HP left before the battle started")]
    DefeatedCombatant(Side),

    #[error("creature provider failed: {0}")]
    Provider(String),

    #[error("species #{0} not found in the local database")]
    UnknownSpecies(u32),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not enough coins: need {needed}, have {available}")]
    InsufficientCoins { needed: u64, available: u64 },

    #[error("{kind} upgrade cost at level {level} exceeds the supported range")]
    UpgradeCostOverflow { kind: UpgradeKind, level: u32 },

    #[error("team is full ({max} members)")]
    TeamFull { max: usize },

    #[error("team is empty")]
    EmptyTeam,

    #[error("no team member at index {0}")]
    InvalidTeamIndex(usize),
}

pub type Result<T> = std::result::Result<T, EngineError>;
