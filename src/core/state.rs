use crate::data::moves::Move;
use crate::data::species::CreatureRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => f.write_str("player"),
            Side::Enemy => f.write_str("enemy"),
        }
    }
}

/// A creature prepared for one battle. `max_hp` is fixed at construction
/// for this (record, level) pair; `hp` stays within `0..=max_hp`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub record: CreatureRecord,
    pub level: u32,
    pub max_hp: u32,
    pub hp: u32,
    pub moves: Vec<Move>,
    /// Aligned with `moves`.
    pub cooldowns: Vec<u32>,
}

impl Combatant {
    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    /// Same combatant starting from a stored HP value, clamped to max HP.
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = hp.min(self.max_hp);
        self
    }

    pub fn take_damage(&mut self, damage: u32) -> u32 {
        self.hp = self.hp.saturating_sub(damage);
        self.hp
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DamageResult {
    pub damage: u32,
    pub critical: bool,
    /// Raw chart product (0, 0.25, 0.5, 1, 2, 4), independent of the damage floor.
    pub effectiveness: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleLogEntry {
    pub attacker: Side,
    #[serde(rename = "move")]
    pub move_used: Move,
    pub result: DamageResult,
    pub target_hp: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleOutcome {
    pub winner: Side,
    pub log: Vec<BattleLogEntry>,
    pub player_remaining_hp: u32,
    pub enemy_remaining_hp: u32,
    pub rounds: u32,
    /// Every random draw in order, for replay.
    #[serde(default)]
    pub rng: Vec<f64>,
}

impl BattleOutcome {
    pub fn player_won(&self) -> bool {
        self.winner == Side::Player
    }

    pub fn remaining_hp(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player_remaining_hp,
            Side::Enemy => self.enemy_remaining_hp,
        }
    }
}
