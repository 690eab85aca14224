use crate::core::battle::BattleEngine;
use crate::core::factory::calc_max_hp;
use crate::core::state::{BattleOutcome, Combatant};
use crate::data::provider::CreatureProvider;
use crate::data::species::CreatureRecord;
use crate::error::{EngineError, Result};
use crate::progression::encounter::{pick_encounter, Encounter};
use crate::progression::rewards::{
    auto_heal_fraction, calc_coins_for_victory, calc_experience_for_victory, calc_level_from_xp,
    is_boss_encounter,
};
use crate::progression::upgrades::{UpgradeKind, UpgradeLevels};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const MAX_TEAM_SIZE: usize = 6;
const CAPTURE_COIN_COST: u64 = 5;
const CAPTURE_XP_COST: u64 = 10;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProgress {
    #[serde(default)]
    pub xp: u64,
    #[serde(default)]
    pub coins: u64,
    #[serde(default)]
    pub victories: u32,
}

impl PlayerProgress {
    pub fn level(&self) -> u32 {
        calc_level_from_xp(self.xp)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TeamMember {
    pub record: CreatureRecord,
    pub level: u32,
    pub hp: u32,
}

impl TeamMember {
    pub fn new(record: CreatureRecord, level: u32) -> Result<Self> {
        if level == 0 {
            return Err(EngineError::InvalidLevel(level));
        }
        record.validate()?;
        let hp = calc_max_hp(&record, level);
        Ok(Self { record, level, hp })
    }

    /// Recomputed from record and level on every call.
    pub fn max_hp(&self) -> u32 {
        calc_max_hp(&self.record, self.level)
    }

    pub fn heal(&mut self, fraction: f64) {
        let max_hp = self.max_hp();
        let amount = (max_hp as f64 * fraction.max(0.0)).ceil() as u32;
        self.hp = self.hp.saturating_add(amount).min(max_hp);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Team {
    pub members: Vec<TeamMember>,
    pub max_team_size: usize,
    pub active_index: usize,
}

impl Default for Team {
    fn default() -> Self {
        Self {
            members: Vec::new(),
            max_team_size: 1,
            active_index: 0,
        }
    }
}

impl Team {
    pub fn is_full(&self) -> bool {
        self.members.len() >= self.max_team_size
    }

    pub fn active(&self) -> Result<&TeamMember> {
        if self.members.is_empty() {
            return Err(EngineError::EmptyTeam);
        }
        self.members
            .get(self.active_index)
            .ok_or(EngineError::InvalidTeamIndex(self.active_index))
    }

    pub fn active_mut(&mut self) -> Result<&mut TeamMember> {
        if self.members.is_empty() {
            return Err(EngineError::EmptyTeam);
        }
        let idx = self.active_index;
        self.members.get_mut(idx).ok_or(EngineError::InvalidTeamIndex(idx))
    }

    pub fn set_active(&mut self, index: usize) -> Result<()> {
        if index >= self.members.len() {
            return Err(EngineError::InvalidTeamIndex(index));
        }
        self.active_index = index;
        Ok(())
    }

    fn push(&mut self, member: TeamMember) -> Result<()> {
        if self.is_full() {
            return Err(EngineError::TeamFull {
                max: self.max_team_size,
            });
        }
        self.members.push(member);
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    #[default]
    Es,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub muted: bool,
}

/// What applying one battle outcome did to the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleReport {
    pub won: bool,
    pub boss: bool,
    pub xp_gained: u64,
    pub coins_gained: u64,
    pub level_before: u32,
    pub level_after: u32,
    pub heal_fraction: f64,
}

/// Player progression, team, upgrades and settings for one save.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GameSession {
    pub player: PlayerProgress,
    pub team: Team,
    pub upgrades: UpgradeLevels,
    pub settings: Settings,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> u32 {
        self.player.level()
    }

    /// Returns the level after the gain.
    pub fn add_xp(&mut self, amount: u64) -> u32 {
        let before = self.player.level();
        self.player.xp = self.player.xp.saturating_add(amount);
        let after = self.player.level();
        if after > before {
            info!(from = before, to = after, xp = self.player.xp, "player levelled up");
        }
        after
    }

    pub fn add_coins(&mut self, amount: u64) {
        self.player.coins = self.player.coins.saturating_add(amount);
    }

    /// Replaces the whole team with a single starter.
    pub fn set_starter(&mut self, record: CreatureRecord, level: u32) -> Result<()> {
        let member = TeamMember::new(record, level)?;
        info!(starter = %member.record.name, level, "starter chosen");
        self.team.members = vec![member];
        self.team.active_index = 0;
        Ok(())
    }

    pub fn add_member(&mut self, record: CreatureRecord, level: u32) -> Result<()> {
        let member = TeamMember::new(record, level)?;
        self.team.push(member)
    }

    /// Adds a defeated enemy to the team at a small coin and XP cost.
    pub fn capture(&mut self, record: CreatureRecord, level: u32) -> Result<()> {
        let member = TeamMember::new(record, level)?;
        self.team.push(member)?;
        self.player.coins = self.player.coins.saturating_sub(CAPTURE_COIN_COST);
        self.player.xp = self.player.xp.saturating_sub(CAPTURE_XP_COST);
        Ok(())
    }

    pub fn heal_team(&mut self, fraction: f64) {
        for member in &mut self.team.members {
            member.heal(fraction);
        }
    }

    /// Buys one level of `kind`. Returns the price paid. Fails when coins
    /// are short or the next price is past the supported range.
    pub fn purchase(&mut self, kind: UpgradeKind) -> Result<u64> {
        let cost = self.upgrades.next_cost(kind)?;
        if self.player.coins < cost {
            return Err(EngineError::InsufficientCoins {
                needed: cost,
                available: self.player.coins,
            });
        }
        self.player.coins -= cost;
        let level = self.upgrades.increment(kind);
        if kind == UpgradeKind::TeamSlot {
            self.team.max_team_size = (self.team.max_team_size + 1).min(MAX_TEAM_SIZE);
        }
        info!(upgrade = %kind, level, cost, coins_left = self.player.coins, "upgrade purchased");
        Ok(cost)
    }

    pub fn next_encounter(&self, rng: &mut dyn FnMut() -> f64) -> Encounter {
        pick_encounter(self.level(), self.player.victories, rng)
    }

    /// Builds the active member (at its stored HP) and the enemy (at full HP).
    pub fn prepare_battle(
        &self,
        engine: &BattleEngine,
        enemy: &CreatureRecord,
        enemy_level: u32,
    ) -> Result<(Combatant, Combatant)> {
        let member = self.team.active()?;
        let player = engine.create_combatant(&member.record, member.level)?.with_hp(member.hp);
        let enemy = engine.create_combatant(enemy, enemy_level)?;
        Ok((player, enemy))
    }

    /// Stores the active member's HP and hands out rewards. A win awards XP
    /// and coins (using the victory count before this win) and auto-heals;
    /// a loss fully heals the team.
    pub fn apply_outcome(&mut self, outcome: &BattleOutcome, rng: &mut dyn FnMut() -> f64) -> Result<BattleReport> {
        let level_before = self.level();
        self.team.active_mut()?.hp = outcome.player_remaining_hp;

        if !outcome.player_won() {
            self.heal_team(1.0);
            info!("battle lost, team fully healed");
            return Ok(BattleReport {
                won: false,
                boss: false,
                xp_gained: 0,
                coins_gained: 0,
                level_before,
                level_after: level_before,
                heal_fraction: 1.0,
            });
        }

        let battle_count = self.player.victories;
        let boss = is_boss_encounter(battle_count);
        let xp_gained = calc_experience_for_victory(boss, battle_count);
        let coins_gained = calc_coins_for_victory(boss, rng);
        let level_after = self.add_xp(xp_gained);
        self.add_coins(coins_gained);
        self.player.victories += 1;

        let heal_fraction = auto_heal_fraction(self.upgrades.get(UpgradeKind::AutoHeal));
        self.heal_team(heal_fraction);
        info!(
            boss,
            xp_gained,
            coins_gained,
            victories = self.player.victories,
            "victory rewards applied"
        );

        Ok(BattleReport {
            won: true,
            boss,
            xp_gained,
            coins_gained,
            level_before,
            level_after,
            heal_fraction,
        })
    }

    /// Picks the next enemy, fights it with the active member and applies
    /// the result.
    pub fn play_encounter<P: CreatureProvider>(
        &mut self,
        engine: &BattleEngine,
        provider: &P,
        rng: &mut dyn FnMut() -> f64,
    ) -> Result<(Encounter, BattleOutcome, BattleReport)> {
        let encounter = self.next_encounter(rng);
        let enemy = provider.fetch(encounter.species_id)?;
        let (player, enemy) = self.prepare_battle(engine, &enemy, encounter.level)?;
        let outcome = engine.run_battle(&player, &enemy, rng)?;
        let report = self.apply_outcome(&outcome, rng)?;
        Ok((encounter, outcome, report))
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.settings.muted = !self.settings.muted;
        self.settings.muted
    }

    pub fn set_language(&mut self, language: Language) {
        self.settings.language = language;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
