use crate::ai::simple::{choose_highest_power, MoveChooser};
use crate::core::damage::calculate_damage;
use crate::core::factory::create_combatant;
use crate::core::state::{BattleLogEntry, BattleOutcome, Combatant, DamageResult, Side};
use crate::core::utils::scaled_stat;
use crate::data::moves::{Move, MoveCatalog};
use crate::data::species::CreatureRecord;
use crate::data::type_chart::TypeChart;
use crate::error::{EngineError, Result};
use std::fmt;
use tracing::{debug, info};

#[derive(Clone)]
pub struct BattleEngine {
    pub move_db: MoveCatalog,
    pub type_chart: TypeChart,
    pub chooser: MoveChooser,
}

impl Default for BattleEngine {
    fn default() -> Self {
        Self {
            move_db: MoveCatalog::default(),
            type_chart: TypeChart::new(),
            chooser: choose_highest_power,
        }
    }
}

impl fmt::Debug for BattleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BattleEngine")
            .field("move_db", &self.move_db)
            .field("type_chart", &self.type_chart)
            .finish_non_exhaustive()
    }
}

impl BattleEngine {
    pub fn new(move_db: MoveCatalog, type_chart: TypeChart) -> Self {
        Self {
            move_db,
            type_chart,
            chooser: choose_highest_power,
        }
    }

    pub fn with_chooser(mut self, chooser: MoveChooser) -> Self {
        self.chooser = chooser;
        self
    }

    pub fn create_combatant(&self, record: &CreatureRecord, level: u32) -> Result<Combatant> {
        create_combatant(record, level, &self.move_db)
    }

    pub fn select_move<'a>(&self, combatant: &'a Combatant) -> Result<&'a Move> {
        (self.chooser)(combatant)
    }

    pub fn resolve(
        &self,
        attacker: &Combatant,
        defender: &Combatant,
        mv: &Move,
        rng: &mut dyn FnMut() -> f64,
    ) -> DamageResult {
        calculate_damage(attacker, defender, mv, &self.type_chart, rng)
    }

    /// Fights until one side reaches 0 HP. Neither input is modified; the
    /// outcome carries both final HP values, the attack log and every random
    /// draw made along the way.
    pub fn run_battle(
        &self,
        player: &Combatant,
        enemy: &Combatant,
        rng: &mut dyn FnMut() -> f64,
    ) -> Result<BattleOutcome> {
        if player.is_fainted() {
            return Err(EngineError::DefeatedCombatant(Side::Player));
        }
        if enemy.is_fainted() {
            return Err(EngineError::DefeatedCombatant(Side::Enemy));
        }

        let mut rng_log = Vec::new();
        let mut rng_recorder = || {
            let v = rng();
            rng_log.push(v);
            v
        };

        let mut player = player.clone();
        let mut enemy = enemy.clone();
        let mut log = Vec::new();
        let mut rounds = 0u32;

        while !player.is_fainted() && !enemy.is_fainted() {
            rounds += 1;
            let first = first_actor(&player, &enemy, &mut rng_recorder);
            for side in [first, first.opponent()] {
                let (attacker, defender) = match side {
                    Side::Player => (&player, &mut enemy),
                    Side::Enemy => (&enemy, &mut player),
                };
                let mv = self.select_move(attacker)?;
                let result = self.resolve(attacker, defender, mv, &mut rng_recorder);
                let target_hp = defender.take_damage(result.damage);
                debug!(
                    round = rounds,
                    attacker = %side,
                    move_name = %mv.name,
                    damage = result.damage,
                    critical = result.critical,
                    effectiveness = result.effectiveness,
                    target_hp,
                    "attack resolved"
                );
                log.push(BattleLogEntry {
                    attacker: side,
                    move_used: mv.clone(),
                    result,
                    target_hp,
                });
                if target_hp == 0 {
                    break;
                }
            }
        }

        let winner = if enemy.is_fainted() { Side::Player } else { Side::Enemy };
        info!(
            winner = %winner,
            rounds,
            player = %player.name(),
            enemy = %enemy.name(),
            player_hp = player.hp,
            enemy_hp = enemy.hp,
            "battle finished"
        );

        Ok(BattleOutcome {
            winner,
            log,
            player_remaining_hp: player.hp,
            enemy_remaining_hp: enemy.hp,
            rounds,
            rng: rng_log,
        })
    }
}

/// Higher effective speed acts first; an exact tie is a coin flip.
fn first_actor(player: &Combatant, enemy: &Combatant, rng: &mut dyn FnMut() -> f64) -> Side {
    let player_speed = scaled_stat(player.record.stats.speed, player.level);
    let enemy_speed = scaled_stat(enemy.record.stats.speed, enemy.level);
    if player_speed > enemy_speed {
        Side::Player
    } else if enemy_speed > player_speed {
        Side::Enemy
    } else if rng() < 0.5 {
        Side::Player
    } else {
        Side::Enemy
    }
}

pub fn run_battle(
    player: &Combatant,
    enemy: &Combatant,
    rng: &mut dyn FnMut() -> f64,
) -> Result<BattleOutcome> {
    BattleEngine::default().run_battle(player, enemy, rng)
}
