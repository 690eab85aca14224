use crate::core::battle::BattleEngine;
use crate::core::state::{BattleOutcome, Combatant};
use crate::data::provider::CreatureProvider;
use crate::data::species::SpeciesDatabase;
use crate::progression::rewards::{calc_coins_for_victory, calc_experience_for_victory, calc_level_from_xp};
use crate::progression::upgrades::{calc_upgrade_cost, UpgradeKind};
use js_sys::Math;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

static SPECIES_DB: Lazy<SpeciesDatabase> =
    Lazy::new(|| SpeciesDatabase::load_default().unwrap_or_else(|_| SpeciesDatabase::new()));
static ENGINE: Lazy<BattleEngine> = Lazy::new(BattleEngine::default);

/// Combatant as seen by the front-end: the record is referenced by id and
/// rebuilt on the Rust side.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CombatantWire {
    species_id: u32,
    level: u32,
    hp: u32,
    max_hp: u32,
    moves: Vec<String>,
}

impl From<&Combatant> for CombatantWire {
    fn from(combatant: &Combatant) -> Self {
        Self {
            species_id: combatant.record.id,
            level: combatant.level,
            hp: combatant.hp,
            max_hp: combatant.max_hp,
            moves: combatant.moves.iter().map(|m| m.name.clone()).collect(),
        }
    }
}

impl TryFrom<CombatantWire> for Combatant {
    type Error = String;

    fn try_from(wire: CombatantWire) -> Result<Self, Self::Error> {
        let record = SPECIES_DB.fetch(wire.species_id).map_err(|e| e.to_string())?;
        let combatant = ENGINE
            .create_combatant(&record, wire.level)
            .map_err(|e| e.to_string())?;
        Ok(combatant.with_hp(wire.hp))
    }
}

fn js_err(message: impl ToString) -> JsValue {
    JsValue::from_str(&message.to_string())
}

fn js_rng() -> f64 {
    Math::random()
}

#[wasm_bindgen(js_name = createCombatant)]
pub fn create_combatant_wasm(species_id: u32, level: u32) -> Result<JsValue, JsValue> {
    let record = SPECIES_DB.fetch(species_id).map_err(js_err)?;
    let combatant = ENGINE.create_combatant(&record, level).map_err(js_err)?;
    serde_wasm_bindgen::to_value(&CombatantWire::from(&combatant)).map_err(js_err)
}

#[wasm_bindgen(js_name = simulateBattle)]
pub fn simulate_battle_wasm(player: JsValue, enemy: JsValue) -> Result<JsValue, JsValue> {
    let player: CombatantWire = serde_wasm_bindgen::from_value(player).map_err(js_err)?;
    let enemy: CombatantWire = serde_wasm_bindgen::from_value(enemy).map_err(js_err)?;
    let player = Combatant::try_from(player).map_err(js_err)?;
    let enemy = Combatant::try_from(enemy).map_err(js_err)?;
    let mut rng = js_rng;
    let outcome: BattleOutcome = ENGINE.run_battle(&player, &enemy, &mut rng).map_err(js_err)?;
    serde_wasm_bindgen::to_value(&outcome).map_err(js_err)
}

#[wasm_bindgen(js_name = calcUpgradeCost)]
pub fn calc_upgrade_cost_wasm(kind: String, level: u32) -> Result<f64, JsValue> {
    let kind = UpgradeKind::parse(&kind).ok_or_else(|| js_err(format!("unknown upgrade '{}'", kind)))?;
    calc_upgrade_cost(kind, level).map(|cost| cost as f64).map_err(js_err)
}

#[wasm_bindgen(js_name = calcLevelFromXp)]
pub fn calc_level_from_xp_wasm(xp: f64) -> u32 {
    calc_level_from_xp(xp.max(0.0) as u64)
}

#[wasm_bindgen(js_name = calcExperienceForVictory)]
pub fn calc_experience_for_victory_wasm(is_boss: bool, battle_count: u32) -> f64 {
    calc_experience_for_victory(is_boss, battle_count) as f64
}

#[wasm_bindgen(js_name = calcCoinsForVictory)]
pub fn calc_coins_for_victory_wasm(is_boss: bool) -> f64 {
    let mut rng = js_rng;
    calc_coins_for_victory(is_boss, &mut rng) as f64
}
