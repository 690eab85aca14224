use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpgradeKind {
    Hp,
    Attack,
    Defense,
    MoveTier,
    TeamSlot,
    AutoHeal,
    XpGain,
    CoinGain,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 8] = [
        UpgradeKind::Hp,
        UpgradeKind::Attack,
        UpgradeKind::Defense,
        UpgradeKind::MoveTier,
        UpgradeKind::TeamSlot,
        UpgradeKind::AutoHeal,
        UpgradeKind::XpGain,
        UpgradeKind::CoinGain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeKind::Hp => "hp",
            UpgradeKind::Attack => "attack",
            UpgradeKind::Defense => "defense",
            UpgradeKind::MoveTier => "move-tier",
            UpgradeKind::TeamSlot => "team-slot",
            UpgradeKind::AutoHeal => "auto-heal",
            UpgradeKind::XpGain => "xp-gain",
            UpgradeKind::CoinGain => "coin-gain",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_str() == s.trim())
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            UpgradeKind::Hp => "HP Boost",
            UpgradeKind::Attack => "Attack Boost",
            UpgradeKind::Defense => "Defense Boost",
            UpgradeKind::MoveTier => "Move Tier",
            UpgradeKind::TeamSlot => "Team Slot",
            UpgradeKind::AutoHeal => "Auto-Heal",
            UpgradeKind::XpGain => "XP Gain",
            UpgradeKind::CoinGain => "Coin Gain",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            UpgradeKind::Hp => "+10% max HP",
            UpgradeKind::Attack => "+10% attack",
            UpgradeKind::Defense => "+10% defense",
            UpgradeKind::MoveTier => "Unlock stronger moves",
            UpgradeKind::TeamSlot => "Increase team size",
            UpgradeKind::AutoHeal => "Heal more between battles",
            UpgradeKind::XpGain => "+10% XP gained",
            UpgradeKind::CoinGain => "+10% coins gained",
        }
    }

    pub fn base_cost(&self) -> f64 {
        match self {
            UpgradeKind::Hp | UpgradeKind::Attack | UpgradeKind::Defense => 50.0,
            UpgradeKind::MoveTier => 100.0,
            UpgradeKind::TeamSlot => 200.0,
            UpgradeKind::AutoHeal => 150.0,
            UpgradeKind::XpGain | UpgradeKind::CoinGain => 75.0,
        }
    }

    pub fn growth_rate(&self) -> f64 {
        match self {
            UpgradeKind::Hp | UpgradeKind::Attack | UpgradeKind::Defense => 1.15,
            UpgradeKind::TeamSlot => 1.25,
            UpgradeKind::MoveTier | UpgradeKind::AutoHeal | UpgradeKind::XpGain | UpgradeKind::CoinGain => 1.2,
        }
    }
}

impl fmt::Display for UpgradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cost of buying the next level when `level` levels are already owned.
/// Fails once the price no longer fits in a `u64`.
pub fn calc_upgrade_cost(kind: UpgradeKind, level: u32) -> Result<u64> {
    let overflow = || EngineError::UpgradeCostOverflow { kind, level };
    let exponent = i32::try_from(level).map_err(|_| overflow())?;
    let cost = (kind.base_cost() * kind.growth_rate().powi(exponent)).round();
    // `u64::MAX as f64` rounds up to 2^64, so the bound is exclusive.
    if !cost.is_finite() || cost >= u64::MAX as f64 {
        return Err(overflow());
    }
    Ok(cost as u64)
}

/// Owned upgrade levels; kinds never bought read as 0.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpgradeLevels {
    levels: BTreeMap<UpgradeKind, u32>,
}

impl UpgradeLevels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: UpgradeKind) -> u32 {
        self.levels.get(&kind).copied().unwrap_or(0)
    }

    pub fn next_cost(&self, kind: UpgradeKind) -> Result<u64> {
        calc_upgrade_cost(kind, self.get(kind))
    }

    pub(crate) fn increment(&mut self, kind: UpgradeKind) -> u32 {
        let level = self.levels.entry(kind).or_insert(0);
        *level += 1;
        *level
    }

    pub fn iter(&self) -> impl Iterator<Item = (UpgradeKind, u32)> + '_ {
        UpgradeKind::ALL.iter().map(move |k| (*k, self.get(*k)))
    }
}
