use arena_engine::progression::encounter::{enemy_level, pick_encounter, species_tier};
use arena_engine::progression::rewards::{
    auto_heal_fraction, calc_coins_for_victory, calc_experience_for_victory, calc_hp_bonus,
    calc_level_from_xp, is_boss_encounter, xp_into_level,
};
use arena_engine::progression::upgrades::{calc_upgrade_cost, UpgradeKind, UpgradeLevels};
use arena_engine::EngineError;

#[test]
fn level_from_xp_steps_every_hundred() {
    assert_eq!(calc_level_from_xp(0), 1);
    assert_eq!(calc_level_from_xp(99), 1);
    assert_eq!(calc_level_from_xp(100), 2);
    assert_eq!(calc_level_from_xp(250), 3);
    assert_eq!(xp_into_level(250), 50);
    assert_eq!(xp_into_level(0), 0);
}

#[test]
fn experience_grows_with_battle_count() {
    assert_eq!(calc_experience_for_victory(false, 0), 20);
    assert_eq!(calc_experience_for_victory(false, 10), 30);
    assert_eq!(calc_experience_for_victory(true, 9), 290);
    assert_eq!(calc_experience_for_victory(true, 0), 200);
}

#[test]
fn coins_stay_within_their_range() {
    let mut zero = || 0.0;
    let mut almost_one = || 0.999_999;
    let mut one = || 1.0;
    assert_eq!(calc_coins_for_victory(false, &mut zero), 10);
    assert_eq!(calc_coins_for_victory(false, &mut almost_one), 20);
    assert_eq!(calc_coins_for_victory(false, &mut one), 20);
    assert_eq!(calc_coins_for_victory(true, &mut zero), 100);
    assert_eq!(calc_coins_for_victory(true, &mut almost_one), 200);

    let mut rng = arena_engine::seeded_source(11);
    for _ in 0..500 {
        let regular = calc_coins_for_victory(false, &mut rng);
        assert!((10..=20).contains(&regular));
        let boss = calc_coins_for_victory(true, &mut rng);
        assert!((100..=200).contains(&boss));
    }
}

#[test]
fn every_tenth_victory_is_a_boss() {
    assert!(!is_boss_encounter(0));
    assert!(!is_boss_encounter(8));
    assert!(is_boss_encounter(9));
    assert!(!is_boss_encounter(10));
    assert!(is_boss_encounter(19));
}

#[test]
fn heal_and_hp_bonus_scale_linearly() {
    assert!((auto_heal_fraction(0) - 0.3).abs() < 1e-9);
    assert!((auto_heal_fraction(2) - 0.5).abs() < 1e-9);
    assert_eq!(calc_hp_bonus(1), 20);
    assert_eq!(calc_hp_bonus(5), 40);
}

#[test]
fn upgrade_costs_match_base_prices() {
    let cost = |kind, level| calc_upgrade_cost(kind, level).expect("cost in range");
    assert_eq!(cost(UpgradeKind::Hp, 0), 50);
    assert_eq!(cost(UpgradeKind::MoveTier, 0), 100);
    assert_eq!(cost(UpgradeKind::TeamSlot, 0), 200);
    assert_eq!(cost(UpgradeKind::TeamSlot, 1), 250);
    assert_eq!(cost(UpgradeKind::AutoHeal, 1), 180);
    assert_eq!(cost(UpgradeKind::CoinGain, 0), 75);
}

#[test]
fn upgrade_costs_strictly_increase_until_they_overflow() {
    for kind in UpgradeKind::ALL {
        let mut previous = calc_upgrade_cost(kind, 0).expect("base cost");
        let mut level = 1;
        while let Ok(cost) = calc_upgrade_cost(kind, level) {
            assert!(cost > previous, "{} did not increase at level {}", kind, level);
            previous = cost;
            level += 1;
        }
        assert!(level > 100, "{} overflowed early at level {}", kind, level);
        // Once out of range, every later level stays out of range.
        for later in level..level + 10 {
            assert!(matches!(
                calc_upgrade_cost(kind, later),
                Err(EngineError::UpgradeCostOverflow { .. })
            ));
        }
    }
}

#[test]
fn huge_upgrade_levels_are_rejected() {
    for level in [1_000, i32::MAX as u32, i32::MAX as u32 + 1, u32::MAX] {
        let err = calc_upgrade_cost(UpgradeKind::Hp, level).expect_err("out of range");
        assert!(matches!(
            err,
            EngineError::UpgradeCostOverflow { kind: UpgradeKind::Hp, level: l } if l == level
        ));
    }
}

#[test]
fn upgrade_kinds_parse_their_own_names() {
    for kind in UpgradeKind::ALL {
        assert_eq!(UpgradeKind::parse(kind.as_str()), Some(kind));
    }
    assert_eq!(UpgradeKind::parse("speed"), None);

    let levels = UpgradeLevels::new();
    assert_eq!(levels.get(UpgradeKind::AutoHeal), 0);
    assert_eq!(levels.next_cost(UpgradeKind::AutoHeal).expect("cost"), 150);
    assert_eq!(levels.iter().count(), UpgradeKind::ALL.len());
    assert_eq!(serde_json::to_string(&levels).expect("serialise"), "{}");
}

#[test]
fn species_tier_follows_player_level() {
    assert_eq!(species_tier(1), 0);
    assert_eq!(species_tier(5), 0);
    assert_eq!(species_tier(6), 1);
    assert_eq!(species_tier(10), 1);
    assert_eq!(species_tier(11), 2);
    assert_eq!(species_tier(99), 2);
}

#[test]
fn encounter_ids_stay_inside_the_tier() {
    let mut low = || 0.0;
    let mut high = || 0.999_999;

    assert_eq!(pick_encounter(1, 0, &mut low).species_id, 1);
    assert_eq!(pick_encounter(1, 0, &mut high).species_id, 50);
    assert_eq!(pick_encounter(7, 0, &mut low).species_id, 51);
    assert_eq!(pick_encounter(7, 0, &mut high).species_id, 100);
    assert_eq!(pick_encounter(20, 0, &mut low).species_id, 101);
    assert_eq!(pick_encounter(20, 0, &mut high).species_id, 150);

    let mut rng = arena_engine::seeded_source(5);
    for player_level in 1..30 {
        let encounter = pick_encounter(player_level, 3, &mut rng);
        let tier = species_tier(player_level);
        assert!((tier * 50 + 1..=tier * 50 + 50).contains(&encounter.species_id));
    }
}

#[test]
fn enemy_level_rises_with_victories() {
    assert_eq!(enemy_level(1, 0), 1);
    assert_eq!(enemy_level(1, 4), 1);
    assert_eq!(enemy_level(1, 5), 2);
    assert_eq!(enemy_level(3, 12), 5);

    let mut rng = || 0.5;
    let encounter = pick_encounter(2, 9, &mut rng);
    assert_eq!(encounter.level, 3);
    assert!(encounter.is_boss);
}
