use arena_engine::core::state::{BattleOutcome, Side};
use arena_engine::data::provider::CreatureProvider;
use arena_engine::data::species::{BaseStats, CreatureRecord, SpeciesDatabase, Sprites};
use arena_engine::data::type_chart::Element;
use arena_engine::progression::session::{TeamMember, MAX_TEAM_SIZE};
use arena_engine::progression::storage::{PLAYER_KEY, SETTINGS_KEY, TEAM_KEY, UPGRADES_KEY};
use arena_engine::progression::{GameSession, Language, MemoryStore, ProgressStore, UpgradeKind};
use arena_engine::{BattleEngine, EngineError};

fn sturdy_record(id: u32) -> CreatureRecord {
    CreatureRecord {
        id,
        name: format!("sturdy-{}", id),
        types: vec![Element::Normal],
        stats: BaseStats {
            hp: 100,
            attack: 50,
            defense: 50,
            special_attack: 50,
            special_defense: 50,
            speed: 50,
        },
        sprites: Sprites::default(),
        moves: Vec::new(),
    }
}

fn outcome(winner: Side, player_hp: u32) -> BattleOutcome {
    BattleOutcome {
        winner,
        log: Vec::new(),
        player_remaining_hp: player_hp,
        enemy_remaining_hp: if winner == Side::Player { 0 } else { 10 },
        rounds: 3,
        rng: Vec::new(),
    }
}

fn session_with_starter() -> GameSession {
    let mut session = GameSession::new();
    session.set_starter(sturdy_record(133), 1).expect("starter");
    session
}

/// Hands out the same stats for every valid id.
struct Everywhere;

impl CreatureProvider for Everywhere {
    fn fetch(&self, id: u32) -> arena_engine::Result<CreatureRecord> {
        arena_engine::data::provider::check_id(id)?;
        Ok(sturdy_record(id))
    }
}

#[test]
fn heal_rounds_up_and_caps_at_max() {
    let mut member = TeamMember::new(sturdy_record(1), 1).expect("member");
    assert_eq!(member.max_hp(), 100);
    member.hp = 50;
    member.heal(0.3);
    assert_eq!(member.hp, 80);
    member.heal(0.3);
    assert_eq!(member.hp, 100);

    let mut odd = TeamMember::new(SpeciesDatabase::load_default().expect("species").fetch(1).expect("bulbasaur"), 1)
        .expect("member");
    odd.hp = 0;
    // 45 * 0.3 = 13.5
    odd.heal(0.3);
    assert_eq!(odd.hp, 14);
}

#[test]
fn purchase_requires_enough_coins() {
    let mut session = session_with_starter();
    let err = session.purchase(UpgradeKind::Hp).expect_err("no coins");
    assert!(matches!(
        err,
        EngineError::InsufficientCoins {
            needed: 50,
            available: 0
        }
    ));
    assert_eq!(session.upgrades.get(UpgradeKind::Hp), 0);

    session.add_coins(60);
    assert_eq!(session.purchase(UpgradeKind::Hp).expect("buy"), 50);
    assert_eq!(session.player.coins, 10);
    assert_eq!(session.upgrades.get(UpgradeKind::Hp), 1);
}

#[test]
fn team_slots_stop_at_six() {
    let mut session = session_with_starter();
    session.add_coins(1_000_000);
    for _ in 0..8 {
        session.purchase(UpgradeKind::TeamSlot).expect("buy slot");
    }
    assert_eq!(session.upgrades.get(UpgradeKind::TeamSlot), 8);
    assert_eq!(session.team.max_team_size, MAX_TEAM_SIZE);

    for id in 2..=6 {
        session.add_member(sturdy_record(id), 1).expect("room on the team");
    }
    let err = session.add_member(sturdy_record(7), 1).expect_err("team full");
    assert!(matches!(err, EngineError::TeamFull { max: 6 }));
}

#[test]
fn capture_needs_a_free_slot_and_costs_coins_and_xp() {
    let mut session = session_with_starter();
    session.add_coins(3);
    session.add_xp(40);

    let err = session.capture(sturdy_record(19), 2).expect_err("only one slot");
    assert!(matches!(err, EngineError::TeamFull { max: 1 }));
    assert_eq!(session.player.coins, 3);

    session.team.max_team_size = 2;
    session.capture(sturdy_record(19), 2).expect("capture");
    assert_eq!(session.team.members.len(), 2);
    assert_eq!(session.player.coins, 0);
    assert_eq!(session.player.xp, 30);
    assert_eq!(session.team.members[1].hp, session.team.members[1].max_hp());
}

#[test]
fn win_awards_rewards_and_auto_heals() {
    let mut session = session_with_starter();
    let mut rng = || 0.0;

    let report = session.apply_outcome(&outcome(Side::Player, 40), &mut rng).expect("apply");

    assert!(report.won);
    assert!(!report.boss);
    assert_eq!(report.xp_gained, 20);
    assert_eq!(report.coins_gained, 10);
    assert_eq!(session.player.xp, 20);
    assert_eq!(session.player.coins, 10);
    assert_eq!(session.player.victories, 1);
    // 40 + ceil(100 * 0.3)
    assert_eq!(session.team.members[0].hp, 70);
    assert!((report.heal_fraction - 0.3).abs() < 1e-9);
}

#[test]
fn tenth_win_is_a_boss_and_can_level_up() {
    let mut session = session_with_starter();
    session.player.victories = 9;
    session.player.xp = 90;
    let mut rng = || 0.5;

    let report = session.apply_outcome(&outcome(Side::Player, 100), &mut rng).expect("apply");

    assert!(report.boss);
    assert_eq!(report.xp_gained, 290);
    assert_eq!(report.coins_gained, 150);
    assert_eq!(report.level_before, 1);
    assert_eq!(report.level_after, 4);
    assert_eq!(session.player.victories, 10);
}

#[test]
fn auto_heal_upgrade_raises_heal_fraction() {
    let mut session = session_with_starter();
    session.add_coins(150);
    session.purchase(UpgradeKind::AutoHeal).expect("buy auto-heal");
    let mut rng = || 0.0;

    let report = session.apply_outcome(&outcome(Side::Player, 10), &mut rng).expect("apply");
    assert!((report.heal_fraction - 0.4).abs() < 1e-9);
    assert_eq!(session.team.members[0].hp, 50);
}

#[test]
fn loss_heals_fully_without_rewards() {
    let mut session = session_with_starter();
    session.player.victories = 4;
    let mut rng = || 0.0;

    let report = session.apply_outcome(&outcome(Side::Enemy, 0), &mut rng).expect("apply");

    assert!(!report.won);
    assert_eq!(report.xp_gained, 0);
    assert_eq!(session.player.xp, 0);
    assert_eq!(session.player.coins, 0);
    assert_eq!(session.player.victories, 4);
    assert_eq!(session.team.members[0].hp, 100);
}

#[test]
fn apply_outcome_needs_a_team() {
    let mut session = GameSession::new();
    let mut rng = || 0.0;
    let err = session.apply_outcome(&outcome(Side::Player, 5), &mut rng).expect_err("no team");
    assert!(matches!(err, EngineError::EmptyTeam));
}

#[test]
fn battle_starts_from_stored_hp() {
    let mut session = session_with_starter();
    session.team.members[0].hp = 12;
    let engine = BattleEngine::default();

    let (player, enemy) = session.prepare_battle(&engine, &sturdy_record(19), 3).expect("prepare");
    assert_eq!(player.hp, 12);
    assert_eq!(player.max_hp, 100);
    assert_eq!(enemy.hp, enemy.max_hp);
    assert_eq!(enemy.level, 3);

    session.team.members[0].hp = 0;
    let (player, enemy) = session.prepare_battle(&engine, &sturdy_record(19), 3).expect("prepare");
    let mut rng = || 0.5;
    assert!(matches!(
        engine.run_battle(&player, &enemy, &mut rng),
        Err(EngineError::DefeatedCombatant(Side::Player))
    ));
}

#[test]
fn play_encounter_runs_a_full_cycle() {
    let mut session = session_with_starter();
    let engine = BattleEngine::default();
    let mut rng = arena_engine::seeded_source(77);

    for _ in 0..5 {
        let (encounter, outcome, report) = session
            .play_encounter(&engine, &Everywhere, &mut rng)
            .expect("encounter");
        assert!((1..=50).contains(&encounter.species_id));
        assert_eq!(report.won, outcome.player_won());
        assert!(session.team.members[0].hp > 0);
    }
}

#[test]
fn persist_and_hydrate_round_trip() {
    let mut session = session_with_starter();
    session.add_coins(500);
    session.add_xp(130);
    session.player.victories = 3;
    session.purchase(UpgradeKind::TeamSlot).expect("slot");
    session.add_member(sturdy_record(25), 4).expect("member");
    session.team.members[1].hp = 7;
    session.team.set_active(1).expect("active");
    session.set_language(Language::En);
    session.toggle_mute();

    let mut store = MemoryStore::new();
    session.persist(&mut store).expect("persist");

    let team_json = store.load(TEAM_KEY).expect("load").expect("team slice");
    assert!(team_json.contains("\"maxTeamSize\":2"));
    assert!(team_json.contains("\"activeIndex\":1"));
    let upgrades_json = store.load(UPGRADES_KEY).expect("load").expect("upgrades slice");
    assert!(upgrades_json.contains("team-slot"));

    let restored = GameSession::hydrate(&store, &Everywhere);
    assert_eq!(restored, session);
}

#[test]
fn corrupt_slice_keeps_defaults_for_that_slice_only() {
    let mut session = session_with_starter();
    session.add_coins(80);
    session.toggle_mute();
    let mut store = MemoryStore::new();
    session.persist(&mut store).expect("persist");
    store.save(PLAYER_KEY, "{not json").expect("save");

    let restored = GameSession::hydrate(&store, &Everywhere);
    assert_eq!(restored.player.coins, 0);
    assert!(restored.settings.muted);
    assert_eq!(restored.team.members.len(), 1);
}

#[test]
fn hydrate_drops_unknown_members_and_clamps_hp() {
    let mut store = MemoryStore::new();
    store
        .save(
            TEAM_KEY,
            r#"{"team":[{"id":2,"level":1,"hp":10},{"id":4,"level":1,"hp":999}],"maxTeamSize":9,"activeIndex":1}"#,
        )
        .expect("save");

    let full = SpeciesDatabase::load_default().expect("species");
    let mut species = SpeciesDatabase::new();
    species.insert(full.get(4).cloned().expect("charmander"));
    let restored = GameSession::hydrate(&store, &species);

    assert_eq!(restored.team.members.len(), 1);
    let charmander = &restored.team.members[0];
    assert_eq!(charmander.record.name, "charmander");
    assert_eq!(charmander.hp, charmander.max_hp());
    assert_eq!(restored.team.max_team_size, MAX_TEAM_SIZE);
    assert_eq!(restored.team.active_index, 0);
}

#[test]
fn empty_store_hydrates_to_defaults() {
    let store = MemoryStore::new();
    let restored = GameSession::hydrate(&store, &Everywhere);
    assert_eq!(restored, GameSession::default());
    assert_eq!(restored.settings.language, Language::Es);
    assert_eq!(restored.team.max_team_size, 1);
}

#[test]
fn reset_clears_session_and_store() {
    let mut session = session_with_starter();
    session.add_coins(10);
    let mut store = MemoryStore::new();
    session.persist(&mut store).expect("persist");

    session.reset_persisted(&mut store).expect("reset");
    assert_eq!(session, GameSession::default());
    for key in [PLAYER_KEY, TEAM_KEY, UPGRADES_KEY, SETTINGS_KEY] {
        assert!(store.load(key).expect("load").is_none());
    }
}

#[test]
fn file_store_writes_one_file_per_slice() {
    let dir = std::env::temp_dir().join(format!("arena-store-test-{}", std::process::id()));
    let mut store = arena_engine::progression::FileStore::new(&dir).expect("store");
    let session = session_with_starter();
    session.persist(&mut store).expect("persist");

    assert!(dir.join(format!("{}.json", PLAYER_KEY)).exists());
    let restored = GameSession::hydrate(&store, &Everywhere);
    assert_eq!(restored, session);

    std::fs::remove_dir_all(&dir).expect("cleanup");
}

#[test]
fn purchase_past_the_cost_range_fails_without_charging() {
    let mut store = MemoryStore::new();
    store.save(UPGRADES_KEY, r#"{"hp":400}"#).expect("save");
    let mut session = GameSession::hydrate(&store, &Everywhere);
    session.set_starter(sturdy_record(133), 1).expect("starter");
    session.add_coins(u64::MAX);

    let err = session.purchase(UpgradeKind::Hp).expect_err("cost out of range");
    assert!(matches!(
        err,
        EngineError::UpgradeCostOverflow {
            kind: UpgradeKind::Hp,
            level: 400
        }
    ));
    assert_eq!(session.player.coins, u64::MAX);
    assert_eq!(session.upgrades.get(UpgradeKind::Hp), 400);
}

#[test]
fn bundled_species_cover_every_tier() {
    let species = SpeciesDatabase::load_default().expect("species");
    let engine = BattleEngine::default();
    let mut session = GameSession::new();
    session.set_starter(species.fetch(150).expect("mewtwo"), 30).expect("starter");
    // Level 11 and up draws from ids 101-150.
    session.add_xp(1_000);
    let mut rng = arena_engine::seeded_source(404);

    for _ in 0..10 {
        let (encounter, _, _) = session
            .play_encounter(&engine, &species, &mut rng)
            .expect("encounter");
        assert!((101..=150).contains(&encounter.species_id));
    }
}

#[test]
fn missing_species_reaches_the_caller() {
    let mut species = SpeciesDatabase::new();
    species.insert(sturdy_record(133));
    let engine = BattleEngine::default();
    let mut session = session_with_starter();
    // Tier 0 never draws id 133.
    let mut rng = || 0.5;

    let err = session
        .play_encounter(&engine, &species, &mut rng)
        .expect_err("species not available");
    assert!(matches!(err, EngineError::UnknownSpecies(26)));
    assert_eq!(session.player.victories, 0);
}
