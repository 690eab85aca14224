//! Battle CLI
//!
//! Runs a progression session in the terminal: pick a starter, fight a
//! series of auto-resolved battles, spend coins on upgrades between fights.
//!
//! Usage:
//!   cargo run --bin battle-cli -- --battles 5 --seed 42 --auto

use std::env;
use std::error::Error;
use std::path::PathBuf;

use arena_engine::core::state::{BattleOutcome, Side};
use arena_engine::core::utils::{seeded_source, thread_rng_source};
use arena_engine::data::moves::MoveCatalog;
use arena_engine::data::provider::CreatureProvider;
use arena_engine::data::species::{CreatureRecord, SpeciesDatabase, MAX_SPECIES_ID, MIN_SPECIES_ID};
use arena_engine::data::type_chart::TypeChart;
use arena_engine::progression::rewards::{xp_into_level, XP_PER_LEVEL};
use arena_engine::progression::{BattleReport, FileStore, GameSession, ProgressStore, UpgradeKind};
use arena_engine::BattleEngine;
use inquire::Select;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct Config {
    seed: Option<u64>,
    battles: u32,
    starter: Option<u32>,
    level: u32,
    auto: bool,
    species_path: Option<PathBuf>,
    moves_path: Option<PathBuf>,
    save_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            battles: 5,
            starter: None,
            level: 1,
            auto: false,
            species_path: None,
            moves_path: None,
            save_dir: PathBuf::from(".arena-save"),
        }
    }
}

fn parse_args() -> Config {
    let mut config = Config::default();

    if let Ok(seed) = env::var("ARENA_SEED") {
        config.seed = seed.parse().ok();
    }
    if let Ok(dir) = env::var("ARENA_SAVE_DIR") {
        config.save_dir = PathBuf::from(dir);
    }
    if let Ok(path) = env::var("ARENA_SPECIES_PATH") {
        config.species_path = Some(PathBuf::from(path));
    }

    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match (args[i].as_str(), value) {
            ("--seed", Some(v)) => {
                config.seed = v.parse().ok();
                i += 1;
            }
            ("--battles", Some(v)) => {
                config.battles = v.parse().unwrap_or(5);
                i += 1;
            }
            ("--starter", Some(v)) => {
                config.starter = v.parse().ok();
                i += 1;
            }
            ("--level", Some(v)) => {
                config.level = v.parse().unwrap_or(1).max(1);
                i += 1;
            }
            ("--species", Some(v)) => {
                config.species_path = Some(PathBuf::from(v));
                i += 1;
            }
            ("--moves", Some(v)) => {
                config.moves_path = Some(PathBuf::from(v));
                i += 1;
            }
            ("--save-dir", Some(v)) => {
                config.save_dir = PathBuf::from(v);
                i += 1;
            }
            ("--auto", _) => config.auto = true,
            ("--help", _) | ("-h", _) => {
                print_help();
                std::process::exit(0);
            }
            (other, _) => eprintln!("ignoring unknown argument '{}'", other),
        }
        i += 1;
    }
    config
}

fn print_help() {
    println!("battle-cli [options]");
    println!();
    println!("  --battles <n>      battles to fight this run (default 5)");
    println!("  --seed <u64>       deterministic random source (env ARENA_SEED)");
    println!("  --starter <id>     starter species id, skips the prompt");
    println!("  --level <n>        starter level (default 1)");
    println!("  --auto             no prompts; random starter, no shopping");
    println!("  --species <path>   species JSON (env ARENA_SPECIES_PATH)");
    println!("  --moves <path>     move catalog YAML");
    println!("  --save-dir <dir>   where progress is stored (env ARENA_SAVE_DIR)");
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = parse_args();
    info!(?config, "starting battle cli");

    let species_db = match &config.species_path {
        Some(path) => SpeciesDatabase::load_from_json_file(path)?,
        None => SpeciesDatabase::load_default()?,
    };
    if species_db.is_empty() {
        return Err("species database is empty".into());
    }
    let missing = (MIN_SPECIES_ID..=MAX_SPECIES_ID)
        .filter(|id| species_db.get(*id).is_none())
        .count();
    if missing > 0 {
        warn!(missing, "species data is incomplete; encounters with missing ids will fail");
    }
    let move_db = match &config.moves_path {
        Some(path) => MoveCatalog::load_from_yaml_file(path)?,
        None => MoveCatalog::default(),
    };
    let engine = BattleEngine::new(move_db, TypeChart::new());

    let mut rng: Box<dyn FnMut() -> f64> = match config.seed {
        Some(seed) => Box::new(seeded_source(seed)),
        None => Box::new(thread_rng_source()),
    };

    let mut store = FileStore::new(&config.save_dir)?;
    let mut session = GameSession::hydrate(&store, &species_db);

    if session.team.members.is_empty() {
        let starter = choose_starter(&config, &species_db, &mut *rng)?;
        session.set_starter(starter, config.level)?;
        session.persist(&mut store)?;
    }

    for battle in 1..=config.battles {
        print_header(&session);
        let encounter = session.next_encounter(&mut *rng);
        let enemy = species_db.fetch(encounter.species_id)?;
        println!(
            "⚔️  Battle {}: a wild {} (Lv.{}){} appears!",
            battle,
            enemy.name,
            encounter.level,
            if encounter.is_boss { " [BOSS]" } else { "" }
        );

        let (player, foe) = session.prepare_battle(&engine, &enemy, encounter.level)?;
        let outcome = engine.run_battle(&player, &foe, &mut *rng)?;
        print_log(&outcome, player.name(), foe.name());

        let report = session.apply_outcome(&outcome, &mut *rng)?;
        print_report(&report);
        session.persist(&mut store)?;

        if !config.auto {
            shop(&mut session, &mut store)?;
        }
    }

    print_header(&session);
    println!("Progress saved to {}", store.dir().display());
    Ok(())
}

fn choose_starter(
    config: &Config,
    species_db: &SpeciesDatabase,
    rng: &mut dyn FnMut() -> f64,
) -> Result<CreatureRecord, Box<dyn Error>> {
    if let Some(id) = config.starter {
        return Ok(species_db.fetch(id)?);
    }

    let ids = species_db.ids();
    let mut choices: Vec<u32> = Vec::new();
    while choices.len() < 3.min(ids.len()) {
        let idx = ((rng() * ids.len() as f64) as usize).min(ids.len() - 1);
        if !choices.contains(&ids[idx]) {
            choices.push(ids[idx]);
        }
    }

    if config.auto {
        return Ok(species_db.fetch(choices[0])?);
    }

    let options: Vec<String> = choices
        .iter()
        .filter_map(|id| species_db.get(*id))
        .map(|r| {
            let types: Vec<&str> = r.types.iter().map(|t| t.as_str()).collect();
            format!("#{:03} {} [{}]", r.id, r.name, types.join("/"))
        })
        .collect();
    let picked = Select::new("Choose your starter:", options.clone()).prompt()?;
    let idx = options.iter().position(|o| o == &picked).unwrap_or(0);
    Ok(species_db.fetch(choices[idx])?)
}

fn print_header(session: &GameSession) {
    let player = &session.player;
    println!("════════════════════════════════════════");
    println!(
        "Lv.{}  XP {}/{}  Coins {}  Victories {}",
        player.level(),
        xp_into_level(player.xp),
        XP_PER_LEVEL,
        player.coins,
        player.victories
    );
    for (i, member) in session.team.members.iter().enumerate() {
        let marker = if i == session.team.active_index { "▶" } else { " " };
        println!(
            "{} {} Lv.{} {}",
            marker,
            member.record.name,
            member.level,
            hp_bar_string(member.hp, member.max_hp())
        );
    }
    println!("════════════════════════════════════════");
}

fn hp_bar_string(hp: u32, max_hp: u32) -> String {
    let width = 20;
    let filled = if max_hp == 0 { 0 } else { (hp as usize * width) / max_hp as usize };
    format!("[{}{}] {}/{}", "█".repeat(filled), "░".repeat(width - filled), hp, max_hp)
}

fn print_log(outcome: &BattleOutcome, player_name: &str, enemy_name: &str) {
    for entry in &outcome.log {
        let (attacker, defender) = match entry.attacker {
            Side::Player => (player_name, enemy_name),
            Side::Enemy => (enemy_name, player_name),
        };
        let mut line = format!(
            "  {} used {} → {} damage ({} HP left)",
            attacker, entry.move_used.name, entry.result.damage, entry.target_hp
        );
        if entry.result.critical {
            line.push_str(" critical!");
        }
        if entry.result.effectiveness > 1.0 {
            line.push_str(" super effective!");
        } else if entry.result.effectiveness == 0.0 {
            line.push_str(&format!(" {} is immune…", defender));
        } else if entry.result.effectiveness < 1.0 {
            line.push_str(" not very effective.");
        }
        println!("{}", line);
    }
}

fn print_report(report: &BattleReport) {
    if report.won {
        println!(
            "🎉 Victory! +{} XP, +{} coins{}",
            report.xp_gained,
            report.coins_gained,
            if report.boss { " (boss bonus)" } else { "" }
        );
        if report.level_after > report.level_before {
            println!("⬆️  Level up! {} → {}", report.level_before, report.level_after);
        }
        println!("💚 Team healed by {:.0}%", report.heal_fraction * 100.0);
    } else {
        println!("💔 Defeat. Your team has been fully healed.");
    }
}

fn shop(session: &mut GameSession, store: &mut dyn ProgressStore) -> Result<(), Box<dyn Error>> {
    const DONE: &str = "Continue to next battle";
    loop {
        let mut options: Vec<String> = UpgradeKind::ALL
            .iter()
            .map(|kind| {
                let price = match session.upgrades.next_cost(*kind) {
                    Ok(cost) => format!("{} coins", cost),
                    Err(_) => "maxed".to_string(),
                };
                format!(
                    "{} (Lv.{}) - {} | {}",
                    kind.display_name(),
                    session.upgrades.get(*kind),
                    price,
                    kind.description()
                )
            })
            .collect();
        options.push(DONE.to_string());

        let prompt = format!("Upgrades ({} coins):", session.player.coins);
        let picked = Select::new(&prompt, options.clone()).prompt()?;
        let Some(idx) = options.iter().position(|o| o == &picked) else {
            return Ok(());
        };
        let Some(kind) = UpgradeKind::ALL.get(idx).copied() else {
            return Ok(());
        };
        match session.purchase(kind) {
            Ok(cost) => {
                println!("Bought {} for {} coins.", kind.display_name(), cost);
                session.persist(store)?;
            }
            Err(err) => println!("{}", err),
        }
    }
}
