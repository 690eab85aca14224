//! Species Import CLI
//!
//! Downloads creatures 1-150 from PokeAPI and writes them as the local
//! species file consumed by the engine.
//!
//! Usage:
//!   cargo run --bin species-import -- --output data/species.json --delay-ms 100

use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use arena_engine::data::species::{SpeciesDatabase, MAX_SPECIES_ID, MIN_SPECIES_ID};
use arena_engine::tools::PokeApiClient;
use tokio::time::sleep;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct Config {
    output_path: PathBuf,
    base_url: Option<String>,
    first: u32,
    last: u32,
    delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("data/species.json"),
            base_url: None,
            first: MIN_SPECIES_ID,
            last: MAX_SPECIES_ID,
            delay_ms: 100,
        }
    }
}

fn parse_args() -> Config {
    let mut config = Config::default();
    if let Ok(url) = env::var("POKEAPI_URL") {
        config.base_url = Some(url);
    }

    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match (args[i].as_str(), value) {
            ("--output", Some(v)) => {
                config.output_path = PathBuf::from(v);
                i += 1;
            }
            ("--base-url", Some(v)) => {
                config.base_url = Some(v.clone());
                i += 1;
            }
            ("--first", Some(v)) => {
                config.first = v.parse().unwrap_or(MIN_SPECIES_ID);
                i += 1;
            }
            ("--last", Some(v)) => {
                config.last = v.parse().unwrap_or(MAX_SPECIES_ID);
                i += 1;
            }
            ("--delay-ms", Some(v)) => {
                config.delay_ms = v.parse().unwrap_or(100);
                i += 1;
            }
            (other, _) => eprintln!("ignoring unknown argument '{}'", other),
        }
        i += 1;
    }
    config.first = config.first.clamp(MIN_SPECIES_ID, MAX_SPECIES_ID);
    config.last = config.last.clamp(config.first, MAX_SPECIES_ID);
    config
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = parse_args();
    info!(?config, "importing species");

    let client = match &config.base_url {
        Some(url) => PokeApiClient::with_base_url(url),
        None => PokeApiClient::new(),
    };

    let mut db = SpeciesDatabase::new();
    for id in config.first..=config.last {
        for record in client.preload(&[id]).await {
            info!(id = record.id, name = %record.name, "imported");
            db.insert(record);
        }
        sleep(Duration::from_millis(config.delay_ms)).await;
    }

    std::fs::write(&config.output_path, db.to_json_string()?)?;
    println!(
        "Wrote {} species to {}",
        db.len(),
        config.output_path.display()
    );
    Ok(())
}
