pub mod pokeapi;

pub use pokeapi::{normalise, PokeApiClient};
