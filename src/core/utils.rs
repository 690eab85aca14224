use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Per-level stat growth: +2% of base per level above 1.
pub const LEVEL_GROWTH: f64 = 0.02;

pub fn level_multiplier(level: u32) -> f64 {
    1.0 + (level.saturating_sub(1)) as f64 * LEVEL_GROWTH
}

pub fn scaled_stat(base: u32, level: u32) -> f64 {
    base as f64 * level_multiplier(level)
}

/// Uniform [0,1) source backed by the thread-local generator.
pub fn thread_rng_source() -> impl FnMut() -> f64 {
    let mut rng = rand::thread_rng();
    move || rng.gen::<f64>()
}

/// Reproducible uniform [0,1) source.
pub fn seeded_source(seed: u64) -> impl FnMut() -> f64 {
    let mut rng = StdRng::seed_from_u64(seed);
    move || rng.gen::<f64>()
}

/// Uniform integer in `min..=max` from one draw. Guards against a source
/// that returns exactly 1.0.
pub fn roll_range(rng: &mut dyn FnMut() -> f64, min: u32, max: u32) -> u32 {
    let span = (max - min + 1) as f64;
    let value = min + (rng() * span).floor() as u32;
    value.min(max)
}
