use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Random source threaded through every draw site of a run.
pub type RunRng = ChaCha8Rng;

/// Picks the run seed: the caller's when given, otherwise a fresh one from
/// the thread generator so the run still varies but can be replayed.
pub fn resolve_seed(requested: Option<u64>) -> u64 {
    requested.unwrap_or_else(|| rand::thread_rng().gen())
}

pub fn rng_from_seed(seed: u64) -> RunRng {
    ChaCha8Rng::seed_from_u64(seed)
}
