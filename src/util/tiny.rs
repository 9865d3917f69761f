use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoroshiro64StarStar;

/// A deterministic rng, for tests and reproducible matches.
pub fn consistent_rng() -> impl Rng {
    seeded_rng(0)
}

/// A deterministic rng stream per `seed`, used to give every game of a match its own independent randomness.
pub fn seeded_rng(seed: u64) -> Xoroshiro64StarStar {
    Xoroshiro64StarStar::seed_from_u64(seed)
}
