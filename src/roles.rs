//! Who plays first in a match.
//!
//! Before every match a coin decides whether the two players swap roles. The coin is a
//! [`RoleSource`]; the default one reads the operating system's cryptographically strong
//! generator.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::error::RandomSourceUnavailable;

/// A fair coin deciding whether the listed order of a match is swapped.
pub trait RoleSource {
    /// `Ok(true)` if the second listed player should move first.
    fn draw_swap(&mut self) -> Result<bool, RandomSourceUnavailable>;
}

/// Reads one byte from the operating system's strong random source per draw.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl RoleSource for OsRandom {
    fn draw_swap(&mut self) -> Result<bool, RandomSourceUnavailable> {
        let mut byte = [0u8; 1];
        getrandom::fill(&mut byte).map_err(|e| RandomSourceUnavailable(e.to_string()))?;
        Ok(byte[0] & 1 == 1)
    }
}

/// Deterministic coin, for reproducible tournaments.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RoleSource for SeededRandom {
    fn draw_swap(&mut self) -> Result<bool, RandomSourceUnavailable> {
        Ok(self.rng.random_bool(0.5))
    }
}

/// Always answers the same way.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedRoles {
    pub swap: bool,
}

impl FixedRoles {
    /// Keep the listed order in every match.
    pub fn listed_order() -> Self {
        Self { swap: false }
    }
}

impl RoleSource for FixedRoles {
    fn draw_swap(&mut self) -> Result<bool, RandomSourceUnavailable> {
        Ok(self.swap)
    }
}
