//! Deterministic per-actor and world-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each scripted actor gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (slot * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive slot indices uniformly across the seed space.
//! This means:
//!
//! - Scripts never share RNG state, so one actor's timer rolls cannot shift
//!   a sibling's.
//! - The same global seed always reproduces the same encounter timeline,
//!   which is what makes the scenario tests in `enc-sim` assertable.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::ActorId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── EncounterRng ──────────────────────────────────────────────────────────────

/// Per-actor deterministic RNG.
///
/// Create one per scripted actor at spawn time; the scheduler borrows it when
/// sampling randomized delays.
pub struct EncounterRng(SmallRng);

impl EncounterRng {
    /// Seed deterministically from the run's global seed and an actor ID.
    ///
    /// Only the slot participates in mixing: a respawned actor reusing a slot
    /// replays the same timer rolls, which keeps reset-and-retry attempts
    /// identical under one seed.
    pub fn new(global_seed: u64, actor: ActorId) -> Self {
        let seed = global_seed ^ (actor.slot as u64).wrapping_mul(MIXING_CONSTANT);
        EncounterRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Choose a random element from a slice.  Returns `None` if empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}

// ── WorldRng ──────────────────────────────────────────────────────────────────

/// World-level RNG for host-side operations (random target selection,
/// kill-quip rolls, etc.).
///
/// The tick model is cooperative and single-threaded, so no synchronisation
/// is needed.
pub struct WorldRng(SmallRng);

impl WorldRng {
    pub fn new(seed: u64) -> Self {
        WorldRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `WorldRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> WorldRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        WorldRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Choose a random element from a slice.  Returns `None` if empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
