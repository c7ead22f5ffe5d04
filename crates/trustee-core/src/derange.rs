//! The derangement engine.
//!
//! Builds a permutation of the roster with no fixed points, so nobody draws
//! themself. Every random draw comes from the generator passed in by the
//! caller; with a seeded generator the result is reproducible for a given
//! build of `rand`.
//!
//! Two strategies are available:
//!
//! - [`Strategy::ShuffleRepair`] shuffles once, then repairs fixed points.
//!   Fixed points are paired off in random order and each pair is turned
//!   into a 2-cycle; a single leftover is swapped with a uniformly chosen
//!   other position. One round always succeeds. The output is close to
//!   uniform but slightly favours short cycles among the repaired entries.
//! - [`Strategy::Rejection`] reshuffles until no fixed point remains. This
//!   is exactly uniform over derangements and needs about `e` rounds on
//!   average.
//!
//! Both are capped at [`DerangeOptions::max_attempts`] rounds, after which
//! the rotation `i -> i + 1 (mod n)` is used unless the fallback is
//! disabled.

use std::fmt;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::assignment::Assignment;
use crate::error::{CoreError, CoreResult};
use crate::roster::Roster;

/// Default cap on shuffle rounds before falling back to rotation.
pub const MAX_ATTEMPTS: u32 = 64;

/// How a candidate permutation is produced in each round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Shuffle, then transpose fixed points away.
    #[default]
    ShuffleRepair,
    /// Shuffle and discard any result with a fixed point.
    Rejection,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShuffleRepair => write!(f, "shuffle-repair"),
            Self::Rejection => write!(f, "rejection"),
        }
    }
}

/// Tuning knobs for [`derange_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerangeOptions {
    /// Strategy used in each round.
    pub strategy: Strategy,
    /// Maximum number of rounds.
    pub max_attempts: u32,
    /// Use the rotation when every round fails.
    pub fallback: bool,
}

impl Default for DerangeOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            max_attempts: MAX_ATTEMPTS,
            fallback: true,
        }
    }
}

impl DerangeOptions {
    /// Set the strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the round cap.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Disable the rotation fallback.
    pub fn without_fallback(mut self) -> Self {
        self.fallback = false;
        self
    }
}

/// Generate an assignment with the default options.
pub fn derange<R: Rng + ?Sized>(roster: &Roster, rng: &mut R) -> CoreResult<Assignment> {
    derange_with(roster, rng, &DerangeOptions::default())
}

/// Generate an assignment with explicit options.
pub fn derange_with<R: Rng + ?Sized>(
    roster: &Roster,
    rng: &mut R,
    options: &DerangeOptions,
) -> CoreResult<Assignment> {
    let n = roster.len();
    if n < 2 {
        return Err(CoreError::TooFewParticipants { count: n });
    }

    for attempt in 1..=options.max_attempts {
        let perm = match options.strategy {
            Strategy::ShuffleRepair => shuffle_repair(n, rng),
            Strategy::Rejection => shuffled(n, rng),
        };
        if is_derangement(&perm) {
            debug!(
                participants = n,
                strategy = %options.strategy,
                attempt,
                "derangement found"
            );
            return Ok(Assignment::from_parts(roster.clone(), perm));
        }
    }

    if options.fallback {
        warn!(
            participants = n,
            attempts = options.max_attempts,
            "no derangement within the round cap, using rotation"
        );
        return Ok(Assignment::from_parts(roster.clone(), rotation(n)));
    }

    Err(CoreError::DerangementImpossible {
        attempts: options.max_attempts,
    })
}

/// Whether `perm` is a permutation of `0..perm.len()` with no fixed point.
pub fn is_derangement(perm: &[usize]) -> bool {
    let mut seen = vec![false; perm.len()];
    perm.iter()
        .enumerate()
        .all(|(i, &p)| p != i && p < perm.len() && !std::mem::replace(&mut seen[p], true))
}

/// Build the session generator: seeded when a seed is given, otherwise
/// from operating-system entropy.
pub fn session_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn shuffled<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(rng);
    perm
}

fn shuffle_repair<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut perm = shuffled(n, rng);
    let mut fixed: Vec<usize> = (0..n).filter(|&i| perm[i] == i).collect();
    fixed.shuffle(rng);

    let mut pairs = fixed.chunks_exact(2);
    for pair in pairs.by_ref() {
        perm.swap(pair[0], pair[1]);
    }

    // perm is injective, so the lone offender picks up a value other than
    // its own index and the partner receives the offender's index.
    if let [lone] = *pairs.remainder() {
        let mut other = rng.random_range(0..n - 1);
        if other >= lone {
            other += 1;
        }
        perm.swap(lone, other);
    }

    perm
}

fn rotation(n: usize) -> Vec<usize> {
    (0..n).map(|i| (i + 1) % n).collect()
}
