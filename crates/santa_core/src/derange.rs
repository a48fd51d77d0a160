//! Derangement generator.
//!
//! # Responsibility
//! - Pair every participant with a receiver other than themselves.
//!
//! # Invariants
//! - The caller's slice is never mutated; pairings hold clones.
//! - All randomness comes from the caller's RNG: a fixed seed and a fixed
//!   input order reproduce the same assignment.
//! - Work is bounded by `DerangeLimits`; the generator never loops forever.
//!
//! Receivers are drawn by a uniform Fisher-Yates shuffle followed by
//! adjacent-swap repair passes. The shuffle is uniform over all permutations
//! but the repair is not, so the result is a well mixed random derangement,
//! not a uniform draw over all derangements.

use crate::model::assignment::{Assignment, Pairing};
use crate::model::participant::Identity;
use log::{debug, error, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_MAX_REPAIR_PASSES: u32 = 4;
pub const DEFAULT_MAX_SHUFFLE_ROUNDS: u32 = 8;

pub type DerangeResult<T> = Result<T, DerangeError>;

/// Input for which no derangement can be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    TooFewParticipants {
        count: usize,
    },
    DuplicateIdentity {
        identity: String,
        first: usize,
        second: usize,
    },
}

impl Display for InvalidInput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewParticipants { count } => write!(
                f,
                "at least 2 participants are required for an exchange, got {count}"
            ),
            Self::DuplicateIdentity {
                identity,
                first,
                second,
            } => write!(
                f,
                "participant `{identity}` appears more than once (entries {first} and {second})"
            ),
        }
    }
}

impl Error for InvalidInput {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerangeError {
    InvalidInput(InvalidInput),
    /// Budgets exhausted with a fixed point left. Unreachable for distinct
    /// identities; reported instead of returning a wrong assignment.
    Convergence {
        repair_passes: u32,
        shuffle_rounds: u32,
    },
}

impl Display for DerangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "invalid input: {err}"),
            Self::Convergence {
                repair_passes,
                shuffle_rounds,
            } => write!(
                f,
                "no derangement found within {shuffle_rounds} shuffle rounds of {repair_passes} repair passes"
            ),
        }
    }
}

impl Error for DerangeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::Convergence { .. } => None,
        }
    }
}

impl From<InvalidInput> for DerangeError {
    fn from(value: InvalidInput) -> Self {
        Self::InvalidInput(value)
    }
}

/// Work budget for one `generate` call.
///
/// Each shuffle round runs up to `repair_passes` repairing scans plus one
/// confirming scan. Zero `shuffle_rounds` always fails with `Convergence`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerangeLimits {
    pub repair_passes: u32,
    pub shuffle_rounds: u32,
}

impl Default for DerangeLimits {
    fn default() -> Self {
        Self {
            repair_passes: DEFAULT_MAX_REPAIR_PASSES,
            shuffle_rounds: DEFAULT_MAX_SHUFFLE_ROUNDS,
        }
    }
}

/// Draws a random derangement of `participants` with default limits.
///
/// # Errors
/// - `InvalidInput` for fewer than 2 participants or a repeated identity.
/// - `Convergence` if the work budget runs out.
pub fn generate<T, R>(participants: &[T], rng: &mut R) -> DerangeResult<Assignment<T>>
where
    T: Identity + Clone,
    R: Rng + ?Sized,
{
    generate_with_limits(participants, rng, DerangeLimits::default())
}

/// Draws a random derangement of `participants` within `limits`.
pub fn generate_with_limits<T, R>(
    participants: &[T],
    rng: &mut R,
    limits: DerangeLimits,
) -> DerangeResult<Assignment<T>>
where
    T: Identity + Clone,
    R: Rng + ?Sized,
{
    let ids = collect_identities(participants)?;
    let count = ids.len();

    for round in 1..=limits.shuffle_rounds {
        let mut receivers: Vec<usize> = (0..count).collect();
        receivers.shuffle(rng);

        for pass in 0..=limits.repair_passes {
            if repair_pass(&ids, &mut receivers) == 0 {
                debug!(
                    "event=derange module=derange status=ok participants={} rounds={} repair_passes={}",
                    count, round, pass
                );
                return Ok(build_assignment(participants, &receivers));
            }
        }

        warn!(
            "event=derange module=derange status=reshuffle participants={} round={}",
            count, round
        );
    }

    error!(
        "event=derange module=derange status=error error_code=convergence participants={} shuffle_rounds={} repair_passes={}",
        count, limits.shuffle_rounds, limits.repair_passes
    );
    Err(DerangeError::Convergence {
        repair_passes: limits.repair_passes,
        shuffle_rounds: limits.shuffle_rounds,
    })
}

fn collect_identities<T: Identity>(participants: &[T]) -> Result<Vec<T::Id>, InvalidInput> {
    if participants.len() < 2 {
        return Err(InvalidInput::TooFewParticipants {
            count: participants.len(),
        });
    }

    let ids: Vec<T::Id> = participants.iter().map(Identity::identity).collect();
    let mut seen = HashMap::with_capacity(ids.len());
    for (index, id) in ids.iter().enumerate() {
        if let Some(first) = seen.insert(id, index) {
            return Err(InvalidInput::DuplicateIdentity {
                identity: id.to_string(),
                first,
                second: index,
            });
        }
    }
    Ok(ids)
}

/// Swaps every fixed point with its cyclic successor.
///
/// Returns the number of fixed points found. With distinct identities every
/// swap clears both slots it touches, so one pass leaves none.
fn repair_pass<I: Eq>(ids: &[I], receivers: &mut [usize]) -> usize {
    let count = receivers.len();
    let mut collisions = 0;
    for index in 0..count {
        if ids[receivers[index]] == ids[index] {
            receivers.swap(index, (index + 1) % count);
            collisions += 1;
        }
    }
    collisions
}

fn build_assignment<T: Clone>(participants: &[T], receivers: &[usize]) -> Assignment<T> {
    let pairings = participants
        .iter()
        .zip(receivers)
        .map(|(giver, &receiver)| Pairing {
            giver: giver.clone(),
            receiver: participants[receiver].clone(),
        })
        .collect();
    Assignment::from_pairings(pairings)
}
