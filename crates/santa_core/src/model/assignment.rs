//! Giver -> receiver assignment produced by the derangement generator.
//!
//! # Invariants
//! - One pairing per participant, in giver (input) order.
//! - Receivers are a permutation of givers.
//! - No pairing maps a participant to themselves.

use super::participant::Identity;
use std::slice::Iter;

/// One giver and the participant they buy for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing<T> {
    pub giver: T,
    pub receiver: T,
}

/// Complete assignment for one exchange run.
///
/// Only constructed by the generator, so the invariants above hold for every
/// value a caller can observe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment<T> {
    pairings: Vec<Pairing<T>>,
}

impl<T> Assignment<T> {
    pub(crate) fn from_pairings(pairings: Vec<Pairing<T>>) -> Self {
        Self { pairings }
    }

    pub fn len(&self) -> usize {
        self.pairings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairings.is_empty()
    }

    pub fn pairings(&self) -> &[Pairing<T>] {
        &self.pairings
    }

    pub fn iter(&self) -> Iter<'_, Pairing<T>> {
        self.pairings.iter()
    }

    pub fn into_pairings(self) -> Vec<Pairing<T>> {
        self.pairings
    }
}

impl<T: Identity> Assignment<T> {
    /// Returns the receiver drawn by the giver with `giver_id`.
    pub fn receiver_of(&self, giver_id: &T::Id) -> Option<&T> {
        self.pairings
            .iter()
            .find(|pairing| &pairing.giver.identity() == giver_id)
            .map(|pairing| &pairing.receiver)
    }

    /// Counts pairings where giver and receiver share an identity.
    pub fn fixed_points(&self) -> usize {
        self.pairings
            .iter()
            .filter(|pairing| pairing.giver.identity() == pairing.receiver.identity())
            .count()
    }
}

impl<T> IntoIterator for Assignment<T> {
    type Item = Pairing<T>;
    type IntoIter = std::vec::IntoIter<Pairing<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairings.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Assignment<T> {
    type Item = &'a Pairing<T>;
    type IntoIter = Iter<'a, Pairing<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairings.iter()
    }
}
