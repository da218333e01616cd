//! A fixed-width bitmask identifying an archetype by the union of its
//! component ids.
//!
//! Grounded on spec §4.6's archetype fingerprint and on the `bitvec`-backed
//! fixed bitsets `bevyengine-bevy`'s embedded `bevy_legion` archetype index
//! uses for the same "which components does this row have" question; here
//! the width is a compile-time const generic instead of a runtime `BitVec`
//! so fingerprints are `Copy` and hashable without an allocation.

use std::hash::{Hash, Hasher};

/// A `WORDS * 64`-bit mask over component ids. Default width is one word
/// (64 bits), matching spec's default `MAX_ECS_COMPONENTS`.
#[derive(Debug, Clone, Copy)]
pub struct Fingerprint<const WORDS: usize = 1> {
    words: [u64; WORDS],
}

static_assertions::const_assert_eq!(
    Fingerprint::<1>::CAPACITY,
    crate::config::DEFAULT_MAX_ECS_COMPONENTS
);

impl<const WORDS: usize> Fingerprint<WORDS> {
    /// Number of component ids this fingerprint can represent.
    pub const CAPACITY: usize = WORDS * 64;

    pub const fn empty() -> Self {
        Self { words: [0; WORDS] }
    }

    /// Sets the bit for `component_id`. Panics (debug only) if out of
    /// range — callers are expected to have validated ids against
    /// [`Self::CAPACITY`] at registration time.
    pub fn set_bit(&mut self, component_id: usize) {
        debug_assert!(component_id < Self::CAPACITY, "component id exceeds fingerprint width");
        self.words[component_id / 64] |= 1u64 << (component_id % 64);
    }

    pub fn test_bit(&self, component_id: usize) -> bool {
        (self.words[component_id / 64] >> (component_id % 64)) & 1 != 0
    }

    /// The bitwise union of `self` and `other`.
    pub fn union(&self, other: &Self) -> Self {
        let mut words = [0u64; WORDS];
        for i in 0..WORDS {
            words[i] = self.words[i] | other.words[i];
        }
        Self { words }
    }

    /// `true` iff every bit set in `other` is also set in `self` — `self`
    /// is a structural superset of `other`.
    pub fn has_all(&self, other: &Self) -> bool {
        (0..WORDS).all(|i| self.words[i] & other.words[i] == other.words[i])
    }

    /// `true` iff `self` and `other` share at least one set bit.
    pub fn has_one(&self, other: &Self) -> bool {
        (0..WORDS).any(|i| self.words[i] & other.words[i] != 0)
    }
}

impl<const WORDS: usize> Default for Fingerprint<WORDS> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<const WORDS: usize> PartialEq for Fingerprint<WORDS> {
    fn eq(&self, other: &Self) -> bool {
        self.words == other.words
    }
}

impl<const WORDS: usize> Eq for Fingerprint<WORDS> {}

impl<const WORDS: usize> Hash for Fingerprint<WORDS> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.words.hash(state);
    }
}
