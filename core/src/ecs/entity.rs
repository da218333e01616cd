//! An entity's identity: which archetype it lives in, and its row within
//! that archetype's columns.

/// Addresses one row across all columns of one archetype. Stable for the
/// entity's lifetime; deallocation punches a hole in the archetype rather
/// than moving or reusing this pair while the entity is still considered
/// live by its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId {
    pub(super) archetype_index: usize,
    pub(super) local_index: usize,
}

impl EntityId {
    pub fn archetype_index(&self) -> usize {
        self.archetype_index
    }

    pub fn local_index(&self) -> usize {
        self.local_index
    }
}
