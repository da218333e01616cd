//! The set of component types an entity carries, and the storage for every
//! entity with that exact set.

use std::collections::HashMap;

use super::chunk::{Column, ColumnStorage};
use super::component::Component;
use super::fingerprint::Fingerprint;
use super::view::View;

/// A deallocated, half-open range `[begin, end)` of local indices that a
/// view must skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct EmptyRange {
    pub begin: usize,
    pub end: usize,
}

/// Owns one component column per bit set in its fingerprint, the live-slot
/// count, and the empty-range list every view consults to skip deallocated
/// indices.
pub struct Archetype<const WORDS: usize> {
    fingerprint: Fingerprint<WORDS>,
    columns: HashMap<usize, Box<dyn ColumnStorage>>,
    next_append_index: usize,
    live_count: usize,
    empty_ranges: Vec<EmptyRange>,
}

impl<const WORDS: usize> Archetype<WORDS> {
    pub(super) fn new(fingerprint: Fingerprint<WORDS>) -> Self {
        Self {
            fingerprint,
            columns: HashMap::new(),
            next_append_index: 0,
            live_count: 0,
            empty_ranges: Vec::new(),
        }
    }

    pub fn fingerprint(&self) -> &Fingerprint<WORDS> {
        &self.fingerprint
    }

    pub fn live_count(&self) -> usize {
        self.live_count
    }

    pub(super) fn empty_ranges(&self) -> &[EmptyRange] {
        &self.empty_ranges
    }

    /// Registers the column for `T` at `component_id`, if this archetype
    /// doesn't already have one. Idempotent.
    pub(super) fn register_column<T: Component>(&mut self, component_id: usize) {
        self.columns.entry(component_id).or_insert_with(|| Box::new(Column::<T>::new()));
    }

    fn column<T: Component>(&self, component_id: usize) -> &Column<T> {
        self.columns
            .get(&component_id)
            .and_then(|storage| storage.as_any().downcast_ref::<Column<T>>())
            .expect("component column missing for a bit set in this archetype's fingerprint")
    }

    fn column_mut<T: Component>(&mut self, component_id: usize) -> &mut Column<T> {
        self.columns
            .get_mut(&component_id)
            .and_then(|storage| storage.as_any_mut().downcast_mut::<Column<T>>())
            .expect("component column missing for a bit set in this archetype's fingerprint")
    }

    /// Writes a freshly-allocated entity's value for `T`.
    pub(super) fn write<T: Component>(&mut self, component_id: usize, index: usize, value: T) {
        self.column_mut::<T>(component_id).write(index, value);
    }

    /// # Safety
    /// `index` must be a live index that has been written for `T`.
    pub(super) unsafe fn read<T: Component>(&self, component_id: usize, index: usize) -> &T {
        self.column::<T>(component_id).read(index)
    }

    /// # Safety
    /// Same contract as [`Self::read`].
    pub(super) unsafe fn read_mut<T: Component>(
        &mut self,
        component_id: usize,
        index: usize,
    ) -> &mut T {
        self.column_mut::<T>(component_id).read_mut(index)
    }

    /// Allocates the next local index: reuse the first empty range if one
    /// exists, otherwise grow every column and append.
    pub(super) fn allocate(&mut self) -> usize {
        if !self.empty_ranges.is_empty() {
            let range = &mut self.empty_ranges[0];
            let index = range.begin;
            range.begin += 1;
            if range.begin == range.end {
                self.empty_ranges.remove(0);
            }
            self.live_count += 1;
            return index;
        }

        let index = self.next_append_index;
        let required = index + 1;
        let mut new_capacity = usize::MAX;
        for storage in self.columns.values_mut() {
            new_capacity = new_capacity.min(storage.ensure_storage_space(required));
        }
        debug_assert!(new_capacity >= required || self.columns.is_empty());
        self.next_append_index += 1;
        self.live_count += 1;
        index
    }

    /// Marks `index` deallocated, merging it into the ordered empty-range
    /// list (coalescing with an adjacent range on either side, or both).
    pub(super) fn deallocate(&mut self, index: usize) {
        let position = self.empty_ranges.partition_point(|range| range.begin < index);

        let touches_prev = position > 0 && self.empty_ranges[position - 1].end == index;
        let touches_next =
            position < self.empty_ranges.len() && self.empty_ranges[position].begin == index + 1;

        match (touches_prev, touches_next) {
            (true, true) => {
                let next_end = self.empty_ranges[position].end;
                self.empty_ranges[position - 1].end = next_end;
                self.empty_ranges.remove(position);
            }
            (true, false) => {
                self.empty_ranges[position - 1].end = index + 1;
            }
            (false, true) => {
                self.empty_ranges[position].begin = index;
            }
            (false, false) => {
                self.empty_ranges.insert(position, EmptyRange { begin: index, end: index + 1 });
            }
        }

        self.live_count -= 1;
    }

    /// Total number of slots ever appended (live + deallocated), i.e. the
    /// current append frontier.
    pub(super) fn capacity_used(&self) -> usize {
        self.next_append_index
    }

    /// A fresh cursor over this archetype's live indices.
    pub fn view(&mut self) -> View<'_, WORDS> {
        View::new(self)
    }
}
