//! A typed cursor over one archetype's live indices, skipping deallocated
//! ranges.

use super::archetype::{Archetype, EmptyRange};
use super::component::Component;

/// Steps through `0..capacity_used`, skipping any index covered by an
/// empty range. Holds the archetype exclusively: `fetch`/`fetch_mut`
/// borrow sequentially rather than simultaneously, so a system reads an
/// input field, fully consumes the value, then writes an output field —
/// the usual safe-Rust way to avoid the double-borrow an archetype's
/// columns would otherwise require.
pub struct View<'a, const WORDS: usize> {
    archetype: &'a mut Archetype<WORDS>,
    current: Option<usize>,
    limit: usize,
}

impl<'a, const WORDS: usize> View<'a, WORDS> {
    pub(super) fn new(archetype: &'a mut Archetype<WORDS>) -> Self {
        let limit = archetype.capacity_used();
        Self { archetype, current: None, limit }
    }

    /// Advances to the next live index. Returns `false` once the live
    /// count is exhausted.
    pub fn find_next_entity(&mut self) -> bool {
        let mut next = match self.current {
            None => 0,
            Some(index) => index + 1,
        };

        loop {
            if next >= self.limit {
                self.current = None;
                return false;
            }
            match skip_target(self.archetype.empty_ranges(), next) {
                Some(skip_to) => next = skip_to,
                None => break,
            }
        }

        self.current = Some(next);
        true
    }

    /// The current local index, or `None` before the first
    /// `find_next_entity` call or after it returns `false`.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// # Panics
    /// If called before a successful `find_next_entity`, or if `T` was not
    /// registered at `component_id` in this archetype.
    pub fn fetch<T: Component>(&self, component_id: usize) -> &T {
        let index = self.current.expect("fetch called before find_next_entity advanced the view");
        // SAFETY: `index` is always a live index produced by
        // `find_next_entity`, which only yields indices outside every
        // empty range, i.e. indices that were allocated and written.
        unsafe { self.archetype.read::<T>(component_id, index) }
    }

    /// Mutable counterpart to [`Self::fetch`].
    pub fn fetch_mut<T: Component>(&mut self, component_id: usize) -> &mut T {
        let index = self.current.expect("fetch_mut called before find_next_entity advanced the view");
        // SAFETY: see `fetch`.
        unsafe { self.archetype.read_mut::<T>(component_id, index) }
    }
}

/// If `index` falls inside one of `ranges`, returns the index one past
/// that range's end (the next candidate); else `None`.
fn skip_target(ranges: &[EmptyRange], index: usize) -> Option<usize> {
    ranges
        .iter()
        .find(|range| index >= range.begin && index < range.end)
        .map(|range| range.end)
}
