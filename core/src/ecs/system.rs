//! A structural subscription over archetypes, plus three lifecycle hooks.

use super::archetype::Archetype;
use super::query::ComponentQuery;

/// Declares a structural interest via [`ComponentQuery`] and three
/// lifecycle hooks. The [`super::EntityAdmin`] offers every archetype to
/// each registered system at creation time; a system that accepts records
/// the archetype's index in its own reference group (via [`Self::accept`])
/// for iteration inside the hooks.
pub trait System<const WORDS: usize>: Send + Sync + 'static {
    fn query(&self) -> ComponentQuery<WORDS>;

    /// Archetype indices this system currently iterates.
    fn reference_group(&self) -> &[usize];

    /// Called once per archetype, at creation time, if [`Self::query`]
    /// matched it.
    fn accept(&mut self, archetype_index: usize);

    fn on_start(&mut self, archetypes: &mut [Archetype<WORDS>]) {
        let _ = archetypes;
    }

    fn on_update(&mut self, archetypes: &mut [Archetype<WORDS>]) {
        let _ = archetypes;
    }

    fn on_end(&mut self, archetypes: &mut [Archetype<WORDS>]) {
        let _ = archetypes;
    }
}

/// Runs `body` once per archetype in `group`, each call borrowing exactly
/// one archetype mutably. Sequential by construction, so it never needs to
/// prove disjointness of the indices to the borrow checker.
pub fn for_each_in_group<const WORDS: usize>(
    archetypes: &mut [Archetype<WORDS>],
    group: &[usize],
    mut body: impl FnMut(&mut Archetype<WORDS>),
) {
    for &index in group {
        body(&mut archetypes[index]);
    }
}
