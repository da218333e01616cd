//! Component identity and the per-admin id registry.

use std::any::TypeId;
use std::collections::HashMap;

use super::fingerprint::Fingerprint;
use crate::error::CoreError;

/// Marker for a type storable in an archetype column or as an exclusive
/// component. Requires `Send + Sync` since systems may run on scheduler
/// worker threads.
pub trait Component: Send + Sync + 'static {}

/// Assigns each distinct `Component` type a small sequential id, the first
/// time it is seen, up to [`Fingerprint::CAPACITY`].
///
/// Grounded on spec §9's "the type-id counter may be a sequential integer
/// allocated at service registration" note, applied here to component
/// rather than service identity.
pub struct ComponentRegistry<const WORDS: usize> {
    ids: HashMap<TypeId, usize>,
    next_id: usize,
}

impl<const WORDS: usize> ComponentRegistry<WORDS> {
    pub fn new() -> Self {
        Self { ids: HashMap::new(), next_id: 0 }
    }

    /// Returns `T`'s id, assigning one if this is the first time `T` has
    /// been seen. Errors once ids would exceed the fingerprint's capacity.
    pub fn id_of<T: Component>(&mut self) -> Result<usize, CoreError> {
        if let Some(&id) = self.ids.get(&TypeId::of::<T>()) {
            return Ok(id);
        }
        if self.next_id >= Fingerprint::<WORDS>::CAPACITY {
            return Err(CoreError::component_overflow::<T>(Fingerprint::<WORDS>::CAPACITY));
        }
        let id = self.next_id;
        self.next_id += 1;
        self.ids.insert(TypeId::of::<T>(), id);
        Ok(id)
    }

    /// The id already assigned to `T`, if any, without assigning a new one.
    pub fn existing_id_of<T: Component>(&self) -> Option<usize> {
        self.ids.get(&TypeId::of::<T>()).copied()
    }
}

impl<const WORDS: usize> Default for ComponentRegistry<WORDS> {
    fn default() -> Self {
        Self::new()
    }
}
