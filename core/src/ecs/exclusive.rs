//! Singleton components stored outside any archetype, keyed by component id.

use std::any::Any;
use std::collections::HashMap;

use super::component::Component;

/// Lazily-constructed singleton storage. Each component id holds at most
/// one instance, created on first access and destroyed with the registry.
#[derive(Default)]
pub struct ExclusiveComponents {
    values: HashMap<usize, Box<dyn Any + Send + Sync>>,
}

impl ExclusiveComponents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a shared reference to the singleton for `T`, constructing
    /// it with `init` on first access.
    pub fn get_or_init<T, F>(&mut self, component_id: usize, init: F) -> &T
    where
        T: Component,
        F: FnOnce() -> T,
    {
        self.values
            .entry(component_id)
            .or_insert_with(|| Box::new(init()))
            .downcast_ref::<T>()
            .expect("exclusive component id reused for a different type")
    }

    /// Mutable counterpart to [`Self::get_or_init`].
    pub fn get_or_init_mut<T, F>(&mut self, component_id: usize, init: F) -> &mut T
    where
        T: Component,
        F: FnOnce() -> T,
    {
        self.values
            .entry(component_id)
            .or_insert_with(|| Box::new(init()))
            .downcast_mut::<T>()
            .expect("exclusive component id reused for a different type")
    }
}
