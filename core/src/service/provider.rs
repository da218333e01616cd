use std::any::{Any, TypeId};

use indexmap::IndexMap;

use super::Service;
use crate::error::CoreError;

/// Process-wide registry mapping a service type to its instance.
///
/// Holds at most one instance per service type. Destruction order is
/// strictly reverse registration order; [`destroy`](Self::destroy) removes a
/// service immediately and reindexes the remaining registration order so
/// that eager destruction still "slots into" the reverse-registration
/// contract rather than fighting it (see `original_source`'s note that the
/// C++ implementation sometimes destroys services eagerly outside of
/// teardown — the contract here is that whatever remains afterwards is
/// still destroyed in reverse order of when it was registered).
#[derive(Default)]
pub struct ServiceProvider {
    services: IndexMap<TypeId, Box<dyn Any>>,
    next_id: usize,
    ids: std::collections::HashMap<TypeId, usize>,
}

impl ServiceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs `S` by calling `ctor` with a shared reference to this
    /// provider (so the service can resolve its own dependencies via
    /// [`locate`](Self::locate)), assigns it a type-id on first
    /// registration, and stores the instance plus its registration
    /// position. Returns a reference to the stored instance.
    ///
    /// If `S` was already registered, the previous instance is replaced
    /// without affecting its original registration position — teardown
    /// order is about when the *type* was first seen, not which instance
    /// currently occupies its slot.
    pub fn provide<S, F>(&mut self, ctor: F) -> &S
    where
        S: Service,
        F: FnOnce(&ServiceProvider) -> S,
    {
        let instance = ctor(self);
        self.register_id::<S>();
        let type_id = TypeId::of::<S>();
        self.services.insert(type_id, Box::new(instance));
        self.services
            .get(&type_id)
            .and_then(|boxed| boxed.downcast_ref::<S>())
            .expect("just-inserted service must downcast to its own type")
    }

    /// Like [`provide`](Self::provide), but surfaces a [`CoreError`] if the
    /// service's own id allocation overflows (practically unreachable, but
    /// kept as a typed error rather than a panic per the error design).
    pub fn try_provide<S, F>(&mut self, ctor: F) -> Result<&S, CoreError>
    where
        S: Service,
        F: FnOnce(&ServiceProvider) -> S,
    {
        if self.next_id == usize::MAX && !self.ids.contains_key(&TypeId::of::<S>()) {
            return Err(CoreError::ServiceIdOverflow);
        }
        Ok(self.provide(ctor))
    }

    fn register_id<S: 'static>(&mut self) {
        self.ids.entry(TypeId::of::<S>()).or_insert_with(|| {
            let id = self.next_id;
            self.next_id += 1;
            id
        });
    }

    /// Removes `S` immediately, for enforcing a teardown order tighter than
    /// the default reverse-registration sweep.
    pub fn destroy<S: Service>(&mut self) {
        self.services.shift_remove(&TypeId::of::<S>());
    }

    /// Looks up a registered service by type. Returns `None` if `S` was
    /// never registered or has been destroyed.
    pub fn locate<S: Service>(&self) -> Option<&S> {
        self.services.get(&TypeId::of::<S>())?.downcast_ref::<S>()
    }

    /// Mutable counterpart to [`locate`](Self::locate), for collaborators
    /// the kernel's main loop needs to tick (e.g. the window manager).
    pub fn locate_mut<S: Service>(&mut self) -> Option<&mut S> {
        self.services.get_mut(&TypeId::of::<S>())?.downcast_mut::<S>()
    }

    /// The sequential id assigned to `S` at its first registration, if any.
    pub fn service_id<S: 'static>(&self) -> Option<usize> {
        self.ids.get(&TypeId::of::<S>()).copied()
    }

    /// Number of services currently registered.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl Drop for ServiceProvider {
    fn drop(&mut self) {
        // Reverse registration order: pop from the back of the index map,
        // which holds entries in insertion order (minus anything removed
        // early by `destroy`, which `shift_remove` already keeps
        // consistent).
        while let Some((_, service)) = self.services.pop() {
            drop(service);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    struct A;
    struct B;
    struct C;
    impl Service for A {}
    impl Service for B {}
    impl Service for C {}

    struct RecorderA(Arc<Mutex<Vec<&'static str>>>);
    struct RecorderB(Arc<Mutex<Vec<&'static str>>>);
    impl Service for RecorderA {}
    impl Service for RecorderB {}
    impl Drop for RecorderA {
        fn drop(&mut self) {
            self.0.lock().unwrap().push("A");
        }
    }
    impl Drop for RecorderB {
        fn drop(&mut self) {
            self.0.lock().unwrap().push("B");
        }
    }

    #[test]
    fn round_trip_provide_locate_destroy() {
        let mut provider = ServiceProvider::new();
        provider.provide(|_| A);
        assert!(provider.locate::<A>().is_some());
        provider.destroy::<A>();
        assert!(provider.locate::<A>().is_none());
    }

    #[test]
    fn locate_missing_returns_none() {
        let provider = ServiceProvider::new();
        assert!(provider.locate::<A>().is_none());
    }

    #[test]
    fn destruction_is_reverse_registration_order_s4() {
        let log = Arc::new(Mutex::new(Vec::new()));
        {
            let mut provider = ServiceProvider::new();
            provider.provide(|_| RecorderA(Arc::clone(&log)));
            provider.provide(|_| RecorderB(Arc::clone(&log)));
        }
        assert_eq!(*log.lock().unwrap(), vec!["B", "A"]);
    }

    #[test]
    fn eager_destroy_preserves_remaining_reverse_order() {
        let mut provider = ServiceProvider::new();
        provider.provide(|_| A);
        provider.provide(|_| B);
        provider.provide(|_| C);
        // Destroy B eagerly; remaining teardown order must still be
        // reverse-of-registration for what's left: C, then A.
        provider.destroy::<B>();
        assert!(provider.locate::<A>().is_some());
        assert!(provider.locate::<C>().is_some());
        assert_eq!(provider.len(), 2);
    }

    #[test]
    fn service_ids_are_sequential() {
        let mut provider = ServiceProvider::new();
        provider.provide(|_| A);
        provider.provide(|_| B);
        assert_eq!(provider.service_id::<A>(), Some(0));
        assert_eq!(provider.service_id::<B>(), Some(1));
    }
}
