//! Aggregates systems, archetypes and exclusive components behind one
//! update cycle.

use std::collections::HashMap;
use std::sync::Arc;

use super::archetype::Archetype;
use super::component::{Component, ComponentRegistry};
use super::entity::EntityId;
use super::exclusive::ExclusiveComponents;
use super::fingerprint::Fingerprint;
use super::system::System;
use crate::config::Config;
use crate::error::CoreError;
use crate::plan::ExecutionPlan;
use crate::scheduler::Scheduler;
use crate::sync::Synchronized;

/// A statically-known set of component values that can be written into a
/// freshly allocated archetype row in one shot.
///
/// Grounded on spec §9's strategy for template-metaprogrammed archetype
/// construction: "express selections as generic parameter packs". Rust has
/// no variadic generics, so this crate implements `Bundle` for the tuple
/// arities its own scenarios need (1 and 2); a third- or fourth-arity bundle
/// is a straightforward addition in the same shape.
pub trait Bundle<const WORDS: usize>: Sized {
    fn fingerprint(registry: &mut ComponentRegistry<WORDS>) -> Result<Fingerprint<WORDS>, CoreError>;

    fn register_columns(registry: &mut ComponentRegistry<WORDS>, archetype: &mut Archetype<WORDS>);

    fn write(self, registry: &mut ComponentRegistry<WORDS>, archetype: &mut Archetype<WORDS>, local_index: usize);
}

impl<const WORDS: usize, A: Component> Bundle<WORDS> for (A,) {
    fn fingerprint(registry: &mut ComponentRegistry<WORDS>) -> Result<Fingerprint<WORDS>, CoreError> {
        let mut fingerprint = Fingerprint::empty();
        fingerprint.set_bit(registry.id_of::<A>()?);
        Ok(fingerprint)
    }

    fn register_columns(registry: &mut ComponentRegistry<WORDS>, archetype: &mut Archetype<WORDS>) {
        let id = registry.id_of::<A>().expect("id already reserved by fingerprint()");
        archetype.register_column::<A>(id);
    }

    fn write(self, registry: &mut ComponentRegistry<WORDS>, archetype: &mut Archetype<WORDS>, local_index: usize) {
        let id = registry.id_of::<A>().expect("id already reserved by fingerprint()");
        archetype.write(id, local_index, self.0);
    }
}

impl<const WORDS: usize, A: Component, B: Component> Bundle<WORDS> for (A, B) {
    fn fingerprint(registry: &mut ComponentRegistry<WORDS>) -> Result<Fingerprint<WORDS>, CoreError> {
        let mut fingerprint = Fingerprint::empty();
        fingerprint.set_bit(registry.id_of::<A>()?);
        fingerprint.set_bit(registry.id_of::<B>()?);
        Ok(fingerprint)
    }

    fn register_columns(registry: &mut ComponentRegistry<WORDS>, archetype: &mut Archetype<WORDS>) {
        let a = registry.id_of::<A>().expect("id already reserved by fingerprint()");
        let b = registry.id_of::<B>().expect("id already reserved by fingerprint()");
        archetype.register_column::<A>(a);
        archetype.register_column::<B>(b);
    }

    fn write(self, registry: &mut ComponentRegistry<WORDS>, archetype: &mut Archetype<WORDS>, local_index: usize) {
        let a = registry.id_of::<A>().expect("id already reserved by fingerprint()");
        let b = registry.id_of::<B>().expect("id already reserved by fingerprint()");
        archetype.write(a, local_index, self.0);
        archetype.write(b, local_index, self.1);
    }
}

/// Owns every archetype, every registered system, the component id
/// registry, exclusive-component storage, and the [`ExecutionPlan`] that
/// runs systems' `on_update` hooks.
///
/// Archetypes and systems are each wrapped in their own [`Synchronized`]
/// behind an `Arc`, since `build_update_plan`'s instructions capture a
/// clone of both to run on a scheduler worker thread; the default one
/// pack-per-system plan never contends the locks in practice (packs run
/// strictly one after another), but the type still has to prove to the
/// compiler that the shared state outlives the scheduled job.
pub struct EntityAdmin<const WORDS: usize = 1> {
    archetypes: Arc<Synchronized<Vec<Archetype<WORDS>>>>,
    archetype_index_by_fingerprint: HashMap<Fingerprint<WORDS>, usize>,
    systems: Arc<Synchronized<Vec<Box<dyn System<WORDS>>>>>,
    component_registry: ComponentRegistry<WORDS>,
    exclusives: ExclusiveComponents,
    plan: ExecutionPlan,
}

impl<const WORDS: usize> EntityAdmin<WORDS> {
    pub fn new() -> Self {
        Self {
            archetypes: Arc::new(Synchronized::new(Vec::new())),
            archetype_index_by_fingerprint: HashMap::new(),
            systems: Arc::new(Synchronized::new(Vec::new())),
            component_registry: ComponentRegistry::new(),
            exclusives: ExclusiveComponents::new(),
            plan: ExecutionPlan::new(),
        }
    }

    /// Like [`Self::new`], but first checks that `config.max_ecs_components`
    /// matches this fingerprint width's compiled-in capacity, since `WORDS`
    /// is fixed at compile time and can't be derived from a runtime config
    /// value (see `SPEC_FULL.md` §4.6).
    pub fn with_config(config: &Config) -> Result<Self, CoreError> {
        let compiled = Fingerprint::<WORDS>::CAPACITY;
        if !config.has_valid_component_width() || config.max_ecs_components != compiled {
            return Err(CoreError::FingerprintWidthMismatch {
                configured: config.max_ecs_components,
                compiled,
            });
        }
        Ok(Self::new())
    }

    /// Registers `system`, offering it every archetype that already
    /// exists before adding it to the roster.
    pub fn register_system<S: System<WORDS>>(&mut self, mut system: S) {
        {
            let archetypes = self.archetypes.read();
            for (index, archetype) in archetypes.iter().enumerate() {
                if system.query().matches(archetype.fingerprint()) {
                    system.accept(index);
                }
            }
        }
        self.systems.write().push(Box::new(system));
    }

    fn ensure_archetype<B: Bundle<WORDS>>(&mut self, fingerprint: Fingerprint<WORDS>) -> usize {
        if let Some(&index) = self.archetype_index_by_fingerprint.get(&fingerprint) {
            return index;
        }

        let index = {
            let mut archetypes = self.archetypes.write();
            let index = archetypes.len();
            let mut archetype = Archetype::new(fingerprint);
            B::register_columns(&mut self.component_registry, &mut archetype);
            archetypes.push(archetype);
            index
        };
        self.archetype_index_by_fingerprint.insert(fingerprint, index);

        let mut systems = self.systems.write();
        for system in systems.iter_mut() {
            if system.query().matches(&fingerprint) {
                system.accept(index);
            }
        }

        index
    }

    /// Allocates a new entity carrying exactly `bundle`'s component set,
    /// creating the archetype (and offering it to every matching system)
    /// the first time that set is seen.
    pub fn create_entity<B: Bundle<WORDS>>(&mut self, bundle: B) -> Result<EntityId, CoreError> {
        let fingerprint = B::fingerprint(&mut self.component_registry)?;
        let archetype_index = self.ensure_archetype::<B>(fingerprint);

        let mut archetypes = self.archetypes.write();
        let archetype = &mut archetypes[archetype_index];
        let local_index = archetype.allocate();
        bundle.write(&mut self.component_registry, archetype, local_index);

        Ok(EntityId { archetype_index, local_index })
    }

    /// Punches a hole at `entity`'s row. The row itself is not cleared;
    /// only the archetype's empty-range list changes, per spec.
    pub fn delete_entity(&mut self, entity: EntityId) {
        self.archetypes.write()[entity.archetype_index].deallocate(entity.local_index);
    }

    /// Rebuilds the update execution plan: one instruction pack per
    /// system, in registration order, each running that system's
    /// `on_update` over its reference group.
    ///
    /// A pack boundary after every system trivially satisfies "if system
    /// *i* writes a field system *j* reads, *i* precedes *j*" for any *i*
    /// < *j*, since no two systems ever run concurrently under this
    /// default layout; a planner that instead groups read-compatible
    /// systems into shared packs is free to replace this method as long as
    /// it preserves that ordering rule.
    pub fn build_update_plan(&mut self) {
        self.plan.reset_plan();
        let system_count = self.systems.read().len();
        for index in 0..system_count {
            let archetypes = Arc::clone(&self.archetypes);
            let systems = Arc::clone(&self.systems);
            self.plan.add_instruction(move || {
                let mut archetypes = archetypes.write();
                let mut systems = systems.write();
                systems[index].on_update(&mut archetypes);
            });
            self.plan.end_instruction_pack();
        }
    }

    /// Calls every system's `on_start` synchronously, in registration
    /// order.
    pub fn start_simulation(&mut self) {
        let mut archetypes = self.archetypes.write();
        let mut systems = self.systems.write();
        for system in systems.iter_mut() {
            system.on_start(&mut archetypes);
        }
    }

    /// Runs the update plan built by [`Self::build_update_plan`] on
    /// `scheduler`, blocking until it completes.
    pub fn update_simulation(&mut self, scheduler: &Scheduler) {
        self.plan.execute_asynchronously(scheduler);
    }

    /// Calls every system's `on_end` synchronously, in registration order.
    pub fn end_simulation(&mut self) {
        let mut archetypes = self.archetypes.write();
        let mut systems = self.systems.write();
        for system in systems.iter_mut() {
            system.on_end(&mut archetypes);
        }
    }

    /// Returns the exclusive (singleton) component `T`, constructing it
    /// with `init` on first access.
    pub fn get_exclusive_component<T, F>(&mut self, component_id: usize, init: F) -> &T
    where
        T: Component,
        F: FnOnce() -> T,
    {
        self.exclusives.get_or_init(component_id, init)
    }

    /// Mutable counterpart to [`Self::get_exclusive_component`].
    pub fn get_exclusive_component_mut<T, F>(&mut self, component_id: usize, init: F) -> &mut T
    where
        T: Component,
        F: FnOnce() -> T,
    {
        self.exclusives.get_or_init_mut(component_id, init)
    }

    pub fn component_id<T: Component>(&mut self) -> Result<usize, CoreError> {
        self.component_registry.id_of::<T>()
    }

    pub fn archetype_count(&self) -> usize {
        self.archetypes.read().len()
    }
}

impl<const WORDS: usize> Default for EntityAdmin<WORDS> {
    fn default() -> Self {
        Self::new()
    }
}
