//! End-to-end scenarios from the spec's "Testable Properties" section,
//! driven entirely through the crate's public API rather than any
//! module-internal type.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use stratum_core::config::Config;
use stratum_core::ecs::{Archetype, Component, ComponentQuery, EntityAdmin, Fingerprint, System};
use stratum_core::plan::ExecutionPlan;
use stratum_core::service::{Service, ServiceProvider, Status};
use stratum_core::Scheduler;

/// S1: an empty plan executes trivially, synchronously and asynchronously,
/// and never touches the scheduler's queue.
#[test]
fn s1_empty_plan_executes_trivially() {
    let plan = ExecutionPlan::new();
    plan.execute_synchronously();

    let scheduler = Scheduler::new(2, &Config::default());
    plan.execute_asynchronously(&scheduler);
    assert!(scheduler.worker_count() > 0);
}

/// S2: three packs — "a", five "b"s, "c" — run with every pack-0
/// instruction happening-before pack 1 and every pack-1 instruction
/// happening-before pack 2.
#[test]
fn s2_ordering_across_packs() {
    let log = Arc::new(Mutex::new(String::new()));
    let mut plan = ExecutionPlan::new();

    {
        let log = Arc::clone(&log);
        plan.add_instruction(move || log.lock().unwrap().push('a'));
    }
    plan.end_instruction_pack();

    for _ in 0..5 {
        let log = Arc::clone(&log);
        plan.add_instruction(move || log.lock().unwrap().push('b'));
    }
    plan.end_instruction_pack();

    {
        let log = Arc::clone(&log);
        plan.add_instruction(move || log.lock().unwrap().push('c'));
    }
    plan.end_instruction_pack();

    let scheduler = Scheduler::new(4, &Config::default());
    plan.execute_asynchronously(&scheduler);

    let result = log.lock().unwrap().clone();
    assert_eq!(result.chars().next(), Some('a'));
    assert_eq!(result.chars().last(), Some('c'));
    assert_eq!(result.chars().filter(|&c| c == 'b').count(), 5);
    assert_eq!(result.len(), 7);
}

/// S3: scheduling 100 short jobs and immediately shutting down must not
/// hang the process or leak a panic; every job that *does* get picked up
/// runs to completion rather than being interrupted mid-flight.
#[test]
fn s3_scheduler_shutdown_drains_without_hanging() {
    let mut scheduler = Scheduler::new(4, &Config::default());
    let completed = Arc::new(AtomicUsize::new(0));

    for _ in 0..100 {
        let completed = Arc::clone(&completed);
        scheduler.schedule(Box::new(move || {
            std::thread::sleep(std::time::Duration::from_millis(1));
            completed.fetch_add(1, Ordering::SeqCst);
        }));
    }

    scheduler.shutdown();
    // shutdown() detaches workers rather than joining them; give any
    // in-flight jobs a moment to finish on their own before asserting.
    std::thread::sleep(std::time::Duration::from_millis(200));
    assert!(completed.load(Ordering::SeqCst) <= 100);
}

/// S4: three services provided in order A, B, C must be destroyed in
/// order C, B, A.
#[test]
fn s4_service_teardown_is_reverse_of_registration() {
    struct Recorder {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }
    impl Service for Recorder {}
    impl Drop for Recorder {
        fn drop(&mut self) {
            self.log.lock().unwrap().push(self.name);
        }
    }

    let log = Arc::new(Mutex::new(Vec::new()));
    {
        let mut provider = ServiceProvider::new();
        provider.provide(|_| Recorder { name: "A", log: Arc::clone(&log) });
        provider.provide(|_| Recorder { name: "B", log: Arc::clone(&log) });
        provider.provide(|_| Recorder { name: "C", log: Arc::clone(&log) });
    }
    assert_eq!(*log.lock().unwrap(), vec!["C", "B", "A"]);
}

struct Position {
    x: i32,
}
impl Component for Position {}

struct Velocity {
    dx: i32,
}
impl Component for Velocity {}

/// Collects every live `Position.x` it sees, in iteration order, into a
/// shared buffer — used to observe a view's output from outside the ecs
/// module.
struct CollectPositions {
    group: Vec<usize>,
    position_id: usize,
    collected: Arc<Mutex<Vec<i32>>>,
}

impl System<1> for CollectPositions {
    fn query(&self) -> ComponentQuery<1> {
        let mut include = Fingerprint::empty();
        include.set_bit(self.position_id);
        ComponentQuery::new(include, Fingerprint::empty())
    }

    fn reference_group(&self) -> &[usize] {
        &self.group
    }

    fn accept(&mut self, archetype_index: usize) {
        self.group.push(archetype_index);
    }

    fn on_update(&mut self, archetypes: &mut [Archetype<1>]) {
        let mut collected = self.collected.lock().unwrap();
        collected.clear();
        stratum_core::ecs::for_each_in_group(archetypes, &self.group, |archetype| {
            let mut view = archetype.view();
            while view.find_next_entity() {
                collected.push(view.fetch::<Position>(self.position_id).x);
            }
        });
    }
}

/// S5: 10 entities with Position.x = i*10, deallocate 2, 5, 7, then
/// collect x in iteration order.
#[test]
fn s5_archetype_churn() {
    let mut admin = EntityAdmin::<1>::new();
    let position_id = admin.component_id::<Position>().unwrap();
    let _velocity_id = admin.component_id::<Velocity>().unwrap();

    let mut ids = Vec::new();
    for i in 0..10 {
        ids.push(admin.create_entity((Position { x: i * 10 }, Velocity { dx: 0 })).unwrap());
    }
    for &index in &[2usize, 5, 7] {
        admin.delete_entity(ids[index]);
    }

    let collected = Arc::new(Mutex::new(Vec::new()));
    admin.register_system(CollectPositions {
        group: Vec::new(),
        position_id,
        collected: Arc::clone(&collected),
    });
    admin.build_update_plan();
    let scheduler = Scheduler::new(2, &Config::default());
    admin.update_simulation(&scheduler);

    assert_eq!(*collected.lock().unwrap(), vec![0, 10, 30, 40, 60, 80, 90]);
}

struct OnlyA;
impl Component for OnlyA {}
struct OnlyB;
impl Component for OnlyB {}
struct OnlyC;
impl Component for OnlyC {}

/// S6: archetypes `{A}`, `{A,B}`, `{A,C}`; a query including `A` and
/// excluding `B` must match `{A}` and `{A,C}` but not `{A,B}`.
#[test]
fn s6_query_with_exclusion() {
    let mut admin = EntityAdmin::<1>::new();
    let a_id = admin.component_id::<OnlyA>().unwrap();
    let b_id = admin.component_id::<OnlyB>().unwrap();
    let _c_id = admin.component_id::<OnlyC>().unwrap();

    admin.create_entity((OnlyA,)).unwrap();
    admin.create_entity((OnlyA, OnlyB)).unwrap();
    admin.create_entity((OnlyA, OnlyC)).unwrap();

    struct CountMatches {
        group: Vec<usize>,
        include: usize,
        exclude: usize,
        matched: Arc<AtomicUsize>,
    }
    impl System<1> for CountMatches {
        fn query(&self) -> ComponentQuery<1> {
            let mut include = Fingerprint::empty();
            include.set_bit(self.include);
            let mut exclude = Fingerprint::empty();
            exclude.set_bit(self.exclude);
            ComponentQuery::new(include, exclude)
        }

        fn reference_group(&self) -> &[usize] {
            &self.group
        }

        fn accept(&mut self, archetype_index: usize) {
            self.group.push(archetype_index);
            self.matched.fetch_add(1, Ordering::SeqCst);
        }
    }

    let matched = Arc::new(AtomicUsize::new(0));
    admin.register_system(CountMatches {
        group: Vec::new(),
        include: a_id,
        exclude: b_id,
        matched: Arc::clone(&matched),
    });

    // {A} and {A,C} match; {A,B} does not.
    assert_eq!(matched.load(Ordering::SeqCst), 2);
}

/// Property 8: `provide` then `locate` returns the same instance; after
/// `destroy`, `locate` returns `None`.
#[test]
fn property_8_provide_locate_destroy_round_trip() {
    struct Marker(u32);
    impl Service for Marker {}

    let mut provider = ServiceProvider::new();
    provider.provide(|_| Marker(42));
    assert_eq!(provider.locate::<Marker>().map(|m| m.0), Some(42));
    provider.destroy::<Marker>();
    assert!(provider.locate::<Marker>().is_none());
}

/// A required service reporting `Status::Failed` is observable by a
/// caller driving the same registration loop the `Kernel` uses, without
/// the service tearing itself down.
#[test]
fn failed_service_status_is_observable_without_self_destruction() {
    struct Flaky;
    impl Service for Flaky {
        fn check_status(&self) -> (Status, &str) {
            (Status::Failed, "simulated failure")
        }
    }

    let mut provider = ServiceProvider::new();
    let service = provider.provide(|_| Flaky);
    let (status, reason) = service.check_status();
    assert_eq!(status, Status::Failed);
    assert_eq!(reason, "simulated failure");
    assert!(provider.locate::<Flaky>().is_some(), "a failed service is not removed automatically");
}
