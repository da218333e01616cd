//! Grounded on the teacher's `benches/iter_entity_add.rs`: a position +=
//! velocity system run once per iteration over a pre-populated archetype.
//! The teacher compares chunked vs. non-chunked iteration; this crate's
//! [`View`](stratum_core::ecs::View) always walks chunk-backed columns, so
//! there is one code path rather than two, benchmarked at the same entity
//! counts.

use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stratum_core::config::Config;
use stratum_core::ecs::{Archetype, Component, ComponentQuery, EntityAdmin, Fingerprint, System};
use stratum_core::Scheduler;

struct Position {
    x: f64,
}
struct Velocity {
    dx: f64,
}
impl Component for Position {}
impl Component for Velocity {}

struct AddVelocity {
    group: Vec<usize>,
}

impl System<1> for AddVelocity {
    fn query(&self) -> ComponentQuery<1> {
        let mut include = Fingerprint::empty();
        include.set_bit(0);
        include.set_bit(1);
        ComponentQuery::new(include, Fingerprint::empty())
    }

    fn reference_group(&self) -> &[usize] {
        &self.group
    }

    fn accept(&mut self, archetype_index: usize) {
        self.group.push(archetype_index);
    }

    fn on_update(&mut self, archetypes: &mut [Archetype<1>]) {
        stratum_core::ecs::for_each_in_group(archetypes, &self.group, |archetype| {
            let mut view = archetype.view();
            while view.find_next_entity() {
                let dx = view.fetch::<Velocity>(1).dx;
                view.fetch_mut::<Position>(0).x += dx;
            }
        });
    }
}

fn iter_entity_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("iter entity (p += v)");
    group.measurement_time(Duration::from_secs(10));

    for log_entities in [12, 16] {
        let num_entities: u64 = 1 << log_entities;
        group.throughput(Throughput::Elements(num_entities));
        group.bench_with_input(
            BenchmarkId::new("position += velocity", format!("{num_entities} entities")),
            &num_entities,
            |b, &num_entities| {
                let mut admin = EntityAdmin::<1>::new();
                admin.register_system(AddVelocity { group: Vec::new() });
                for i in 0..num_entities {
                    admin
                        .create_entity((Position { x: i as f64 }, Velocity { dx: 1.0 }))
                        .unwrap();
                }
                admin.build_update_plan();
                let config = Config::default();
                let scheduler = Scheduler::new(4, &config);

                b.iter(|| {
                    admin.update_simulation(&scheduler);
                });
            },
        );
    }
}

criterion_group!(benches, iter_entity_add);
criterion_main!(benches);
