//! Grounded on the teacher's `benches/delete_entity.rs`: build a batch of
//! entities, then measure deleting all of them. Restricted to the 1- and
//! 2-component bundle shapes [`Bundle`] actually implements.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use stratum_core::ecs::{Component, EntityAdmin};

struct CompN<const N: usize>(i64);
impl<const N: usize> Component for CompN<N> {}

fn delete_entity(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete entity");

    macro_rules! delete_entity_batch {
        ($num_comps:literal; $bundle:expr) => {
            for log_entities in (0..=8).step_by(4) {
                let entities: u64 = 1 << log_entities;
                group.throughput(Throughput::Elements(entities));
                group.bench_with_input(
                    BenchmarkId::new(format!("{} components", $num_comps), format!("{entities} entities")),
                    &entities,
                    |b, &entities| {
                        b.iter_batched(
                            || {
                                let mut admin = EntityAdmin::<1>::new();
                                let mut ids = Vec::with_capacity(entities as usize);
                                for _ in 0..entities {
                                    ids.push(admin.create_entity($bundle).unwrap());
                                }
                                (admin, ids)
                            },
                            |(mut admin, ids)| {
                                for id in ids {
                                    admin.delete_entity(id);
                                }
                                admin
                            },
                            BatchSize::SmallInput,
                        );
                    },
                );
            }
        };
    }

    delete_entity_batch!(1; (CompN::<1>(1),));
    delete_entity_batch!(2; (CompN::<1>(1), CompN::<2>(2)));
}

criterion_group!(benches, delete_entity);
criterion_main!(benches);
