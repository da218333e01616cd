//! Grounded on the teacher's `benches/create_entity.rs`: batches of entity
//! creation at increasing counts, split by how many components each entity
//! carries. [`Bundle`] is only implemented for tuple arities 1 and 2 (see
//! `ecs::admin`), so this keeps to those two shapes rather than the
//! teacher's 0/1/2/4/8/16 component sweep.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use stratum_core::ecs::{Component, EntityAdmin};

struct CompN<const N: usize>(i64);
impl<const N: usize> Component for CompN<N> {}

fn create_entity(c: &mut Criterion) {
    let mut group = c.benchmark_group("create entity");

    macro_rules! create_entity_batch {
        ($num_comps:literal; $bundle:expr) => {
            for log_entities in (0..=8).step_by(4) {
                let entities: u64 = 1 << log_entities;
                group.throughput(Throughput::Elements(entities));
                group.bench_with_input(
                    BenchmarkId::new(format!("{} components", $num_comps), format!("{entities} entities")),
                    &entities,
                    |b, &entities| {
                        b.iter_batched(
                            EntityAdmin::<1>::new,
                            |mut admin| {
                                for _ in 0..entities {
                                    admin.create_entity($bundle).unwrap();
                                }
                            },
                            BatchSize::SmallInput,
                        );
                    },
                );
            }
        };
    }

    create_entity_batch!(1; (CompN::<1>(1),));
    create_entity_batch!(2; (CompN::<1>(1), CompN::<2>(2)));
}

criterion_group!(benches, create_entity);
criterion_main!(benches);
