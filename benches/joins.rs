//! # Join Benchmarks
//!
//! Runs nested-loop, hash and sort-merge joins over two tables linked by a
//! foreign key, at a few relation sizes.
//!
//! ## Workload
//!
//! - `person`: `n` rows, joined on `_id`
//! - `worked`: `4n` rows whose `person_id` cycles through the person ids
//!
//! The person side is unique, so hash join builds on it (the left side) and
//! all three strategies produce the same pairs.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! cargo bench --bench joins
//! cargo bench --bench joins -- "hash"
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use heapdb::{join, ColumnType, JoinStrategy, Schema, Table};
use tempfile::TempDir;

const SIZES: [i64; 3] = [100, 500, 2_000];
const NESTED_LOOP_MAX: i64 = 500;

fn create_tables(persons: i64) -> (Table, Table, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp directory");

    let mut person = Table::open(
        dir.path(),
        "person",
        Schema::new().with_char("name", 24),
    )
    .expect("Failed to open person");
    for i in 0..persons {
        person
            .insert(&[format!("person_{}", i)])
            .expect("Failed to insert person");
    }

    let mut worked = Table::open(
        dir.path(),
        "worked",
        Schema::new()
            .with_column("person_id", ColumnType::ForeignKey)
            .with_column("hours", ColumnType::Int32),
    )
    .expect("Failed to open worked");
    for i in 0..persons * 4 {
        worked
            .insert(&[(i % persons).to_string(), (i % 12).to_string()])
            .expect("Failed to insert worked");
    }

    (person, worked, dir)
}

fn bench_joins(c: &mut Criterion) {
    let mut group = c.benchmark_group("join");
    group.sample_size(10);

    for size in SIZES {
        let (person, worked, _dir) = create_tables(size);
        group.throughput(Throughput::Elements((size * 5) as u64));

        for strategy in [
            JoinStrategy::NestedLoop,
            JoinStrategy::HASH,
            JoinStrategy::SortMerge,
        ] {
            if strategy == JoinStrategy::NestedLoop && size > NESTED_LOOP_MAX {
                continue;
            }

            group.bench_with_input(BenchmarkId::new(strategy.name(), size), &size, |b, _| {
                b.iter(|| {
                    let result = join(&person, "_id", &worked, "person_id", strategy).unwrap();
                    black_box(result.len())
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_joins);
criterion_main!(benches);
