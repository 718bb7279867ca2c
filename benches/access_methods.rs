//! # Access Method Benchmarks
//!
//! Compares the four access methods on the same table for point lookups and
//! id ranges, plus raw insert throughput.
//!
//! ## Test Matrix
//!
//! | Method            | Point lookup | Range        |
//! |-------------------|--------------|--------------|
//! | sequential heap   | O(n) decodes | O(n) decodes |
//! | sequential index  | O(n) entries | O(n) entries |
//! | binary search     | O(log n)     | O(log n + k) |
//! | hash index        | O(n) build   | O(n) build   |
//!
//! The hash index is rebuilt on every call, so its numbers include the build.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! cargo bench --bench access_methods
//! cargo bench --bench access_methods -- lookup   # Only point lookups
//! cargo bench --bench access_methods -- range    # Only ranges
//! ```

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use heapdb::{AccessKind, ColumnType, Schema, Table};
use tempfile::TempDir;

const TABLE_ROWS: i64 = 5_000;
const INSERT_ROWS: u64 = 1_000;
const RANGE_WIDTH: i64 = 250;

fn person_schema() -> Schema {
    Schema::new()
        .with_char("name", 32)
        .with_column("age", ColumnType::Int32)
        .with_column("balance", ColumnType::Double)
}

fn populated_table(rows: i64) -> (Table, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let mut table = Table::open(dir.path(), "person", person_schema()).expect("Failed to open table");

    for i in 0..rows {
        table
            .insert(&[
                format!("user_{:08}", i),
                (i % 90).to_string(),
                format!("{}.25", i),
            ])
            .expect("Failed to insert row");
    }

    (table, dir)
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    group.throughput(Throughput::Elements(INSERT_ROWS));
    group.sample_size(10);

    group.bench_function("append_rows", |b| {
        b.iter_batched(
            || {
                let dir = TempDir::new().unwrap();
                let table = Table::open(dir.path(), "person", person_schema()).unwrap();
                (dir, table)
            },
            |(_dir, mut table)| {
                for i in 0..INSERT_ROWS {
                    table
                        .insert(&[format!("user_{:08}", i), "42".to_string(), "1.5".to_string()])
                        .unwrap();
                }
                black_box(table)
            },
            BatchSize::PerIteration,
        );
    });

    group.finish();
}

fn bench_point_lookup(c: &mut Criterion) {
    let (table, _dir) = populated_table(TABLE_ROWS);
    let mut group = c.benchmark_group("lookup");
    group.sample_size(20);

    for kind in AccessKind::ALL {
        for id in [0, TABLE_ROWS / 2, TABLE_ROWS - 1] {
            group.bench_with_input(BenchmarkId::new(kind.name(), id), &id, |b, &id| {
                b.iter(|| black_box(kind.lookup(&table, black_box(id)).unwrap()));
            });
        }
    }

    group.finish();
}

fn bench_range(c: &mut Criterion) {
    let (table, _dir) = populated_table(TABLE_ROWS);
    let mut group = c.benchmark_group("range");
    group.throughput(Throughput::Elements(RANGE_WIDTH as u64));
    group.sample_size(20);

    let min = TABLE_ROWS / 2;
    let max = min + RANGE_WIDTH - 1;

    for kind in AccessKind::ALL {
        group.bench_function(BenchmarkId::new(kind.name(), RANGE_WIDTH), |b| {
            b.iter(|| black_box(kind.range(&table, black_box(min), black_box(max)).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insert, bench_point_lookup, bench_range);
criterion_main!(benches);
