//! Benchmarks for the fixed-size arrays and the linked list

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tessera_core::container::{Array, Array2D, List};

fn bench_array_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("array_access");

    for size in [100, 1000, 10000] {
        group.throughput(Throughput::Elements(size as u64));

        let array: Array<u64> = (0..size as u64).collect();
        let vec: Vec<u64> = (0..size as u64).collect();

        group.bench_with_input(BenchmarkId::new("vec", size), &size, |b, &size| {
            b.iter(|| {
                let mut sum = 0;
                for i in 0..size {
                    sum += vec[black_box(i)];
                }
                sum
            });
        });

        group.bench_with_input(BenchmarkId::new("array_strict", size), &size, |b, &size| {
            b.iter(|| {
                let mut sum = 0;
                for i in 0..size {
                    if let Some(&val) = array.get(black_box(i)) {
                        sum += val;
                    }
                }
                sum
            });
        });

        group.bench_with_input(BenchmarkId::new("array_clamped", size), &size, |b, &size| {
            b.iter(|| {
                let mut sum = 0;
                for i in 0..size {
                    sum += array[black_box(i)];
                }
                sum
            });
        });
    }

    group.finish();
}

fn bench_array2d_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("array2d_rows");

    for side in [16, 64, 256] {
        group.throughput(Throughput::Elements((side * side) as u64));

        let grid = Array2D::from_vec(side, side, vec![1u32; side * side]).unwrap_or_default();

        group.bench_with_input(BenchmarkId::new("index", side), &side, |b, &side| {
            b.iter(|| {
                let mut sum = 0;
                for row in 0..side {
                    for column in 0..side {
                        sum += grid[(black_box(row), black_box(column))];
                    }
                }
                sum
            });
        });

        group.bench_with_input(BenchmarkId::new("row_slice", side), &side, |b, &side| {
            b.iter(|| {
                let mut sum = 0;
                for row in 0..side {
                    if let Some(slice) = grid.row(black_box(row)) {
                        sum += slice.iter().sum::<u32>();
                    }
                }
                sum
            });
        });
    }

    group.finish();
}

fn bench_list_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_build");

    for size in [10, 100, 1000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("prepend", size), &size, |b, &size| {
            b.iter(|| {
                let mut list = List::new();
                for i in 0..size {
                    list.prepend(black_box(i));
                }
                list
            });
        });

        group.bench_with_input(BenchmarkId::new("append", size), &size, |b, &size| {
            b.iter(|| {
                let mut list = List::new();
                for i in 0..size {
                    list.append(black_box(i));
                }
                list
            });
        });

        group.bench_with_input(BenchmarkId::new("collect", size), &size, |b, &size| {
            b.iter(|| (0..black_box(size)).collect::<List<usize>>());
        });
    }

    group.finish();
}

fn bench_list_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_remove");

    for size in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("drain_from_head", size), &size, |b, &size| {
            b.iter(|| {
                let mut list: List<usize> = (0..size).collect();
                for i in 0..size {
                    list.remove(&black_box(i));
                }
                list
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_array_access,
    bench_array2d_rows,
    bench_list_build,
    bench_list_remove
);
criterion_main!(benches);
