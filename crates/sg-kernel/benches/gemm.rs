//! GEMM throughput: scalar reference vs blocked kernel vs matrixmultiply.
//!
//! Shapes are lane-aligned so every backend takes its fast path.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

use sg_kernel::{BlockedBackend, GemmBackend, GemmShape, Matrix, OracleBackend, ScalarBackend};

const SHAPES: &[(usize, usize, usize)] = &[(64, 64, 64), (128, 256, 1024), (256, 256, 256)];

fn operands(shape: GemmShape) -> (Matrix, Matrix) {
    let a = Matrix::from_fn(shape.m, shape.k, |r, c| ((r * 7 + c) % 17) as f32 / 17.0);
    let b = Matrix::from_fn(shape.k, shape.n, |r, c| ((r + c * 3) % 19) as f32 / 19.0);
    (a, b)
}

fn bench_backend(c: &mut Criterion, backend: &dyn GemmBackend, group_name: &str) {
    let mut group = c.benchmark_group(group_name);
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(3));

    for &(m, n, k) in SHAPES {
        let shape = GemmShape::new(m, n, k);
        let (a, b) = operands(shape);
        let mut out = Matrix::zeros(m, n);
        group.throughput(Throughput::Elements(shape.flops() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(shape), &shape, |bench, _| {
            bench.iter(|| {
                backend
                    .gemm(&black_box(&a).view(), &black_box(&b).view(), &mut out.view_mut())
                    .unwrap();
            })
        });
    }
    group.finish();
}

fn bench_scalar(c: &mut Criterion) {
    bench_backend(c, &ScalarBackend::new(), "gemm/scalar");
}

fn bench_blocked(c: &mut Criterion) {
    bench_backend(c, &BlockedBackend::new(), "gemm/blocked");
    bench_backend(c, &BlockedBackend::portable(), "gemm/blocked-portable");
}

fn bench_oracle(c: &mut Criterion) {
    bench_backend(c, &OracleBackend::new(), "gemm/matrixmultiply");
}

criterion_group!(benches, bench_scalar, bench_blocked, bench_oracle);
criterion_main!(benches);
