use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use matmul_bench::matrix::fill::{fill_random, seeded_rng};
use matmul_bench::{Matrix, multiply};

fn bench_naive_ijk(c: &mut Criterion) {
    let mut group = c.benchmark_group("naive_ijk");
    group.sample_size(10);

    for n in [64, 128, 256] {
        let mut rng = seeded_rng(n as u64);
        let mut a = Matrix::new(n).unwrap();
        let mut b = Matrix::new(n).unwrap();
        let mut out = Matrix::new(n).unwrap();
        fill_random(&mut a, &mut rng);
        fill_random(&mut b, &mut rng);

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |bencher, _| {
            bencher.iter(|| {
                multiply(black_box(&a), black_box(&b), &mut out);
                black_box(&out);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_naive_ijk);
criterion_main!(benches);
