use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kmeans_perceptron_graddesc::{Initialization, KMeansConfig, Model};
use ndarray::{Array1, Array2};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

fn random_points(n_samples: usize, n_features: usize) -> Vec<Array1<f64>> {
    let mut rng = StdRng::seed_from_u64(42);
    let data = Array2::random_using((n_samples, n_features), Uniform::new(-1.0, 1.0), &mut rng);
    data.outer_iter().map(|row| row.to_owned()).collect()
}

fn benchmark_kmeans_varying_samples(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans_samples");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let n_features = 16;
    let k = 10;

    for n_samples in [1_000, 5_000, 10_000] {
        let points = random_points(n_samples, n_features);
        group.throughput(Throughput::Elements(n_samples as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n_samples), &points, |b, points| {
            let model = Model::with_config(KMeansConfig::new(k).with_max_iters(20).with_seed(42).with_n_init(1));
            b.iter(|| model.clustering(black_box(points)).unwrap());
        });
    }

    group.finish();
}

fn benchmark_initialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans_initialization");
    group.sample_size(10);

    let points = random_points(5_000, 16);
    for init in [Initialization::Random, Initialization::KMeansPlusPlus] {
        group.bench_with_input(BenchmarkId::from_parameter(format!("{:?}", init)), &points, |b, points| {
            let config = KMeansConfig::new(25)
                .with_max_iters(1)
                .with_seed(7)
                .with_init(init)
                .with_n_init(1);
            let model = Model::with_config(config);
            b.iter(|| model.clustering(black_box(points)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_kmeans_varying_samples, benchmark_initialization);
criterion_main!(benches);
