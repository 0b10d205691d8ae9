use criterion::{black_box, criterion_group, criterion_main, Criterion};
use digit_mlp::{
    data::{normalize_pixels, one_hot_target, CLASSES, PIXELS},
    matrix::Matrix1,
    neural::NeuralNet,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn digit_net(hidden: usize) -> NeuralNet {
    NeuralNet::new(PIXELS, hidden, CLASSES, 0.2, &mut StdRng::seed_from_u64(0)).unwrap()
}

fn random_image(rng: &mut StdRng) -> Matrix1<f64> {
    let pixels: Vec<f64> = (0..PIXELS).map(|_| rng.gen_range(0..=255) as f64).collect();
    normalize_pixels(&pixels)
}

fn bench_predict(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let input = random_image(&mut rng);

    let small = digit_net(30);
    let medium = digit_net(100);

    c.bench_function("predict 784-30-10", |b| {
        b.iter(|| small.predict(black_box(&input)).unwrap())
    });
    c.bench_function("predict 784-100-10", |b| {
        b.iter(|| medium.predict(black_box(&input)).unwrap())
    });
}

fn bench_train(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(2);
    let input = random_image(&mut rng);
    let target = one_hot_target(7, CLASSES).unwrap();

    let mut small = digit_net(30);
    let mut medium = digit_net(100);

    c.bench_function("train 784-30-10", |b| {
        b.iter(|| small.train(black_box(&input), black_box(&target)).unwrap())
    });
    c.bench_function("train 784-100-10", |b| {
        b.iter(|| medium.train(black_box(&input), black_box(&target)).unwrap())
    });
}

criterion_group!(benches, bench_predict, bench_train);
criterion_main!(benches);
