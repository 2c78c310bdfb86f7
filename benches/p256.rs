// Benchmarks for the P-256 engine: field arithmetic, group operations,
// and the two public entry points.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use p256_ecdh::ec::{self, FieldElement, Point, Scalar, FIELD_ELEMENT_SIZE, SCALAR_SIZE};
use p256_ecdh::{derive_shared_secret, generate_keypair, OsEntropy};
use rand::{rngs::OsRng, RngCore};

/// Generate a random field element for benchmarking
fn random_field_element() -> FieldElement {
    let mut bytes = [0u8; FIELD_ELEMENT_SIZE];
    loop {
        OsRng.fill_bytes(&mut bytes);
        if let Ok(fe) = FieldElement::from_bytes(&bytes) {
            return fe;
        }
    }
}

/// Generate a random scalar for benchmarking
fn random_scalar() -> Scalar {
    let mut bytes = [0u8; SCALAR_SIZE];
    loop {
        OsRng.fill_bytes(&mut bytes);
        if let Ok(scalar) = Scalar::new(bytes) {
            return scalar;
        }
    }
}

/// Generate a random point on the curve
fn random_point() -> Point {
    let scalar = random_scalar();
    ec::scalar_mult_base_g(&scalar).unwrap()
}

fn bench_field_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("p256-field");

    group.bench_function("addition", |b| {
        b.iter_batched(
            || (random_field_element(), random_field_element()),
            |(a, b)| black_box(a.add(&b)),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("multiplication", |b| {
        b.iter_batched(
            || (random_field_element(), random_field_element()),
            |(a, b)| black_box(a.mul(&b)),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("inversion", |b| {
        b.iter_batched(
            || random_field_element(),
            |a| black_box(a.invert().unwrap()),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_point_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("p256-point");

    group.bench_function("addition", |b| {
        b.iter_batched(
            || (random_point(), random_point()),
            |(p1, p2)| black_box(p1.add(&p2)),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("doubling", |b| {
        b.iter_batched(
            || random_point(),
            |p| black_box(p.double()),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("scalar_mult", |b| {
        b.iter_batched(
            || (random_point(), random_scalar()),
            |(p, s)| black_box(p.mul(&s).unwrap()),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("validation", |b| {
        b.iter_batched(
            || {
                let p = random_point();
                (p.x_coordinate_bytes(), p.y_coordinate_bytes())
            },
            |(x, y)| black_box(Point::new_uncompressed(&x, &y)),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_crypto_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("p256-crypto");

    group.bench_function("generate_keypair", |b| {
        b.iter(|| black_box(generate_keypair(&mut OsEntropy).unwrap()))
    });

    group.bench_function("derive_shared_secret", |b| {
        b.iter_batched(
            || {
                let (_, sk_a) = generate_keypair(&mut OsEntropy).unwrap();
                let (pk_b, _) = generate_keypair(&mut OsEntropy).unwrap();
                (sk_a, pk_b)
            },
            |(sk, pk)| black_box(derive_shared_secret(&sk, &pk).unwrap()),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_field_operations,
    bench_point_operations,
    bench_crypto_operations
);

criterion_main!(benches);
