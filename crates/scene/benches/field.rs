use criterion::{black_box, criterion_group, criterion_main, Criterion};
use linalg::{F32x8, Vec3};
use scene::{Scene, SceneKind};

fn points() -> Vec<Vec3> {
    let rng = fastrand::Rng::with_seed(42);
    (0..1024)
        .map(|_| Vec3::new(8.0 * rng.f32() - 4.0, 3.0 * rng.f32(), -6.0 * rng.f32()))
        .collect()
}

fn bench_field(c: &mut Criterion) {
    let points = points();
    for kind in SceneKind::ALL {
        c.bench_function(&format!("{kind}_scalar"), |b| {
            b.iter(|| {
                for p in &points {
                    black_box(kind.field(1.0, black_box(*p)));
                }
            })
        });
        c.bench_function(&format!("{kind}_x8"), |b| {
            b.iter(|| {
                for chunk in points.chunks_exact(8) {
                    let p = Vec3::<F32x8>::from_lanes(|i| chunk[i]);
                    black_box(kind.field(1.0, black_box(p)));
                }
            })
        });
    }
}

criterion_group!(benches, bench_field);
criterion_main!(benches);
