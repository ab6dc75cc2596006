use criterion::{black_box, criterion_group, criterion_main, Criterion};
use linalg::Vec3;
use render::{Camera, Shader, ShaderConfig};
use scene::SceneKind;

const WIDTH: u32 = 320;
const HEIGHT: u32 = 180;

fn pixels() -> Vec<(u32, u32)> {
    let rng = fastrand::Rng::with_seed(42);
    (0..512)
        .map(|_| (rng.u32(0..WIDTH), rng.u32(0..HEIGHT)))
        .collect()
}

fn bench_shade(c: &mut Criterion) {
    let pixels = pixels();
    let config = ShaderConfig::default();
    let camera = Camera::new(45.0, WIDTH, HEIGHT, Vec3::new(0.0, 1.0, 4.5), 0.0);
    for kind in SceneKind::ALL {
        let shader = Shader::new(&config, &camera, &kind);
        c.bench_function(&format!("shade_{kind}_scalar"), |b| {
            b.iter(|| {
                for &(x, y) in &pixels {
                    black_box(shader.render_pixel(x, y));
                }
            })
        });
        c.bench_function(&format!("shade_{kind}_x8"), |b| {
            b.iter(|| {
                for chunk in pixels.chunks_exact(8) {
                    let batch: [(u32, u32); 8] = std::array::from_fn(|i| chunk[i]);
                    black_box(shader.render_batch(black_box(batch)));
                }
            })
        });
    }
}

criterion_group!(benches, bench_shade);
criterion_main!(benches);
