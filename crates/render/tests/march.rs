use linalg::{F32x8, Lanes, Vec2, Vec3};
use render::shader::to_color;
use render::{Camera, Shader, ShaderConfig};
use scene::palette::FLOOR;
use scene::{GalleryScene, GroundScene, SceneKind};

const WIDTH: u32 = 96;
const HEIGHT: u32 = 64;

fn ground_camera() -> Camera {
    Camera::new(45.0, WIDTH, HEIGHT, Vec3::new(0.0, 1.0, 0.0), 0.0)
}

#[test]
fn rays_below_the_horizon_hit_the_floor() {
    let camera = ground_camera();
    let config = ShaderConfig::default();
    let shader = Shader::new(&config, &camera, &GroundScene);

    let rng = fastrand::Rng::with_seed(7);
    let mut steep = 0;
    for _ in 0..500 {
        let (x, y) = (rng.u32(0..WIDTH), rng.u32(0..HEIGHT));
        let dir = camera.ray_dir(camera.screen_point(x, y));
        if dir.y >= 0.0 {
            continue;
        }
        let (hit, steps) = shader.march_counted(dir);
        if !hit.is_hit() {
            // grazing rays converge geometrically and can run out of steps
            assert!(dir.y > -0.05, "pixel ({x}, {y}) missed with dir.y = {}", dir.y);
            assert_eq!(steps, config.max_its, "pixel ({x}, {y})");
            assert_eq!(hit.distance, -1.0);
            continue;
        }
        assert_eq!(hit.material, FLOOR);

        // the march stops once the height left is below 0.0005 * t
        let expected = 1.0 / dir.y.abs();
        let slack = 0.0005 * hit.distance / dir.y.abs() + 1e-4;
        assert!(
            (hit.distance - expected).abs() <= slack,
            "pixel ({x}, {y}): t = {}, expected {expected}",
            hit.distance
        );
        if dir.y <= -0.05 {
            steep += 1;
        }
    }
    assert!(steep > 50);
}

#[test]
fn grazing_ray_exhausts_iterations_instead_of_looping() {
    let camera = ground_camera();
    let config = ShaderConfig::default();
    let shader = Shader::new(&config, &camera, &GroundScene);

    let dir = Vec3::new(0.0, -0.001, -1.0).normalize();
    let (hit, steps) = shader.march_counted(dir);
    assert_eq!(steps, config.max_its);
    assert!(!hit.is_hit());
}

#[test]
fn straight_down_hits_within_epsilon() {
    let camera = ground_camera();
    let config = ShaderConfig::default();
    let shader = Shader::new(&config, &camera, &GroundScene);

    let hit = shader.march(Vec3::new(0.0, -1.0, 0.0));
    assert!(hit.is_hit());
    assert!((hit.distance - 1.0).abs() <= 0.0005 * hit.distance);
}

#[test]
fn rays_above_the_horizon_miss() {
    let camera = ground_camera();
    let config = ShaderConfig::default();
    let shader = Shader::new(&config, &camera, &GroundScene);

    for y in 0..HEIGHT {
        for x in (0..WIDTH).step_by(7) {
            let dir = camera.ray_dir(camera.screen_point(x, y));
            if dir.y >= 0.0 {
                let hit = shader.march(dir);
                assert_eq!(hit.distance, -1.0, "pixel ({x}, {y})");
                assert!(!hit.is_hit());
            }
        }
    }
}

#[test]
fn march_respects_iteration_limit() {
    let camera = ground_camera();
    let mut config = ShaderConfig::default();
    config.max_its = 12;
    let shader = Shader::new(&config, &camera, &GalleryScene);

    for y in (0..HEIGHT).step_by(5) {
        for x in (0..WIDTH).step_by(5) {
            let dir = camera.ray_dir(camera.screen_point(x, y));
            let (_, steps) = shader.march_counted(dir);
            assert!(steps <= config.max_its);
        }
    }
}

#[test]
fn march_stops_at_max_dist() {
    let camera = ground_camera();
    let mut config = ShaderConfig::default();
    config.max_dist = 5.0;
    let shader = Shader::new(&config, &camera, &GroundScene);

    // the floor is 20 units away along this ray
    let dir = Vec3::new(0.0, -0.05, -1.0).normalize();
    assert!(!shader.march(dir).is_hit());
    let batch = shader.march_simd(Vec3::broadcast(dir));
    assert_eq!(batch.distance.lane(3), -1.0);
}

#[test]
fn batched_march_matches_scalar() {
    let config = ShaderConfig {
        time: 2.5,
        ..ShaderConfig::default()
    };
    let rng = fastrand::Rng::with_seed(42);
    for kind in SceneKind::ALL {
        let camera = Camera::new(45.0, WIDTH, HEIGHT, Vec3::new(0.0, 1.0, 4.5), 0.2);
        let shader = Shader::new(&config, &camera, &kind);
        for _ in 0..32 {
            let xs: [f32; 8] = std::array::from_fn(|_| rng.u32(0..WIDTH) as f32);
            let ys: [f32; 8] = std::array::from_fn(|_| rng.u32(0..HEIGHT) as f32);
            let dirs = camera.ray_dir(Vec2::new(
                F32x8::from_fn(|i| xs[i]),
                F32x8::from_fn(|i| ys[i]),
            ));
            let batch = shader.march_simd(dirs);
            for i in 0..8 {
                let single = shader.march(dirs.lane(i));
                assert_eq!(batch.lane(i), single, "{kind} lane {i}");
            }
        }
    }
}

#[test]
fn batched_pixels_match_scalar_pixels() {
    let config = ShaderConfig::default();
    let camera = Camera::new(45.0, WIDTH, HEIGHT, Vec3::new(0.0, 1.0, 4.5), 0.0);
    let shader = Shader::new(&config, &camera, &GalleryScene);

    for y in (0..HEIGHT).step_by(3) {
        let pixels: [(u32, u32); 8] = std::array::from_fn(|i| ((i as u32) * 11, y));
        let batch = shader.render_batch(pixels);
        for (i, &(x, y)) in pixels.iter().enumerate() {
            assert_eq!(batch[i], shader.render_pixel(x, y), "pixel ({x}, {y})");
        }
    }
}

#[test]
fn colors_are_clamped_to_bytes() {
    assert_eq!(to_color(Vec3::new(2.0, -1.0, 0.0)), [255, 0, 0]);
    assert_eq!(to_color(Vec3::splat(1.0)), [255, 255, 255]);
    assert_eq!(to_color(Vec3::splat(-5.0)), [0, 0, 0]);

    let mid = to_color(Vec3::splat(0.5));
    // gamma brightens mid grey
    assert!(mid[0] > 128 && mid[0] < 255);
}
