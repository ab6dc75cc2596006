//! Sphere-tracing shader
//!
//! Every ray starts in the *marching* state and ends either *hit* (distance
//! and material of the surface) or *missed* (distance `-1`). The scalar path
//! follows one ray with ordinary control flow. The batched path follows eight
//! rays at once and never branches per lane: each lane carries 0/1 masks that
//! decide which results it keeps, and the loop only exits early once every
//! lane is finished.
//!
//! Normals, lighting, fog and tone mapping are generic over the lane type and
//! shared by both paths, so a lane of the batched result carries exactly the
//! bits the scalar path produces for the same pixel.

use linalg::{F32x8, Lanes, Vec2, Vec3};
use scene::{Sample, Scene, MISS_DISTANCE};

use crate::camera::Camera;
use crate::config::{HIT_EPSILON, MAX_DIST, MAX_ITS, SHADOW_K, SHADOW_MAX_STEPS};
use crate::framebuffer::Color;

/// Tetrahedron tap offset for normal estimation.
const NORMAL_EPSILON: f32 = 0.5773 * 0.0005;

const SHADOW_START: f32 = 0.01;
const SHADOW_OFFSET: f32 = 0.1;
const SHADOW_HIT: f32 = 0.0001;
const SHADOW_MIN_STEPS: u32 = 16;
const SHADOW_REACH: f32 = 6.0;
const SHADOW_STEP_MIN: f32 = 0.01;
const SHADOW_STEP_MAX: f32 = 0.5;

const SUN_COLOR: Vec3 = Vec3::new(1.64 / 2.0, 1.27 / 2.0, 0.99 / 2.0);
/// Per-channel exponent on the shadow term; red bleeds furthest into the
/// penumbra.
const PENUMBRA_TINT: Vec3 = Vec3::new(1.0, 1.2, 1.5);
const SKY_COLOR: Vec3 = Vec3::new(0.16, 0.20, 0.28);
const BOUNCE_COLOR: Vec3 = Vec3::new(0.40, 0.28, 0.20);

const FOG_DISTANCE: f32 = 40.0;
const FOG_SUN: Vec3 = Vec3::new(1.0, 0.9, 0.7);
const FOG_SKY: Vec3 = Vec3::new(0.5, 0.6, 0.7);

const GAMMA: f32 = 1.0 / 2.2;

/// Per-frame shading parameters. The render loop owns the value and
/// republishes it once per frame; shaders only read it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaderConfig {
    pub max_dist: f32,
    pub max_its: u32,
    /// Unit vector pointing towards the sun.
    pub light_dir: Vec3,
    pub background_color: Vec3,
    /// Scene time in seconds, for animated fields.
    pub time: f32,
    pub shadow_k: f32,
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self {
            max_dist: MAX_DIST,
            max_its: MAX_ITS,
            light_dir: Vec3::new(-0.3, 0.3, 0.1).normalize(),
            background_color: Vec3::new(0.4, 0.56, 0.97),
            time: 0.0,
            shadow_k: SHADOW_K,
        }
    }
}

impl ShaderConfig {
    pub fn advance(&mut self, dt: f32) {
        self.time += dt;
    }
}

/// Final tone mapping: clamp to `[0, 1]`, gamma-correct, scale to 255.
fn tone_map<L: Lanes>(color: Vec3<L>) -> Vec3<L> {
    color.clamp(0.0, 1.0).pow(Vec3::splat(GAMMA)) * 255.0
}

/// Truncates a tone-mapped colour to 8-bit channels.
fn quantize(color: Vec3) -> Color {
    [color.x as u8, color.y as u8, color.z as u8]
}

/// Converts a linear colour to its displayed 8-bit value.
pub fn to_color(color: Vec3) -> Color {
    quantize(tone_map(color))
}

/// Shades pixels for one camera, configuration and scene.
pub struct Shader<'a, S: Scene> {
    config: &'a ShaderConfig,
    camera: &'a Camera,
    scene: &'a S,
}

impl<'a, S: Scene> Shader<'a, S> {
    pub fn new(config: &'a ShaderConfig, camera: &'a Camera, scene: &'a S) -> Self {
        Self {
            config,
            camera,
            scene,
        }
    }

    pub fn camera(&self) -> &Camera {
        self.camera
    }

    pub fn config(&self) -> &ShaderConfig {
        self.config
    }

    /// Marches one ray from the camera. Misses come back as
    /// [`Sample::MISS`].
    pub fn march(&self, dir: Vec3) -> Sample {
        self.march_counted(dir).0
    }

    /// Like [`Shader::march`], also reporting how many field evaluations the
    /// march took.
    pub fn march_counted(&self, dir: Vec3) -> (Sample, u32) {
        let origin = self.camera.position();
        let mut t = 1.0_f32;
        let mut steps = 0;
        while steps < self.config.max_its && t < self.config.max_dist {
            let sample = self.scene.field(self.config.time, origin + dir * t);
            steps += 1;
            if sample.distance < t * HIT_EPSILON {
                return (Sample::new(t, sample.material), steps);
            }
            t += sample.distance;
        }
        (Sample::MISS, steps)
    }

    /// Marches eight rays at once. A lane is done once it hits or passes
    /// `max_dist`; done lanes stop advancing and keep their result.
    pub fn march_simd(&self, dirs: Vec3<F32x8>) -> Sample<F32x8> {
        let origin = Vec3::broadcast(self.camera.position());
        let max_dist = self.config.max_dist;
        let mut t = F32x8::splat(1.0);
        let mut hit = F32x8::ZERO;
        let mut material = F32x8::ZERO;
        let mut done = t.cmp_ge(max_dist);

        for _ in 0..self.config.max_its {
            if done.all_set() {
                break;
            }
            let sample = self.scene.field(self.config.time, origin + dirs.scale(t));
            let active = -done + 1.0;
            let newly = active * sample.distance.cmp_lt(t * HIT_EPSILON);
            hit = hit.max(newly);
            material = F32x8::select(newly, sample.material, material);
            t = t + sample.distance * (active - newly);
            done = done.max(hit).max(t.cmp_ge(max_dist));
        }

        Sample {
            distance: F32x8::select(hit, t, F32x8::splat(MISS_DISTANCE)),
            material: material * hit,
        }
    }

    /// Surface normal from four field taps on a tetrahedron.
    pub fn normal<L: Lanes>(&self, p: Vec3<L>) -> Vec3<L> {
        const E: f32 = NORMAL_EPSILON;
        let taps = [
            Vec3::new(E, -E, -E),
            Vec3::new(-E, -E, E),
            Vec3::new(-E, E, -E),
            Vec3::new(E, E, E),
        ];
        let mut gradient = Vec3::splat(0.0);
        for tap in taps {
            let tap = Vec3::broadcast(tap);
            let d = self.scene.field(self.config.time, p + tap).distance;
            gradient += tap.scale(d);
        }
        gradient.normalize()
    }

    /// Soft shadow towards the light from `p`: 1 in full light, 0 when the
    /// path is blocked.
    pub fn shadow(&self, p: Vec3) -> f32 {
        let light = self.config.light_dir;
        let k = self.config.shadow_k;
        let mut res = 1.0_f32;
        let mut t = SHADOW_START;
        let mut steps = 0;
        while (steps < SHADOW_MIN_STEPS || t < SHADOW_REACH) && steps < SHADOW_MAX_STEPS {
            let h = self.scene.field(self.config.time, p + light * t).distance;
            res = res.min(h.max(0.0) * k / t);
            if h < SHADOW_HIT {
                return 0.0;
            }
            t += h.clamp(SHADOW_STEP_MIN, SHADOW_STEP_MAX);
            steps += 1;
        }
        res
    }

    /// Batched soft shadow. Only lanes set in `active` march; the others
    /// come back as 1.
    pub fn shadow_simd(&self, p: Vec3<F32x8>, active: F32x8) -> F32x8 {
        let light = Vec3::broadcast(self.config.light_dir);
        let k = self.config.shadow_k;
        let mut res = F32x8::splat(1.0);
        let mut t = F32x8::splat(SHADOW_START);
        let mut live = active;
        let mut blocked = F32x8::ZERO;

        for step in 0..SHADOW_MAX_STEPS {
            if step >= SHADOW_MIN_STEPS {
                live = live * t.cmp_lt(SHADOW_REACH);
            }
            if !live.any_set() {
                break;
            }
            let h = self.scene.field(self.config.time, p + light.scale(t)).distance;
            res = F32x8::select(live, res.min(h.max(0.0) * k / t), res);
            let touched = live * h.cmp_lt(SHADOW_HIT);
            blocked = blocked.max(touched);
            live = live * (-touched + 1.0);
            t = t + h.clamp(SHADOW_STEP_MIN, SHADOW_STEP_MAX) * live;
        }

        F32x8::select(blocked, F32x8::ZERO, res)
    }

    /// Sun, sky and bounce light at surface point `p` times the material
    /// colour.
    fn lighting<L: Lanes>(&self, p: Vec3<L>, n: Vec3<L>, shadow: L, material: L) -> Vec3<L> {
        let light_dir = self.config.light_dir;
        let bounce_dir = (light_dir * Vec3::new(-1.0, 0.0, -1.0)).normalize();

        let sun = n.dot(Vec3::broadcast(light_dir)).clamp(0.0, 1.0);
        let sky = (n.y * 0.5 + 0.5).clamp(0.0, 1.0);
        let bounce = n.dot(Vec3::broadcast(bounce_dir)).clamp(0.0, 1.0);

        let penumbra = Vec3::new(shadow, shadow, shadow).pow(PENUMBRA_TINT);
        let lin = (Vec3::broadcast(SUN_COLOR) * penumbra).scale(sun)
            + Vec3::broadcast(SKY_COLOR).scale(sky)
            + Vec3::broadcast(BOUNCE_COLOR).scale(bounce);
        lin * self.scene.texture(material, p)
    }

    /// Blends towards a fog colour that warms up when looking into the sun.
    fn fog<L: Lanes>(&self, color: Vec3<L>, distance: L, dir: Vec3<L>) -> Vec3<L> {
        let scaled = distance / FOG_DISTANCE;
        let amount = -(-(scaled * scaled)).exp() + 1.0;
        let sun = dir.dot(Vec3::broadcast(self.config.light_dir)).max(0.0);
        let tint = Vec3::broadcast(FOG_SUN).mix(Vec3::broadcast(FOG_SKY), sun);
        tint.mix(color, amount)
    }

    /// Shades screen pixel `(x, y)`, row 0 at the top.
    pub fn render_pixel(&self, x: u32, y: u32) -> Color {
        let dir = self.camera.ray_dir(self.camera.screen_point(x, y));
        let hit = self.march(dir);
        let color = if hit.is_hit() {
            let p = self.camera.position() + dir * hit.distance;
            let n = self.normal(p);
            let shadow = self.shadow(p + n * SHADOW_OFFSET);
            self.lighting(p, n, shadow, hit.material)
        } else {
            self.config.background_color
        };
        quantize(tone_map(self.fog(color, hit.distance, dir)))
    }

    /// Shades eight image-plane points at once.
    pub fn render_pixels_simd(&self, pixels: Vec2<F32x8>) -> [Color; 8] {
        let dirs = self.camera.ray_dir(pixels);
        let hits = self.march_simd(dirs);
        let mask = hits.distance.cmp_ge(0.0);

        let p = Vec3::broadcast(self.camera.position()) + dirs.scale(hits.distance);
        let n = self.normal(p);
        let shadow = self.shadow_simd(p + n * SHADOW_OFFSET, mask);
        let lit = self.lighting(p, n, shadow, hits.material);
        let color = Vec3::select(mask, lit, Vec3::broadcast(self.config.background_color));

        let mapped = tone_map(self.fog(color, hits.distance, dirs));
        std::array::from_fn(|i| quantize(mapped.lane(i)))
    }

    /// Shades eight screen pixels, row 0 at the top.
    pub fn render_batch(&self, pixels: [(u32, u32); 8]) -> [Color; 8] {
        let points = pixels.map(|(x, y)| self.camera.screen_point(x, y));
        self.render_pixels_simd(Vec2::new(
            F32x8::from_fn(|i| points[i].x),
            F32x8::from_fn(|i| points[i].y),
        ))
    }
}
