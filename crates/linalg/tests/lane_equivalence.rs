use linalg::{F32x8, Lanes, Vec3, Vector};

const SAMPLES: usize = 512;

fn random_lanes(rng: &fastrand::Rng, lo: f32, hi: f32) -> [f32; 8] {
    std::array::from_fn(|_| lo + (hi - lo) * rng.f32())
}

/// Runs one operation on the portable bundle, the hardware bundle and lane by lane on
/// `f32`, and demands identical bits from all three.
fn assert_bit_exact(
    name: &str,
    a: [f32; 8],
    b: [f32; 8],
    scalar: impl Fn(f32, f32) -> f32,
    portable: impl Fn(Vector<8>, Vector<8>) -> Vector<8>,
    hardware: impl Fn(F32x8, F32x8) -> F32x8,
) {
    let p = portable(Vector(a), Vector(b)).to_array();
    let h = hardware(F32x8::from(a), F32x8::from(b)).to_array();
    for i in 0..8 {
        let s = scalar(a[i], b[i]);
        assert_eq!(s.to_bits(), p[i].to_bits(), "{name}: scalar vs portable at {a:?} {b:?}");
        assert_eq!(s.to_bits(), h[i].to_bits(), "{name}: scalar vs hardware at {a:?} {b:?}");
    }
}

#[test]
fn arithmetic_is_bit_exact_across_widths() {
    let rng = fastrand::Rng::with_seed(7);
    for _ in 0..SAMPLES {
        let a = random_lanes(&rng, -100.0, 100.0);
        let b = random_lanes(&rng, 0.5, 50.0);
        assert_bit_exact("add", a, b, |x, y| x + y, |x, y| x + y, |x, y| x + y);
        assert_bit_exact("sub", a, b, |x, y| x - y, |x, y| x - y, |x, y| x - y);
        assert_bit_exact("mul", a, b, |x, y| x * y, |x, y| x * y, |x, y| x * y);
        assert_bit_exact("div", a, b, |x, y| x / y, |x, y| x / y, |x, y| x / y);
        assert_bit_exact("min", a, b, Lanes::min, Lanes::min, Lanes::min);
        assert_bit_exact("max", a, b, Lanes::max, Lanes::max, Lanes::max);
        assert_bit_exact("fmod", a, b, Lanes::fmod, Lanes::fmod, Lanes::fmod);
        assert_bit_exact("lt", a, b, Lanes::cmp_lt, Lanes::cmp_lt, Lanes::cmp_lt);
        assert_bit_exact("ge", a, b, Lanes::cmp_ge, Lanes::cmp_ge, Lanes::cmp_ge);
        assert_bit_exact(
            "sqrt",
            a,
            b,
            |_, y| Lanes::sqrt(y),
            |_, y| y.sqrt(),
            |_, y| y.sqrt(),
        );
        assert_bit_exact(
            "clamp",
            a,
            b,
            |x, _| Lanes::clamp(x, -10.0, 10.0),
            |x, _| x.clamp(-10.0, 10.0),
            |x, _| x.clamp(-10.0, 10.0),
        );
        assert_bit_exact(
            "floor",
            a,
            b,
            |x, _| Lanes::floor(x),
            |x, _| x.floor(),
            |x, _| x.floor(),
        );
    }
}

#[test]
fn transcendentals_are_bit_exact_across_widths() {
    let rng = fastrand::Rng::with_seed(11);
    for _ in 0..SAMPLES {
        let a = random_lanes(&rng, -20.0, 20.0);
        let b = random_lanes(&rng, 0.01, 4.0);
        assert_bit_exact(
            "exp",
            a,
            b,
            |x, _| Lanes::exp(x),
            |x, _| x.exp(),
            |x, _| x.exp(),
        );
        assert_bit_exact(
            "pow",
            b,
            a,
            |x, y| Lanes::pow(x, y * 0.1),
            |x, y| x.pow(y * 0.1),
            |x, y| x.pow(y * 0.1),
        );
        assert_bit_exact(
            "sin",
            a,
            b,
            |x, _| Lanes::sin(x),
            |x, _| x.sin(),
            |x, _| x.sin(),
        );
    }
}

#[test]
fn exp_tracks_std_within_tolerance() {
    let rng = fastrand::Rng::with_seed(3);
    for _ in 0..4096 {
        let x = -30.0 + 40.0 * rng.f32();
        let expected = x.exp();
        let got = Lanes::exp(x);
        let rel = ((got - expected) / expected).abs();
        assert!(rel < 1e-5, "exp({x}) = {got}, expected {expected}");
    }
}

#[test]
fn pow_tracks_std_within_tolerance() {
    let rng = fastrand::Rng::with_seed(5);
    for _ in 0..4096 {
        let x = 0.001 + 8.0 * rng.f32();
        let y = -2.5 + 5.0 * rng.f32();
        let expected = x.powf(y);
        let got = Lanes::pow(x, y);
        let rel = ((got - expected) / expected).abs();
        assert!(rel < 1e-4, "pow({x}, {y}) = {got}, expected {expected}");
    }
}

#[test]
fn pow_of_zero_is_zero_not_nan() {
    let got = Lanes::pow(0.0_f32, 1.0 / 2.2);
    assert!(got.is_finite());
    assert!(got < 1e-6);
}

#[test]
fn sin_tracks_std_within_tolerance() {
    let rng = fastrand::Rng::with_seed(9);
    for _ in 0..4096 {
        let x = -50.0 + 100.0 * rng.f32();
        let got = Lanes::sin(x);
        assert!((got - x.sin()).abs() < 1e-5, "sin({x}) = {got}");
    }
}

#[test]
fn fmod_follows_platform_remainder() {
    let cases = [
        (5.5_f32, 2.0_f32),
        (-5.5, 2.0),
        (7.25, 0.5),
        (-0.75, 1.0),
        (13.0, 4.0),
        (-13.0, 4.0),
        (0.3, 1.0),
        (2.0, 0.3),
    ];
    for (a, b) in cases {
        let got = Lanes::fmod(a, b);
        assert!((got - a % b).abs() < 1e-6, "fmod({a}, {b}) = {got}");
        assert!(got == 0.0 || got.signum() == a.signum());
    }
}

#[test]
fn packed_vectors_match_scalar_vectors() {
    let rng = fastrand::Rng::with_seed(17);
    for _ in 0..SAMPLES / 8 {
        let points: [Vec3; 8] = std::array::from_fn(|_| {
            Vec3::new(
                -5.0 + 10.0 * rng.f32(),
                -5.0 + 10.0 * rng.f32(),
                -5.0 + 10.0 * rng.f32(),
            )
        });
        let packed = Vec3::<F32x8>::from_lanes(|i| points[i]);
        let normalized = packed.normalize();
        let lengths = packed.len();
        for (i, p) in points.iter().enumerate() {
            assert_eq!(normalized.lane(i), p.normalize());
            assert_eq!(lengths.lane(i).to_bits(), p.len().to_bits());
        }
    }
}

#[test]
fn comparisons_produce_unit_masks() {
    let a = F32x8::from([-1.0, 0.0, 1.0, 2.0, -3.0, 4.0, 0.5, 9.0]);
    let lt = a.cmp_lt(1.0).to_array();
    assert_eq!(lt, [1.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
    let eq = a.cmp_eq(0.0).to_array();
    assert_eq!(eq, [0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
}
