// Host-side tests for the CPU noise kernel.

use glam::Vec3;
use scrollscape_core::constants::CURL_EPSILON;
use scrollscape_core::{curl_noise3, noise3};

fn sample_points() -> Vec<Vec3> {
    let mut pts = Vec::new();
    for i in -4..=4 {
        for j in -3..=3 {
            for k in -2..=2 {
                pts.push(Vec3::new(i as f32 * 0.73, j as f32 * 1.31 + 0.2, k as f32 * 2.07 - 0.4));
            }
        }
    }
    pts
}

#[test]
fn noise_is_deterministic() {
    for p in sample_points() {
        assert_eq!(noise3(p).to_bits(), noise3(p).to_bits());
    }
}

#[test]
fn noise_stays_roughly_in_unit_range() {
    for p in sample_points() {
        let n = noise3(p);
        assert!(n.abs() <= 1.05, "noise3({p}) = {n}");
    }
}

#[test]
fn noise_is_not_constant() {
    let values: Vec<f32> = sample_points().into_iter().map(noise3).collect();
    let min = values.iter().cloned().fold(f32::INFINITY, f32::min);
    let max = values.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    assert!(max - min > 0.5, "range {min}..{max}");
}

#[test]
fn noise_is_finite_for_extreme_inputs() {
    let extremes = [
        Vec3::splat(1.0e30),
        Vec3::splat(-1.0e30),
        Vec3::new(f32::MAX, f32::MIN, 0.0),
        Vec3::new(1.0e7, -3.0e6, 12345.678),
        Vec3::splat(f32::MIN_POSITIVE),
    ];
    for p in extremes {
        assert!(noise3(p).is_finite(), "noise3({p}) not finite");
        let c = curl_noise3(p);
        assert!(c.is_finite(), "curl_noise3({p}) = {c}");
    }
}

#[test]
fn noise_is_continuous() {
    let h = 1.0e-3;
    for p in sample_points() {
        for d in [Vec3::X, Vec3::Y, Vec3::Z] {
            let delta = (noise3(p + d * h) - noise3(p)).abs();
            assert!(delta < 0.05, "jump of {delta} at {p}");
        }
    }
}

#[test]
fn curl_is_approximately_divergence_free() {
    let h = CURL_EPSILON;
    let inv = 1.0 / (2.0 * h);
    for i in 0..6 {
        for j in 0..6 {
            for k in 0..4 {
                let p = Vec3::new(i as f32 * 0.375, j as f32 * 0.25 - 0.5, k as f32 * 0.5 + 1.0);
                let div = (curl_noise3(p + Vec3::X * h).x - curl_noise3(p - Vec3::X * h).x) * inv
                    + (curl_noise3(p + Vec3::Y * h).y - curl_noise3(p - Vec3::Y * h).y) * inv
                    + (curl_noise3(p + Vec3::Z * h).z - curl_noise3(p - Vec3::Z * h).z) * inv;
                assert!(div.abs() < 1.0e-2, "divergence {div} at {p}");
            }
        }
    }
}

#[test]
fn curl_has_useful_magnitude() {
    let total: f32 = sample_points()
        .into_iter()
        .map(|p| curl_noise3(p).length())
        .sum();
    assert!(total > 0.0);
}
