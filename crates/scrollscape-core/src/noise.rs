//! CPU port of the simplex gradient noise used by the hero and particle shaders.
//!
//! `noise3` mirrors `shaders/noise.wgsl` operation for operation so values can be
//! checked on the host. Lattice coordinates are hashed with the `(34x² + x) mod 289`
//! permutation polynomial; the CPU side reduces with `rem_euclid`, which keeps every
//! hash input inside `[0, 289)` and the polynomial exactly representable in `f32`.

use crate::constants::{CURL_EPSILON, NOISE_PERIOD};
use glam::{Vec3, Vec4};

const HASH_MODULUS: f32 = 289.0;

// Offsets that decorrelate the three components of the curl potential
const POTENTIAL_OFFSET_Y: Vec3 = Vec3::new(31.416, -47.853, 12.793);
const POTENTIAL_OFFSET_Z: Vec3 = Vec3::new(-233.145, -113.408, -185.31);

#[inline]
fn mod289_3(x: Vec3) -> Vec3 {
    Vec3::new(
        x.x.rem_euclid(HASH_MODULUS),
        x.y.rem_euclid(HASH_MODULUS),
        x.z.rem_euclid(HASH_MODULUS),
    )
}

#[inline]
fn mod289_4(x: Vec4) -> Vec4 {
    Vec4::new(
        x.x.rem_euclid(HASH_MODULUS),
        x.y.rem_euclid(HASH_MODULUS),
        x.z.rem_euclid(HASH_MODULUS),
        x.w.rem_euclid(HASH_MODULUS),
    )
}

#[inline]
fn permute(x: Vec4) -> Vec4 {
    mod289_4((x * 34.0 + 1.0) * x)
}

#[inline]
fn taylor_inv_sqrt(r: Vec4) -> Vec4 {
    Vec4::splat(1.792_842_9) - 0.853_734_7 * r
}

// GLSL-style step: 0 where x < edge, 1 otherwise
#[inline]
fn step3(edge: Vec3, x: Vec3) -> Vec3 {
    Vec3::new(
        if x.x < edge.x { 0.0 } else { 1.0 },
        if x.y < edge.y { 0.0 } else { 1.0 },
        if x.z < edge.z { 0.0 } else { 1.0 },
    )
}

// The kernel repeats every NOISE_PERIOD units along each axis, so large inputs
// are folded back without changing the field.
#[inline]
fn fold(c: f32) -> f32 {
    if c.abs() < NOISE_PERIOD {
        c
    } else {
        c.rem_euclid(NOISE_PERIOD)
    }
}

/// 3D simplex noise in roughly `[-1, 1]`.
///
/// Continuous with a continuous first derivative, deterministic, and finite for
/// every finite input.
pub fn noise3(v: Vec3) -> f32 {
    let v = Vec3::new(fold(v.x), fold(v.y), fold(v.z));
    const C_X: f32 = 1.0 / 6.0;
    const C_Y: f32 = 1.0 / 3.0;

    // First corner
    let i = (v + Vec3::splat(v.dot(Vec3::splat(C_Y)))).floor();
    let x0 = v - i + Vec3::splat(i.dot(Vec3::splat(C_X)));

    // Other corners
    let g = step3(Vec3::new(x0.y, x0.z, x0.x), x0);
    let l = Vec3::ONE - g;
    let l_zxy = Vec3::new(l.z, l.x, l.y);
    let i1 = g.min(l_zxy);
    let i2 = g.max(l_zxy);
    let x1 = x0 - i1 + Vec3::splat(C_X);
    let x2 = x0 - i2 + Vec3::splat(C_Y);
    let x3 = x0 - Vec3::splat(0.5);

    // Permutations
    let i = mod289_3(i);
    let p = permute(
        permute(
            permute(Vec4::splat(i.z) + Vec4::new(0.0, i1.z, i2.z, 1.0))
                + Vec4::splat(i.y)
                + Vec4::new(0.0, i1.y, i2.y, 1.0),
        ) + Vec4::splat(i.x)
            + Vec4::new(0.0, i1.x, i2.x, 1.0),
    );

    // Gradients: 7x7 points over a square, mapped onto an octahedron
    let ns_x = 2.0 / 7.0;
    let ns_y = 0.5 / 7.0 - 1.0;
    let ns_z = 1.0 / 7.0;
    let j = p - 49.0 * (p * ns_z * ns_z).floor();
    let x_ = (j * ns_z).floor();
    let y_ = (j - 7.0 * x_).floor();
    let x = x_ * ns_x + ns_y;
    let y = y_ * ns_x + ns_y;
    let h = Vec4::ONE - x.abs() - y.abs();

    let b0 = Vec4::new(x.x, x.y, y.x, y.y);
    let b1 = Vec4::new(x.z, x.w, y.z, y.w);
    let s0 = b0.floor() * 2.0 + 1.0;
    let s1 = b1.floor() * 2.0 + 1.0;
    let neg_step = |c: f32| if c <= 0.0 { -1.0 } else { 0.0 };
    let sh = Vec4::new(neg_step(h.x), neg_step(h.y), neg_step(h.z), neg_step(h.w));

    let a0 = Vec4::new(b0.x, b0.z, b0.y, b0.w)
        + Vec4::new(s0.x, s0.z, s0.y, s0.w) * Vec4::new(sh.x, sh.x, sh.y, sh.y);
    let a1 = Vec4::new(b1.x, b1.z, b1.y, b1.w)
        + Vec4::new(s1.x, s1.z, s1.y, s1.w) * Vec4::new(sh.z, sh.z, sh.w, sh.w);

    let g0 = Vec3::new(a0.x, a0.y, h.x);
    let g1 = Vec3::new(a0.z, a0.w, h.y);
    let g2 = Vec3::new(a1.x, a1.y, h.z);
    let g3 = Vec3::new(a1.z, a1.w, h.w);

    let norm = taylor_inv_sqrt(Vec4::new(g0.dot(g0), g1.dot(g1), g2.dot(g2), g3.dot(g3)));
    let g0 = g0 * norm.x;
    let g1 = g1 * norm.y;
    let g2 = g2 * norm.z;
    let g3 = g3 * norm.w;

    // Mix contributions from the four corners
    let m = (Vec4::splat(0.6) - Vec4::new(x0.dot(x0), x1.dot(x1), x2.dot(x2), x3.dot(x3)))
        .max(Vec4::ZERO);
    let m = m * m;
    42.0 * (m * m).dot(Vec4::new(g0.dot(x0), g1.dot(x1), g2.dot(x2), g3.dot(x3)))
}

#[inline]
fn potential(p: Vec3) -> Vec3 {
    Vec3::new(
        noise3(p),
        noise3(p + POTENTIAL_OFFSET_Y),
        noise3(p + POTENTIAL_OFFSET_Z),
    )
}

/// Divergence-free flow field: the curl of a noise vector potential, estimated
/// with central differences of width `2 * CURL_EPSILON`.
pub fn curl_noise3(p: Vec3) -> Vec3 {
    let e = CURL_EPSILON;
    let dx = Vec3::new(e, 0.0, 0.0);
    let dy = Vec3::new(0.0, e, 0.0);
    let dz = Vec3::new(0.0, 0.0, e);
    let inv = 1.0 / (2.0 * e);

    let d_dx = (potential(p + dx) - potential(p - dx)) * inv;
    let d_dy = (potential(p + dy) - potential(p - dy)) * inv;
    let d_dz = (potential(p + dz) - potential(p - dz)) * inv;

    Vec3::new(d_dy.z - d_dz.y, d_dz.x - d_dx.z, d_dx.y - d_dy.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permute_stays_inside_hash_range() {
        let p = permute(Vec4::new(0.0, 100.0, 288.0, 578.0));
        for c in p.to_array() {
            assert!((0.0..HASH_MODULUS).contains(&c), "{c} escaped the hash range");
        }
    }

    #[test]
    fn fold_preserves_small_inputs() {
        assert_eq!(fold(-3.25), -3.25);
        assert_eq!(fold(866.0), 866.0);
        assert!(fold(1.0e9) < NOISE_PERIOD);
        assert!(fold(-1.0e9) >= 0.0);
    }

    #[test]
    fn noise_is_periodic_over_fold_period() {
        let p = Vec3::new(0.37, 1.21, -0.5);
        let a = noise3(p);
        let b = noise3(Vec3::new(p.x + 2.0 * NOISE_PERIOD, p.y, p.z));
        assert!((a - b).abs() < 5e-3, "{a} vs {b}");
    }
}
