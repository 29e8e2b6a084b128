//! Static particle buffers: the spiral-disk background field and the contact
//! point cloud.
//!
//! Buffers are generated once from a seeded RNG and never mutated afterwards;
//! all per-frame motion happens in `shaders/particles.wgsl`.

use crate::constants::*;
use crate::geometry::fibonacci_sphere;
use rand::prelude::*;
use std::f32::consts::TAU;

/// One particle as uploaded to the GPU (per-instance vertex attributes).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleRecord {
    pub position: [f32; 3],
    pub scale: f32,
    pub color: [f32; 3],
    pub phase: f32,
    pub randomness: [f32; 3],
}

#[derive(Clone, Debug)]
pub struct ParticleFieldConfig {
    pub count: usize,
    pub arms: u32,
    pub radius: f32,
    pub band: f32,
    pub spin: f32,
    pub arm_spread: f32,
    pub scale_range: (f32, f32),
    pub palette: [[f32; 3]; 4],
    pub seed: u64,
}

impl Default for ParticleFieldConfig {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            arms: PARTICLE_ARMS,
            radius: PARTICLE_RADIUS,
            band: PARTICLE_BAND,
            spin: PARTICLE_SPIN,
            arm_spread: PARTICLE_ARM_SPREAD,
            scale_range: PARTICLE_SCALE_RANGE,
            palette: PARTICLE_PALETTE,
            seed: PARTICLE_SEED,
        }
    }
}

/// Fixed-length particle storage. The length never changes after generation.
#[derive(Clone, Debug)]
pub struct ParticleBuffer {
    records: Vec<ParticleRecord>,
}

impl ParticleBuffer {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ParticleRecord] {
        &self.records
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.records)
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
fn signed_unit(rng: &mut StdRng) -> f32 {
    rng.gen::<f32>() * 2.0 - 1.0
}

/// Spiral-arm disk: square-root radius sampling gives uniform areal density.
pub fn generate_field(cfg: &ParticleFieldConfig) -> ParticleBuffer {
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let arms = cfg.arms.max(1);
    let (scale_lo, scale_hi) = cfg.scale_range;
    let records = (0..cfg.count)
        .map(|_| {
            let radius = rng.gen::<f32>().sqrt() * cfg.radius;
            let arm = rng.gen_range(0..arms);
            let arm_angle = arm as f32 / arms as f32 * TAU;
            let jitter = (rng.gen::<f32>() - 0.5) * cfg.arm_spread;
            let angle = jitter + arm_angle + radius * cfg.spin;
            let y = signed_unit(&mut rng) * cfg.band;
            let scale = lerp(scale_lo, scale_hi, rng.gen::<f32>());
            let phase = rng.gen::<f32>() * TAU;
            let color = cfg.palette[rng.gen_range(0..cfg.palette.len())];
            let randomness = [
                signed_unit(&mut rng),
                signed_unit(&mut rng),
                signed_unit(&mut rng),
            ];
            ParticleRecord {
                position: [angle.cos() * radius, y, angle.sin() * radius],
                scale,
                color,
                phase,
                randomness,
            }
        })
        .collect();
    ParticleBuffer { records }
}

/// Points spread evenly over a sphere, used by the contact section.
pub fn point_sphere(count: usize, radius: f32, color: [f32; 3], seed: u64) -> ParticleBuffer {
    let mut rng = StdRng::seed_from_u64(seed);
    let records = fibonacci_sphere(count, radius)
        .into_iter()
        .map(|p| ParticleRecord {
            position: p.to_array(),
            scale: lerp(0.6, 1.0, rng.gen::<f32>()),
            color,
            phase: rng.gen::<f32>() * TAU,
            randomness: [
                signed_unit(&mut rng),
                signed_unit(&mut rng),
                signed_unit(&mut rng),
            ],
        })
        .collect();
    ParticleBuffer { records }
}
