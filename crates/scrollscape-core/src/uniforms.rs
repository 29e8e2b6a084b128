//! GPU uniform layouts shared by the renderer and the WGSL programs.
//!
//! Field order and padding mirror the structs in `shaders/common.wgsl` and
//! `shaders/post.wgsl`; sizes are pinned by tests.

use crate::scene::{DrawStyle, Geometry, Material, Program, SceneObject};
use glam::{Mat4, Vec2, Vec3};

/// Dynamic-offset stride for per-object uniforms (WebGPU minimum alignment).
pub const OBJECT_UNIFORM_STRIDE: u64 = 256;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    pub light_pos: [f32; 4],
    pub light_color: [f32; 4],
    pub pointer: [f32; 2],
    pub resolution: [f32; 2],
    pub time: f32,
    pub progress: f32,
    pub pixel_ratio: f32,
    pub _pad: f32,
}

impl GlobalUniforms {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        view_proj: Mat4,
        camera_pos: Vec3,
        light_pos: Vec3,
        light_color: [f32; 3],
        pointer: Vec2,
        resolution: [f32; 2],
        time: f32,
        progress: f32,
        pixel_ratio: f32,
    ) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            camera_pos: camera_pos.extend(1.0).to_array(),
            light_pos: light_pos.extend(1.0).to_array(),
            light_color: [light_color[0], light_color[1], light_color[2], 1.0],
            pointer: pointer.to_array(),
            resolution,
            time,
            progress,
            pixel_ratio,
            _pad: 0.0,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    /// rgb + opacity
    pub color: [f32; 4],
    /// rgb + emissive
    pub accent: [f32; 4],
    pub extra: [f32; 4],
    /// Program-specific scalars.
    pub params: [f32; 4],
}

fn rgba(rgb: [f32; 3], a: f32) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], a]
}

impl ObjectUniforms {
    /// Pack a mesh or point object. `amplitude` is the per-frame scalar the
    /// hero and wave programs scale their displacement by.
    pub fn for_object(model: Mat4, object: &SceneObject, amplitude: f32) -> Self {
        let m: &Material = &object.material;
        let mut extra = rgba(m.extra, 0.0);
        let params = match (&object.geometry, m.program) {
            (Geometry::Points { motion, .. }, _) => {
                extra = [motion.pointer_radius, motion.repulsion, motion.alpha, 0.0];
                [
                    motion.size,
                    motion.curl_strength,
                    motion.curl_scale,
                    motion.curl_speed,
                ]
            }
            (_, Program::Hero) => {
                let wire = if m.style == DrawStyle::Lines { 1.0 } else { 0.0 };
                [amplitude, m.extra[1], m.extra[2], wire]
            }
            (_, Program::Wave) => [
                amplitude,
                crate::constants::WAVE_FREQUENCY_X,
                crate::constants::WAVE_FREQUENCY_Z,
                crate::constants::WAVE_SPEED,
            ],
            _ => [0.0; 4],
        };
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: model.inverse().transpose().to_cols_array_2d(),
            color: rgba(m.color, m.opacity),
            accent: rgba(m.accent, m.emissive),
            extra,
            params,
        }
    }

    /// Uniforms for a bare particle layer (the backdrop).
    pub fn for_particles(model: Mat4, motion: &crate::scene::ParticleMotion) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: Mat4::IDENTITY.to_cols_array_2d(),
            color: [1.0; 4],
            accent: [1.0, 1.0, 1.0, 0.0],
            extra: [motion.pointer_radius, motion.repulsion, motion.alpha, 0.0],
            params: [
                motion.size,
                motion.curl_strength,
                motion.curl_scale,
                motion.curl_speed,
            ],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PostUniforms {
    pub resolution: [f32; 2],
    pub time: f32,
    pub radius: f32,
    pub blur_dir: [f32; 2],
    pub bloom_strength: f32,
    pub threshold: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LensUniforms {
    pub resolution: [f32; 2],
    pub offset: f32,
    /// 1.0 when the input is raw HDR and must be tone-mapped here.
    pub tonemap: f32,
}
