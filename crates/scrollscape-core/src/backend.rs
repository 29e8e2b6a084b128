use crate::composite::{BloomSettings, TargetSizes};
use crate::error::RenderError;
use crate::uniforms::{GlobalUniforms, ObjectUniforms};

/// Everything the renderer needs to draw exactly one frame.
#[derive(Clone, Debug)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub globals: GlobalUniforms,
    /// One entry per scene object, in scene order.
    pub objects: Vec<ObjectUniforms>,
    pub backdrop: ObjectUniforms,
    pub bloom: BloomSettings,
    pub hero_amplitude: f32,
    pub wave_amplitude: f32,
    pub lens_offset: f32,
}

/// GPU side of the engine. The web crate implements it with `wgpu`.
pub trait RenderBackend {
    /// Rebuild every size-dependent target. Called once at startup and on each resize.
    fn resize(&mut self, sizes: &TargetSizes);

    fn render(&mut self, frame: &FrameSnapshot) -> Result<(), RenderError>;

    /// Drop GPU buffers, textures and pipelines. Must tolerate repeated calls.
    fn release(&mut self);
}
