/// Renderer constants for the web front-end.
///
/// Scene and animation tuning lives in `scrollscape_core::constants`; the
/// values here only concern GPU formats and pass bookkeeping.
pub const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

// Background clear colour of the scene pass (linear)
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.012,
    g: 0.014,
    b: 0.035,
    a: 1.0,
};

// Post uniforms live in one buffer, one 256-byte slot per source texture
pub const POST_SLOT_STRIDE: u64 = 256;
pub const POST_SLOT_HDR: u64 = 0;
pub const POST_SLOT_BLOOM_A: u64 = 1;
pub const POST_SLOT_BLOOM_B: u64 = 2;
pub const POST_SLOT_COUNT: u64 = 3;

// Bloom blur direction per pass
pub const BLUR_DIR_H: [f32; 2] = [1.0, 0.0];
pub const BLUR_DIR_V: [f32; 2] = [0.0, 1.0];

// Vertices per particle quad (two triangles)
pub const PARTICLE_QUAD_VERTICES: u32 = 6;
