use glam::Vec3;

// Shared scene and animation tuning constants.

// Section layout
pub const SECTION_COUNT: usize = 5;
pub const SECTION_SPACING: f32 = 10.0; // world units between section groups
pub const TOTAL_SECTION_SPAN: f32 = SECTION_SPACING * (SECTION_COUNT as f32 - 1.0);

// Camera
pub const CAMERA_Z: f32 = 6.0;
pub const CAMERA_FOVY: f32 = std::f32::consts::FRAC_PI_4;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;
pub const CAMERA_SWAY: f32 = 0.5; // world units of sway at the pointer extremes
pub const CAMERA_DAMPING: f32 = 0.05; // fraction of the remaining distance per tick

// Point light that follows the pointer
pub const LIGHT_RANGE: f32 = 4.0;
pub const LIGHT_Z: f32 = 3.0;
pub const LIGHT_DAMPING: f32 = 0.08;
pub const LIGHT_COLOR: [f32; 3] = [1.0, 0.92, 0.85];

// Trigger windows, as fractions of the viewport height
pub const TRIGGER_ENTER_VIEWPORT: f32 = 0.8; // section top reaches 80% of the viewport
pub const TRIGGER_EXIT_VIEWPORT: f32 = 0.2; // section bottom reaches 20% of the viewport

// Scrubbed values
pub const WAVE_PEAK_AMPLITUDE: f32 = 0.6;
pub const BAR_STAGGER: f32 = 0.1; // fraction of the window between consecutive bars
pub const BAR_RISE: f32 = 0.6; // fraction of the window one bar takes to reach full height
pub const CONTACT_SCALE_START: f32 = 1.0;
pub const CONTACT_SCALE_END: f32 = 2.5;

// Features fly-in
pub const REVEAL_DURATION_SEC: f32 = 1.2;
pub const REVEAL_STAGGER_SEC: f32 = 0.15;

// Background parallax rates, relative to camera travel
pub const PARALLAX_RATES: [f32; 1] = [0.2];

// Lens distortion driven by scroll velocity
pub const LENS_BASE_OFFSET: f32 = 0.0015;
pub const LENS_VELOCITY_GAIN: f32 = 1.5;
pub const LENS_MAX_OFFSET: f32 = 0.03;
pub const LENS_SMOOTHING: f32 = 0.1;

// Bloom
pub const BLOOM_STRENGTH: f32 = 0.9;
pub const BLOOM_RADIUS: f32 = 1.0;
pub const BLOOM_THRESHOLD: f32 = 0.6;

// Hero torus knot
pub const HERO_KNOT_RADIUS: f32 = 1.2;
pub const HERO_KNOT_TUBE: f32 = 0.35;
pub const HERO_KNOT_TUBULAR_SEGMENTS: u32 = 256;
pub const HERO_KNOT_RADIAL_SEGMENTS: u32 = 32;
pub const HERO_KNOT_PQ: (u32, u32) = (2, 3);
pub const HERO_AMPLITUDE: f32 = 0.25;
pub const HERO_NOISE_FREQUENCY: f32 = 1.5;
pub const HERO_NOISE_SPEED: f32 = 0.4;
pub const HERO_LOW_COLOR: [f32; 3] = [0.24, 0.16, 0.9];
pub const HERO_HIGH_COLOR: [f32; 3] = [0.1, 0.85, 1.0];
pub const HERO_SPIN: [f32; 3] = [0.12, 0.2, 0.0]; // radians per second

// Features polyhedra
pub const FEATURE_X: [f32; 3] = [-2.5, 0.0, 2.5];
pub const FEATURE_RADIUS: f32 = 0.9;
pub const FEATURE_REVEAL_FROM: [[f32; 3]; 3] = [[-6.0, -3.0, 0.0], [0.0, -5.0, -6.0], [6.0, -3.0, 0.0]];
pub const FEATURE_SPIN: [[f32; 3]; 3] = [[0.4, 0.6, 0.0], [0.0, 0.5, 0.3], [0.5, 0.0, 0.45]];
pub const FEATURE_COLORS: [[f32; 3]; 3] = [[0.55, 0.4, 1.0], [0.2, 0.8, 1.0], [1.0, 0.45, 0.75]];

// Showcase wave plane
pub const SHOWCASE_SIZE: f32 = 8.0;
pub const SHOWCASE_SEGMENTS: u32 = 128;
pub const SHOWCASE_TILT: f32 = -std::f32::consts::FRAC_PI_3;
pub const WAVE_FREQUENCY_X: f32 = 1.5;
pub const WAVE_FREQUENCY_Z: f32 = 1.2;
pub const WAVE_SPEED: f32 = 0.8;
pub const WAVE_OPACITY: f32 = 0.85;
pub const WAVE_COLORS: [[f32; 3]; 3] = [[0.08, 0.1, 0.45], [0.3, 0.5, 1.0], [0.95, 0.55, 1.0]];

// Stats bars
pub const BAR_X: [f32; 4] = [-1.8, -0.6, 0.6, 1.8];
pub const BAR_WIDTH: f32 = 0.8;
pub const BAR_BASE_Y: f32 = -1.4;
pub const BAR_TARGET_HEIGHTS: [f32; 4] = [2.2, 1.6, 2.8, 2.0];
pub const BAR_COLORS: [[f32; 3]; 4] = [
    [0.42, 0.36, 1.0],
    [0.18, 0.82, 1.0],
    [1.0, 0.38, 0.72],
    [1.0, 0.84, 0.45],
];

// Contact spheres
pub const CONTACT_POINT_COUNT: usize = 2_000;
pub const CONTACT_CLOUD_RADIUS: f32 = 1.6;
pub const CONTACT_WIRE_RADIUS: f32 = 1.0;
pub const CONTACT_WIRE_SPIN: [f32; 3] = [0.15, 0.35, 0.0];
pub const CONTACT_COLOR: [f32; 3] = [0.6, 0.75, 1.0];

// Smallest axis scale applied to a transform so normal matrices stay invertible
pub const MIN_AXIS_SCALE: f32 = 1e-4;

// Particle field
pub const PARTICLE_COUNT: usize = 80_000;
pub const PARTICLE_ARMS: u32 = 3;
pub const PARTICLE_RADIUS: f32 = 12.0;
pub const PARTICLE_BAND: f32 = 3.0; // half-height of the vertical band
pub const PARTICLE_SPIN: f32 = 1.1; // twist in radians per world unit of radius
pub const PARTICLE_ARM_SPREAD: f32 = 0.9; // width in radians of the random jitter around each arm
pub const PARTICLE_SCALE_RANGE: (f32, f32) = (0.5, 1.5);
pub const PARTICLE_SEED: u64 = 42;
pub const PARTICLE_SIZE: f32 = 3.0;
pub const PARTICLE_PALETTE: [[f32; 3]; 4] = [
    [0.42, 0.36, 1.0],  // violet
    [0.18, 0.82, 1.0],  // cyan
    [1.0, 0.38, 0.72],  // pink
    [1.0, 0.84, 0.45],  // amber
];
pub const PARTICLE_FIELD_CENTER: [f32; 3] = [0.0, 0.0, -4.0];

// Particle motion
pub const CURL_EPSILON: f32 = 1.0 / 128.0; // power of two: stencil offsets stay exact on dyadic inputs
pub const CURL_SCALE: f32 = 0.15;
pub const CURL_SPEED: f32 = 0.05;
pub const CURL_STRENGTH: f32 = 0.8;
pub const POINTER_RADIUS: f32 = 0.5; // NDC units; repulsion is zero beyond this
pub const POINTER_REPULSION: f32 = 0.04;

// Noise kernel period along each axis (three hash periods of 289)
pub const NOISE_PERIOD: f32 = 867.0;

// Frame pacing
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

#[inline]
pub fn particle_field_center() -> Vec3 {
    Vec3::from(PARTICLE_FIELD_CENTER)
}
