//! Engine-wide state written by the input layer and read by the frame scheduler.
//!
//! These types avoid referencing platform APIs; the web frontend fills them from
//! DOM queries and event callbacks.

use crate::constants::{CAMERA_FOVY, CAMERA_Z, CAMERA_ZFAR, CAMERA_ZNEAR, SECTION_COUNT};
use glam::{Mat4, Vec2, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Drawable surface size in device pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Layout viewport in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }
}

/// Normalised scroll position through the document.
///
/// `max(1, extent)` guards the division; a document that cannot scroll reports 0.
/// Positions outside the scrollable range are clamped to `[0, 1]`.
pub fn scroll_progress(scroll_y: f32, document_height: f32, viewport_height: f32) -> f32 {
    let extent = document_height - viewport_height;
    if extent.is_nan() || extent <= 0.0 || !scroll_y.is_finite() {
        return 0.0;
    }
    (scroll_y.max(0.0) / extent.max(1.0)).clamp(0.0, 1.0)
}

/// `floor(scroll_y / viewport_height)`, limited to the existing sections.
pub fn section_index(scroll_y: f32, viewport_height: f32) -> usize {
    if viewport_height.is_nan() || viewport_height <= 0.0 || scroll_y.is_nan() || scroll_y <= 0.0 {
        return 0;
    }
    ((scroll_y / viewport_height).floor() as usize).min(SECTION_COUNT - 1)
}

/// Pointer in screen pixels to `[-1, 1]²` with +Y up.
pub fn pointer_ndc(x: f32, y: f32, viewport: &Viewport) -> Vec2 {
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return Vec2::ZERO;
    }
    let nx = x / viewport.width * 2.0 - 1.0;
    let ny = -(y / viewport.height * 2.0 - 1.0);
    Vec2::new(nx, ny).clamp(Vec2::NEG_ONE, Vec2::ONE)
}

#[derive(Clone, Debug)]
pub struct EngineState {
    pub viewport: Viewport,
    pub surface: SurfaceSize,
    pub pointer: Vec2,
    pub time: f32,
    pub scroll_y: f32,
    pub document_height: f32,
    pub progress: f32,
    pub section: usize,
    pub bar_heights: [f32; 4],
    pub wave_amplitude: f32,
    pub contact_scale: f32,
}

impl EngineState {
    pub fn new(viewport: Viewport, surface: SurfaceSize) -> Self {
        Self {
            viewport,
            surface,
            pointer: Vec2::ZERO,
            time: 0.0,
            scroll_y: 0.0,
            document_height: viewport.height * SECTION_COUNT as f32,
            progress: 0.0,
            section: 0,
            bar_heights: [0.0; 4],
            wave_amplitude: 0.0,
            contact_scale: 1.0,
        }
    }

    /// Record a scroll sample and derive progress and the current section.
    pub fn set_scroll(&mut self, scroll_y: f32, document_height: f32) {
        self.scroll_y = scroll_y;
        self.document_height = document_height;
        self.refresh_scroll();
    }

    pub fn refresh_scroll(&mut self) {
        self.progress = scroll_progress(self.scroll_y, self.document_height, self.viewport.height);
        self.section = section_index(self.scroll_y, self.viewport.height);
    }
}
