//! The per-frame scheduler.
//!
//! Input callbacks only overwrite fields of [`EngineState`]; `tick` reads them as
//! one snapshot, advances every animated value, and hands a [`FrameSnapshot`] to
//! the backend.

use crate::animation::{
    compute_targets, lens_target, FlyIn, ScrollTracker, SectionBounds, TargetState,
    TriggerLayout,
};
use crate::backend::{FrameSnapshot, RenderBackend};
use crate::composite::{CompositePlan, TargetSizes};
use crate::config::EngineConfig;
use crate::constants::*;
use crate::error::EngineError;
use crate::scene::{Program, Scene};
use crate::state::{pointer_ndc, Camera, EngineState, SurfaceSize, Viewport};
use crate::uniforms::{GlobalUniforms, ObjectUniforms};
use glam::{Vec2, Vec3};
use std::f32::consts::TAU;

/// Page measurements the scroll controller depends on.
#[derive(Clone, Debug, PartialEq)]
pub struct PageLayout {
    pub viewport: Viewport,
    pub document_height: f32,
    pub sections: SectionBounds,
}

impl PageLayout {
    /// One viewport-tall section after another.
    pub fn uniform(viewport: Viewport) -> Self {
        Self {
            viewport,
            document_height: viewport.height * SECTION_COUNT as f32,
            sections: SectionBounds::uniform(viewport.height),
        }
    }
}

/// Damped camera sway and pointer-following light.
#[derive(Clone, Debug)]
pub struct CameraRig {
    pub camera: Camera,
    pub sway: Vec2,
    /// Light position relative to the camera's look-at height.
    pub light_offset: Vec2,
}

impl CameraRig {
    fn new(aspect: f32) -> Self {
        Self {
            camera: Camera::new(aspect),
            sway: Vec2::ZERO,
            light_offset: Vec2::ZERO,
        }
    }

    fn step(&mut self, pointer: Vec2, camera_y: f32, cfg: &EngineConfig) {
        self.sway += (pointer * cfg.sway - self.sway) * cfg.camera_damping;
        self.light_offset += (pointer * LIGHT_RANGE - self.light_offset) * cfg.light_damping;
        self.camera.eye = Vec3::new(self.sway.x, camera_y + self.sway.y, CAMERA_Z);
        self.camera.target = Vec3::new(0.0, camera_y, 0.0);
    }

    pub fn light_position(&self) -> Vec3 {
        Vec3::new(
            self.light_offset.x,
            self.camera.target.y + self.light_offset.y,
            LIGHT_Z,
        )
    }
}

pub struct Engine<B: RenderBackend> {
    backend: B,
    config: EngineConfig,
    scene: Scene,
    state: EngineState,
    rig: CameraRig,
    plan: CompositePlan,
    sizes: TargetSizes,
    page: PageLayout,
    layout: TriggerLayout,
    targets: TargetState,
    tracker: ScrollTracker,
    fly_in: FlyIn,
    lens_offset: f32,
    frame: u64,
    stopped: bool,
}

impl<B: RenderBackend> Engine<B> {
    pub fn new(
        mut backend: B,
        scene: Scene,
        config: EngineConfig,
        plan: CompositePlan,
        page: PageLayout,
        surface: SurfaceSize,
    ) -> Result<Self, EngineError> {
        if surface.is_empty() {
            backend.release();
            return Err(EngineError::EmptySurface {
                width: surface.width,
                height: surface.height,
            });
        }
        let sizes = TargetSizes::new(surface.width, surface.height, &plan);
        backend.resize(&sizes);

        let mut state = EngineState::new(page.viewport, surface);
        state.set_scroll(0.0, page.document_height);
        let layout = TriggerLayout::new(&page.sections, page.viewport.height, page.document_height);
        let targets = compute_targets(state.progress, &layout);
        let lens_offset = config.lens.base_offset;
        log::info!("[engine] {}x{} composite: {}", surface.width, surface.height, plan);
        log::debug!("[engine] trigger windows {:?}", layout.windows);

        let mut engine = Self {
            backend,
            config,
            scene,
            state,
            rig: CameraRig::new(surface.aspect()),
            plan,
            sizes,
            page,
            layout,
            targets,
            tracker: ScrollTracker::default(),
            fly_in: FlyIn::default(),
            lens_offset,
            frame: 0,
            stopped: false,
        };
        engine.apply_targets();
        Ok(engine)
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        if self.stopped {
            return;
        }
        self.state.pointer = pointer_ndc(x, y, &self.state.viewport);
    }

    pub fn on_scroll(&mut self, scroll_y: f32, document_height: f32) {
        if self.stopped {
            return;
        }
        let section = self.state.section;
        if document_height != self.page.document_height {
            self.page.document_height = document_height;
            self.rebuild_triggers();
        }
        self.state.set_scroll(scroll_y, document_height);
        if self.state.section != section {
            log::debug!("[engine] section {} -> {}", section, self.state.section);
        }
    }

    /// Apply a new surface size and page layout. Every size-dependent value is
    /// updated here, before the next frame reads any of them.
    pub fn on_resize(&mut self, page: PageLayout, surface: SurfaceSize) {
        if self.stopped {
            return;
        }
        if surface.is_empty() {
            log::debug!("[engine] ignoring empty resize {}x{}", surface.width, surface.height);
            return;
        }
        self.state.viewport = page.viewport;
        self.state.surface = surface;
        self.rig.camera.aspect = surface.aspect();
        self.sizes = TargetSizes::new(surface.width, surface.height, &self.plan);
        self.backend.resize(&self.sizes);
        self.page = page;
        self.rebuild_triggers();
        self.state.document_height = self.page.document_height;
        self.state.refresh_scroll();
    }

    fn rebuild_triggers(&mut self) {
        self.layout = TriggerLayout::new(
            &self.page.sections,
            self.page.viewport.height,
            self.page.document_height,
        );
    }

    /// Advance one frame. Returns `false` once the engine has been torn down.
    pub fn tick(&mut self, dt_sec: f32) -> bool {
        if self.stopped {
            return false;
        }
        let dt = if dt_sec.is_finite() {
            dt_sec.clamp(0.0, MAX_FRAME_DT_SEC)
        } else {
            0.0
        };
        self.state.time += dt;
        let time = self.state.time;

        let velocity = self.tracker.update(self.state.progress);
        self.targets = compute_targets(self.state.progress, &self.layout);
        self.apply_targets();
        self.fly_in.update(self.targets.features_entered, time);

        self.rig
            .step(self.state.pointer, self.targets.camera_y, &self.config);

        for obj in self.scene.objects.iter_mut() {
            let r = obj.transform.rotation + obj.spin * dt;
            obj.transform.rotation =
                Vec3::new(r.x.rem_euclid(TAU), r.y.rem_euclid(TAU), r.z.rem_euclid(TAU));
        }
        self.place_objects(time);

        let target = lens_target(velocity, &self.config.lens);
        self.lens_offset += (target - self.lens_offset) * LENS_SMOOTHING;

        let snapshot = self.snapshot();
        if let Err(e) = self.backend.render(&snapshot) {
            if e.is_transient() {
                log::warn!("[engine] frame {} skipped: {}", self.frame, e);
            } else {
                log::error!("[engine] frame {} failed: {}", self.frame, e);
            }
        }
        self.frame += 1;
        true
    }

    fn apply_targets(&mut self) {
        self.state.wave_amplitude = self.targets.wave_amplitude;
        self.state.bar_heights = self.targets.bar_heights;
        self.state.contact_scale = self.targets.contact_scale;
        if let Some(&offset) = self.targets.backdrop_offsets.first() {
            self.scene.backdrop.offset_y = offset;
        }
    }

    fn place_objects(&mut self, time: f32) {
        let roles = self.scene.roles.clone();
        for (i, &idx) in roles.features.iter().enumerate() {
            let done = self.fly_in.completion(i, time);
            let from = Vec3::from(FEATURE_REVEAL_FROM[i]);
            let obj = &mut self.scene.objects[idx];
            obj.transform.translation = obj.home.translation + from * (1.0 - done);
        }
        for (i, &idx) in roles.bars.iter().enumerate() {
            let obj = &mut self.scene.objects[idx];
            obj.transform.scale.y = self.state.bar_heights[i] * BAR_TARGET_HEIGHTS[i];
        }
        let wire = &mut self.scene.objects[roles.contact_wire];
        wire.transform.scale = Vec3::splat(self.state.contact_scale);
    }

    fn snapshot(&self) -> FrameSnapshot {
        let size = self.state.surface;
        let globals = GlobalUniforms::new(
            self.rig.camera.view_projection(),
            self.rig.camera.eye,
            self.rig.light_position(),
            LIGHT_COLOR,
            self.state.pointer,
            [size.width as f32, size.height as f32],
            self.state.time,
            self.state.progress,
            self.state.viewport.pixel_ratio,
        );
        let hero_amplitude = self.scene.objects[self.scene.roles.hero].material.extra[0];
        let objects = self
            .scene
            .objects
            .iter()
            .enumerate()
            .map(|(i, obj)| {
                let amplitude = match obj.material.program {
                    Program::Hero => hero_amplitude,
                    Program::Wave => self.state.wave_amplitude,
                    _ => 0.0,
                };
                ObjectUniforms::for_object(self.scene.world_matrix(i), obj, amplitude)
            })
            .collect();
        let backdrop = &self.scene.backdrop;
        FrameSnapshot {
            frame: self.frame,
            globals,
            objects,
            backdrop: ObjectUniforms::for_particles(backdrop.matrix(), &backdrop.motion),
            bloom: self.config.bloom,
            hero_amplitude,
            wave_amplitude: self.state.wave_amplitude,
            lens_offset: self.lens_offset,
        }
    }

    /// Stop ticking and release the backend. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.backend.release();
        log::info!("[engine] torn down after {} frames", self.frame);
    }

    pub fn is_running(&self) -> bool {
        !self.stopped
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn camera(&self) -> &Camera {
        &self.rig.camera
    }

    /// Look-at height of the camera, before pointer sway.
    pub fn camera_y(&self) -> f32 {
        self.rig.camera.target.y
    }

    pub fn light_position(&self) -> Vec3 {
        self.rig.light_position()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn plan(&self) -> &CompositePlan {
        &self.plan
    }

    pub fn sizes(&self) -> &TargetSizes {
        &self.sizes
    }

    pub fn targets(&self) -> &TargetState {
        &self.targets
    }

    pub fn trigger_layout(&self) -> &TriggerLayout {
        &self.layout
    }

    pub fn lens_offset(&self) -> f32 {
        self.lens_offset
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
