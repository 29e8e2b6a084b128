// Host-side tests for the frame scheduler, driven through a recording backend.

use scrollscape_core::constants::{BAR_TARGET_HEIGHTS, CONTACT_SCALE_END, MAX_FRAME_DT_SEC};
use scrollscape_core::{
    CompositePlan, Engine, EngineConfig, EngineError, FrameSnapshot, PageLayout, PassAvailability,
    RenderBackend, RenderError, Scene, SurfaceSize, TargetSizes, Viewport,
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct Log {
    resizes: Vec<TargetSizes>,
    frames: Vec<FrameSnapshot>,
    releases: usize,
    fail_with: Option<RenderError>,
}

struct Recorder(Rc<RefCell<Log>>);

impl RenderBackend for Recorder {
    fn resize(&mut self, sizes: &TargetSizes) {
        self.0.borrow_mut().resizes.push(*sizes);
    }

    fn render(&mut self, frame: &FrameSnapshot) -> Result<(), RenderError> {
        let mut log = self.0.borrow_mut();
        log.frames.push(frame.clone());
        match log.fail_with.clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn release(&mut self) {
        self.0.borrow_mut().releases += 1;
    }
}

fn config() -> EngineConfig {
    EngineConfig {
        particle_count: 1_000,
        ..EngineConfig::default()
    }
}

fn full_plan() -> CompositePlan {
    CompositePlan::new(PassAvailability::Available, PassAvailability::Available)
}

fn page(width: f32, height: f32) -> PageLayout {
    PageLayout::uniform(Viewport::new(width, height, 1.0))
}

fn engine_with(
    plan: CompositePlan,
    surface: SurfaceSize,
) -> (Result<Engine<Recorder>, EngineError>, Rc<RefCell<Log>>) {
    let log = Rc::new(RefCell::new(Log::default()));
    let cfg = config();
    let scene = Scene::build(&cfg);
    let engine = Engine::new(
        Recorder(log.clone()),
        scene,
        cfg,
        plan,
        page(surface.width as f32, surface.height as f32),
        surface,
    );
    (engine, log)
}

fn engine() -> (Engine<Recorder>, Rc<RefCell<Log>>) {
    let (engine, log) = engine_with(full_plan(), SurfaceSize::new(800, 600));
    (engine.expect("engine starts on a non-empty surface"), log)
}

#[test]
fn first_frame_draws_the_hero_at_rest() {
    let (mut engine, log) = engine();
    assert!(engine.tick(1.0 / 60.0));

    let log = log.borrow();
    assert_eq!(log.resizes.len(), 1);
    assert_eq!(log.resizes[0].surface, SurfaceSize::new(800, 600));
    assert_eq!(log.frames.len(), 1);
    assert_eq!(log.frames[0].globals.resolution, [800.0, 600.0]);
    assert_eq!(log.frames[0].objects.len(), engine.scene().objects.len());

    assert_eq!(engine.state().progress, 0.0);
    assert_eq!(engine.camera_y(), 0.0);
    assert_eq!(engine.frame_count(), 1);
}

#[test]
fn scrolling_to_the_bottom_reaches_the_contact_state() {
    let (mut engine, _log) = engine();
    engine.on_scroll(2400.0, 3000.0);
    engine.tick(1.0 / 60.0);

    assert_eq!(engine.state().progress, 1.0);
    assert_eq!(engine.state().section, 4);
    assert!((engine.camera_y() + 40.0).abs() < 1e-4);

    let scene = engine.scene();
    let wire = &scene.objects[scene.roles.contact_wire];
    assert!((wire.transform.scale.x - CONTACT_SCALE_END).abs() < 1e-5);
    for (i, &idx) in scene.roles.bars.iter().enumerate() {
        let bar = &scene.objects[idx];
        assert!((bar.transform.scale.y - BAR_TARGET_HEIGHTS[i]).abs() < 1e-5);
    }
}

#[test]
fn pointer_in_the_corner_eases_camera_and_light() {
    let (mut engine, _log) = engine();
    engine.on_pointer_move(800.0, 0.0);
    assert_eq!(engine.state().pointer.to_array(), [1.0, 1.0]);

    let mut last_eye = engine.camera().eye.x;
    let mut last_light = engine.light_position().x;
    for _ in 0..120 {
        engine.tick(1.0 / 60.0);
        let eye = engine.camera().eye.x;
        let light = engine.light_position().x;
        assert!(eye >= last_eye && eye <= 0.5);
        assert!(light >= last_light && light <= 4.0);
        last_eye = eye;
        last_light = light;
    }
    assert!(last_eye > 0.4);
    assert!(last_light > 3.9);
}

#[test]
fn teardown_stops_the_loop_and_releases_once() {
    let (mut engine, log) = engine();
    engine.tick(0.016);
    engine.teardown();
    assert!(!engine.is_running());
    assert!(!engine.tick(0.016));
    engine.teardown();
    engine.on_scroll(1200.0, 3000.0);
    engine.on_pointer_move(10.0, 10.0);

    let log = log.borrow();
    assert_eq!(log.releases, 1);
    assert_eq!(log.frames.len(), 1);
    assert_eq!(engine.state().progress, 0.0);
    assert_eq!(engine.frame_count(), 1);
}

#[test]
fn resize_updates_every_size_dependent_value() {
    let (mut engine, log) = engine();
    engine.on_resize(page(1024.0, 768.0), SurfaceSize::new(1024, 768));
    engine.tick(0.016);

    let sizes = *engine.sizes();
    assert_eq!(sizes.surface, SurfaceSize::new(1024, 768));
    assert_eq!(sizes.bloom, Some(SurfaceSize::new(512, 384)));
    assert_eq!(sizes.combined, Some(SurfaceSize::new(1024, 768)));
    assert!(sizes.matches_surface());
    assert!((engine.camera().aspect - 1024.0 / 768.0).abs() < 1e-6);

    let log = log.borrow();
    assert_eq!(log.resizes.last(), Some(&sizes));
    let frame = log.frames.last().expect("one frame rendered");
    assert_eq!(frame.globals.resolution, [1024.0, 768.0]);
}

#[test]
fn empty_resize_is_ignored() {
    let (mut engine, log) = engine();
    engine.on_resize(page(0.0, 0.0), SurfaceSize::new(0, 0));
    assert_eq!(engine.sizes().surface, SurfaceSize::new(800, 600));
    assert_eq!(log.borrow().resizes.len(), 1);
}

#[test]
fn plan_without_bloom_allocates_no_bloom_targets() {
    let plan = CompositePlan::new(
        PassAvailability::Unavailable("pipeline rejected".into()),
        PassAvailability::Available,
    );
    let (engine, _log) = engine_with(plan, SurfaceSize::new(640, 480));
    let engine = engine.expect("engine starts");
    assert_eq!(engine.sizes().bloom, None);
    assert_eq!(engine.sizes().combined, None);
}

#[test]
fn empty_surface_is_rejected_and_releases_the_backend() {
    let (engine, log) = engine_with(full_plan(), SurfaceSize::new(0, 600));
    match engine {
        Err(e) => assert_eq!(
            e,
            EngineError::EmptySurface {
                width: 0,
                height: 600
            }
        ),
        Ok(_) => panic!("empty surface accepted"),
    }
    let log = log.borrow();
    assert_eq!(log.releases, 1);
    assert!(log.resizes.is_empty());
}

#[test]
fn frame_delta_is_clamped() {
    let (mut engine, _log) = engine();
    engine.tick(5.0);
    assert_eq!(engine.state().time, MAX_FRAME_DT_SEC);
    engine.tick(f32::NAN);
    engine.tick(-1.0);
    assert_eq!(engine.state().time, MAX_FRAME_DT_SEC);
}

#[test]
fn render_errors_do_not_stop_the_loop() {
    let (mut engine, log) = engine();
    log.borrow_mut().fail_with = Some(RenderError::SurfaceLost);
    assert!(engine.tick(0.016));
    log.borrow_mut().fail_with = Some(RenderError::OutOfMemory);
    assert!(engine.tick(0.016));
    log.borrow_mut().fail_with = None;
    assert!(engine.tick(0.016));
    assert_eq!(engine.frame_count(), 3);
    assert_eq!(log.borrow().frames.len(), 3);
}

#[test]
fn features_fly_in_once_entered() {
    let (mut engine, _log) = engine();
    engine.on_scroll(1200.0, 3000.0);
    for _ in 0..30 {
        engine.tick(MAX_FRAME_DT_SEC);
    }
    let scene = engine.scene();
    for &idx in &scene.roles.features {
        let obj = &scene.objects[idx];
        assert_eq!(obj.transform.translation, obj.home.translation);
    }
}

#[test]
fn features_wait_offscreen_before_entry() {
    let (mut engine, _log) = engine();
    engine.tick(0.016);
    let scene = engine.scene();
    let idx = scene.roles.features[0];
    let obj = &scene.objects[idx];
    assert_ne!(obj.transform.translation, obj.home.translation);
}

#[test]
fn fast_scrolling_widens_the_lens_fringe() {
    let (mut engine, _log) = engine();
    engine.tick(0.016);
    let resting = engine.lens_offset();
    engine.on_scroll(600.0, 3000.0);
    engine.tick(0.016);
    assert!(engine.lens_offset() > resting);
}

#[test]
fn document_growth_rebuilds_trigger_windows() {
    let (mut engine, _log) = engine();
    let before = engine.trigger_layout().clone();
    engine.on_scroll(0.0, 6000.0);
    assert_ne!(engine.trigger_layout(), &before);
    assert_eq!(engine.state().document_height, 6000.0);
}
