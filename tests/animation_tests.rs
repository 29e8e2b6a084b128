// Host-side tests for the scroll-linked animation controller.

use scrollscape_core::constants::{
    CONTACT_SCALE_END, CONTACT_SCALE_START, REVEAL_DURATION_SEC, REVEAL_STAGGER_SEC,
    TOTAL_SECTION_SPAN, WAVE_PEAK_AMPLITUDE,
};
use scrollscape_core::{
    compute_targets, lens_target, FlyIn, LensSettings, ScrollTracker, Section, SectionBounds,
    TargetState, TriggerLayout,
};

const VH: f32 = 600.0;

fn uniform_layout() -> TriggerLayout {
    TriggerLayout::new(&SectionBounds::uniform(VH), VH, VH * 5.0)
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

fn assert_same_scrub(a: &TargetState, b: &TargetState) {
    assert!(close(a.camera_y, b.camera_y));
    assert!(close(a.wave_amplitude, b.wave_amplitude));
    assert!(close(a.contact_scale, b.contact_scale));
    for i in 0..4 {
        assert!(close(a.bar_heights[i], b.bar_heights[i]), "bar {i}");
    }
}

#[test]
fn trigger_windows_follow_the_80_20_rule() {
    let layout = uniform_layout();
    // max scroll = 4 viewports
    let features = layout.window(Section::Features);
    assert!(close(features.start, 0.2 / 4.0));
    assert!(close(features.end, 1.8 / 4.0));
    let showcase = layout.window(Section::Showcase);
    assert!(close(showcase.start, 1.2 / 4.0));
    assert!(close(showcase.end, 2.8 / 4.0));
    let stats = layout.window(Section::Stats);
    assert!(close(stats.start, 2.2 / 4.0));
    assert!(close(stats.end, 3.8 / 4.0));
}

#[test]
fn windows_are_clamped_to_the_reachable_range() {
    let layout = uniform_layout();
    assert_eq!(layout.window(Section::Hero).start, 0.0);
    assert_eq!(layout.window(Section::Contact).end, 1.0);
    for w in layout.windows {
        assert!(w.start >= 0.0 && w.end <= 1.0 && w.start <= w.end);
    }
}

#[test]
fn unscrollable_page_collapses_every_window() {
    let layout = TriggerLayout::new(&SectionBounds::uniform(VH), VH, VH);
    for w in layout.windows {
        assert_eq!((w.start, w.end), (0.0, 0.0));
    }
    let t = compute_targets(0.0, &layout);
    assert!(t.camera_y.is_finite());
}

#[test]
fn progress_zero_is_the_rest_state() {
    let t = compute_targets(0.0, &uniform_layout());
    assert_eq!(t.camera_y, 0.0);
    assert_eq!(t.wave_amplitude, 0.0);
    assert_eq!(t.bar_heights, [0.0; 4]);
    assert_eq!(t.contact_scale, CONTACT_SCALE_START);
    assert!(!t.features_entered);
}

#[test]
fn progress_one_is_the_end_state() {
    let t = compute_targets(1.0, &uniform_layout());
    assert!(close(t.camera_y, -TOTAL_SECTION_SPAN));
    assert!(close(t.contact_scale, CONTACT_SCALE_END));
    assert_eq!(t.bar_heights, [1.0; 4]);
    assert!(close(t.wave_amplitude, 0.0));
    assert!(t.features_entered);
}

#[test]
fn wave_peaks_mid_window() {
    let layout = uniform_layout();
    let w = layout.window(Section::Showcase);
    let mid = (w.start + w.end) / 2.0;
    let t = compute_targets(mid, &layout);
    assert!(close(t.wave_amplitude, WAVE_PEAK_AMPLITUDE));
    let before = compute_targets(w.start + 0.05, &layout).wave_amplitude;
    let after = compute_targets(w.end - 0.05, &layout).wave_amplitude;
    assert!(before > 0.0 && before < WAVE_PEAK_AMPLITUDE);
    assert!(close(before, after));
}

#[test]
fn scrubbing_is_reversible() {
    let layout = uniform_layout();
    for (path, end) in [(vec![0.0, 0.5, 0.2], 0.2), (vec![0.0, 0.95, 0.7], 0.7)] {
        let mut last = None;
        for p in path {
            last = Some(compute_targets(p, &layout));
        }
        let direct = compute_targets(end, &layout);
        assert_same_scrub(&last.expect("path is non-empty"), &direct);
    }
}

#[test]
fn out_of_range_progress_is_clamped() {
    let layout = uniform_layout();
    assert_eq!(compute_targets(-0.3, &layout), compute_targets(0.0, &layout));
    assert_eq!(compute_targets(1.7, &layout), compute_targets(1.0, &layout));
}

#[test]
fn backdrop_moves_slower_than_the_camera() {
    let t = compute_targets(1.0, &uniform_layout());
    let offset = t.backdrop_offsets[0];
    assert!(offset < 0.0 && offset > t.camera_y);
}

#[test]
fn fly_in_is_one_shot() {
    let mut fly = FlyIn::default();
    fly.update(false, 0.5);
    assert!(!fly.started());
    assert_eq!(fly.completion(0, 10.0), 0.0);

    fly.update(true, 1.0);
    assert!(fly.started());
    assert_eq!(fly.completion(0, 1.0), 0.0);
    assert_eq!(fly.completion(0, 1.0 + REVEAL_DURATION_SEC), 1.0);

    // Staggered: the second object lags the first
    let t = 1.0 + REVEAL_DURATION_SEC * 0.5;
    assert!(fly.completion(1, t) < fly.completion(0, t));
    let done = 1.0 + 2.0 * REVEAL_STAGGER_SEC + REVEAL_DURATION_SEC;
    assert_eq!(fly.completion(2, done), 1.0);

    // Leaving and re-entering does not restart it
    fly.update(false, 5.0);
    fly.update(true, 6.0);
    assert_eq!(fly.completion(0, 1.0 + REVEAL_DURATION_SEC), 1.0);
}

#[test]
fn tracker_reports_per_update_delta() {
    let mut tracker = ScrollTracker::default();
    assert_eq!(tracker.update(0.3), 0.0);
    assert!(close(tracker.update(0.45), 0.15));
    assert!(close(tracker.update(0.4), -0.05));
    assert!(close(tracker.velocity(), -0.05));
    assert_eq!(tracker.update(0.4), 0.0);
}

#[test]
fn lens_target_grows_with_speed_and_saturates() {
    let lens = LensSettings::default();
    assert_eq!(lens_target(0.0, &lens), lens.base_offset);
    let slow = lens_target(0.002, &lens);
    let fast = lens_target(-0.01, &lens);
    assert!(slow > lens.base_offset && fast > slow);
    assert!(close(lens_target(50.0, &lens), lens.base_offset + lens.max_offset));
    assert_eq!(lens_target(f32::NAN, &lens), lens.base_offset);
}
