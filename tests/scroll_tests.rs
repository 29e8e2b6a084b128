// Host-side tests for scroll progress, section lookup and pointer mapping.

use scrollscape_core::{pointer_ndc, scroll_progress, section_index, Viewport};

const VH: f32 = 600.0;
const DOC: f32 = 3000.0;

#[test]
fn progress_endpoints() {
    assert_eq!(scroll_progress(0.0, DOC, VH), 0.0);
    assert_eq!(scroll_progress(2400.0, DOC, VH), 1.0);
    assert!((scroll_progress(1200.0, DOC, VH) - 0.5).abs() < 1e-6);
}

#[test]
fn progress_stays_in_unit_range_over_the_scroll_extent() {
    let extent = DOC - VH;
    for i in 0..=240 {
        let y = extent * i as f32 / 240.0;
        let p = scroll_progress(y, DOC, VH);
        assert!((0.0..=1.0).contains(&p), "progress {p} at scroll {y}");
    }
}

#[test]
fn progress_is_monotonic() {
    let mut prev = 0.0;
    for y in (0..2400).step_by(37) {
        let p = scroll_progress(y as f32, DOC, VH);
        assert!(p >= prev);
        prev = p;
    }
}

#[test]
fn progress_is_zero_when_the_document_cannot_scroll() {
    assert_eq!(scroll_progress(0.0, VH, VH), 0.0);
    assert_eq!(scroll_progress(150.0, 400.0, VH), 0.0);
    assert_eq!(scroll_progress(10.0, 0.0, VH), 0.0);
    assert_eq!(scroll_progress(10.0, 0.0, 0.0), 0.0);
}

#[test]
fn progress_outside_the_extent_is_clamped() {
    assert_eq!(scroll_progress(-50.0, DOC, VH), 0.0);
    assert_eq!(scroll_progress(9000.0, DOC, VH), 1.0);
    assert_eq!(scroll_progress(f32::NAN, DOC, VH), 0.0);
    assert_eq!(scroll_progress(f32::INFINITY, DOC, VH), 0.0);
}

#[test]
fn tiny_extent_uses_the_unit_guard() {
    // extent 0.5 px is divided by max(1, extent)
    let p = scroll_progress(0.5, VH + 0.5, VH);
    assert!((p - 0.5).abs() < 1e-6);
}

#[test]
fn section_index_floors_and_clamps() {
    assert_eq!(section_index(0.0, VH), 0);
    assert_eq!(section_index(599.0, VH), 0);
    assert_eq!(section_index(600.0, VH), 1);
    assert_eq!(section_index(1250.0, VH), 2);
    assert_eq!(section_index(2400.0, VH), 4);
    assert_eq!(section_index(1.0e6, VH), 4);
    assert_eq!(section_index(-20.0, VH), 0);
    assert_eq!(section_index(300.0, 0.0), 0);
}

#[test]
fn pointer_maps_to_ndc_with_y_up() {
    let vp = Viewport::new(800.0, 600.0, 1.0);
    assert_eq!(pointer_ndc(0.0, 0.0, &vp).to_array(), [-1.0, 1.0]);
    assert_eq!(pointer_ndc(800.0, 600.0, &vp).to_array(), [1.0, -1.0]);
    assert_eq!(pointer_ndc(400.0, 300.0, &vp).to_array(), [0.0, 0.0]);
    assert_eq!(pointer_ndc(2000.0, -40.0, &vp).to_array(), [1.0, 1.0]);
}

#[test]
fn pointer_on_empty_viewport_is_centered() {
    let vp = Viewport::new(0.0, 0.0, 1.0);
    assert_eq!(pointer_ndc(10.0, 10.0, &vp).to_array(), [0.0, 0.0]);
}
