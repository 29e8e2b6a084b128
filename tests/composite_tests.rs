// Host-side tests for compositing order, target sizing and uniform layouts.

use scrollscape_core::{
    CompositePlan, GlobalUniforms, LensUniforms, ObjectUniforms, PassAvailability, PostUniforms,
    Stage, SurfaceSize, TargetSizes, OBJECT_UNIFORM_STRIDE,
};

fn avail(on: bool) -> PassAvailability {
    if on {
        PassAvailability::Available
    } else {
        PassAvailability::Unavailable("not supported".into())
    }
}

#[test]
fn full_chain_is_scene_bloom_lens() {
    let plan = CompositePlan::new(avail(true), avail(true));
    assert_eq!(
        plan.stages(),
        &[
            Stage::Scene,
            Stage::Bloom { to_display: false },
            Stage::Lens { tonemap: false }
        ]
    );
    assert_eq!(plan.to_string(), "scene -> bloom -> lens");
    assert!(plan.needs_combined_target());
}

#[test]
fn missing_passes_are_skipped_in_order() {
    let bloom_only = CompositePlan::new(avail(true), avail(false));
    assert_eq!(
        bloom_only.stages(),
        &[Stage::Scene, Stage::Bloom { to_display: true }]
    );
    assert_eq!(bloom_only.to_string(), "scene -> bloom");

    let lens_only = CompositePlan::new(avail(false), avail(true));
    assert_eq!(
        lens_only.stages(),
        &[Stage::Scene, Stage::Lens { tonemap: true }]
    );

    let bare = CompositePlan::new(avail(false), avail(false));
    assert_eq!(bare.stages(), &[Stage::Scene, Stage::Present]);
    assert_eq!(bare.to_string(), "scene -> present");
    assert!(!bare.needs_combined_target());
}

#[test]
fn exactly_the_last_stage_writes_the_display() {
    for bloom in [true, false] {
        for lens in [true, false] {
            let plan = CompositePlan::new(avail(bloom), avail(lens));
            let stages = plan.stages();
            assert_eq!(stages[0], Stage::Scene);
            assert_eq!(stages.iter().filter(|s| s.writes_display()).count(), 1);
            assert!(stages[stages.len() - 1].writes_display());
        }
    }
}

#[test]
fn availability_reason_is_kept() {
    let plan = CompositePlan::new(avail(false), avail(true));
    assert_eq!(
        plan.bloom_availability().to_string(),
        "unavailable (not supported)"
    );
    assert_eq!(plan.lens_availability(), &PassAvailability::Available);
}

#[test]
fn bloom_targets_are_half_resolution() {
    let plan = CompositePlan::new(avail(true), avail(true));
    let sizes = TargetSizes::new(1024, 768, &plan);
    assert_eq!(sizes.scene, SurfaceSize::new(1024, 768));
    assert_eq!(sizes.bloom, Some(SurfaceSize::new(512, 384)));
    assert_eq!(sizes.combined, Some(SurfaceSize::new(1024, 768)));
    assert!(sizes.matches_surface());

    let tiny = TargetSizes::new(1, 1, &plan);
    assert_eq!(tiny.bloom, Some(SurfaceSize::new(1, 1)));
    let odd = TargetSizes::new(801, 3, &plan);
    assert_eq!(odd.bloom, Some(SurfaceSize::new(400, 1)));
}

#[test]
fn no_bloom_means_no_bloom_targets() {
    let plan = CompositePlan::new(avail(false), avail(true));
    let sizes = TargetSizes::new(640, 480, &plan);
    assert_eq!(sizes.bloom, None);
    assert_eq!(sizes.combined, None);
}

#[test]
fn uniform_layouts_match_the_wgsl_structs() {
    use std::mem::size_of;
    assert_eq!(size_of::<GlobalUniforms>(), 144);
    assert_eq!(size_of::<ObjectUniforms>(), 192);
    assert_eq!(size_of::<PostUniforms>(), 32);
    assert_eq!(size_of::<LensUniforms>(), 16);
    assert!(size_of::<ObjectUniforms>() as u64 <= OBJECT_UNIFORM_STRIDE);
}
