// Host-side tests for scene layout and geometry.

use scrollscape_core::constants::{SECTION_SPACING, TOTAL_SECTION_SPAN};
use scrollscape_core::geometry::{self, Polyhedron};
use scrollscape_core::{DrawStyle, EngineConfig, Geometry, Program, Scene, Section};

fn small_scene(wireframe: bool) -> Scene {
    Scene::build(&EngineConfig {
        particle_count: 500,
        hero_wireframe: wireframe,
        ..EngineConfig::default()
    })
}

#[test]
fn five_groups_stacked_down_the_y_axis() {
    let scene = small_scene(false);
    assert_eq!(scene.groups.len(), 5);
    for (i, group) in scene.groups.iter().enumerate() {
        assert_eq!(group.section, Section::ALL[i]);
        assert_eq!(group.origin.y, -(i as f32) * SECTION_SPACING);
        assert!(!group.objects.is_empty());
    }
    assert_eq!(Section::Contact.offset_y(), -TOTAL_SECTION_SPAN);
}

#[test]
fn roles_point_at_the_right_objects() {
    let scene = small_scene(false);
    let r = &scene.roles;
    assert_eq!(scene.objects[r.hero].material.program, Program::Hero);
    assert_eq!(scene.objects[r.showcase].material.program, Program::Wave);
    assert_eq!(scene.objects[r.contact_cloud].material.program, Program::Particles);
    assert_eq!(scene.objects[r.contact_wire].material.style, DrawStyle::Lines);
    for &idx in &r.features {
        assert_eq!(scene.objects[idx].section, Section::Features);
    }
    for &idx in &r.bars {
        assert_eq!(scene.objects[idx].section, Section::Stats);
    }
    assert_eq!(scene.group(Section::Features).objects.len(), 3);
    assert_eq!(scene.group(Section::Stats).objects.len(), 4);
}

#[test]
fn bars_start_flat() {
    let scene = small_scene(false);
    for &idx in &scene.roles.bars {
        assert_eq!(scene.objects[idx].home.scale.y, 0.0);
        // The matrix stays invertible at zero height
        let m = scene.world_matrix(idx);
        assert!(m.determinant().abs() > 0.0);
    }
}

#[test]
fn wireframe_flag_switches_the_hero_style() {
    let solid = small_scene(false);
    let wire = small_scene(true);
    let style = |s: &Scene| s.objects[s.roles.hero].material.style;
    assert_eq!(style(&solid), DrawStyle::Triangles);
    assert_eq!(style(&wire), DrawStyle::Lines);
}

#[test]
fn backdrop_uses_the_configured_particle_count() {
    let scene = small_scene(false);
    assert_eq!(scene.backdrop.particles.len(), 500);
    assert_eq!(scene.backdrop.offset_y, 0.0);
    match &scene.objects[scene.roles.contact_cloud].geometry {
        Geometry::Points { particles, .. } => assert!(!particles.is_empty()),
        Geometry::Mesh(_) => panic!("contact cloud should be points"),
    }
}

#[test]
fn meshes_have_valid_indices_and_unit_normals() {
    let meshes = [
        geometry::torus_knot(1.2, 0.35, 64, 8, 2, 3),
        geometry::polyhedron(Polyhedron::Tetrahedron, 1.0),
        geometry::polyhedron(Polyhedron::Octahedron, 1.0),
        geometry::polyhedron(Polyhedron::Icosahedron, 1.0),
        geometry::plane(4.0, 4.0, 8, 8),
        geometry::base_box(1.0, 1.0, 1.0),
        geometry::uv_sphere(1.0, 12, 8),
    ];
    for mesh in &meshes {
        assert!(mesh.triangle_count() > 0);
        let n = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n));
        assert!(mesh.edges.iter().all(|&i| i < n));
        assert_eq!(mesh.edges.len() % 2, 0);
        for v in &mesh.vertices {
            let len = glam::Vec3::from(v.normal).length();
            assert!((len - 1.0).abs() < 1e-3, "normal length {len}");
        }
    }
}
