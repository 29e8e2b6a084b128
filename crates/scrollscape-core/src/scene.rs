//! Fixed scene content: five section groups stacked along -Y plus the particle
//! backdrop. Built once at startup; afterwards only transforms change.

use crate::config::EngineConfig;
use crate::constants::*;
use crate::geometry::{self, MeshData, Polyhedron};
use crate::particles::{self, ParticleBuffer};
use glam::{EulerRot, Mat4, Quat, Vec3};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Hero,
    Features,
    Showcase,
    Stats,
    Contact,
}

impl Section {
    pub const ALL: [Section; SECTION_COUNT] = [
        Section::Hero,
        Section::Features,
        Section::Showcase,
        Section::Stats,
        Section::Contact,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Section::Hero => "hero",
            Section::Features => "features",
            Section::Showcase => "showcase",
            Section::Stats => "stats",
            Section::Contact => "contact",
        }
    }

    /// Id of the page element whose bounds define the trigger window.
    pub fn element_id(self) -> &'static str {
        self.name()
    }

    /// World-space Y of the group origin.
    pub fn offset_y(self) -> f32 {
        -(self.index() as f32) * SECTION_SPACING
    }
}

/// Shader program an object is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Program {
    Hero,
    Lit,
    Wave,
    Particles,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawStyle {
    Triangles,
    Lines,
}

/// Per-particle motion parameters pushed alongside a static buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleMotion {
    pub size: f32,
    pub curl_strength: f32,
    pub curl_scale: f32,
    pub curl_speed: f32,
    pub pointer_radius: f32,
    pub repulsion: f32,
    pub alpha: f32,
}

impl Default for ParticleMotion {
    fn default() -> Self {
        Self {
            size: PARTICLE_SIZE,
            curl_strength: CURL_STRENGTH,
            curl_scale: CURL_SCALE,
            curl_speed: CURL_SPEED,
            pointer_radius: POINTER_RADIUS,
            repulsion: POINTER_REPULSION,
            alpha: 0.7,
        }
    }
}

#[derive(Clone, Debug)]
pub enum Geometry {
    Mesh(MeshData),
    Points {
        particles: ParticleBuffer,
        motion: ParticleMotion,
    },
}

impl Geometry {
    pub fn vertex_count(&self) -> usize {
        match self {
            Geometry::Mesh(m) => m.vertices.len(),
            Geometry::Points { particles, .. } => particles.len(),
        }
    }
}

/// Colours and the few program parameters that stay fixed per object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub program: Program,
    pub style: DrawStyle,
    pub color: [f32; 3],
    pub accent: [f32; 3],
    pub extra: [f32; 3],
    pub opacity: f32,
    pub emissive: f32,
}

impl Material {
    pub fn lit(color: [f32; 3]) -> Self {
        Self {
            program: Program::Lit,
            style: DrawStyle::Triangles,
            color,
            accent: [1.0, 1.0, 1.0],
            extra: [0.0; 3],
            opacity: 1.0,
            emissive: 0.15,
        }
    }

    pub fn is_translucent(&self) -> bool {
        matches!(self.program, Program::Wave | Program::Particles) || self.opacity < 1.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    /// XYZ Euler angles in radians.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let rot = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        let scale = self.scale.max(Vec3::splat(MIN_AXIS_SCALE));
        Mat4::from_scale_rotation_translation(scale, rot, self.translation)
    }
}

#[derive(Clone, Debug)]
pub struct SceneObject {
    pub name: &'static str,
    pub section: Section,
    pub geometry: Geometry,
    pub material: Material,
    /// Resting transform relative to the section group.
    pub home: Transform,
    pub transform: Transform,
    /// Continuous rotation rate in radians per second per axis.
    pub spin: Vec3,
}

impl SceneObject {
    fn new(
        name: &'static str,
        section: Section,
        geometry: Geometry,
        material: Material,
        home: Transform,
    ) -> Self {
        Self {
            name,
            section,
            geometry,
            material,
            home,
            transform: home,
            spin: Vec3::ZERO,
        }
    }

    fn spinning(mut self, spin: [f32; 3]) -> Self {
        self.spin = Vec3::from(spin);
        self
    }
}

#[derive(Clone, Debug)]
pub struct SectionGroup {
    pub section: Section,
    pub origin: Vec3,
    pub objects: SmallVec<[usize; 4]>,
}

impl SectionGroup {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.origin)
    }
}

/// Background layer that scrolls at a fraction of the camera speed.
#[derive(Clone, Debug)]
pub struct Backdrop {
    pub particles: ParticleBuffer,
    pub motion: ParticleMotion,
    pub center: Vec3,
    pub parallax_rate: f32,
    pub offset_y: f32,
}

impl Backdrop {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.center + Vec3::Y * self.offset_y)
    }
}

/// Indices into [`Scene::objects`] for the objects the animation drives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneRoles {
    pub hero: usize,
    pub features: [usize; 3],
    pub showcase: usize,
    pub bars: [usize; 4],
    pub contact_wire: usize,
    pub contact_cloud: usize,
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub groups: Vec<SectionGroup>,
    pub objects: Vec<SceneObject>,
    pub backdrop: Backdrop,
    pub roles: SceneRoles,
}

impl Scene {
    pub fn build(cfg: &EngineConfig) -> Self {
        let mut objects: Vec<SceneObject> = Vec::new();
        let mut push = |obj: SceneObject| {
            objects.push(obj);
            objects.len() - 1
        };

        let (p, q) = HERO_KNOT_PQ;
        let knot = geometry::torus_knot(
            HERO_KNOT_RADIUS,
            HERO_KNOT_TUBE,
            HERO_KNOT_TUBULAR_SEGMENTS,
            HERO_KNOT_RADIAL_SEGMENTS,
            p,
            q,
        );
        let hero = push(
            SceneObject::new(
                "hero-knot",
                Section::Hero,
                Geometry::Mesh(knot),
                Material {
                    program: Program::Hero,
                    style: if cfg.hero_wireframe {
                        DrawStyle::Lines
                    } else {
                        DrawStyle::Triangles
                    },
                    color: HERO_LOW_COLOR,
                    accent: HERO_HIGH_COLOR,
                    extra: [HERO_AMPLITUDE, HERO_NOISE_FREQUENCY, HERO_NOISE_SPEED],
                    opacity: 1.0,
                    emissive: 0.2,
                },
                Transform::default(),
            )
            .spinning(HERO_SPIN),
        );

        let kinds = [
            Polyhedron::Tetrahedron,
            Polyhedron::Octahedron,
            Polyhedron::Icosahedron,
        ];
        let mut features = [0usize; 3];
        for (i, kind) in kinds.into_iter().enumerate() {
            features[i] = push(
                SceneObject::new(
                    kind.name(),
                    Section::Features,
                    Geometry::Mesh(geometry::polyhedron(kind, FEATURE_RADIUS)),
                    Material::lit(FEATURE_COLORS[i]),
                    Transform::at(Vec3::new(FEATURE_X[i], 0.0, 0.0)),
                )
                .spinning(FEATURE_SPIN[i]),
            );
        }

        let showcase = push(SceneObject::new(
            "showcase-plane",
            Section::Showcase,
            Geometry::Mesh(geometry::plane(
                SHOWCASE_SIZE,
                SHOWCASE_SIZE,
                SHOWCASE_SEGMENTS,
                SHOWCASE_SEGMENTS,
            )),
            Material {
                program: Program::Wave,
                style: DrawStyle::Triangles,
                color: WAVE_COLORS[0],
                accent: WAVE_COLORS[1],
                extra: WAVE_COLORS[2],
                opacity: WAVE_OPACITY,
                emissive: 0.0,
            },
            Transform {
                rotation: Vec3::new(SHOWCASE_TILT, 0.0, 0.0),
                ..Transform::default()
            },
        ));

        let mut bars = [0usize; 4];
        for i in 0..4 {
            let mut home = Transform::at(Vec3::new(BAR_X[i], BAR_BASE_Y, 0.0));
            home.scale.y = 0.0;
            bars[i] = push(SceneObject::new(
                "stat-bar",
                Section::Stats,
                Geometry::Mesh(geometry::base_box(BAR_WIDTH, 1.0, BAR_WIDTH)),
                Material::lit(BAR_COLORS[i]),
                home,
            ));
        }

        let contact_cloud = push(
            SceneObject::new(
                "contact-cloud",
                Section::Contact,
                Geometry::Points {
                    particles: particles::point_sphere(
                        CONTACT_POINT_COUNT,
                        CONTACT_CLOUD_RADIUS,
                        CONTACT_COLOR,
                        cfg.seed.wrapping_add(1),
                    ),
                    motion: ParticleMotion {
                        size: PARTICLE_SIZE * 0.8,
                        curl_strength: CURL_STRENGTH * 0.25,
                        ..ParticleMotion::default()
                    },
                },
                Material {
                    program: Program::Particles,
                    style: DrawStyle::Triangles,
                    color: CONTACT_COLOR,
                    accent: [1.0; 3],
                    extra: [0.0; 3],
                    opacity: 1.0,
                    emissive: 0.0,
                },
                Transform::default(),
            )
            .spinning([0.0, -0.1, 0.0]),
        );

        let contact_wire = push(
            SceneObject::new(
                "contact-wire",
                Section::Contact,
                Geometry::Mesh(geometry::uv_sphere(CONTACT_WIRE_RADIUS, 24, 16)),
                Material {
                    style: DrawStyle::Lines,
                    emissive: 0.8,
                    ..Material::lit(CONTACT_COLOR)
                },
                Transform::default(),
            )
            .spinning(CONTACT_WIRE_SPIN),
        );

        let groups = Section::ALL
            .iter()
            .map(|&section| SectionGroup {
                section,
                origin: Vec3::new(0.0, section.offset_y(), 0.0),
                objects: objects
                    .iter()
                    .enumerate()
                    .filter(|(_, o)| o.section == section)
                    .map(|(i, _)| i)
                    .collect(),
            })
            .collect();

        let backdrop = Backdrop {
            particles: particles::generate_field(&cfg.particle_field()),
            motion: ParticleMotion::default(),
            center: particle_field_center(),
            parallax_rate: PARALLAX_RATES[0],
            offset_y: 0.0,
        };

        log::info!(
            "[scene] {} objects in {} sections, backdrop {} particles",
            objects.len(),
            SECTION_COUNT,
            backdrop.particles.len()
        );

        Self {
            groups,
            objects,
            backdrop,
            roles: SceneRoles {
                hero,
                features,
                showcase,
                bars,
                contact_wire,
                contact_cloud,
            },
        }
    }

    pub fn group(&self, section: Section) -> &SectionGroup {
        &self.groups[section.index()]
    }

    /// World matrix of object `index`: group translation times local transform.
    pub fn world_matrix(&self, index: usize) -> Mat4 {
        let obj = &self.objects[index];
        self.group(obj.section).matrix() * obj.transform.matrix()
    }
}
