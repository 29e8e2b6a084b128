//! WGSL sources. Scene programs are assembled from the shared bindings, the
//! noise kernel and one program body.

use crate::scene::Program;

pub static COMMON_WGSL: &str = include_str!("../shaders/common.wgsl");
pub static NOISE_WGSL: &str = include_str!("../shaders/noise.wgsl");
pub static HERO_WGSL: &str = include_str!("../shaders/hero.wgsl");
pub static LIT_WGSL: &str = include_str!("../shaders/lit.wgsl");
pub static WAVE_WGSL: &str = include_str!("../shaders/wave.wgsl");
pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");
pub static FULLSCREEN_WGSL: &str = include_str!("../shaders/fullscreen.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");
pub static LENS_WGSL: &str = include_str!("../shaders/lens.wgsl");

impl Program {
    pub fn vertex_entry(self) -> &'static str {
        match self {
            Program::Hero => "vs_hero",
            Program::Lit => "vs_lit",
            Program::Wave => "vs_wave",
            Program::Particles => "vs_particles",
        }
    }

    pub fn fragment_entry(self) -> &'static str {
        match self {
            Program::Hero => "fs_hero",
            Program::Lit => "fs_lit",
            Program::Wave => "fs_wave",
            Program::Particles => "fs_particles",
        }
    }

    pub fn uses_noise(self) -> bool {
        matches!(self, Program::Hero | Program::Particles)
    }
}

/// Complete module source for one scene program.
pub fn program_source(program: Program) -> String {
    let body = match program {
        Program::Hero => HERO_WGSL,
        Program::Lit => LIT_WGSL,
        Program::Wave => WAVE_WGSL,
        Program::Particles => PARTICLES_WGSL,
    };
    let noise = if program.uses_noise() { NOISE_WGSL } else { "" };
    [COMMON_WGSL, noise, body].join("\n")
}

/// Bright/blur/combine/present passes.
pub fn post_source() -> String {
    [FULLSCREEN_WGSL, POST_WGSL].join("\n")
}

pub fn lens_source() -> String {
    [FULLSCREEN_WGSL, LENS_WGSL].join("\n")
}
