//! Ordering and sizing of the compositing passes.
//!
//! The renderer decides at startup which optional passes it could create and
//! hands the result to [`CompositePlan::new`]. Everything else here is plain data
//! so the ordering rules can be checked without a GPU.

use crate::constants::{BLOOM_RADIUS, BLOOM_STRENGTH, BLOOM_THRESHOLD};
use crate::state::SurfaceSize;
use smallvec::SmallVec;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BloomSettings {
    pub strength: f32,
    pub radius: f32,
    pub threshold: f32,
}

impl Default for BloomSettings {
    fn default() -> Self {
        Self {
            strength: BLOOM_STRENGTH,
            radius: BLOOM_RADIUS,
            threshold: BLOOM_THRESHOLD,
        }
    }
}

/// Outcome of creating an optional pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PassAvailability {
    Available,
    Unavailable(String),
}

impl PassAvailability {
    pub fn is_available(&self) -> bool {
        matches!(self, PassAvailability::Available)
    }
}

impl fmt::Display for PassAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassAvailability::Available => write!(f, "available"),
            PassAvailability::Unavailable(reason) => write!(f, "unavailable ({reason})"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Scene geometry into the HDR colour target.
    Scene,
    /// Bright pass, separable blur and additive combine.
    Bloom { to_display: bool },
    /// Radial chromatic fringe; `tonemap` when its input is still raw HDR.
    Lens { tonemap: bool },
    /// Tone-map the HDR target straight to the display.
    Present,
}

impl Stage {
    pub fn writes_display(&self) -> bool {
        match self {
            Stage::Scene => false,
            Stage::Bloom { to_display } => *to_display,
            Stage::Lens { .. } | Stage::Present => true,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Scene => "scene",
            Stage::Bloom { .. } => "bloom",
            Stage::Lens { .. } => "lens",
            Stage::Present => "present",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CompositePlan {
    stages: SmallVec<[Stage; 4]>,
    bloom: PassAvailability,
    lens: PassAvailability,
}

impl CompositePlan {
    pub fn new(bloom: PassAvailability, lens: PassAvailability) -> Self {
        let mut stages: SmallVec<[Stage; 4]> = SmallVec::new();
        stages.push(Stage::Scene);
        match (bloom.is_available(), lens.is_available()) {
            (true, true) => {
                stages.push(Stage::Bloom { to_display: false });
                stages.push(Stage::Lens { tonemap: false });
            }
            (true, false) => stages.push(Stage::Bloom { to_display: true }),
            (false, true) => stages.push(Stage::Lens { tonemap: true }),
            (false, false) => stages.push(Stage::Present),
        }
        Self {
            stages,
            bloom,
            lens,
        }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn has_bloom(&self) -> bool {
        self.bloom.is_available()
    }

    pub fn has_lens(&self) -> bool {
        self.lens.is_available()
    }

    pub fn bloom_availability(&self) -> &PassAvailability {
        &self.bloom
    }

    pub fn lens_availability(&self) -> &PassAvailability {
        &self.lens
    }

    /// Bloom output must be kept in HDR when the lens pass still follows it.
    pub fn needs_combined_target(&self) -> bool {
        self.has_bloom() && self.has_lens()
    }
}

impl fmt::Display for CompositePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stage) in self.stages.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", stage.name())?;
        }
        Ok(())
    }
}

/// Dimensions of every intermediate target for one surface size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetSizes {
    pub surface: SurfaceSize,
    pub scene: SurfaceSize,
    pub bloom: Option<SurfaceSize>,
    pub combined: Option<SurfaceSize>,
}

impl TargetSizes {
    pub fn new(width: u32, height: u32, plan: &CompositePlan) -> Self {
        let full = SurfaceSize::new(width.max(1), height.max(1));
        let half = SurfaceSize::new((full.width / 2).max(1), (full.height / 2).max(1));
        Self {
            surface: full,
            scene: full,
            bloom: plan.has_bloom().then_some(half),
            combined: plan.needs_combined_target().then_some(full),
        }
    }

    /// True when every full-resolution target matches the surface.
    pub fn matches_surface(&self) -> bool {
        self.scene == self.surface && self.combined.map_or(true, |c| c == self.surface)
    }
}
