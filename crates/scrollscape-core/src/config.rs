//! Engine tuning with string overrides (fed from `data-*` attributes on the canvas).

use crate::composite::BloomSettings;
use crate::constants::*;
use crate::error::ConfigError;
use crate::particles::ParticleFieldConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LensSettings {
    pub base_offset: f32,
    pub velocity_gain: f32,
    pub max_offset: f32,
}

impl Default for LensSettings {
    fn default() -> Self {
        Self {
            base_offset: LENS_BASE_OFFSET,
            velocity_gain: LENS_VELOCITY_GAIN,
            max_offset: LENS_MAX_OFFSET,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub particle_count: usize,
    pub arms: u32,
    pub field_radius: f32,
    pub field_band: f32,
    pub seed: u64,
    pub hero_wireframe: bool,
    pub bloom: BloomSettings,
    pub lens: LensSettings,
    pub camera_damping: f32,
    pub light_damping: f32,
    pub sway: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            arms: PARTICLE_ARMS,
            field_radius: PARTICLE_RADIUS,
            field_band: PARTICLE_BAND,
            seed: PARTICLE_SEED,
            hero_wireframe: false,
            bloom: BloomSettings::default(),
            lens: LensSettings::default(),
            camera_damping: CAMERA_DAMPING,
            light_damping: LIGHT_DAMPING,
            sway: CAMERA_SWAY,
        }
    }
}

pub const MAX_PARTICLE_COUNT: usize = 1_000_000;
pub const MAX_ARMS: u32 = 16;

/// Keys accepted by [`EngineConfig::apply_override`].
pub const OVERRIDE_KEYS: [&str; 8] = [
    "particle-count",
    "arms",
    "seed",
    "hero-wireframe",
    "bloom-strength",
    "bloom-radius",
    "bloom-threshold",
    "lens-strength",
];

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_in<T>(key: &str, value: &str, lo: T, hi: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd,
{
    let v: T = value.trim().parse().map_err(|_| invalid(key, value))?;
    if v < lo || v > hi {
        return Err(invalid(key, value));
    }
    Ok(v)
}

fn parse_unit_f32(key: &str, value: &str, hi: f32) -> Result<f32, ConfigError> {
    let v = parse_in(key, value, 0.0_f32, hi)?;
    // NaN fails both range comparisons above
    if v.is_nan() {
        return Err(invalid(key, value));
    }
    Ok(v)
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    // A bare attribute (`data-hero-wireframe`) arrives as an empty string
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

impl EngineConfig {
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "particle-count" => self.particle_count = parse_in(key, value, 1, MAX_PARTICLE_COUNT)?,
            "arms" => self.arms = parse_in(key, value, 1, MAX_ARMS)?,
            "seed" => self.seed = parse_in(key, value, 0, u64::MAX)?,
            "hero-wireframe" => self.hero_wireframe = parse_flag(key, value)?,
            "bloom-strength" => self.bloom.strength = parse_unit_f32(key, value, 4.0)?,
            "bloom-radius" => self.bloom.radius = parse_unit_f32(key, value, 4.0)?,
            "bloom-threshold" => self.bloom.threshold = parse_unit_f32(key, value, 8.0)?,
            "lens-strength" => self.lens.velocity_gain = parse_unit_f32(key, value, 10.0)?,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Apply every pair in order. Rejected pairs are returned and leave the
    /// configuration untouched for that key.
    pub fn with_overrides<'a, I>(mut self, pairs: I) -> (Self, Vec<ConfigError>)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut rejected = Vec::new();
        for (key, value) in pairs {
            if let Err(e) = self.apply_override(key, value) {
                rejected.push(e);
            }
        }
        (self, rejected)
    }

    pub fn particle_field(&self) -> ParticleFieldConfig {
        ParticleFieldConfig {
            count: self.particle_count,
            arms: self.arms,
            radius: self.field_radius,
            band: self.field_band,
            seed: self.seed,
            ..ParticleFieldConfig::default()
        }
    }
}
