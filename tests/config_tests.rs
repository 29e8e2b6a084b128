// Host-side tests for configuration overrides.

use scrollscape_core::constants::{BLOOM_STRENGTH, PARTICLE_COUNT};
use scrollscape_core::{ConfigError, EngineConfig, OVERRIDE_KEYS};

#[test]
fn defaults_match_the_tuning_constants() {
    let cfg = EngineConfig::default();
    assert_eq!(cfg.particle_count, PARTICLE_COUNT);
    assert_eq!(cfg.bloom.strength, BLOOM_STRENGTH);
    assert!(!cfg.hero_wireframe);
    let field = cfg.particle_field();
    assert_eq!(field.count, cfg.particle_count);
    assert_eq!(field.arms, cfg.arms);
    assert_eq!(field.seed, cfg.seed);
}

#[test]
fn valid_overrides_are_applied() {
    let (cfg, rejected) = EngineConfig::default().with_overrides([
        ("particle-count", "2500"),
        ("arms", " 5 "),
        ("seed", "99"),
        ("hero-wireframe", "true"),
        ("bloom-strength", "1.5"),
        ("lens-strength", "3"),
    ]);
    assert!(rejected.is_empty(), "{rejected:?}");
    assert_eq!(cfg.particle_count, 2500);
    assert_eq!(cfg.arms, 5);
    assert_eq!(cfg.seed, 99);
    assert!(cfg.hero_wireframe);
    assert_eq!(cfg.bloom.strength, 1.5);
    assert_eq!(cfg.lens.velocity_gain, 3.0);
}

#[test]
fn out_of_range_values_are_rejected() {
    let defaults = EngineConfig::default();
    for (key, value) in [
        ("particle-count", "0"),
        ("particle-count", "2000000"),
        ("arms", "17"),
        ("bloom-strength", "-1"),
        ("bloom-strength", "5"),
        ("lens-strength", "11"),
        ("seed", "-3"),
        ("hero-wireframe", "maybe"),
    ] {
        let mut cfg = defaults.clone();
        let err = cfg.apply_override(key, value).expect_err(key);
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string()
            }
        );
        assert_eq!(cfg, defaults, "{key}={value} changed the config");
    }
}

#[test]
fn unknown_keys_are_reported_and_skipped() {
    let (cfg, rejected) =
        EngineConfig::default().with_overrides([("sparkle", "1"), ("arms", "4")]);
    assert_eq!(rejected, vec![ConfigError::UnknownKey("sparkle".into())]);
    assert_eq!(cfg.arms, 4);
}

#[test]
fn every_listed_key_is_accepted() {
    for key in OVERRIDE_KEYS {
        let mut cfg = EngineConfig::default();
        let value = if key == "hero-wireframe" { "off" } else { "1" };
        assert!(cfg.apply_override(key, value).is_ok(), "{key}");
    }
}
