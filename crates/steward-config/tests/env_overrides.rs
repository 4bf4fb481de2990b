use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use steward_config::{ConfigError, StewardConfig};

#[test]
fn env_var_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.set_env("STEWARD_RESOLUTION__MIN_EVIDENCE", "4");
        jail.create_file(
            "config.toml",
            r"
[resolution]
min_description_chars = 75
min_evidence = 2
",
        )?;

        let config: StewardConfig = Figment::from(Serialized::defaults(StewardConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("STEWARD_").split("__"))
            .extract()?;

        assert_eq!(config.resolution.min_evidence, 4);
        assert_eq!(config.resolution.min_description_chars, 75);
        Ok(())
    });
}

#[test]
fn env_var_reaches_load() {
    Jail::expect_with(|jail| {
        jail.set_env("STEWARD_GENERAL__DEFAULT_FORMAT", "raw");

        let config = StewardConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.general.default_format, "raw");
        Ok(())
    });
}

#[test]
fn zero_minimum_from_env_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("STEWARD_RESOLUTION__MIN_DESCRIPTION_CHARS", "0");

        let err = StewardConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}

/// Typo'd keys are silently ignored by figment; the default stands.
#[test]
fn typo_env_var_silently_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("STEWARD_RESOLUTION__MIN_EVIDENSE", "9");

        let config: StewardConfig = Figment::from(Serialized::defaults(StewardConfig::default()))
            .merge(Env::prefixed("STEWARD_").split("__"))
            .extract()?;

        assert_eq!(config.resolution.min_evidence, 1);
        Ok(())
    });
}
