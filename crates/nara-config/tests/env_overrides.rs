use figment::Jail;
use nara_config::{ConfigError, NaraConfig};
use pretty_assertions::assert_eq;

#[test]
fn nested_env_vars_map_to_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("NARA_CORE__API_KEY", "core-from-env");
        jail.set_env("NARA_PACING__TRANSLATE_LIMIT", "12");
        jail.set_env("NARA_PACING__ARCHIVE__BATCH_SIZE", "3");
        jail.set_env("NARA_NOTIFICATION__ON_SUCCESS", "false");

        let config = NaraConfig::load().expect("config loads");
        assert_eq!(config.core.api_key, "core-from-env");
        assert_eq!(config.pacing.translate_limit, 12);
        assert_eq!(config.pacing.archive.batch_size, 3);
        assert_eq!(config.pacing.archive.item_delay_ms, 2000);
        assert!(!config.notification.on_success);
        Ok(())
    });
}

#[test]
fn invalid_env_value_is_a_config_error() {
    Jail::expect_with(|jail| {
        jail.set_env("NARA_CORE__LIMIT", "lots");
        let err = NaraConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}
