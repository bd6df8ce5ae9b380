use anyhow::Context;
use nara_config::NaraConfig;

/// Load `.env`, then the layered config, and reject values no job can run with.
pub fn load_config() -> anyhow::Result<NaraConfig> {
    let config = NaraConfig::load_with_dotenv().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    warn_unconfigured(&config, std::env::vars());
    Ok(config)
}

/// Warn about env vars that look like config but were not picked up.
fn warn_unconfigured<I>(config: &NaraConfig, env: I)
where
    I: IntoIterator<Item = (String, String)>,
{
    for warning in collect_unconfigured_warnings(config, env) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &NaraConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    if config.core.api_key.is_empty() && has_env_prefix(&env_keys, "NARA_CORE_") {
        warnings.push(
            "CORE API key is empty while NARA_CORE_* env vars exist. Use double underscores (example: NARA_CORE__API_KEY)."
                .to_string(),
        );
    }
    if !config.gemini.is_configured() && has_env_prefix(&env_keys, "NARA_GEMINI_") {
        warnings.push(
            "Gemini config appears default while NARA_GEMINI_* env vars exist. Use double underscores (example: NARA_GEMINI__API_KEY)."
                .to_string(),
        );
    }
    if !config.storage.is_configured() && has_env_prefix(&env_keys, "NARA_STORAGE_") {
        warnings.push(
            "Storage config appears default while NARA_STORAGE_* env vars exist. Use double underscores (example: NARA_STORAGE__BUCKET)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter()
        .any(|key| key.starts_with(prefix) && !key.contains("__"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn single_underscore_keys_are_flagged() {
        let warnings = collect_unconfigured_warnings(
            &NaraConfig::default(),
            env(&[("NARA_GEMINI_API_KEY", "k"), ("PATH", "/bin")]),
        );
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("NARA_GEMINI__API_KEY"));
    }

    #[test]
    fn double_underscore_keys_are_fine() {
        let warnings = collect_unconfigured_warnings(
            &NaraConfig::default(),
            env(&[("NARA_CORE__API_KEY", "k"), ("NARA_STORAGE__BUCKET", "b")]),
        );
        assert!(warnings.is_empty());
    }
}
