//! Frontend configuration
//!
//! The bundle has no runtime environment, so overrides are read at compile
//! time from `LIBRIS_API_URL` and `LIBRIS_CHECK_INTERVAL_MS`.

use libris_core::LibrisConfig;

/// Configuration for this build
pub fn load() -> LibrisConfig {
    apply_overrides(
        LibrisConfig::default(),
        option_env!("LIBRIS_API_URL"),
        option_env!("LIBRIS_CHECK_INTERVAL_MS"),
    )
}

fn apply_overrides(
    mut config: LibrisConfig,
    api_url: Option<&str>,
    check_interval_ms: Option<&str>,
) -> LibrisConfig {
    if let Some(url) = api_url.filter(|url| !url.is_empty()) {
        config.api.base_url = url.to_string();
    }
    if let Some(raw) = check_interval_ms {
        match raw.parse() {
            Ok(ms) => config.session.check_interval_ms = ms,
            Err(_) => tracing::warn!(value = raw, "Ignoring invalid LIBRIS_CHECK_INTERVAL_MS"),
        }
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides() {
        let config = apply_overrides(
            LibrisConfig::default(),
            Some("https://library.example.org"),
            Some("15000"),
        );
        assert_eq!(config.api.base_url, "https://library.example.org");
        assert_eq!(config.session.check_interval_ms, 15_000);
    }

    #[test]
    fn test_invalid_or_empty_overrides_are_ignored() {
        let config = apply_overrides(LibrisConfig::default(), Some(""), Some("soon"));
        assert_eq!(config, LibrisConfig::default());
    }
}
