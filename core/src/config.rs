use std::path::Path;

use serde::Deserialize;

use crate::display::Locale;
use crate::error::ConfigError;
use crate::estimator::DEFAULT_SAFETY_FACTOR;

/// Estimator settings, usually embedded by the host app as TOML.
///
/// ```toml
/// safety_factor = 0.8
/// locale = "japanese"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EstimatorConfig {
    /// Share of the raw duration reported as the safe duration.
    pub safety_factor: f64,
    pub locale: Locale,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            safety_factor: DEFAULT_SAFETY_FACTOR,
            locale: Locale::default(),
        }
    }
}

impl EstimatorConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let s = std::fs::read_to_string(path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string.
    pub fn load_from_str(s: &str) -> Result<Self, ConfigError> {
        let config: EstimatorConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.safety_factor > 0.0 && self.safety_factor <= 1.0) {
            return Err(ConfigError::OutOfRange {
                key: "safety_factor",
                message: format!("must be in (0, 1], got {}", self.safety_factor),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = EstimatorConfig::load_from_str("").unwrap();
        assert_eq!(config, EstimatorConfig::default());
        assert_eq!(config.safety_factor, 0.8);
        assert_eq!(config.locale, Locale::English);
    }

    #[test]
    fn test_config_loads_from_str() {
        let config = EstimatorConfig::load_from_str(
            r#"
safety_factor = 0.7
locale = "japanese"
"#,
        )
        .unwrap();
        assert_eq!(config.safety_factor, 0.7);
        assert_eq!(config.locale, Locale::Japanese);
    }

    #[test]
    fn test_config_rejects_bad_safety_factor() {
        for bad in ["safety_factor = 0.0", "safety_factor = 1.5", "safety_factor = -0.2", "safety_factor = nan"] {
            let err = EstimatorConfig::load_from_str(bad).unwrap_err();
            assert!(
                err.to_string().contains("safety_factor"),
                "unexpected error for {bad}: {err}"
            );
        }
        assert!(EstimatorConfig::load_from_str("safety_factor = 1.0").is_ok());
    }

    #[test]
    fn test_config_rejects_unknown_keys_and_locales() {
        let err = EstimatorConfig::load_from_str("margin = 0.8").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = EstimatorConfig::load_from_str(r#"locale = "klingon""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_config_loads_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "safety_factor = 0.75").unwrap();
        let config = EstimatorConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.safety_factor, 0.75);

        let err = EstimatorConfig::load_from_path("/nonexistent/o2supply.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
