//! Compile configuration.
//!
//! [`CompileConfig`] carries the values a family would otherwise
//! hard-code. It deserializes from TOML with every field optional:
//!
//! ```toml
//! input_dir = "input"
//! default_domain_radius = 50.0
//! sources_marker = "$SOURCES"
//! extra_denied_identifiers = ["system"]
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Settings shared by every compilation a family performs.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompileConfig {
    /// Local directory prefix for required files and `input` attributes. Default: `input`.
    pub input_dir: String,
    /// Mesher extent radius when `SIMULATION_DOMAIN_RADIUS` is absent. Default: 50.
    pub default_domain_radius: f64,
    /// Source-linkage marker appended to the solver definition. Default: `$SOURCES`.
    pub sources_marker: String,
    /// Identifiers added to the fixed sanitizer denylist.
    pub extra_denied_identifiers: Vec<String>,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            input_dir: "input".to_owned(),
            default_domain_radius: 50.0,
            sources_marker: "$SOURCES".to_owned(),
            extra_denied_identifiers: Vec::new(),
        }
    }
}

impl CompileConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_dir.is_empty() {
            return Err(ConfigError::EmptyInputDir);
        }
        if !self.default_domain_radius.is_finite() || self.default_domain_radius <= 0.0 {
            return Err(ConfigError::InvalidRadius {
                value: self.default_domain_radius,
            });
        }
        if self.sources_marker.is_empty() {
            return Err(ConfigError::EmptySourcesMarker);
        }
        if let Some(position) = self
            .extra_denied_identifiers
            .iter()
            .position(|id| id.trim().is_empty())
        {
            return Err(ConfigError::BlankIdentifier { position });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = CompileConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.input_dir, "input");
        assert_eq!(config.default_domain_radius, 50.0);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = CompileConfig::from_toml_str("default_domain_radius = 75.0").unwrap();
        assert_eq!(config.default_domain_radius, 75.0);
        assert_eq!(config.sources_marker, "$SOURCES");
    }

    #[test]
    fn invalid_values_rejected() {
        let cases = [
            ("input_dir = \"\"", "input_dir"),
            ("default_domain_radius = -1.0", "default_domain_radius"),
            ("default_domain_radius = nan", "default_domain_radius"),
            ("sources_marker = \"\"", "sources_marker"),
            ("extra_denied_identifiers = [\"system\", \" \"]", "extra_denied_identifiers[1]"),
            ("mystery = 1", "mystery"),
        ];
        for (text, needle) in cases {
            let err = CompileConfig::from_toml_str(text).unwrap_err();
            assert!(err.to_string().contains(needle), "{text}: {err}");
        }
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ablate.toml");
        std::fs::write(&path, "extra_denied_identifiers = [\"system\"]\n").unwrap();
        let config = CompileConfig::load(&path).unwrap();
        assert_eq!(config.extra_denied_identifiers, ["system"]);
        assert!(matches!(
            CompileConfig::load(dir.path().join("missing.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}
