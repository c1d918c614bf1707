//! Project configuration (`metadoc.toml`) loading.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Conventional configuration file name
pub const CONFIG_FILE_NAME: &str = "metadoc.toml";

/// Default number of warnings listed in reports
const DEFAULT_MAX_LISTED: usize = 50;

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid setting '{0}': {1}")]
    InvalidSetting(&'static str, &'static str),
}

/// The complete metadoc.toml configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetadocConfig {
    /// Documentation resolution behavior.
    pub resolver: ResolverSettings,

    /// Diagnostic reporting.
    pub diagnostics: DiagnosticSettings,
}

/// `[resolver]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverSettings {
    /// Resolve `<exception cref>` targets and record their handles.
    pub resolve_exception_refs: bool,

    /// Warn when an entry replaces documentation already attached.
    pub warn_on_duplicate_docs: bool,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            resolve_exception_refs: true,
            warn_on_duplicate_docs: true,
        }
    }
}

/// `[diagnostics]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagnosticSettings {
    /// Treat any warning as a failed run.
    pub deny_warnings: bool,

    /// Number of warnings printed in the report.
    pub max_listed: usize,
}

impl Default for DiagnosticSettings {
    fn default() -> Self {
        Self {
            deny_warnings: false,
            max_listed: DEFAULT_MAX_LISTED,
        }
    }
}

impl MetadocConfig {
    /// Load configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load configuration, falling back to defaults when the file does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a setting is out of range.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.diagnostics.max_listed == 0 {
            return Err(ConfigError::InvalidSetting(
                "diagnostics.max_listed",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Serialize the configuration to a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
