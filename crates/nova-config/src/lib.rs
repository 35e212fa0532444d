use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Once;

use thiserror::Error;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

mod diagnostics;
mod schema;
mod validation;

pub use diagnostics::{
    ConfigDiagnostics, ConfigValidationError, ConfigWarning, ValidationDiagnostics,
};
pub use schema::json_schema;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(deny_unknown_fields)]
/// Top-level `nova.toml` configuration for the annotation processor.
///
/// Example:
///
/// ```toml
/// [logging]
/// level = "nova_apt=debug"
///
/// [resource_ids]
/// container_name = "R"
/// ```
pub struct NovaConfig {
    /// Global logging settings for Nova crates.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Recovery of symbolic names for folded resource id constants.
    #[serde(default)]
    pub resource_ids: ResourceIdsConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(deny_unknown_fields)]
pub struct ResourceIdsConfig {
    /// Whether annotation arguments are scanned for symbolic constant references at all.
    ///
    /// When disabled every id is reported by its numeric value only.
    #[serde(default = "ResourceIdsConfig::default_enabled")]
    pub enabled: bool,

    /// Simple name used for the container class when rebuilding references
    /// (`R` for Android resource tables).
    ///
    /// When unset, the container's own simple name is used.
    #[serde(default)]
    pub container_name: Option<String>,
}

impl ResourceIdsConfig {
    fn default_enabled() -> bool {
        true
    }
}

impl Default for ResourceIdsConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            container_name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level for all Nova crates.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs in JSON format.
    #[serde(default)]
    pub json: bool,

    /// Mirror logs to stderr.
    #[serde(default = "LoggingConfig::default_stderr")]
    pub stderr: bool,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    fn default_stderr() -> bool {
        true
    }

    pub(crate) fn normalize_level_directives(input: &str) -> String {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Self::default_level();
        }

        match trimmed.to_ascii_lowercase().as_str() {
            // Simple levels should be forgiving about casing and synonyms.
            "trace" => "trace".to_owned(),
            "debug" => "debug".to_owned(),
            "info" => "info".to_owned(),
            "warn" | "warning" => "warn".to_owned(),
            "error" => "error".to_owned(),
            // Anything else is treated as an `EnvFilter` directive string.
            _ => trimmed.to_owned(),
        }
    }

    fn config_env_filter(&self) -> tracing_subscriber::EnvFilter {
        let directives = Self::normalize_level_directives(&self.level);
        tracing_subscriber::EnvFilter::try_new(directives).unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::default()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
        })
    }

    /// Create the effective `EnvFilter` for Nova tracing.
    ///
    /// `LoggingConfig.level` may be either a simple level (`info`, `debug`, ...)
    /// or a full `tracing_subscriber::EnvFilter` directive string.
    ///
    /// If `RUST_LOG` is set, it is merged into the resulting filter.
    pub fn env_filter(&self) -> tracing_subscriber::EnvFilter {
        let env_directives = std::env::var("RUST_LOG")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        let config_directives = Self::normalize_level_directives(&self.level);

        match env_directives {
            Some(env_directives) => {
                let combined = format!("{config_directives},{env_directives}");
                tracing_subscriber::EnvFilter::try_new(combined)
                    .or_else(|_| tracing_subscriber::EnvFilter::try_new(env_directives))
                    .unwrap_or_else(|_| self.config_env_filter())
            }
            None => self.config_env_filter(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
            stderr: Self::default_stderr(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
    #[error("invalid config: {}", join_errors(.0))]
    Invalid(Vec<ConfigValidationError>),
}

fn join_errors(errors: &[ConfigValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // The default `Display` includes a source snippet; keep just the message.
        ConfigError::Toml(err.message().to_owned())
    }
}

impl NovaConfig {
    /// Load a config file from TOML.
    ///
    /// Unknown keys are logged and ignored; semantic validation errors fail the load.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&text)
    }

    /// Load a config from a TOML string. See [`NovaConfig::load_from_path`].
    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        let (config, diagnostics) = Self::load_from_str_with_diagnostics(text)?;
        for key in &diagnostics.unknown_keys {
            tracing::warn!(target: "nova.config", key = %key, "ignoring unknown config key");
        }
        for warning in &diagnostics.warnings {
            tracing::warn!(target: "nova.config", warning = ?warning, "config warning");
        }
        if !diagnostics.is_ok() {
            return Err(ConfigError::Invalid(diagnostics.errors));
        }
        Ok(config)
    }

    /// Load a config from a TOML string and return diagnostics (unknown keys and semantic
    /// validation failures) instead of failing on them.
    pub fn load_from_str_with_diagnostics(
        text: &str,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let (config, unknown_keys) =
            diagnostics::deserialize_toml_with_unknown_keys::<NovaConfig>(text)?;

        let mut diagnostics = ConfigDiagnostics {
            unknown_keys,
            ..ConfigDiagnostics::default()
        };
        diagnostics.extend_validation(config.validate());

        Ok((config, diagnostics))
    }
}

static TRACING_INIT: Once = Once::new();

/// Initializes structured `tracing` logging.
///
/// This function is safe to call multiple times; only the first call installs a
/// global subscriber. If another subscriber is already installed, it is left alone.
pub fn init_tracing(config: &LoggingConfig) {
    TRACING_INIT.call_once(|| {
        let filter = config.env_filter();

        let base_layer: Box<dyn tracing_subscriber::Layer<_> + Send + Sync> = if config.json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(make_writer(config.stderr))
                .with_ansi(false)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(make_writer(config.stderr))
                .with_ansi(false)
                .boxed()
        };

        let subscriber = tracing_subscriber::registry().with(filter).with(base_layer);
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

fn make_writer(stderr: bool) -> BoxMakeWriter {
    if !stderr {
        return BoxMakeWriter::new(std::io::sink);
    }
    // `cargo test` output capture only works for the stdlib's `print!/eprint!`
    // macros. Using `TestWriter` in debug builds keeps unit tests quiet.
    if cfg!(debug_assertions) {
        BoxMakeWriter::new(tracing_subscriber::fmt::writer::TestWriter::with_stderr)
    } else {
        BoxMakeWriter::new(std::io::stderr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = NovaConfig::load_from_str("").expect("empty config");
        assert_eq!(config, NovaConfig::default());
        assert!(config.resource_ids.enabled);
        assert_eq!(config.resource_ids.container_name, None);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn resource_ids_section_is_parsed() {
        let config = NovaConfig::load_from_str(
            "[resource_ids]\nenabled = false\ncontainer_name = \"R\"\n",
        )
        .expect("valid config");

        assert!(!config.resource_ids.enabled);
        assert_eq!(config.resource_ids.container_name.as_deref(), Some("R"));
    }

    #[test]
    fn unknown_keys_are_reported_not_fatal() {
        let (config, diagnostics) = NovaConfig::load_from_str_with_diagnostics(
            "[resource_ids]\ncontainer = \"R\"\n",
        )
        .expect("valid toml");

        assert_eq!(config.resource_ids, ResourceIdsConfig::default());
        assert_eq!(diagnostics.unknown_keys, vec!["resource_ids.container".to_owned()]);
        assert!(diagnostics.is_ok());
    }

    #[test]
    fn invalid_container_name_fails_load() {
        let err = NovaConfig::load_from_str("[resource_ids]\ncontainer_name = \"a.R\"\n")
            .expect_err("dotted container name is rejected");

        match err {
            ConfigError::Invalid(errors) => assert_eq!(errors.len(), 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_toml_is_a_toml_error() {
        let err = NovaConfig::load_from_str("[resource_ids\n").expect_err("broken toml");
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn level_synonyms_are_normalized() {
        assert_eq!(LoggingConfig::normalize_level_directives(" WARNING "), "warn");
        assert_eq!(LoggingConfig::normalize_level_directives(""), "info");
        assert_eq!(
            LoggingConfig::normalize_level_directives("nova_apt=trace"),
            "nova_apt=trace"
        );
    }

    #[test]
    fn init_tracing_can_be_called_twice() {
        let config = LoggingConfig {
            stderr: false,
            ..LoggingConfig::default()
        };
        init_tracing(&config);
        init_tracing(&config);
        tracing::info!("tracing initialized");
    }
}
