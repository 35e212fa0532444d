use crate::diagnostics::{ConfigValidationError, ConfigWarning, ValidationDiagnostics};
use crate::{LoggingConfig, NovaConfig};

impl NovaConfig {
    /// Validate semantic invariants for a configuration.
    ///
    /// Validation is best-effort: it attempts to report as many problems as possible in one pass.
    #[must_use]
    pub fn validate(&self) -> ValidationDiagnostics {
        let mut out = ValidationDiagnostics::default();

        validate_logging(self, &mut out);
        validate_resource_ids(self, &mut out);

        out
    }
}

fn validate_logging(config: &NovaConfig, out: &mut ValidationDiagnostics) {
    let normalized = LoggingConfig::normalize_level_directives(&config.logging.level);
    if !config.logging.level.trim().is_empty()
        && tracing_subscriber::EnvFilter::try_new(normalized.clone()).is_err()
    {
        out.warnings.push(ConfigWarning::LoggingLevelInvalid {
            value: config.logging.level.clone(),
            normalized,
        });
    }
}

fn validate_resource_ids(config: &NovaConfig, out: &mut ValidationDiagnostics) {
    let Some(name) = config.resource_ids.container_name.as_deref() else {
        return;
    };
    if !is_java_identifier(name) {
        out.errors.push(ConfigValidationError::InvalidValue {
            toml_path: "resource_ids.container_name".to_owned(),
            message: format!("`{name}` is not a simple Java identifier"),
        });
    }
}

pub(crate) fn is_java_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let start_ok = first == '$' || first == '_' || unicode_ident::is_xid_start(first);
    start_ok && chars.all(|c| c == '$' || unicode_ident::is_xid_continue(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn java_identifiers() {
        assert!(is_java_identifier("R"));
        assert!(is_java_identifier("R2"));
        assert!(is_java_identifier("$Gen_1"));
        assert!(!is_java_identifier(""));
        assert!(!is_java_identifier("1R"));
        assert!(!is_java_identifier("com.example.R"));
        assert!(!is_java_identifier("R class"));
    }

    #[test]
    fn invalid_container_name_is_an_error() {
        let mut config = NovaConfig::default();
        config.resource_ids.container_name = Some("com.example.R".into());

        let diagnostics = config.validate();
        assert_eq!(diagnostics.errors.len(), 1);
        assert!(diagnostics.warnings.is_empty());
    }

    #[test]
    fn garbage_logging_level_is_only_a_warning() {
        let mut config = NovaConfig::default();
        config.logging.level = "nova_apt=verbose".into();

        let diagnostics = config.validate();
        assert!(diagnostics.errors.is_empty());
        assert!(matches!(
            diagnostics.warnings.as_slice(),
            [ConfigWarning::LoggingLevelInvalid { .. }]
        ));
    }
}
