//! Configuration error types and the validation report.

use super::FieldPath;
use owo_colors::OwoColorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// ConfigError
// ============================================================================

/// Structural failures: conditions where no schema can be applied at all.
///
/// Problems with user data never produce a `ConfigError`; they end up in a
/// [`ValidationReport`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config document must be key/value pairs, got {0}")]
    NotAMapping(&'static str),

    #[error("option `{0}` is declared twice in the same schema")]
    DuplicateOption(String),

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("config file parsing error in `{0}`")]
    Toml(PathBuf, #[source] toml::de::Error),

    // NOTE: No #[from] here - we don't want source() which causes duplicate output
    #[error("{0}")]
    Diagnostics(ValidationReport),
}

// ============================================================================
// ValidationError
// ============================================================================

/// Failure of a single option, carrying a human-readable cause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub hint: Option<String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// ConfigDiagnostic
// ============================================================================

/// A single (field, problem) entry of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDiagnostic {
    /// Config field path (e.g., "theme" or "site_dir")
    pub field: FieldPath,
    /// Problem description
    pub message: String,
    /// Fix hint (optional)
    pub hint: Option<String>,
}

impl ConfigDiagnostic {
    pub fn new(field: impl Into<FieldPath>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    fn from_error(field: FieldPath, err: ValidationError) -> Self {
        Self {
            field,
            message: err.message,
            hint: err.hint,
        }
    }
}

impl fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Field path in cyan brackets
        writeln!(
            f,
            "{}{}{}",
            "[".dimmed(),
            self.field.as_str().cyan(),
            "]".dimmed()
        )?;
        write!(f, "{} {}", "→".red(), self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  {} {}", "hint:".yellow(), hint)?;
        }
        Ok(())
    }
}

// ============================================================================
// ValidationReport
// ============================================================================

/// Ordered errors and warnings produced by one validation pass.
///
/// Entries appear in schema declaration order; warnings about unrecognised
/// keys come last, in the order the keys were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<ConfigDiagnostic>,
    warnings: Vec<ConfigDiagnostic>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: impl Into<FieldPath>, message: impl Into<String>) {
        self.errors.push(ConfigDiagnostic::new(field, message));
    }

    /// Record an option failure, keeping its hint.
    pub fn push_error(&mut self, field: impl Into<FieldPath>, err: ValidationError) {
        self.errors
            .push(ConfigDiagnostic::from_error(field.into(), err));
    }

    pub fn warn(&mut self, field: impl Into<FieldPath>, message: impl Into<String>) {
        self.warnings.push(ConfigDiagnostic::new(field, message));
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn errors(&self) -> &[ConfigDiagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[ConfigDiagnostic] {
        &self.warnings
    }

    /// Split into plain `(field, message)` pairs.
    pub fn into_pairs(self) -> (Vec<(String, String)>, Vec<(String, String)>) {
        let pairs = |list: Vec<ConfigDiagnostic>| {
            list.into_iter()
                .map(|d| (d.field.as_str().to_owned(), d.message))
                .collect()
        };
        (pairs(self.errors), pairs(self.warnings))
    }

    /// Print collected warnings in a grouped format.
    pub fn print_warnings(&self) {
        if self.warnings.is_empty() {
            return;
        }
        crate::log!("warning"; "config warnings:");
        for warning in &self.warnings {
            eprintln!("- {}: {}", warning.field.as_str(), warning.message);
        }
    }

    /// Convert to Result (returns Err if there are errors).
    pub fn into_result(self) -> Result<Self, ConfigError> {
        if self.errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Diagnostics(self))
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}\n", "config validation failed:".red().bold())?;
        for (i, err) in self.errors.iter().enumerate() {
            write!(f, "{err}")?;
            if i + 1 < self.errors.len() {
                writeln!(f, "\n")?;
            }
        }
        if self.errors.len() > 1 {
            write!(
                f,
                "\n\n{} {} {}",
                "found".dimmed(),
                self.errors.len().to_string().red().bold(),
                "errors".dimmed()
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_config_error_display() {
        let io_err = ConfigError::Io(
            PathBuf::from("theme.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        let display = format!("{io_err}");
        assert!(display.contains("IO error"));
        assert!(display.contains("theme.toml"));

        let err = ConfigError::NotAMapping("list");
        assert!(err.to_string().contains("got list"));
    }

    #[test]
    fn test_report_display_lists_every_error() {
        let mut report = ValidationReport::new();
        report.error("site_name", "Required configuration not provided.");
        report.push_error(
            "theme",
            ValidationError::new("Unrecognised theme name: 'nope'.").with_hint("available: mkdocs"),
        );
        let display = report.to_string();
        // styled pieces carry escape codes, check the plain parts
        assert!(display.contains("site_name"));
        assert!(display.contains("Unrecognised theme name: 'nope'."));
        assert!(display.contains("available: mkdocs"));
        assert!(display.contains("errors"));
    }

    #[test]
    fn test_into_result_and_pairs() {
        let mut report = ValidationReport::new();
        report.warn("foo", "Unrecognised configuration name: foo");
        let report = report.into_result().unwrap();
        let (errors, warnings) = report.into_pairs();
        assert!(errors.is_empty());
        assert_eq!(
            warnings,
            vec![(
                "foo".to_string(),
                "Unrecognised configuration name: foo".to_string()
            )]
        );

        let mut report = ValidationReport::new();
        report.error("docs_dir", "bad");
        assert!(matches!(
            report.into_result(),
            Err(ConfigError::Diagnostics(_))
        ));
    }
}
