//! Schema-driven configuration validation.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── option/        # Option kinds (Type, Dir, SiteDir, Removed, Nav, ...)
//! ├── types/         # ConfigError, ValidationReport, FieldPath
//! ├── defaults.rs    # The full site schema and its typed view
//! ├── schema.rs      # Schema / Field declarations
//! ├── util.rs        # URL helpers
//! ├── value.rs       # ConfigValue and raw-value helpers
//! └── mod.rs         # Config (this file)
//! ```
//!
//! # Lifecycle
//!
//! ```ignore
//! let mut config = Config::new(Arc::new(site_schema(registry)));
//! config.load_dict(document)?;         // stage raw values
//! let report = config.validate();      // coerce in place, collect problems
//! report.into_result()?;               // any error blocks the build
//! ```

pub mod defaults;
pub mod option;
pub mod schema;
pub mod types;
mod util;
pub mod value;

pub use defaults::{SiteConfig, site_schema};
pub use option::{ConfigOption, OptionContext, PreContext};
pub use schema::{Field, Schema};
pub use types::{ConfigDiagnostic, ConfigError, FieldPath, ValidationError, ValidationReport};
pub use value::ConfigValue;

use crate::debug;
use crate::theme::Theme;
use crate::utils::path::{expand_tilde, normalize_path};
use option::Values;
use rustc_hash::FxHashSet;
use serde_json::{Map, Value};
use std::path::{MAIN_SEPARATOR_STR, Path, PathBuf};
use std::sync::Arc;

/// Key the caller injects with the absolute path of the config's origin.
pub const CONFIG_FILE_PATH: &str = "config_file_path";

/// Message for a required field that was never provided.
pub const REQUIRED_MESSAGE: &str = "Required configuration not provided.";

// ============================================================================
// Config
// ============================================================================

/// A mutable, schema-bound configuration.
///
/// Holds raw values after [`Config::load_dict`] and validated values after
/// [`Config::validate`]. Keys unknown to the schema are kept as extras.
#[derive(Debug, Clone)]
pub struct Config {
    schema: Arc<Schema>,
    values: Values,
    extras: Map<String, Value>,
    /// Unknown keys in first-seen order, reported as warnings by `validate`.
    unrecognized: Vec<String>,
    base_dir: Option<PathBuf>,
}

impl Config {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            values: Values::default(),
            extras: Map::new(),
            unrecognized: Vec::new(),
            base_dir: None,
        }
    }

    /// Create and stage `data` in one step.
    pub fn from_dict(schema: Arc<Schema>, data: Value) -> Result<Self, ConfigError> {
        let mut config = Self::new(schema);
        config.load_dict(data)?;
        Ok(config)
    }

    /// Resolve relative paths against `dir` instead of the config file's parent.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    // ========================================================================
    // loading
    // ========================================================================

    /// Stage every key of a raw document.
    ///
    /// Fails only when the document is not a mapping at all.
    pub fn load_dict(&mut self, data: Value) -> Result<(), ConfigError> {
        match data {
            Value::Object(map) => {
                self.load_map(map);
                Ok(())
            }
            other => Err(ConfigError::NotAMapping(value::kind_name(&other))),
        }
    }

    /// Stage every key of a mapping; later calls overwrite earlier ones.
    pub fn load_map(&mut self, data: Map<String, Value>) {
        for (key, value) in data {
            if self.schema.contains(&key) {
                self.values.insert(key, ConfigValue::Value(value));
                continue;
            }
            if !self.schema.is_passthrough() && !self.unrecognized.contains(&key) {
                self.unrecognized.push(key.clone());
            }
            self.extras.insert(key, value);
        }
    }

    /// Stage a single declared value programmatically.
    ///
    /// Returns `false` (and stages nothing) for keys the schema doesn't declare.
    pub fn set(&mut self, key: &str, value: impl Into<ConfigValue>) -> bool {
        if !self.schema.contains(key) {
            return false;
        }
        self.values.insert(key.to_owned(), value.into());
        true
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate every declared field, in declaration order.
    ///
    /// Never fails for bad user data: each problem becomes a report entry and
    /// the pass continues. Fields that fail keep their staged value.
    pub fn validate(&mut self) -> ValidationReport {
        let mut report = ValidationReport::new();
        let schema = Arc::clone(&self.schema);
        let base_dir = self.base_dir();
        let mut failed = FxHashSet::default();

        debug!("config"; "validating {} fields (base: {})", schema.len(), base_dir.display());

        // pre-validation: staged values, before coercion
        for field in schema.iter() {
            let mut ctx = PreContext::new(field.name(), &mut self.values);
            let result = field.option().pre_validation(&mut ctx);
            for warning in ctx.into_warnings() {
                report.warn(field.name(), warning);
            }
            if let Err(err) = result {
                failed.insert(field.name());
                report.push_error(field.name(), err);
            }
        }

        // coercion
        for field in schema.iter() {
            let staged = self
                .values
                .get(field.name())
                .filter(|v| !v.is_null())
                .cloned();
            let value = match staged.or_else(|| field.default_value().cloned()) {
                Some(value) => value,
                None if field.is_required() => {
                    failed.insert(field.name());
                    report.error(field.name(), REQUIRED_MESSAGE);
                    continue;
                }
                None => continue,
            };

            let mut ctx =
                OptionContext::new(field.name(), &base_dir, field.default_value(), &self.values);
            let result = field.option().validate(value, &mut ctx);
            for warning in ctx.into_warnings() {
                report.warn(field.name(), warning);
            }
            match result {
                Ok(value) => {
                    self.values.insert(field.name().to_owned(), value);
                }
                Err(err) => {
                    failed.insert(field.name());
                    report.push_error(field.name(), err);
                }
            }
        }

        // post-validation: cross-field checks on coerced values
        for field in schema.iter().filter(|f| !failed.contains(f.name())) {
            let mut ctx =
                OptionContext::new(field.name(), &base_dir, field.default_value(), &self.values);
            let result = field.option().post_validation(&mut ctx);
            for warning in ctx.into_warnings() {
                report.warn(field.name(), warning);
            }
            if let Err(err) = result {
                report.push_error(field.name(), err);
            }
        }

        for key in &self.unrecognized {
            report.warn(key.as_str(), format!("Unrecognised configuration name: {key}"));
        }

        debug!(
            "config";
            "validation finished: {} errors, {} warnings",
            report.errors().len(),
            report.warnings().len()
        );
        report
    }

    /// Absolute directory relative paths resolve against.
    ///
    /// Explicit base dir, else the parent of `config_file_path`, else cwd.
    /// Relative candidates are made absolute against the cwd.
    pub fn base_dir(&self) -> PathBuf {
        if let Some(dir) = &self.base_dir {
            return absolute(dir);
        }

        let config_file = self
            .values
            .get(CONFIG_FILE_PATH)
            .and_then(ConfigValue::as_str)
            .or_else(|| self.extras.get(CONFIG_FILE_PATH).and_then(Value::as_str));

        if let Some(path) = config_file {
            let path = absolute(&expand_tilde(path));
            if let Some(parent) = path.parent() {
                return parent.to_path_buf();
            }
        }
        absolute(Path::new("."))
    }

    // ========================================================================
    // access
    // ========================================================================

    /// Declared field names, in schema order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.schema.names()
    }

    /// Current value of a declared field (`None` if absent without default).
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ConfigValue::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(ConfigValue::as_bool)
    }

    pub fn get_path(&self, key: &str) -> Option<&Path> {
        self.get_str(key).map(Path::new)
    }

    pub fn theme(&self, key: &str) -> Option<&Theme> {
        self.get(key).and_then(ConfigValue::as_theme)
    }

    /// True if the user (or a caller) staged `key`, even as null.
    pub fn is_staged(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Keys not declared by the schema, in document order.
    pub fn extras(&self) -> &Map<String, Value> {
        &self.extras
    }

    /// Unknown keys that `validate` will warn about.
    pub fn unrecognized(&self) -> &[String] {
        &self.unrecognized
    }

    /// Plain-data snapshot: declared fields in order, then extras.
    pub fn to_value(&self) -> Value {
        let mut out = Map::new();
        for key in self.schema.names() {
            if let Some(value) = self.values.get(key) {
                out.insert(key.to_owned(), value.to_value());
            }
        }
        for (key, value) in &self.extras {
            out.insert(key.clone(), value.clone());
        }
        Value::Object(out)
    }
}

/// `path` made absolute against the cwd, lexically normalized.
///
/// Falls back to the filesystem root if the cwd is unavailable.
fn absolute(path: &Path) -> PathBuf {
    let base = std::env::current_dir().unwrap_or_else(|_| PathBuf::from(MAIN_SEPARATOR_STR));
    normalize_path(path, &base)
}

#[cfg(test)]
mod tests;
