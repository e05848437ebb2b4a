//! Option kinds and the validation contract they implement.
//!
//! | Module   | Options                               |
//! |----------|---------------------------------------|
//! | `scalar` | `Type`, `Choice`                      |
//! | `path`   | `Dir`, `File`, `SiteDir`              |
//! | `legacy` | `Removed`, `Deprecated`               |
//! | `net`    | `Url`, `IpAddress`                    |
//! | `nav`    | `Nav`                                 |
//! | `sub`    | `ListOf`, `SubConfig` (composites)    |
//!
//! The theme composite lives in [`crate::theme`].
//!
//! # Phases
//!
//! `Config::validate` runs three passes over the schema, each in declaration
//! order:
//!
//! 1. `pre_validation` - sees staged values before any coercion (legacy keys)
//! 2. `validate` - coerces one non-null value
//! 3. `post_validation` - cross-field checks on coerced values

mod legacy;
mod nav;
mod net;
mod path;
mod scalar;
mod sub;

pub use legacy::{Deprecated, Removed};
pub use nav::Nav;
pub use net::{IpAddress, Url};
pub use path::{Dir, File, SiteDir};
pub use scalar::{Choice, Kind, Type};
pub use sub::{ListOf, SubConfig};

pub(crate) use sub::run_nested;

use super::{ConfigValue, ValidationError};
use rustc_hash::FxHashMap;
use std::fmt;
use std::path::Path;

/// Staged or validated values of one `Config`, keyed by field name.
pub(crate) type Values = FxHashMap<String, ConfigValue>;

/// A single typed, validatable configuration field.
///
/// Implementations are stateless: everything they need arrives through the
/// context, and the only side effects allowed are filesystem reads.
pub trait ConfigOption: fmt::Debug + Send + Sync {
    /// Inspect or rewrite staged values before coercion.
    fn pre_validation(&self, _ctx: &mut PreContext<'_>) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Coerce a present, non-null value.
    fn validate(
        &self,
        value: ConfigValue,
        ctx: &mut OptionContext<'_>,
    ) -> Result<ConfigValue, ValidationError>;

    /// Cross-field checks once every field has been coerced.
    fn post_validation(&self, _ctx: &mut OptionContext<'_>) -> Result<(), ValidationError> {
        Ok(())
    }
}

// ============================================================================
// Contexts
// ============================================================================

/// Context for the coercion and post-validation phases.
pub struct OptionContext<'a> {
    key: &'a str,
    base_dir: &'a Path,
    default: Option<&'a ConfigValue>,
    values: &'a Values,
    warnings: Vec<String>,
}

impl<'a> OptionContext<'a> {
    pub(crate) fn new(
        key: &'a str,
        base_dir: &'a Path,
        default: Option<&'a ConfigValue>,
        values: &'a Values,
    ) -> Self {
        Self {
            key,
            base_dir,
            default,
            values,
            warnings: Vec::new(),
        }
    }

    /// Name of the field being validated.
    pub fn key(&self) -> &str {
        self.key
    }

    /// Directory relative paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        self.base_dir
    }

    /// Schema default of the field being validated.
    pub fn default_value(&self) -> Option<&ConfigValue> {
        self.default
    }

    /// Current value of any field in the same config.
    pub fn value(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    /// Record a non-blocking problem for this field.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub(crate) fn into_warnings(self) -> Vec<String> {
        self.warnings
    }
}

/// Context for the pre-validation phase, with write access to staged values.
pub struct PreContext<'a> {
    key: &'a str,
    values: &'a mut Values,
    warnings: Vec<String>,
}

impl<'a> PreContext<'a> {
    pub(crate) fn new(key: &'a str, values: &'a mut Values) -> Self {
        Self {
            key,
            values,
            warnings: Vec::new(),
        }
    }

    pub fn key(&self) -> &str {
        self.key
    }

    /// True if the user supplied `key` (even as null).
    pub fn is_staged(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn take(&mut self, key: &str) -> Option<ConfigValue> {
        self.values.remove(key)
    }

    pub fn stage(&mut self, key: &str, value: ConfigValue) {
        self.values.insert(key.to_owned(), value);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub(crate) fn into_warnings(self) -> Vec<String> {
        self.warnings
    }
}

/// Standard type-mismatch failure.
pub(crate) fn type_error(expected: &str, found: &ConfigValue) -> ValidationError {
    ValidationError::new(format!(
        "Expected type: {expected} but received: {}",
        found.kind_name()
    ))
}

/// Borrow a string value or fail with a type mismatch.
pub(crate) fn expect_str(value: &ConfigValue) -> Result<&str, ValidationError> {
    value.as_str().ok_or_else(|| type_error("str", value))
}
