//! Filesystem path options.
//!
//! Relative paths are joined onto the config's base directory (the parent of
//! `config_file_path`) and normalized lexically, so the coerced value is always
//! an absolute path string and re-validating it is a no-op.

use super::{ConfigOption, OptionContext, expect_str};
use crate::config::{ConfigValue, ValidationError};
use crate::utils::path::{expand_tilde, is_same_or_ancestor, normalize_path};
use std::path::{Path, PathBuf};

/// Resolve a user path against the base directory.
fn resolve(raw: &str, base: &Path) -> PathBuf {
    normalize_path(&expand_tilde(raw), base)
}

fn path_value(path: &Path) -> ConfigValue {
    ConfigValue::from(path.to_string_lossy().as_ref())
}

// ============================================================================
// Dir / File
// ============================================================================

/// A directory path. Input directories must exist; output directories may be
/// created later and are never checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dir {
    exists: bool,
}

impl Dir {
    /// Directory that may not exist yet.
    pub const fn new() -> Self {
        Self { exists: false }
    }

    /// Directory that must exist on disk.
    pub const fn existing() -> Self {
        Self { exists: true }
    }
}

impl ConfigOption for Dir {
    fn validate(
        &self,
        value: ConfigValue,
        ctx: &mut OptionContext<'_>,
    ) -> Result<ConfigValue, ValidationError> {
        let raw = expect_str(&value)?;
        let path = resolve(raw, ctx.base_dir());

        if self.exists && !path.is_dir() {
            return Err(ValidationError::new(format!(
                "The path '{}' isn't an existing directory.",
                path.display()
            )));
        }
        Ok(path_value(&path))
    }
}

/// A file path, optionally required to exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct File {
    exists: bool,
}

impl File {
    pub const fn new() -> Self {
        Self { exists: false }
    }

    pub const fn existing() -> Self {
        Self { exists: true }
    }
}

impl ConfigOption for File {
    fn validate(
        &self,
        value: ConfigValue,
        ctx: &mut OptionContext<'_>,
    ) -> Result<ConfigValue, ValidationError> {
        let raw = expect_str(&value)?;
        let path = resolve(raw, ctx.base_dir());

        if self.exists && !path.is_file() {
            return Err(ValidationError::new(format!(
                "The path '{}' isn't an existing file.",
                path.display()
            )));
        }
        Ok(path_value(&path))
    }
}

// ============================================================================
// SiteDir
// ============================================================================

/// Output directory, checked against the input directory after coercion.
///
/// Fails when the two normalize to the same path, or when one contains the
/// other: the build would consume or overwrite its own output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteDir {
    docs_key: String,
}

impl SiteDir {
    pub fn new() -> Self {
        Self {
            docs_key: "docs_dir".into(),
        }
    }

    /// Compare against a differently named input directory field.
    pub fn docs_key(mut self, key: impl Into<String>) -> Self {
        self.docs_key = key.into();
        self
    }
}

impl Default for SiteDir {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigOption for SiteDir {
    fn validate(
        &self,
        value: ConfigValue,
        ctx: &mut OptionContext<'_>,
    ) -> Result<ConfigValue, ValidationError> {
        Dir::new().validate(value, ctx)
    }

    fn post_validation(&self, ctx: &mut OptionContext<'_>) -> Result<(), ValidationError> {
        let (Some(site), Some(docs)) = (
            ctx.value(ctx.key()).and_then(ConfigValue::as_str),
            ctx.value(&self.docs_key).and_then(ConfigValue::as_str),
        ) else {
            return Ok(());
        };

        // docs_dir may have failed its own validation and still be raw
        let site = resolve(site, ctx.base_dir());
        let docs = resolve(docs, ctx.base_dir());

        if is_same_or_ancestor(&site, &docs) {
            return Err(ValidationError::new(format!(
                "The '{}' should not be within the '{}' as this can mean the source files are \
                 overwritten by the output or it will be deleted if --clean is passed. \
                 ({}: '{}', {}: '{}')",
                self.docs_key,
                ctx.key(),
                ctx.key(),
                site.display(),
                self.docs_key,
                docs.display()
            )));
        }
        if is_same_or_ancestor(&docs, &site) {
            return Err(ValidationError::new(format!(
                "The '{}' should not be within the '{}' as this leads to the build directory \
                 being copied into itself and duplicate nested files in the '{}'. \
                 ({}: '{}', {}: '{}')",
                ctx.key(),
                self.docs_key,
                ctx.key(),
                ctx.key(),
                site.display(),
                self.docs_key,
                docs.display()
            )));
        }
        Ok(())
    }
}
