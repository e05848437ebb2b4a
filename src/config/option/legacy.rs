//! Options that exist only to tell users about breaking changes.

use super::{ConfigOption, OptionContext, PreContext};
use crate::config::{ConfigValue, ValidationError};
use std::sync::Arc;

// ============================================================================
// Removed
// ============================================================================

/// A legacy field that no longer has any effect.
///
/// Any staged value, null included, is an error naming the replacement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Removed {
    moved_to: Option<String>,
    message: Option<String>,
}

impl Removed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field that replaced this one.
    pub fn moved_to(mut self, key: impl Into<String>) -> Self {
        self.moved_to = Some(key.into());
        self
    }

    /// Replace the generated message entirely.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn describe(&self, key: &str) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }
        let mut message = format!("The configuration option '{key}' was removed.");
        if let Some(moved_to) = &self.moved_to {
            message.push_str(&format!(" Use '{moved_to}' instead."));
        }
        message
    }
}

impl ConfigOption for Removed {
    fn pre_validation(&self, ctx: &mut PreContext<'_>) -> Result<(), ValidationError> {
        if ctx.is_staged(ctx.key()) {
            return Err(ValidationError::new(self.describe(ctx.key())));
        }
        Ok(())
    }

    fn validate(
        &self,
        value: ConfigValue,
        _ctx: &mut OptionContext<'_>,
    ) -> Result<ConfigValue, ValidationError> {
        // Already reported during pre-validation
        Ok(value)
    }
}

// ============================================================================
// Deprecated
// ============================================================================

/// A field that still works but will go away.
///
/// A present value yields a warning. With `moved_to`, the value is staged under
/// the new key unless the user already set that key.
#[derive(Debug, Clone, Default)]
pub struct Deprecated {
    moved_to: Option<String>,
    message: Option<String>,
    option: Option<Arc<dyn ConfigOption>>,
}

impl Deprecated {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn moved_to(mut self, key: impl Into<String>) -> Self {
        self.moved_to = Some(key.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Keep validating the old value with `option` while it is still accepted.
    pub fn option(mut self, option: impl ConfigOption + 'static) -> Self {
        self.option = Some(Arc::new(option));
        self
    }

    fn describe(&self, key: &str) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }
        let mut message = format!(
            "The configuration option '{key}' has been deprecated and will be removed in a future release."
        );
        if let Some(moved_to) = &self.moved_to {
            message.push_str(&format!(" Use '{moved_to}' instead."));
        }
        message
    }
}

impl ConfigOption for Deprecated {
    fn pre_validation(&self, ctx: &mut PreContext<'_>) -> Result<(), ValidationError> {
        let key = ctx.key().to_owned();
        let Some(value) = ctx.take(&key) else {
            return Ok(());
        };
        if value.is_null() {
            ctx.stage(&key, value);
            return Ok(());
        }

        ctx.warn(self.describe(&key));
        match &self.moved_to {
            Some(target) if !ctx.is_staged(target) => ctx.stage(target, value),
            _ => ctx.stage(&key, value),
        }
        Ok(())
    }

    fn validate(
        &self,
        value: ConfigValue,
        ctx: &mut OptionContext<'_>,
    ) -> Result<ConfigValue, ValidationError> {
        match &self.option {
            Some(option) => option.validate(value, ctx),
            None => Ok(value),
        }
    }
}
