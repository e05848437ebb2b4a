//! Composite options: lists of validated items and nested schemas.

use super::{ConfigOption, OptionContext, type_error};
use crate::config::{Config, ConfigValue, Schema, ValidationError};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Validate `data` with an independent `Config` bound to `schema`.
///
/// Nested warnings are forwarded to the outer field; nested errors are folded
/// into a single failure so the outer report keeps one entry per field.
pub(crate) fn run_nested(
    schema: &Arc<Schema>,
    data: Map<String, Value>,
    ctx: &mut OptionContext<'_>,
) -> Result<Config, ValidationError> {
    let mut config = Config::new(Arc::clone(schema)).with_base_dir(ctx.base_dir());
    config.load_map(data);
    let report = config.validate();

    for warning in report.warnings() {
        ctx.warn(format!(
            "Sub-option '{}': {}",
            warning.field.as_str(),
            warning.message
        ));
    }

    if report.has_errors() {
        let message = report
            .errors()
            .iter()
            .map(|e| format!("Sub-option '{}': {}", e.field.as_str(), e.message))
            .collect::<Vec<_>>()
            .join("; ");
        let mut err = ValidationError::new(message);
        err.hint = report.errors().iter().find_map(|e| e.hint.clone());
        return Err(err);
    }

    Ok(config)
}

// ============================================================================
// ListOf
// ============================================================================

/// A list whose every item is validated by an inner option.
#[derive(Debug, Clone)]
pub struct ListOf {
    item: Arc<dyn ConfigOption>,
}

impl ListOf {
    pub fn new(item: impl ConfigOption + 'static) -> Self {
        Self {
            item: Arc::new(item),
        }
    }
}

impl ConfigOption for ListOf {
    fn validate(
        &self,
        value: ConfigValue,
        ctx: &mut OptionContext<'_>,
    ) -> Result<ConfigValue, ValidationError> {
        let items = match value {
            ConfigValue::Value(Value::Array(items)) => items,
            other => return Err(type_error("list", &other)),
        };

        let mut out = Vec::with_capacity(items.len());
        for (idx, item) in items.into_iter().enumerate() {
            let coerced = self
                .item
                .validate(ConfigValue::Value(item), ctx)
                .map_err(|err| ValidationError {
                    message: format!("[{idx}] {}", err.message),
                    hint: err.hint,
                })?;
            out.push(coerced.to_value());
        }
        Ok(ConfigValue::Value(Value::Array(out)))
    }
}

// ============================================================================
// SubConfig
// ============================================================================

/// A mapping governed by its own nested schema.
#[derive(Debug, Clone)]
pub struct SubConfig {
    schema: Arc<Schema>,
}

impl SubConfig {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema: Arc::new(schema),
        }
    }

    /// Free-form mapping: no declared fields, every key passes through.
    pub fn free_form() -> Self {
        Self::new(Schema::default().passthrough())
    }
}

impl ConfigOption for SubConfig {
    fn validate(
        &self,
        value: ConfigValue,
        ctx: &mut OptionContext<'_>,
    ) -> Result<ConfigValue, ValidationError> {
        let map = match value {
            ConfigValue::Value(Value::Object(map)) => map,
            other => return Err(type_error("dict", &other)),
        };
        let config = run_nested(&self.schema, map, ctx)?;
        Ok(ConfigValue::Value(config.to_value()))
    }
}
