//! Navigation tree option.
//!
//! ```yaml
//! nav:
//!   - index.md
//!   - Introduction: intro.md
//!   - Guide:
//!       - guide/setup.md
//!       - Usage: guide/usage.md
//! ```

use super::{ConfigOption, OptionContext, type_error};
use crate::config::value::kind_name;
use crate::config::{ConfigValue, ValidationError};
use serde_json::Value;

/// A nested list of page paths and single-key `title: target` mappings.
///
/// The structure is only checked here; resolving targets to pages happens in
/// the navigation builder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nav;

impl Nav {
    pub const fn new() -> Self {
        Self
    }

    fn check_items(items: &[Value]) -> Result<(), ValidationError> {
        items.iter().try_for_each(Self::check_item)
    }

    fn check_item(item: &Value) -> Result<(), ValidationError> {
        match item {
            Value::String(_) => Ok(()),
            Value::Object(map) if map.len() == 1 => {
                let Some((title, target)) = map.iter().next() else {
                    return Ok(());
                };
                match target {
                    Value::String(_) => Ok(()),
                    Value::Array(children) => Self::check_items(children),
                    other => Err(ValidationError::new(format!(
                        "Expected nav item '{title}' to be a string or a list, got a {}: {other}",
                        kind_name(other)
                    ))),
                }
            }
            Value::Object(map) => {
                let keys: Vec<&str> = map.keys().map(String::as_str).collect();
                Err(ValidationError::new(format!(
                    "Expected nav item to be a dict of size 1, got a dict with keys ({})",
                    keys.join(", ")
                )))
            }
            other => Err(ValidationError::new(format!(
                "Expected nav item to be a string or dict, got a {}: {other}",
                kind_name(other)
            ))),
        }
    }
}

impl ConfigOption for Nav {
    fn validate(
        &self,
        value: ConfigValue,
        _ctx: &mut OptionContext<'_>,
    ) -> Result<ConfigValue, ValidationError> {
        match value.as_value() {
            Some(Value::Array(items)) => Self::check_items(items)?,
            Some(other) => {
                return Err(ValidationError::new(format!(
                    "Expected nav to be a list, got a {}: {other}",
                    kind_name(other)
                )));
            }
            None => return Err(type_error("list", &value)),
        }
        Ok(value)
    }
}
