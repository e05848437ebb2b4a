//! The `theme` configuration option.

use super::{Theme, ThemeRegistry, ThemeSpec};
use crate::config::option::{Dir, ListOf, Type, run_nested};
use crate::config::{ConfigOption, ConfigValue, Field, OptionContext, Schema, ValidationError};
use crate::debug;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;

/// Keys with their own meaning; everything else is a template variable.
const STRUCTURAL_KEYS: [&str; 4] = ["name", "custom_dir", "static_templates", "locale"];

/// Composite option resolving a theme setting into a [`Theme`].
#[derive(Debug, Clone)]
pub struct ThemeOption {
    registry: Arc<dyn ThemeRegistry>,
    schema: Arc<Schema>,
}

impl ThemeOption {
    pub fn new(registry: Arc<dyn ThemeRegistry>) -> Self {
        let schema = Schema::new([
            Field::new("name", Type::str()),
            Field::new("custom_dir", Dir::existing()),
            Field::new("static_templates", ListOf::new(Type::str())),
            Field::new("locale", Type::str()),
        ])
        .passthrough();

        Self {
            registry,
            schema: Arc::new(schema),
        }
    }

    /// Bring every accepted shape to a mapping that has a `name` key.
    fn normalize(
        value: ConfigValue,
        ctx: &OptionContext<'_>,
    ) -> Result<Map<String, Value>, ValidationError> {
        let mut map = match value {
            ConfigValue::Value(Value::String(name)) => {
                let mut map = Map::new();
                map.insert("name".into(), Value::String(name));
                map
            }
            ConfigValue::Value(Value::Object(map)) => map,
            other => {
                return Err(ValidationError::new(format!(
                    "Invalid type \"{}\". Expected a string or key/value pairs.",
                    other.kind_name()
                )));
            }
        };

        if !map.contains_key("name") {
            let default = ctx
                .default_value()
                .and_then(ConfigValue::as_str)
                .ok_or_else(|| ValidationError::new("No theme name set."))?;
            map.insert("name".into(), Value::String(default.to_owned()));
        }
        Ok(map)
    }
}

impl ConfigOption for ThemeOption {
    fn validate(
        &self,
        value: ConfigValue,
        ctx: &mut OptionContext<'_>,
    ) -> Result<ConfigValue, ValidationError> {
        // Already resolved by an earlier pass
        if value.as_theme().is_some() {
            return Ok(value);
        }

        let map = Self::normalize(value, ctx)?;
        let vars: Map<String, Value> = map
            .iter()
            .filter(|(key, _)| !STRUCTURAL_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let nested = run_nested(&self.schema, map, ctx)?;
        let spec = ThemeSpec {
            name: nested.get_str("name").map(str::to_owned),
            custom_dir: nested.get_path("custom_dir").map(Path::to_path_buf),
            static_templates: nested
                .get("static_templates")
                .and_then(ConfigValue::as_value)
                .and_then(Value::as_array)
                .map(|items| items.iter().filter_map(Value::as_str).map(str::to_owned).collect())
                .unwrap_or_default(),
            locale: nested.get_str("locale").map(str::to_owned),
            vars,
        };

        let theme = Theme::resolve(spec, self.registry.as_ref()).map_err(|err| ValidationError {
            message: err.to_string(),
            hint: err.hint(),
        })?;

        debug!(
            "theme";
            "resolved `{}`: dirs {:?}",
            theme.name().unwrap_or("<custom>"),
            theme.dirs()
        );
        Ok(ConfigValue::from(theme))
    }
}
