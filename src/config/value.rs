//! Raw and validated configuration values.
//!
//! Raw documents arrive as [`serde_json::Value`] (the crate enables
//! `preserve_order`, so mappings keep the order the user wrote them in).
//! Once a composite option has run, a slot may hold a richer typed value,
//! hence [`ConfigValue`].

use super::ConfigError;
use crate::theme::Theme;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// A single configuration slot: raw-or-coerced data, or a resolved composite.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    /// Raw input or a coerced scalar/collection.
    Value(Value),
    /// A resolved theme.
    Theme(Box<Theme>),
}

impl ConfigValue {
    pub const NULL: Self = Self::Value(Value::Null);

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Value(Value::Null))
    }

    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Theme(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_value().and_then(Value::as_bool)
    }

    pub fn as_theme(&self) -> Option<&Theme> {
        match self {
            Self::Theme(theme) => Some(theme),
            Self::Value(_) => None,
        }
    }

    /// Human-readable type name, used in type-mismatch messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Value(value) => kind_name(value),
            Self::Theme(_) => "theme",
        }
    }

    /// Lower into plain data (themes become their variable mapping).
    pub fn to_value(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Theme(theme) => Value::Object(theme.vars().clone()),
        }
    }
}

impl From<Value> for ConfigValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Value(Value::String(value.to_owned()))
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Value(Value::Bool(value))
    }
}

impl From<Theme> for ConfigValue {
    fn from(theme: Theme) -> Self {
        Self::Theme(Box::new(theme))
    }
}

/// Type name of a raw value as users would describe it.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Convert a parsed TOML document into the raw value model.
///
/// Datetimes have no JSON counterpart and are kept as their string form.
pub fn from_toml(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(from_toml).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, from_toml(value)))
                .collect::<Map<String, Value>>(),
        ),
    }
}

/// Read a TOML config file as a raw document.
///
/// The file's absolute path is injected as `config_file_path` unless the file
/// sets it, so relative paths resolve against the file's directory.
pub fn read_toml_file(path: &Path) -> Result<Value, ConfigError> {
    let content =
        fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
    let doc: toml::Value =
        toml::from_str(&content).map_err(|err| ConfigError::Toml(path.to_path_buf(), err))?;

    let mut value = from_toml(doc);
    if let Value::Object(map) = &mut value
        && !map.contains_key(super::CONFIG_FILE_PATH)
    {
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        map.insert(
            super::CONFIG_FILE_PATH.to_owned(),
            Value::String(absolute.to_string_lossy().into_owned()),
        );
    }
    Ok(value)
}
