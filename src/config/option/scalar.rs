//! Type-checked scalars and fixed choices.

use super::{ConfigOption, OptionContext, expect_str, type_error};
use crate::config::{ConfigValue, ValidationError};
use serde_json::Value;
use std::fmt;

/// Primitive shape a [`Type`] option accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Str,
    Bool,
    Int,
    /// Any number; ints are accepted where floats are expected.
    Float,
    List,
    Map,
}

impl Kind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::List => "list",
            Self::Map => "dict",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Self::Str => value.is_string(),
            Self::Bool => value.is_boolean(),
            Self::Int => value.is_i64() || value.is_u64(),
            Self::Float => value.is_number(),
            Self::List => value.is_array(),
            Self::Map => value.is_object(),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Type
// ============================================================================

/// Asserts the value has a declared primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Type {
    kind: Kind,
    length: Option<usize>,
}

impl Type {
    pub const fn new(kind: Kind) -> Self {
        Self { kind, length: None }
    }

    pub const fn str() -> Self {
        Self::new(Kind::Str)
    }

    pub const fn bool() -> Self {
        Self::new(Kind::Bool)
    }

    pub const fn int() -> Self {
        Self::new(Kind::Int)
    }

    pub const fn list() -> Self {
        Self::new(Kind::List)
    }

    pub const fn map() -> Self {
        Self::new(Kind::Map)
    }

    /// Require an exact length (strings count chars, lists count items).
    pub const fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }
}

impl ConfigOption for Type {
    fn validate(
        &self,
        value: ConfigValue,
        _ctx: &mut OptionContext<'_>,
    ) -> Result<ConfigValue, ValidationError> {
        let Some(raw) = value.as_value().filter(|v| self.kind.matches(v)) else {
            return Err(type_error(self.kind.name(), &value));
        };

        if let Some(expected) = self.length {
            let actual = match raw {
                Value::String(s) => Some(s.chars().count()),
                Value::Array(items) => Some(items.len()),
                _ => None,
            };
            if let Some(actual) = actual
                && actual != expected
            {
                return Err(ValidationError::new(format!(
                    "Expected type: {} with length {expected} but received: {raw} with length {actual}",
                    self.kind
                )));
            }
        }

        Ok(value)
    }
}

// ============================================================================
// Choice
// ============================================================================

/// A string restricted to a fixed set of choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    choices: Vec<String>,
}

impl Choice {
    pub fn new<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }
}

impl ConfigOption for Choice {
    fn validate(
        &self,
        value: ConfigValue,
        _ctx: &mut OptionContext<'_>,
    ) -> Result<ConfigValue, ValidationError> {
        let s = expect_str(&value)?;
        if self.choices.iter().any(|c| c == s) {
            Ok(value)
        } else {
            Err(ValidationError::new(format!(
                "Expected one of: [{}] but received: {s}",
                self.choices.join(", ")
            )))
        }
    }
}
