//! Ordered schema declarations.

use super::{ConfigError, ConfigOption, ConfigValue};
use rustc_hash::FxHashSet;
use serde_json::Value;
use std::sync::Arc;

/// One declared field: a name, its option and its presence rules.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    option: Arc<dyn ConfigOption>,
    default: Option<ConfigValue>,
    required: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, option: impl ConfigOption + 'static) -> Self {
        Self {
            name: name.into(),
            option: Arc::new(option),
            default: None,
            required: false,
        }
    }

    /// Value substituted when the field is absent or null.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(ConfigValue::Value(value.into()));
        self
    }

    /// Absence without a default becomes an error.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn option(&self) -> &dyn ConfigOption {
        self.option.as_ref()
    }

    pub fn default_value(&self) -> Option<&ConfigValue> {
        self.default.as_ref()
    }

    pub const fn is_required(&self) -> bool {
        self.required
    }
}

/// Ordered mapping from field name to option.
///
/// Declaration order is validation order and report order.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<Field>,
    passthrough: bool,
}

impl Schema {
    /// Build a schema from statically known fields.
    ///
    /// # Panics
    /// Panics on a duplicate field name; use [`Schema::try_new`] for
    /// declarations built at runtime.
    pub fn new(fields: impl IntoIterator<Item = Field>) -> Self {
        match Self::try_new(fields) {
            Ok(schema) => schema,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_new(fields: impl IntoIterator<Item = Field>) -> Result<Self, ConfigError> {
        let fields: Vec<Field> = fields.into_iter().collect();
        let mut seen = FxHashSet::default();
        for field in &fields {
            if !seen.insert(field.name()) {
                return Err(ConfigError::DuplicateOption(field.name.clone()));
            }
        }
        Ok(Self {
            fields,
            passthrough: false,
        })
    }

    /// Keep unknown keys as pass-through extras instead of warning about them.
    pub fn passthrough(mut self) -> Self {
        self.passthrough = true;
        self
    }

    pub const fn is_passthrough(&self) -> bool {
        self.passthrough
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Declared field names, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(Field::name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::option::{Dir, Type};

    #[test]
    fn test_declaration_order_is_kept() {
        let schema = Schema::new([
            Field::new("site_name", Type::str()).required(),
            Field::new("docs_dir", Dir::new()).default("docs"),
            Field::new("strict", Type::bool()).default(false),
        ]);
        let names: Vec<_> = schema.names().collect();
        assert_eq!(names, ["site_name", "docs_dir", "strict"]);
        assert!(schema.get("site_name").unwrap().is_required());
        assert_eq!(
            schema.get("docs_dir").unwrap().default_value(),
            Some(&ConfigValue::from("docs"))
        );
        assert!(!schema.is_passthrough());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = Schema::try_new([
            Field::new("docs_dir", Dir::new()),
            Field::new("docs_dir", Dir::existing()),
        ]);
        assert!(matches!(result, Err(ConfigError::DuplicateOption(name)) if name == "docs_dir"));
    }
}
