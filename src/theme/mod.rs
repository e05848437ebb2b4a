//! Theme resolution.
//!
//! A theme setting (`"readthedocs"`, or a mapping with `name`, `custom_dir`,
//! `static_templates`, `locale` and free variables) is resolved against a
//! [`ThemeRegistry`] into a [`Theme`]: an ordered template search path, the set
//! of templates rendered without a page, and the merged template variables.
//!
//! ```text
//! dirs = [custom_dir?] ++ [theme, parent, ..., root ancestor] ++ [fallback]
//! vars = {name, locale} <- root ancestor vars <- ... <- theme vars <- user vars
//! ```

mod locale;
mod option;
pub mod registry;

pub use locale::{Locale, LocaleError};
pub use option::ThemeOption;
pub use registry::{
    BuiltinThemes, FallbackTemplates, RegistryError, ThemeManifest, ThemeRegistry, init_registry,
    registry,
};

use rustc_hash::FxHashSet;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    #[error("Unrecognised theme name: '{name}'.")]
    UnknownTheme { name: String, available: Vec<String> },

    #[error("Theme '{theme}' extends unrecognised theme '{parent}'.")]
    UnknownParent { theme: String, parent: String },

    #[error("Theme '{0}' extends itself through its parents.")]
    Cycle(String),

    #[error(transparent)]
    InvalidLocale(#[from] LocaleError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl ThemeError {
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::UnknownTheme { available, .. } if available.is_empty() => {
                Some("no themes are installed".into())
            }
            Self::UnknownTheme { available, .. } => {
                Some(format!("available themes: {}", available.join(", ")))
            }
            _ => None,
        }
    }
}

/// Structural inputs of a theme after their own validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeSpec {
    pub name: Option<String>,
    pub custom_dir: Option<PathBuf>,
    pub static_templates: Vec<String>,
    pub locale: Option<String>,
    /// User variables, applied over the theme's own.
    pub vars: Map<String, Value>,
}

/// A fully resolved theme.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    name: Option<String>,
    custom_dir: Option<PathBuf>,
    dirs: Vec<PathBuf>,
    static_templates: BTreeSet<String>,
    vars: Map<String, Value>,
    locale: Locale,
}

impl Theme {
    /// Resolve `spec` against `registry`. Pure apart from registry lookups.
    pub fn resolve(spec: ThemeSpec, registry: &dyn ThemeRegistry) -> Result<Self, ThemeError> {
        let chain = match &spec.name {
            Some(name) => Self::chain(name, registry)?,
            None => Vec::new(),
        };
        let fallback = registry.fallback();

        let mut dirs: Vec<PathBuf> = spec.custom_dir.iter().cloned().collect();
        dirs.extend(chain.iter().map(|m| m.dir.clone()));
        dirs.push(fallback.dir.clone());

        let static_templates: BTreeSet<String> = fallback
            .static_templates
            .iter()
            .chain(chain.iter().flat_map(|m| &m.static_templates))
            .chain(&spec.static_templates)
            .cloned()
            .collect();

        let name_value = spec.name.clone().map_or(Value::Null, Value::String);
        let mut vars = Map::new();
        vars.insert("name".into(), name_value.clone());
        vars.insert("locale".into(), Value::String("en".into()));
        for manifest in chain.iter().rev() {
            vars.extend(manifest.vars.clone());
        }
        vars.extend(spec.vars);

        let locale = match spec
            .locale
            .as_deref()
            .or_else(|| vars.get("locale").and_then(Value::as_str))
        {
            Some(raw) => Locale::parse(raw)?,
            None => Locale::default(),
        };
        vars.insert("name".into(), name_value);
        vars.insert("locale".into(), Value::String(locale.to_string()));

        Ok(Self {
            name: spec.name,
            custom_dir: spec.custom_dir,
            dirs,
            static_templates,
            vars,
            locale,
        })
    }

    /// The named theme followed by its ancestors.
    fn chain<'r>(
        name: &str,
        registry: &'r dyn ThemeRegistry,
    ) -> Result<Vec<&'r ThemeManifest>, ThemeError> {
        let mut chain = Vec::new();
        let mut seen = FxHashSet::default();

        let mut current = registry.lookup(name).map_err(|err| match err {
            RegistryError::NotFound(name) => ThemeError::UnknownTheme {
                name,
                available: registry.names(),
            },
            other => other.into(),
        })?;

        loop {
            if !seen.insert(current.name.as_str()) {
                return Err(ThemeError::Cycle(name.to_owned()));
            }
            chain.push(current);

            let Some(parent) = &current.extends else {
                return Ok(chain);
            };
            current = registry.lookup(parent).map_err(|err| match err {
                RegistryError::NotFound(parent) => ThemeError::UnknownParent {
                    theme: current.name.clone(),
                    parent,
                },
                other => other.into(),
            })?;
        }
    }

    /// Theme name; `None` for a custom-dir-only theme.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn custom_dir(&self) -> Option<&Path> {
        self.custom_dir.as_deref()
    }

    /// Template search path, most specific first.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn static_templates(&self) -> &BTreeSet<String> {
        &self.static_templates
    }

    pub fn vars(&self) -> &Map<String, Value> {
        &self.vars
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn get(&self, var: &str) -> Option<&Value> {
        self.vars.get(var)
    }

    /// First directory on the search path that contains `template`.
    pub fn find_template(&self, template: &str) -> Option<PathBuf> {
        self.dirs
            .iter()
            .map(|dir| dir.join(template))
            .find(|path| path.is_file())
    }
}
