//! Theme registry: where named themes and the fallback templates live.
//!
//! A manifest describes one theme: its directory, an optional parent it
//! extends, the static templates it renders and its default variables.
//!
//! # `theme.toml`
//!
//! ```toml
//! extends = "mkdocs"
//! static_templates = ["404.html"]
//!
//! [vars]
//! show_sidebar = true
//! ```

use crate::config::value::from_toml;
use crate::log;
use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use thiserror::Error;

/// Manifest file name inside a theme directory.
pub const MANIFEST_FILE: &str = "theme.toml";

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("theme `{0}` is not registered")]
    NotFound(String),

    #[error("manifest of theme `{name}` is invalid: {reason}")]
    Manifest { name: String, reason: String },
}

/// Static description of one installed theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeManifest {
    pub name: String,
    pub dir: PathBuf,
    pub extends: Option<String>,
    pub static_templates: Vec<String>,
    pub vars: Map<String, Value>,
}

impl ThemeManifest {
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
            extends: None,
            static_templates: Vec::new(),
            vars: Map::new(),
        }
    }

    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    pub fn static_templates<I, S>(mut self, templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.static_templates = templates.into_iter().map(Into::into).collect();
        self
    }

    pub fn vars(mut self, vars: Value) -> Self {
        if let Value::Object(map) = vars {
            self.vars = map;
        }
        self
    }
}

/// Built-in template directory appended to every theme's search path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackTemplates {
    pub dir: PathBuf,
    pub static_templates: Vec<String>,
}

/// Lookup of installed themes.
pub trait ThemeRegistry: std::fmt::Debug + Send + Sync {
    fn lookup(&self, name: &str) -> Result<&ThemeManifest, RegistryError>;

    /// Registered theme names, sorted.
    fn names(&self) -> Vec<String>;

    fn fallback(&self) -> &FallbackTemplates;
}

// ============================================================================
// BuiltinThemes
// ============================================================================

/// In-memory registry seeded with the bundled themes.
#[derive(Debug, Clone)]
pub struct BuiltinThemes {
    themes: FxHashMap<String, ThemeManifest>,
    fallback: FallbackTemplates,
}

impl BuiltinThemes {
    /// Registry with the bundled `mkdocs` and `readthedocs` themes, installed
    /// under `themes_root`, and the fallback templates in `templates_dir`.
    pub fn new(themes_root: impl AsRef<Path>, templates_dir: impl Into<PathBuf>) -> Self {
        let root = themes_root.as_ref();
        Self::empty(templates_dir)
            .with_theme(
                ThemeManifest::new("mkdocs", root.join("mkdocs"))
                    .static_templates(["404.html"])
                    .vars(json!({
                        "include_search_page": false,
                        "search_index_only": false,
                        "analytics": {"gtag": null},
                        "highlightjs": true,
                        "hljs_style": "github",
                        "hljs_languages": [],
                        "navigation_depth": 2,
                        "nav_style": "primary",
                        "shortcuts": {"help": 191, "next": 78, "previous": 80, "search": 83},
                    })),
            )
            .with_theme(
                ThemeManifest::new("readthedocs", root.join("readthedocs"))
                    .static_templates(["404.html"])
                    .vars(json!({
                        "include_search_page": true,
                        "search_index_only": false,
                        "analytics": {"anonymize_ip": false, "gtag": null},
                        "highlightjs": true,
                        "hljs_languages": [],
                        "include_homepage_in_sidebar": true,
                        "prev_next_buttons_location": "bottom",
                        "navigation_depth": 4,
                        "sticky_navigation": true,
                        "logo": null,
                        "titles_only": false,
                        "collapse_navigation": true,
                    })),
            )
    }

    /// Registry with no themes, only the fallback templates.
    pub fn empty(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            themes: FxHashMap::default(),
            fallback: FallbackTemplates {
                dir: templates_dir.into(),
                static_templates: vec!["sitemap.xml".into()],
            },
        }
    }

    /// Register (or replace) a theme.
    pub fn with_theme(mut self, manifest: ThemeManifest) -> Self {
        self.themes.insert(manifest.name.clone(), manifest);
        self
    }

    /// Register every subdirectory of `dir` that carries a `theme.toml`.
    ///
    /// Returns the names of the themes found.
    pub fn discover(&mut self, dir: &Path) -> Result<Vec<String>> {
        let entries =
            fs::read_dir(dir).with_context(|| format!("failed to read theme directory {}", dir.display()))?;

        let mut found = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.join(MANIFEST_FILE).is_file() {
                continue;
            }
            let manifest = load_manifest(&path)?;
            found.push(manifest.name.clone());
            self.themes.insert(manifest.name.clone(), manifest);
        }
        found.sort();
        Ok(found)
    }

    pub fn into_shared(self) -> Arc<dyn ThemeRegistry> {
        Arc::new(self)
    }
}

impl ThemeRegistry for BuiltinThemes {
    fn lookup(&self, name: &str) -> Result<&ThemeManifest, RegistryError> {
        self.themes
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_owned()))
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.themes.keys().cloned().collect();
        names.sort();
        names
    }

    fn fallback(&self) -> &FallbackTemplates {
        &self.fallback
    }
}

// ============================================================================
// Manifest loading
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ManifestFile {
    extends: Option<String>,
    static_templates: Vec<String>,
    vars: toml::Table,
}

/// Load `theme.toml` from a theme directory; the theme is named after it.
pub fn load_manifest(dir: &Path) -> Result<ThemeManifest> {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("theme directory {} has no name", dir.display()))?;
    let path = dir.join(MANIFEST_FILE);
    let content =
        fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;

    let mut ignored = Vec::new();
    let deserializer = toml::Deserializer::new(&content);
    let file: ManifestFile = serde_ignored::deserialize(deserializer, |p: serde_ignored::Path| {
        ignored.push(p.to_string());
    })
    .map_err(|err| RegistryError::Manifest {
        name: name.clone(),
        reason: err.to_string(),
    })?;

    for field in &ignored {
        log!("theme"; "ignoring unknown field `{}` in {}", field, path.display());
    }

    let vars = match from_toml(toml::Value::Table(file.vars)) {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    Ok(ThemeManifest {
        name,
        dir: dir.to_path_buf(),
        extends: file.extends,
        static_templates: file.static_templates,
        vars,
    })
}

// ============================================================================
// Process-wide registry
// ============================================================================

static REGISTRY: OnceLock<Arc<dyn ThemeRegistry>> = OnceLock::new();

/// Install the process-wide registry. Returns `false` if one was already set.
pub fn init_registry(registry: Arc<dyn ThemeRegistry>) -> bool {
    REGISTRY.set(registry).is_ok()
}

/// The process-wide registry, if initialised.
pub fn registry() -> Option<Arc<dyn ThemeRegistry>> {
    REGISTRY.get().cloned()
}
