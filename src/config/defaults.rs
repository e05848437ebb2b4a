//! The full site schema and a typed view over a validated site config.
//!
//! ```yaml
//! site_name: My Docs
//! site_url: https://example.com/docs/
//! theme:
//!   name: readthedocs
//!   locale: fr
//! nav:
//!   - index.md
//!   - About: about.md
//! ```

use super::option::{
    Deprecated, Dir, IpAddress, ListOf, Nav, Removed, SiteDir, SubConfig, Type, Url,
};
use super::util::extract_url_path;
use super::{CONFIG_FILE_PATH, Config, ConfigValue, Field, Schema};
use crate::theme::{Theme, ThemeOption, ThemeRegistry};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

/// Every setting a site config understands, in validation order.
pub fn site_schema(registry: Arc<dyn ThemeRegistry>) -> Schema {
    Schema::new([
        Field::new(CONFIG_FILE_PATH, Type::str()),
        Field::new("site_name", Type::str()).required(),
        Field::new("nav", Nav::new()),
        Field::new("pages", Removed::new().moved_to("nav")),
        Field::new("site_url", Url::dir()),
        Field::new("site_description", Type::str()),
        Field::new("site_author", Type::str()),
        Field::new("theme", ThemeOption::new(registry)).default("mkdocs"),
        Field::new("docs_dir", Dir::existing()).default("docs"),
        Field::new("site_dir", SiteDir::new()).default("site"),
        Field::new("copyright", Type::str()),
        Field::new(
            "google_analytics",
            Deprecated::new()
                .message(
                    "The configuration option 'google_analytics' has been deprecated and will \
                     be removed in a future release. Use 'theme.analytics.gtag' instead.",
                )
                .option(Type::list().with_length(2)),
        ),
        Field::new("dev_addr", IpAddress::new()).default("127.0.0.1:8000"),
        Field::new("use_directory_urls", Type::bool()).default(true),
        Field::new("repo_url", Url::new()),
        Field::new("edit_uri", Type::str()),
        Field::new("extra_css", ListOf::new(Type::str())).default(json!([])),
        Field::new("extra_javascript", ListOf::new(Type::str())).default(json!([])),
        Field::new("extra_templates", ListOf::new(Type::str())).default(json!([])),
        Field::new("markdown_extensions", Type::list())
            .default(json!(["toc", "tables", "fenced_code"])),
        Field::new("strict", Type::bool()).default(false),
        Field::new("remote_branch", Type::str()).default("gh-pages"),
        Field::new("remote_name", Type::str()).default("origin"),
        Field::new("extra", SubConfig::free_form()).default(json!({})),
        Field::new("watch", ListOf::new(Dir::existing())).default(json!([])),
    ])
}

// ============================================================================
// SiteConfig
// ============================================================================

/// Read-only typed access to a config validated against [`site_schema`].
///
/// Accessors return `None` for fields that are absent or failed validation.
#[derive(Debug, Clone, Copy)]
pub struct SiteConfig<'a> {
    config: &'a Config,
}

impl<'a> SiteConfig<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn site_name(&self) -> Option<&'a str> {
        self.config.get_str("site_name")
    }

    pub fn nav(&self) -> Option<&'a Value> {
        self.config.get("nav").and_then(ConfigValue::as_value)
    }

    pub fn docs_dir(&self) -> Option<&'a Path> {
        self.config.get_path("docs_dir")
    }

    pub fn site_dir(&self) -> Option<&'a Path> {
        self.config.get_path("site_dir")
    }

    pub fn site_url(&self) -> Option<&'a str> {
        self.config.get_str("site_url").filter(|url| !url.is_empty())
    }

    /// Path component of `site_url`, without slashes (`""` at the root).
    ///
    /// `https://example.github.io/my-project/` -> `my-project`
    pub fn path_prefix(&self) -> Option<String> {
        self.site_url().and_then(extract_url_path)
    }

    pub fn theme(&self) -> Option<&'a Theme> {
        self.config.theme("theme")
    }

    pub fn dev_addr(&self) -> Option<SocketAddr> {
        self.config.get_str("dev_addr").and_then(IpAddress::parse)
    }

    pub fn use_directory_urls(&self) -> bool {
        self.config.get_bool("use_directory_urls").unwrap_or(true)
    }

    pub fn strict(&self) -> bool {
        self.config.get_bool("strict").unwrap_or(false)
    }
}
