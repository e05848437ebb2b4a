//! sitecfg - schema-driven configuration validation for documentation sites.
//!
//! Raw documents are staged into a [`Config`] bound to a [`Schema`], then
//! validated in place. Every problem with user data lands in a
//! [`ValidationReport`]; only structurally unusable input is a [`ConfigError`].
//!
//! ```ignore
//! use sitecfg::{BuiltinThemes, Config, site_schema};
//!
//! let registry = BuiltinThemes::new(themes_root, templates_dir).into_shared();
//! let mut config = Config::from_dict(Arc::new(site_schema(registry)), document)?;
//! let report = config.validate();
//! report.print_warnings();
//! report.into_result()?;
//! ```

pub mod config;
pub mod logger;
pub mod theme;
pub mod utils;

pub use config::{
    Config, ConfigError, ConfigOption, ConfigValue, Field, Schema, SiteConfig, ValidationError,
    ValidationReport, site_schema,
};
pub use theme::{BuiltinThemes, Theme, ThemeOption, ThemeRegistry};
