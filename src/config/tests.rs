//! End-to-end validation scenarios.

use super::option::{Dir, SiteDir, Type};
use super::*;
use crate::theme::{BuiltinThemes, ThemeOption, ThemeRegistry};
use serde_json::json;
use std::fs;
use std::path::MAIN_SEPARATOR_STR;
use tempfile::TempDir;

fn registry() -> Arc<dyn ThemeRegistry> {
    BuiltinThemes::new("/themes", "/templates").into_shared()
}

fn site(data: Value) -> (Config, ValidationReport) {
    let mut config = Config::from_dict(Arc::new(site_schema(registry())), data).unwrap();
    let report = config.validate();
    (config, report)
}

/// A project directory with an existing `docs/`.
fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();
    dir
}

fn site_in(dir: &TempDir, data: Value) -> (Config, ValidationReport) {
    let mut config = Config::from_dict(Arc::new(site_schema(registry())), data)
        .unwrap()
        .with_base_dir(dir.path());
    let report = config.validate();
    (config, report)
}

fn theme_config(data: Value) -> (Config, ValidationReport) {
    let schema = Schema::new([Field::new("theme", ThemeOption::new(registry())).default("mkdocs")]);
    let mut config = Config::from_dict(Arc::new(schema), data)
        .unwrap()
        .with_base_dir("/proj");
    let report = config.validate();
    (config, report)
}

// ============================================================================
// presence rules
// ============================================================================

#[test]
fn test_missing_required() {
    let dir = project();
    let (_, report) = site_in(&dir, json!({}));
    assert_eq!(report.errors().len(), 1);
    assert_eq!(report.errors()[0].field, "site_name");
    assert_eq!(report.errors()[0].message, REQUIRED_MESSAGE);
    assert!(report.warnings().is_empty());
}

#[test]
fn test_null_required_is_missing() {
    let schema = Schema::new([Field::new("site_name", Type::str()).required()]);
    let mut config = Config::from_dict(Arc::new(schema), json!({"site_name": null})).unwrap();
    let report = config.validate();
    assert_eq!(report.errors().len(), 1);
    assert_eq!(report.errors()[0].message, REQUIRED_MESSAGE);
}

#[test]
fn test_removed_pages() {
    let dir = project();
    for pages in [json!(["index.md", "about.md"]), json!(null), json!("index.md")] {
        let (_, report) = site_in(&dir, json!({"site_name": "Example", "pages": pages}));
        assert_eq!(report.errors().len(), 1);
        assert_eq!(report.errors()[0].field, "pages");
        assert_eq!(
            report.errors()[0].message,
            "The configuration option 'pages' was removed. Use 'nav' instead."
        );
        assert!(report.warnings().is_empty());
    }
}

#[test]
fn test_empty_nav_stays_absent() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();
    let (config, report) = site(json!({
        "site_name": "Example",
        "config_file_path": dir.path().join("mkdocs.yml").to_str().unwrap(),
    }));
    assert!(report.is_empty(), "{report}");
    assert_eq!(config.get("nav"), None);
}

// ============================================================================
// unknown keys
// ============================================================================

#[test]
fn test_unknown_keys_warn_in_order() {
    let schema = Schema::new([Field::new("site_name", Type::str())]);
    let mut config = Config::new(Arc::new(schema));
    config
        .load_dict(json!({"site_name": "x", "zeta": 1, "alpha": 2}))
        .unwrap();
    config.load_dict(json!({"zeta": 3, "beta": 4})).unwrap();
    let report = config.validate();

    assert!(!report.has_errors());
    let warnings: Vec<_> = report.warnings().iter().map(|w| w.field.as_str()).collect();
    assert_eq!(warnings, ["zeta", "alpha", "beta"]);
    assert_eq!(
        report.warnings()[0].message,
        "Unrecognised configuration name: zeta"
    );
    assert_eq!(config.extras()["zeta"], json!(3));
}

#[test]
fn test_load_dict_rejects_non_mapping() {
    let mut config = Config::new(Arc::new(Schema::default()));
    let err = config.load_dict(json!(["site_name"])).unwrap_err();
    assert!(matches!(err, ConfigError::NotAMapping("list")));
}

// ============================================================================
// docs_dir / site_dir
// ============================================================================

#[test]
fn test_doc_dir_in_site_dir() {
    let tmp = TempDir::new().unwrap();
    let sep = MAIN_SEPARATOR_STR;
    let site_docs = format!("site{sep}docs");
    let cases = [
        (site_docs.as_str(), "site"),
        ("docs", "."),
        (".", "."),
        ("docs", ""),
        ("", ""),
        ("docs", "docs"),
    ];

    for (docs_dir, site_dir) in cases {
        let schema = Schema::new([
            Field::new("docs_dir", Dir::new()).default("docs"),
            Field::new("site_dir", SiteDir::new()).default("site"),
            Field::new(CONFIG_FILE_PATH, Type::str()),
        ]);
        let mut config = Config::from_dict(
            Arc::new(schema),
            json!({
                "config_file_path": tmp.path().join("sub").join("mkdocs.yml").to_str().unwrap(),
                "docs_dir": docs_dir,
                "site_dir": site_dir,
            }),
        )
        .unwrap();
        let report = config.validate();

        assert_eq!(report.errors().len(), 1, "docs_dir={docs_dir:?} site_dir={site_dir:?}");
        assert_eq!(report.errors()[0].field, "site_dir");
        assert!(report.warnings().is_empty());
    }
}

#[test]
fn test_relative_config_file_path_resolves_against_cwd() {
    let schema = Schema::new([
        Field::new("docs_dir", Dir::new()).default("docs"),
        Field::new("site_dir", SiteDir::new()).default("site"),
        Field::new(CONFIG_FILE_PATH, Type::str()),
    ]);
    let mut config = Config::from_dict(
        Arc::new(schema),
        json!({
            "config_file_path": "mkdocs.yml",
            "docs_dir": "../docs",
            "site_dir": "docs",
        }),
    )
    .unwrap();
    let cwd = std::env::current_dir().unwrap();
    assert_eq!(config.base_dir(), cwd);

    let report = config.validate();
    assert!(report.is_empty(), "{report}");

    let docs_dir = config.get_path("docs_dir").unwrap();
    let site_dir = config.get_path("site_dir").unwrap();
    assert!(docs_dir.is_absolute());
    assert_eq!(docs_dir, crate::utils::normalize_path(Path::new("../docs"), &cwd));
    assert_eq!(site_dir, cwd.join("docs"));
}

#[test]
fn test_relative_base_dir_is_made_absolute() {
    let config = Config::new(Arc::new(Schema::default())).with_base_dir("proj");
    let base = config.base_dir();
    assert!(base.is_absolute());
    assert!(base.ends_with("proj"));
}

#[test]
fn test_sibling_dirs_pass() {
    let tmp = TempDir::new().unwrap();
    let schema = Schema::new([
        Field::new("docs_dir", Dir::new()).default("docs"),
        Field::new("site_dir", SiteDir::new()).default("site"),
    ]);
    let mut config = Config::from_dict(Arc::new(schema), json!({"docs_dir": "docs-src"}))
        .unwrap()
        .with_base_dir(tmp.path());
    let report = config.validate();
    assert!(report.is_empty(), "{report}");
    assert_eq!(config.get_path("site_dir"), Some(tmp.path().join("site").as_path()));
}

// ============================================================================
// theme
// ============================================================================

#[test]
fn test_theme_default() {
    let (config, report) = theme_config(json!({}));
    assert!(report.is_empty());
    let theme = config.theme("theme").unwrap();
    assert_eq!(
        theme.dirs(),
        [PathBuf::from("/themes/mkdocs"), PathBuf::from("/templates")]
    );
    assert_eq!(
        Value::Object(theme.vars().clone()),
        json!({
            "name": "mkdocs",
            "locale": "en",
            "include_search_page": false,
            "search_index_only": false,
            "analytics": {"gtag": null},
            "highlightjs": true,
            "hljs_style": "github",
            "hljs_languages": [],
            "navigation_depth": 2,
            "nav_style": "primary",
            "shortcuts": {"help": 191, "next": 78, "previous": 80, "search": 83},
        })
    );
}

#[test]
fn test_theme_builtin_string_and_mapping() {
    let (a, report_a) = theme_config(json!({"theme": "readthedocs"}));
    let (b, report_b) = theme_config(json!({"theme": {"name": "readthedocs"}}));
    assert!(report_a.is_empty() && report_b.is_empty());

    let theme = a.theme("theme").unwrap();
    assert_eq!(theme, b.theme("theme").unwrap());
    assert_eq!(
        theme.dirs(),
        [PathBuf::from("/themes/readthedocs"), PathBuf::from("/templates")]
    );
    assert_eq!(
        theme.static_templates().iter().collect::<Vec<_>>(),
        ["404.html", "sitemap.xml"]
    );
    assert_eq!(theme.get("navigation_depth"), Some(&json!(4)));
    assert_eq!(theme.get("logo"), Some(&Value::Null));
}

#[test]
fn test_theme_custom_dir_only() {
    let mytheme = TempDir::new().unwrap();
    let (config, report) = theme_config(json!({
        "theme": {"name": null, "custom_dir": mytheme.path().to_str().unwrap()},
    }));
    assert!(report.is_empty(), "{report}");

    let theme = config.theme("theme").unwrap();
    assert_eq!(
        theme.dirs(),
        [mytheme.path().to_path_buf(), PathBuf::from("/templates")]
    );
    assert_eq!(theme.static_templates().iter().collect::<Vec<_>>(), ["sitemap.xml"]);
    assert_eq!(
        Value::Object(theme.vars().clone()),
        json!({"name": null, "locale": "en"})
    );
}

#[test]
fn test_theme_builtin_with_custom_dir() {
    let custom = TempDir::new().unwrap();
    let (config, report) = theme_config(json!({
        "theme": {"name": "readthedocs", "custom_dir": custom.path().to_str().unwrap()},
    }));
    assert!(report.is_empty(), "{report}");
    assert_eq!(
        config.theme("theme").unwrap().dirs(),
        [
            custom.path().to_path_buf(),
            PathBuf::from("/themes/readthedocs"),
            PathBuf::from("/templates"),
        ]
    );
}

#[test]
fn test_theme_user_vars() {
    let (config, report) = theme_config(json!({
        "theme": {
            "name": "mkdocs",
            "locale": "fr",
            "static_templates": ["foo.html"],
            "show_sidebar": false,
            "some_var": "bar",
            "nav_style": "dark",
        },
    }));
    assert!(report.is_empty(), "{report}");

    let theme = config.theme("theme").unwrap();
    assert_eq!(
        theme.static_templates().iter().collect::<Vec<_>>(),
        ["404.html", "foo.html", "sitemap.xml"]
    );
    assert_eq!(theme.locale().to_string(), "fr");
    assert_eq!(theme.get("locale"), Some(&json!("fr")));
    assert_eq!(theme.get("show_sidebar"), Some(&json!(false)));
    assert_eq!(theme.get("some_var"), Some(&json!("bar")));
    // user value wins over the theme default
    assert_eq!(theme.get("nav_style"), Some(&json!("dark")));
    assert_eq!(theme.get("hljs_style"), Some(&json!("github")));
}

#[test]
fn test_theme_resolution_is_deterministic() {
    let data = json!({"theme": {"name": "readthedocs", "locale": "de", "x": 1}});
    let (a, _) = theme_config(data.clone());
    let (b, _) = theme_config(data);
    assert_eq!(a.theme("theme"), b.theme("theme"));
    assert_eq!(a.to_value(), b.to_value());
}

#[test]
fn test_theme_errors() {
    let (_, report) = theme_config(json!({"theme": "material"}));
    assert_eq!(report.errors().len(), 1);
    assert_eq!(report.errors()[0].message, "Unrecognised theme name: 'material'.");

    let (_, report) = theme_config(json!({"theme": {"name": "mkdocs", "locale": "??"}}));
    assert_eq!(report.errors()[0].message, "Invalid value for locale: '??'");

    let (_, report) = theme_config(json!({"theme": {"name": "mkdocs", "custom_dir": "nope"}}));
    assert!(report.errors()[0].message.contains("nope"));
}

// ============================================================================
// whole site
// ============================================================================

#[test]
fn test_config_file_with_nav() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("site.toml");
    fs::write(
        &config_path,
        "site_name = \"Example\"\nnav = [{ Introduction = \"index.md\" }]\n",
    )
    .unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();

    let document = value::read_toml_file(&config_path).unwrap();
    let (config, report) = site(document);
    assert!(report.is_empty(), "{report}");
    assert_eq!(config.get_str("site_name"), Some("Example"));
    assert_eq!(
        config.get("nav").and_then(ConfigValue::as_value),
        Some(&json!([{"Introduction": "index.md"}]))
    );
}

#[test]
fn test_full_site_validates_cleanly() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();
    fs::create_dir(dir.path().join("overrides")).unwrap();

    let (config, report) = site(json!({
        "site_name": "Example",
        "site_url": "https://example.com/docs",
        "nav": [{"Introduction": "index.md"}, {"Guide": ["guide/a.md", "guide/b.md"]}],
        "theme": {"name": "readthedocs", "sticky_navigation": false},
        "extra": {"version": "1.0"},
        "markdown_extensions": ["toc", "admonition"],
        "watch": ["overrides"],
        "config_file_path": dir.path().join("mkdocs.yml").to_str().unwrap(),
    }));
    assert!(report.is_empty(), "{report}");

    assert_eq!(config.get_str("site_url"), Some("https://example.com/docs/"));
    assert_eq!(config.get_path("docs_dir"), Some(dir.path().join("docs").as_path()));
    assert_eq!(config.get_str("dev_addr"), Some("127.0.0.1:8000"));
    assert_eq!(config.get_bool("use_directory_urls"), Some(true));
    assert_eq!(
        config.get("watch").and_then(ConfigValue::as_value),
        Some(&json!([dir.path().join("overrides").to_str().unwrap()]))
    );
    assert_eq!(
        config.theme("theme").unwrap().get("sticky_navigation"),
        Some(&json!(false))
    );

    let value = config.to_value();
    assert_eq!(value["extra"], json!({"version": "1.0"}));
    assert_eq!(value["theme"]["name"], json!("readthedocs"));
}

#[test]
fn test_revalidate_is_idempotent() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();

    let (mut config, report) = site(json!({
        "site_name": "Example",
        "theme": {"name": "mkdocs", "locale": "pt_br"},
        "config_file_path": dir.path().join("mkdocs.yml").to_str().unwrap(),
    }));
    assert!(report.is_empty(), "{report}");

    let before = config.to_value();
    let theme_before = config.theme("theme").cloned();
    let report = config.validate();
    assert!(report.is_empty(), "{report}");
    assert_eq!(config.to_value(), before);
    assert_eq!(config.theme("theme").cloned(), theme_before);
}

#[test]
fn test_failed_field_keeps_staged_value() {
    let dir = project();
    let (config, report) = site_in(&dir, json!({"site_name": "Example", "strict": "yes"}));
    assert_eq!(report.errors().len(), 1);
    assert_eq!(report.errors()[0].field, "strict");
    assert_eq!(config.get_str("strict"), Some("yes"));
}

#[test]
fn test_set_overrides_declared_only() {
    let mut config = Config::new(Arc::new(Schema::new([Field::new("strict", Type::bool())])));
    assert!(config.set("strict", true));
    assert!(!config.set("unknown", true));
    assert!(config.validate().is_empty());
    assert_eq!(config.get_bool("strict"), Some(true));
    assert_eq!(config.keys().collect::<Vec<_>>(), ["strict"]);
}

#[test]
fn test_report_into_result() {
    let (_, report) = site(json!({}));
    let err = report.into_result().unwrap_err();
    assert!(matches!(err, ConfigError::Diagnostics(_)));
}
