//! URL helpers for validated site settings.

/// Path a site is served under, taken from its `site_url`.
///
/// Surrounding slashes are dropped, so a site at the host root yields `""`.
/// Port, credentials, query and fragment never leak into the result. Returns
/// `None` when `site_url` doesn't parse as an absolute URL.
///
/// ```ignore
/// extract_url_path("https://docs.example.org/")              -> Some("")
/// extract_url_path("https://example.org/projects/widget/")   -> Some("projects/widget")
/// extract_url_path("docs.example.org")                       -> None
/// ```
pub fn extract_url_path(site_url: &str) -> Option<String> {
    let url = url::Url::parse(site_url).ok()?;
    Some(url.path().trim_matches('/').to_owned())
}
