//! Locale identifiers: `language[_Script][_TERRITORY]`.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

static RE_LOCALE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z]{2,3})(?:[_-]([A-Za-z]{4}))?(?:[_-]([A-Za-z]{2}|[0-9]{3}))?$").unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid value for locale: '{0}'")]
pub struct LocaleError(pub String);

/// A parsed locale, stored in canonical casing (`en`, `zh_Hant_TW`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    pub language: String,
    pub script: Option<String>,
    pub territory: Option<String>,
}

impl Locale {
    pub fn parse(raw: &str) -> Result<Self, LocaleError> {
        let caps = RE_LOCALE
            .captures(raw.trim())
            .ok_or_else(|| LocaleError(raw.to_owned()))?;

        let script = caps.get(2).map(|m| {
            let s = m.as_str();
            let (head, tail) = s.split_at(1);
            format!("{}{}", head.to_ascii_uppercase(), tail.to_ascii_lowercase())
        });

        Ok(Self {
            language: caps[1].to_ascii_lowercase(),
            script,
            territory: caps.get(3).map(|m| m.as_str().to_ascii_uppercase()),
        })
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            language: "en".into(),
            script: None,
            territory: None,
        }
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.language)?;
        if let Some(script) = &self.script {
            write!(f, "_{script}")?;
        }
        if let Some(territory) = &self.territory {
            write!(f, "_{territory}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language_only() {
        let locale = Locale::parse("fr").unwrap();
        assert_eq!(locale.language, "fr");
        assert_eq!(locale.script, None);
        assert_eq!(locale.territory, None);
        assert_eq!(locale.to_string(), "fr");
    }

    #[test]
    fn test_parse_full_canonicalizes() {
        let locale: Locale = "zh-hant-tw".parse().unwrap();
        assert_eq!(locale.to_string(), "zh_Hant_TW");

        let locale = Locale::parse("pt_BR").unwrap();
        assert_eq!(locale.territory.as_deref(), Some("BR"));
        assert_eq!(locale.to_string(), "pt_BR");

        assert_eq!(Locale::parse("es_419").unwrap().to_string(), "es_419");
    }

    #[test]
    fn test_parse_invalid() {
        for raw in ["", "e", "english", "en_", "en_US_extra", "12"] {
            let err = Locale::parse(raw).unwrap_err();
            assert_eq!(err.to_string(), format!("Invalid value for locale: '{raw}'"));
        }
    }

    #[test]
    fn test_default_is_english() {
        assert_eq!(Locale::default().to_string(), "en");
    }
}
