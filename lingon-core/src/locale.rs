//! Locale representation and directory-name canonicalization.
//!
//! Translation files live in one directory per locale, named
//! `language_REGION` (for example `zh_TW`). [`Locale::canonical_name`] maps a
//! locale to that name and doubles as the in-memory key of the store.

use crate::{LingonError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

static LOCALE_DIR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]{2}_[A-Z]{2}$").unwrap());

/// Check whether a directory name is a persisted locale directory (`xx_YY`).
///
/// ```
/// use lingon_core::is_locale_dir_name;
///
/// assert!(is_locale_dir_name("zh_TW"));
/// assert!(!is_locale_dir_name("zh"));
/// assert!(!is_locale_dir_name("backup"));
/// ```
pub fn is_locale_dir_name(name: &str) -> bool {
    LOCALE_DIR_PATTERN.is_match(name)
}

/// Represents a locale (language + optional region).
///
/// Two locales are equal when their canonical directory names match; the
/// optional script only affects [`Locale::tag`].
///
/// # Examples
///
/// ```
/// use lingon_core::Locale;
///
/// let zh_tw = Locale::new("zh", Some("tw"));
/// assert_eq!(zh_tw.canonical_name().as_deref(), Some("zh_TW"));
///
/// let zh = Locale::new("ZH", None::<&str>);
/// assert_eq!(zh.canonical_name().as_deref(), Some("zh"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
    /// Language code (ISO 639-1, e.g., "en", "zh")
    pub language: String,
    /// Optional region code (ISO 3166-1, e.g., "US", "TW")
    pub region: Option<String>,
    /// Optional script (e.g., "Hant")
    pub script: Option<String>,
}

impl Locale {
    /// Create a new locale. An empty region is treated as no region.
    pub fn new(language: impl Into<String>, region: Option<impl Into<String>>) -> Self {
        Self {
            language: language.into().trim().to_lowercase(),
            region: region
                .map(|r| r.into().trim().to_uppercase())
                .filter(|r| !r.is_empty()),
            script: None,
        }
    }

    /// Create a locale with script.
    pub fn with_script(
        language: impl Into<String>,
        script: Option<impl Into<String>>,
        region: Option<impl Into<String>>,
    ) -> Self {
        let mut locale = Self::new(language, region);
        locale.script = script.map(|s| {
            let s = s.into();
            // Title case for script
            let mut chars = s.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        });
        locale
    }

    /// Parse from a tag such as `zh_TW`, `zh-TW`, `zh-Hant-TW` or `zh`.
    pub fn parse(tag: &str) -> Result<Self> {
        let parts: Vec<&str> = tag.trim().split(['-', '_']).collect();

        if parts.is_empty() || parts[0].is_empty() {
            return Err(LingonError::InvalidLocale(tag.to_string()));
        }

        let language = parts[0].to_lowercase();

        // Validate language code (2-3 letters)
        if language.len() < 2
            || language.len() > 3
            || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(LingonError::InvalidLocale(tag.to_string()));
        }

        let mut script = None;
        let mut region = None;

        for part in parts.iter().skip(1) {
            if part.len() == 4 && part.chars().all(|c| c.is_ascii_alphabetic()) {
                script = Some(*part);
            } else if part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()) {
                region = Some(*part);
            } else if part.len() == 3 && part.chars().all(|c| c.is_ascii_digit()) {
                // UN M.49 code (3 digits)
                region = Some(*part);
            } else {
                return Err(LingonError::InvalidLocale(tag.to_string()));
            }
        }

        Ok(Self::with_script(language, script, region))
    }

    /// The canonical directory name: `language_REGION`, or `language` when
    /// there is no region. `None` when the language is empty.
    pub fn canonical_name(&self) -> Option<String> {
        if self.language.is_empty() {
            return None;
        }

        Some(match self.region.as_deref() {
            Some(region) if !region.is_empty() => format!("{}_{}", self.language, region),
            _ => self.language.clone(),
        })
    }

    /// Get the BCP 47 language tag (e.g., "zh-Hant-TW").
    pub fn tag(&self) -> String {
        let mut tag = self.language.clone();
        if let Some(ref script) = self.script {
            tag.push('-');
            tag.push_str(script);
        }
        if let Some(ref region) = self.region {
            tag.push('-');
            tag.push_str(region);
        }
        tag
    }

    /// Get language-only locale (strips region).
    pub fn language_only(&self) -> Self {
        Self {
            language: self.language.clone(),
            script: self.script.clone(),
            region: None,
        }
    }

    // Common locales

    /// English (no region)
    pub fn en() -> Self {
        Self::new("en", None::<&str>)
    }

    /// English (US)
    pub fn en_us() -> Self {
        Self::new("en", Some("US"))
    }

    /// English (GB)
    pub fn en_gb() -> Self {
        Self::new("en", Some("GB"))
    }

    /// French (France)
    pub fn fr_fr() -> Self {
        Self::new("fr", Some("FR"))
    }

    /// German (Germany)
    pub fn de_de() -> Self {
        Self::new("de", Some("DE"))
    }

    /// Spanish (Spain)
    pub fn es_es() -> Self {
        Self::new("es", Some("ES"))
    }

    /// Japanese (Japan)
    pub fn ja_jp() -> Self {
        Self::new("ja", Some("JP"))
    }

    /// Korean (Korea)
    pub fn ko_kr() -> Self {
        Self::new("ko", Some("KR"))
    }

    /// Chinese (China, Simplified)
    pub fn zh_cn() -> Self {
        Self::with_script("zh", Some("Hans"), Some("CN"))
    }

    /// Chinese (Taiwan, Traditional)
    pub fn zh_tw() -> Self {
        Self::with_script("zh", Some("Hant"), Some("TW"))
    }
}

impl PartialEq for Locale {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_name() == other.canonical_name()
    }
}

impl Eq for Locale {}

impl Hash for Locale {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_name().hash(state);
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Locale {
    type Err = LingonError;

    fn from_str(s: &str) -> Result<Self> {
        Locale::parse(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = LingonError;

    fn try_from(tag: String) -> Result<Self> {
        Locale::parse(&tag)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.tag()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::en_us()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_canonical_name_with_region() {
        assert_eq!(
            Locale::new("zh", Some("TW")).canonical_name(),
            Some("zh_TW".to_string())
        );
        assert_eq!(
            Locale::new("EN", Some("us")).canonical_name(),
            Some("en_US".to_string())
        );
    }

    #[test]
    fn test_canonical_name_without_region() {
        assert_eq!(Locale::new("zh", Some("")).canonical_name(), Some("zh".to_string()));
        assert_eq!(
            Locale::new("zh", None::<&str>).canonical_name(),
            Some("zh".to_string())
        );
    }

    #[test]
    fn test_canonical_name_requires_language() {
        assert_eq!(Locale::new("", Some("TW")).canonical_name(), None);
        assert_eq!(Locale::new("  ", None::<&str>).canonical_name(), None);
    }

    #[test]
    fn test_locale_parse() {
        let en = Locale::parse("en").unwrap();
        assert_eq!(en.language, "en");
        assert!(en.region.is_none());

        let zh_tw = Locale::parse("zh_TW").unwrap();
        assert_eq!(zh_tw.canonical_name().as_deref(), Some("zh_TW"));

        let zh_hant_tw = Locale::parse("zh-Hant-TW").unwrap();
        assert_eq!(zh_hant_tw.script, Some("Hant".to_string()));
        assert_eq!(zh_hant_tw.canonical_name().as_deref(), Some("zh_TW"));

        assert!(Locale::parse("").is_err());
        assert!(Locale::parse("english").is_err());
        assert!(Locale::parse("en-U$").is_err());
    }

    #[test]
    fn test_locale_tag() {
        let locale = Locale::with_script("zh", Some("hant"), Some("tw"));
        assert_eq!(locale.tag(), "zh-Hant-TW");
        assert_eq!(locale.to_string(), "zh-Hant-TW");
    }

    #[test]
    fn test_equality_follows_canonical_name() {
        assert_eq!(Locale::zh_tw(), Locale::new("zh", Some("TW")));
        assert_ne!(Locale::zh_tw(), Locale::zh_cn());

        let set: HashSet<Locale> = [Locale::zh_tw(), Locale::parse("zh_TW").unwrap()]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_language_only() {
        let zh = Locale::zh_tw().language_only();
        assert_eq!(zh.canonical_name().as_deref(), Some("zh"));
    }

    #[test]
    fn test_is_locale_dir_name() {
        assert!(is_locale_dir_name("en_US"));
        assert!(is_locale_dir_name("zh_TW"));
        assert!(!is_locale_dir_name("en"));
        assert!(!is_locale_dir_name("en-US"));
        assert!(!is_locale_dir_name("EN_us"));
        assert!(!is_locale_dir_name("eng_USA"));
    }

    #[test]
    fn test_serde_uses_tag() {
        let locale: Locale = serde_json::from_str("\"zh_TW\"").unwrap();
        assert_eq!(locale, Locale::zh_tw());
        assert_eq!(serde_json::to_string(&Locale::en_us()).unwrap(), "\"en-US\"");
        assert!(serde_json::from_str::<Locale>("\"???\"").is_err());
    }
}
