//! Process-wide locale used when rendering failure messages
//!
//! The locale only affects locale-sensitive tokens in rendered messages:
//! decimal and grouping separators of `%d`/`%f` conversions and the date
//! pattern used when a date is displayed. Literal template text never
//! changes with the locale.
//!
//! The active locale is a single process-wide setting. It defaults to the
//! platform locale (`LC_ALL`, `LC_MESSAGES`, then `LANG`) the first time it
//! is read, and can be replaced at any time with [`set_locale`]. Concurrent
//! writers race with last-write-wins semantics.
//!
//! # Example
//!
//! ```rust
//! use tidemark::locale::{self, Locale};
//!
//! let french: Locale = "fr-FR".parse().unwrap();
//! assert_eq!(french.decimal_separator(), ',');
//! assert_eq!(french.to_string(), "fr-FR");
//!
//! let previous = locale::locale();
//! locale::set_locale(french.clone());
//! assert_eq!(locale::locale(), french);
//! locale::set_locale(previous);
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

use crate::error::ParseLocaleError;

static CURRENT: RwLock<Option<Locale>> = RwLock::new(None);

/// A language with an optional region, e.g. `en-US` or `fr`.
///
/// The empty language is the root locale: ISO dates, `.` as decimal
/// separator and `,` for grouping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    /// Create a locale from a language code and an optional region code.
    ///
    /// Codes are normalized: languages to lower case, regions to upper case.
    pub fn new(language: impl AsRef<str>, region: Option<&str>) -> Self {
        Locale {
            language: language.as_ref().to_ascii_lowercase(),
            region: region
                .filter(|r| !r.is_empty())
                .map(|r| r.to_ascii_uppercase()),
        }
    }

    /// The root locale, independent of any language.
    pub fn root() -> Self {
        Locale {
            language: String::new(),
            region: None,
        }
    }

    /// US English.
    pub fn us() -> Self {
        Locale::new("en", Some("US"))
    }

    /// The language code, empty for the root locale.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The region code, if any.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Character separating the integer part from the fraction.
    pub fn decimal_separator(&self) -> char {
        match self.language.as_str() {
            "fr" | "de" | "es" | "it" | "pt" | "nl" | "ru" | "pl" | "sv" | "fi" | "cs" | "nb"
            | "da" | "tr" => ',',
            _ => '.',
        }
    }

    /// Character inserted between digit groups when grouping is requested.
    pub fn grouping_separator(&self) -> char {
        match self.language.as_str() {
            "fr" => '\u{202f}',
            "ru" | "pl" | "sv" | "fi" | "cs" | "nb" => '\u{a0}',
            "de" | "es" | "it" | "pt" | "nl" | "da" | "tr" => '.',
            _ => ',',
        }
    }

    /// `chrono` format pattern used to display dates.
    pub fn date_pattern(&self) -> &'static str {
        match (self.language.as_str(), self.region.as_deref()) {
            ("en", Some("GB" | "AU" | "NZ" | "IE" | "IN")) => "%d/%m/%Y",
            ("en", _) => "%m/%d/%Y",
            ("fr" | "es" | "it" | "pt", _) => "%d/%m/%Y",
            ("de" | "ru" | "pl" | "fi" | "cs" | "nb" | "da" | "tr", _) => "%d.%m.%Y",
            ("nl", _) => "%d-%m-%Y",
            ("ja" | "zh", _) => "%Y/%m/%d",
            ("ko", _) => "%Y.%m.%d",
            _ => "%Y-%m-%d",
        }
    }

    /// `chrono` format pattern used to display date-times.
    pub fn date_time_pattern(&self) -> String {
        format!("{} %H:%M:%S", self.date_pattern())
    }

    /// Locale described by the platform environment, or the root locale.
    ///
    /// Reads `LC_ALL`, `LC_MESSAGES` and `LANG` in that order, skipping
    /// unset, empty and unparseable values.
    pub fn platform() -> Self {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find_map(|value| value.parse().ok())
            .unwrap_or_else(Locale::root)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::root()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.language)?;
        if let Some(region) = &self.region {
            write!(f, "-{}", region)?;
        }
        Ok(())
    }
}

impl FromStr for Locale {
    type Err = ParseLocaleError;

    /// Parse BCP 47-like tags (`fr-FR`) and POSIX names (`fr_FR.UTF-8@euro`).
    ///
    /// `C` and `POSIX` map to the root locale.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let trimmed = tag.trim();
        let base = trimmed
            .split(['.', '@'])
            .next()
            .unwrap_or_default();
        if base.is_empty() {
            return Err(ParseLocaleError::new(tag));
        }
        if base == "C" || base == "POSIX" {
            return Ok(Locale::root());
        }

        let mut parts = base.split(['-', '_']);
        let language = parts.next().unwrap_or_default();
        let region = parts.next();
        let valid_language =
            (2..=3).contains(&language.len()) && language.chars().all(|c| c.is_ascii_alphabetic());
        let valid_region = region.map_or(true, |r| {
            (2..=3).contains(&r.len()) && r.chars().all(|c| c.is_ascii_alphanumeric())
        });
        if !valid_language || !valid_region || parts.next().is_some() {
            return Err(ParseLocaleError::new(tag));
        }
        Ok(Locale::new(language, region))
    }
}

/// The active process-wide locale.
///
/// The first read initializes it from [`Locale::platform`] unless
/// [`set_locale`] ran before.
pub fn locale() -> Locale {
    if let Some(current) = CURRENT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
    {
        return current.clone();
    }

    let mut slot = CURRENT.write().unwrap_or_else(PoisonError::into_inner);
    slot.get_or_insert_with(Locale::platform).clone()
}

/// Replace the active process-wide locale.
pub fn set_locale(locale: Locale) {
    #[cfg(feature = "tracing")]
    tracing::debug!(locale = %locale, "message locale changed");
    *CURRENT.write().unwrap_or_else(PoisonError::into_inner) = Some(locale);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag() {
        let locale: Locale = "fr-FR".parse().unwrap();
        assert_eq!(locale.language(), "fr");
        assert_eq!(locale.region(), Some("FR"));
    }

    #[test]
    fn test_parse_posix_name() {
        let locale: Locale = "de_DE.UTF-8@euro".parse().unwrap();
        assert_eq!(locale, Locale::new("de", Some("DE")));
    }

    #[test]
    fn test_parse_language_only() {
        let locale: Locale = "ja".parse().unwrap();
        assert_eq!(locale.region(), None);
        assert_eq!(locale.to_string(), "ja");
    }

    #[test]
    fn test_parse_c_is_root() {
        assert_eq!("C".parse::<Locale>().unwrap(), Locale::root());
        assert_eq!("POSIX".parse::<Locale>().unwrap(), Locale::root());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Locale>().is_err());
        assert!("english-please".parse::<Locale>().is_err());
        assert!("e1-US".parse::<Locale>().is_err());
        assert!("en-US-x-y".parse::<Locale>().is_err());
    }

    #[test]
    fn test_separators() {
        assert_eq!(Locale::us().decimal_separator(), '.');
        assert_eq!(Locale::us().grouping_separator(), ',');
        assert_eq!(Locale::new("de", None).decimal_separator(), ',');
        assert_eq!(Locale::new("de", None).grouping_separator(), '.');
        assert_eq!(Locale::new("fr", None).grouping_separator(), '\u{202f}');
    }

    #[test]
    fn test_date_patterns() {
        assert_eq!(Locale::us().date_pattern(), "%m/%d/%Y");
        assert_eq!(Locale::new("en", Some("GB")).date_pattern(), "%d/%m/%Y");
        assert_eq!(Locale::root().date_pattern(), "%Y-%m-%d");
        assert_eq!(
            Locale::new("de", None).date_time_pattern(),
            "%d.%m.%Y %H:%M:%S"
        );
    }

    #[test]
    fn test_root_display_is_empty() {
        assert_eq!(Locale::root().to_string(), "");
    }
}
