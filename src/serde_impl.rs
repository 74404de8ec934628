//! Serde support for configuration values (feature-gated)
//!
//! [`Locale`] serializes as its tag (`"fr-FR"`), [`AnalysisMode`] and
//! [`Operator`] as their upper-case names. Names are matched
//! case-insensitively on input, so a config file may say `"parallel"`.
//!
//! ```rust,ignore
//! use serde::Deserialize;
//! use tidemark::{locale::Locale, AnalysisMode};
//!
//! #[derive(Deserialize)]
//! struct Settings {
//!     locale: Locale,
//!     analysis: AnalysisMode,
//! }
//!
//! let settings: Settings =
//!     serde_json::from_str(r#"{"locale": "de-DE", "analysis": "parallel"}"#).unwrap();
//! assert_eq!(settings.analysis, AnalysisMode::Parallel);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::analysis::AnalysisMode;
use crate::locale::Locale;
use crate::step::Operator;

fn by_name<'de, D, T>(
    deserializer: D,
    candidates: &[T],
    expected: &'static [&'static str],
) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Copy + ToString,
{
    let name = String::deserialize(deserializer)?;
    candidates
        .iter()
        .copied()
        .find(|candidate| candidate.to_string().eq_ignore_ascii_case(&name))
        .ok_or_else(|| serde::de::Error::unknown_variant(&name, expected))
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        if tag.is_empty() {
            return Ok(Locale::root());
        }
        tag.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for AnalysisMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AnalysisMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        by_name(
            deserializer,
            &AnalysisMode::ALL,
            &["STANDARD", "STREAM", "PARALLEL"],
        )
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Operator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        const ALL: [Operator; 6] = [
            Operator::None,
            Operator::And,
            Operator::Or,
            Operator::Xor,
            Operator::Nand,
            Operator::Nor,
        ];
        by_name(
            deserializer,
            &ALL,
            &["NONE", "AND", "OR", "XOR", "NAND", "NOR"],
        )
    }
}
