//! Core types used throughout the project.

use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// Display language of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Locale {
    /// Chinese, the language the fixtures are authored in.
    #[default]
    Zh,
    /// English.
    En,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported locale '{0}'. Expected \"zh\" or \"en\"")]
pub struct LocaleParseError(pub String);

impl Locale {
    /// The locale fixtures are written in. Filtering for it is the identity.
    pub const NATIVE: Self = Self::Zh;

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::En => "en",
        }
    }

    #[must_use]
    pub const fn is_native(self) -> bool {
        matches!(self, Self::Zh)
    }

    /// Resolves a stored preference, falling back to `default` when it is
    /// missing or not a supported locale.
    #[must_use]
    pub fn resolve(stored: Option<&str>, default: Self) -> Self {
        let Some(raw) = stored else {
            return default;
        };

        raw.parse().unwrap_or_else(|err: LocaleParseError| {
            tracing::debug!("Ignoring stored locale preference: {err}");
            default
        })
    }
}

impl FromStr for Locale {
    type Err = LocaleParseError;

    /// Accepts region-qualified tags (`zh-CN`, `en_US`) by their primary subtag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s.trim().split(['-', '_']).next().unwrap_or_default();

        match primary.to_ascii_lowercase().as_str() {
            "zh" => Ok(Self::Zh),
            "en" => Ok(Self::En),
            _ => Err(LocaleParseError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Locale {
    type Error = LocaleParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
