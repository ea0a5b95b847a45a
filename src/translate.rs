//! Best-effort Chinese → English translation of single strings.

use std::borrow::Cow;

use crate::config::PlaceholderConfig;
use crate::detect::{
    contains_chinese,
    strip_chinese,
};
use crate::dictionary::PhraseDictionary;

/// Category of a field, sniffed from its name. Picks the fallback used when
/// dictionary substitution leaves Chinese text behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldHint {
    Name,
    Team,
    Position,
    Date,
    Generic,
}

impl FieldHint {
    /// Case-insensitive substring match, checked in declaration order.
    #[must_use]
    pub fn from_field(field: &str) -> Self {
        let field = field.to_ascii_lowercase();

        if field.contains("name") {
            Self::Name
        } else if field.contains("team") {
            Self::Team
        } else if field.contains("position") {
            Self::Position
        } else if field.contains("date") {
            Self::Date
        } else {
            Self::Generic
        }
    }
}

/// Dictionary-backed translator with per-category fallbacks.
#[derive(Debug, Clone)]
pub struct Translator {
    dictionary: Cow<'static, PhraseDictionary>,
    placeholders: PlaceholderConfig,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(Cow::Borrowed(PhraseDictionary::builtin()), PlaceholderConfig::default())
    }
}

impl Translator {
    #[must_use]
    pub const fn new(
        dictionary: Cow<'static, PhraseDictionary>,
        placeholders: PlaceholderConfig,
    ) -> Self {
        Self { dictionary, placeholders }
    }

    /// Translates `value`, using `field` only to choose a fallback.
    ///
    /// 1. Text without Chinese is returned as is.
    /// 2. An exact dictionary hit returns the mapped phrase.
    /// 3. Otherwise every known phrase is substituted, longest first.
    /// 4. If Chinese text survives, the field hint picks a placeholder.
    ///
    /// The result never contains Chinese text as long as the placeholders
    /// don't, which config validation enforces.
    #[must_use]
    pub fn translate(&self, field: &str, value: &str) -> String {
        if !contains_chinese(value) {
            return value.to_string();
        }

        if let Some(english) = self.dictionary.lookup(value) {
            return english.to_string();
        }

        let substituted = self.dictionary.substitute(value);
        if !contains_chinese(&substituted) {
            return substituted;
        }

        let hint = FieldHint::from_field(field);
        tracing::trace!(field, ?hint, value, "No full dictionary coverage, using fallback");
        self.fallback(hint, &substituted)
    }

    fn fallback(&self, hint: FieldHint, partial: &str) -> String {
        match hint {
            FieldHint::Name => self.placeholders.name.clone(),
            FieldHint::Team => self.placeholders.team.clone(),
            FieldHint::Position => self.placeholders.position.clone(),
            FieldHint::Date => {
                let stripped = strip_chinese(partial);
                let stripped = stripped.trim();
                if stripped.is_empty() {
                    self.placeholders.generic.clone()
                } else {
                    stripped.to_string()
                }
            }
            FieldHint::Generic => self.placeholders.generic.clone(),
        }
    }
}
