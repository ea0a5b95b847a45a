use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::detect::contains_chinese;
use crate::dictionary::DictionaryError;
use crate::types::Locale;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "fixtures.includePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid phrase dictionary: {0}")]
    Dictionary(#[from] DictionaryError),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSettings {
    /// Locale used when no preference has been stored.
    pub default_locale: Locale,

    pub placeholders: PlaceholderConfig,

    /// Additional Chinese → English phrases. Overrides builtin phrases.
    pub extra_phrases: BTreeMap<String, String>,

    pub audit: AuditConfig,
    pub fixtures: FixturesConfig,
}

/// Replacement text used when a string can't be fully translated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaceholderConfig {
    /// For name-like fields.
    pub name: String,
    pub team: String,
    pub position: String,
    /// For every field without a recognised hint.
    pub generic: String,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            name: "Yang Hansen".to_string(),
            team: "Team".to_string(),
            position: "Center".to_string(),
            generic: "[Chinese Content]".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuditConfig {
    /// Report leftover Chinese text. Meant for development builds.
    pub enabled: bool,
    /// Max characters of a flagged text shown before truncation with ellipsis.
    pub max_snippet_length: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self { enabled: cfg!(debug_assertions), max_snippet_length: 40 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FixturesConfig {
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            include_patterns: vec!["**/data/**/*.json".to_string()],
            exclude_patterns: vec!["node_modules/**".to_string(), "**/package*.json".to_string()],
        }
    }
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            default_locale: Locale::NATIVE,
            placeholders: PlaceholderConfig::default(),
            extra_phrases: BTreeMap::new(),
            audit: AuditConfig::default(),
            fixtures: FixturesConfig::default(),
        }
    }
}

impl FilterSettings {
    /// # Errors
    /// - Placeholder is empty or contains Chinese text
    /// - Extra phrase is empty, has no Chinese text, or translates to Chinese text
    /// - Snippet length is zero
    /// - Invalid glob pattern
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let placeholders = [
            ("placeholders.name", &self.placeholders.name),
            ("placeholders.team", &self.placeholders.team),
            ("placeholders.position", &self.placeholders.position),
            ("placeholders.generic", &self.placeholders.generic),
        ];
        for (path, value) in placeholders {
            if value.is_empty() {
                errors.push(ValidationError::new(
                    path,
                    "The placeholder cannot be empty. Example: \"[Chinese Content]\"",
                ));
            } else if contains_chinese(value) {
                errors.push(ValidationError::new(
                    path,
                    format!("The placeholder '{value}' must not contain Chinese text"),
                ));
            }
        }

        for (phrase, translation) in &self.extra_phrases {
            let path = format!("extraPhrases[\"{phrase}\"]");
            if phrase.is_empty() {
                errors.push(ValidationError::new(path, "The phrase cannot be empty"));
            } else if !contains_chinese(phrase) {
                errors.push(ValidationError::new(
                    path,
                    format!("The phrase '{phrase}' contains no Chinese text and would never match"),
                ));
            } else if contains_chinese(translation) {
                errors.push(ValidationError::new(
                    path,
                    format!("The translation '{translation}' must not contain Chinese text"),
                ));
            }
        }

        if self.audit.max_snippet_length == 0 {
            errors.push(ValidationError::new(
                "audit.maxSnippetLength",
                "The snippet length must be greater than 0",
            ));
        }

        if self.fixtures.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "fixtures.includePatterns",
                "At least one pattern is required. Example: [\"**/data/**/*.json\"]",
            ));
        }

        for (index, pattern) in self.fixtures.include_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("fixtures.includePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        for (index, pattern) in self.fixtures.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("fixtures.excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
