//! Development-time check for Chinese text that survived filtering.
//!
//! The auditor only reports. It never changes the content it inspects.

use std::fmt;

use serde_json::Value;

use crate::config::AuditConfig;
use crate::detect::contains_chinese;
use crate::types::Locale;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindingLocation {
    /// Index of a rendered text node.
    TextNode(usize),
    /// JSON pointer (RFC 6901) of a string leaf.
    Pointer(String),
}

impl fmt::Display for FindingLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TextNode(index) => write!(f, "text node #{index}"),
            Self::Pointer(pointer) if pointer.is_empty() => f.write_str("<root>"),
            Self::Pointer(pointer) => f.write_str(pointer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub location: FindingLocation,
    /// The offending text, truncated.
    pub snippet: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditReport {
    findings: Vec<Finding>,
}

impl AuditReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }
}

/// Banner text.
impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return f.write_str("No untranslated Chinese text found");
        }

        write!(f, "Found {} text(s) with untranslated Chinese content", self.findings.len())?;
        for finding in &self.findings {
            write!(f, "\n  {}: {}", finding.location, finding.snippet)?;
        }
        Ok(())
    }
}

/// Flags Chinese text left in content rendered for a non-native locale.
#[derive(Debug, Clone, Copy)]
pub struct TextAuditor {
    config: AuditConfig,
    locale: Locale,
}

impl TextAuditor {
    #[must_use]
    pub const fn new(config: AuditConfig, locale: Locale) -> Self {
        Self { config, locale }
    }

    /// Enabled in config and rendering for a non-native locale.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.config.enabled && !self.locale.is_native()
    }

    /// Audits the text nodes of a rendered page. Returns `None` when inactive.
    pub fn audit_text_nodes<I, S>(&self, nodes: I) -> Option<AuditReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.is_active() {
            return None;
        }

        let findings = nodes
            .into_iter()
            .enumerate()
            .filter_map(|(index, node)| {
                let text = node.as_ref().trim();
                contains_chinese(text).then(|| Finding {
                    location: FindingLocation::TextNode(index),
                    snippet: self.snippet(text),
                })
            })
            .collect();

        Some(self.report(findings))
    }

    /// Audits every string leaf of `value`. Returns `None` when inactive.
    pub fn audit_value(&self, value: &Value) -> Option<AuditReport> {
        if !self.is_active() {
            return None;
        }

        let mut findings = Vec::new();
        self.collect_value(value, &mut String::new(), &mut findings);

        Some(self.report(findings))
    }

    fn collect_value(&self, value: &Value, pointer: &mut String, findings: &mut Vec<Finding>) {
        match value {
            Value::String(text) if contains_chinese(text) => findings.push(Finding {
                location: FindingLocation::Pointer(pointer.clone()),
                snippet: self.snippet(text),
            }),
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    let len = pointer.len();
                    pointer.push('/');
                    pointer.push_str(&index.to_string());
                    self.collect_value(item, pointer, findings);
                    pointer.truncate(len);
                }
            }
            Value::Object(entries) => {
                for (key, item) in entries {
                    let len = pointer.len();
                    pointer.push('/');
                    pointer.push_str(&escape_pointer_token(key));
                    self.collect_value(item, pointer, findings);
                    pointer.truncate(len);
                }
            }
            _ => {}
        }
    }

    fn snippet(&self, text: &str) -> String {
        let max = self.config.max_snippet_length;
        if text.chars().count() <= max {
            return text.to_string();
        }
        let mut snippet: String = text.chars().take(max).collect();
        snippet.push('…');
        snippet
    }

    fn report(&self, findings: Vec<Finding>) -> AuditReport {
        for finding in &findings {
            tracing::warn!(
                locale = %self.locale,
                location = %finding.location,
                "Untranslated Chinese text: {}",
                finding.snippet
            );
        }
        AuditReport { findings }
    }
}

fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}
