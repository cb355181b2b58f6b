//! Style catalog: the named writing styles and the directive each one injects into prompts.

use crate::error::{RestyleError, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Built-in styles as (name, directive) pairs, in display order.
const BUILTIN_STYLES: &[(&str, &str)] = &[
    (
        "Natural",
        "Write in a natural, friendly tone, as if chatting with the reader. Use everyday, easy-to-understand words.",
    ),
    (
        "Academic",
        "Write in an academic, professional style. Use formal language and cite sources where relevant.",
    ),
    (
        "Blog",
        "Write in the style of a personal blog that shares experiences. Add emotion and personal opinions.",
    ),
    (
        "Journalistic",
        "Write in a journalistic style that is objective and concise. Focus on events and data.",
    ),
    (
        "Short-story",
        "Write in a literary style with richer description and emotion. Add vivid details.",
    ),
];

/// Instruction steering the register and tone of generated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleDirective {
    /// Canonical style name.
    pub name: String,
    /// Instruction text injected into every prompt.
    pub directive: String,
}

impl StyleDirective {
    pub fn new(name: impl Into<String>, directive: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directive: directive.into(),
        }
    }
}

/// Closed lookup table from style name to directive.
#[derive(Debug, Clone)]
pub struct StyleCatalog {
    styles: Vec<StyleDirective>,
}

impl StyleCatalog {
    /// Catalog with the built-in styles only.
    pub fn builtin() -> Self {
        Self {
            styles: BUILTIN_STYLES
                .iter()
                .map(|(name, directive)| StyleDirective::new(*name, *directive))
                .collect(),
        }
    }

    /// Built-in styles with config overrides applied.
    ///
    /// An override whose name matches a built-in (case-insensitively) replaces its directive;
    /// any other name adds a new style.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Self {
        let mut catalog = Self::builtin();
        for (name, directive) in overrides {
            match catalog.position(name) {
                Some(idx) => catalog.styles[idx].directive = directive.clone(),
                None => catalog
                    .styles
                    .push(StyleDirective::new(name.clone(), directive.clone())),
            }
        }
        catalog
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.styles
            .iter()
            .position(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// Look up the directive for a style name.
    pub fn directive_for(&self, name: &str) -> Result<StyleDirective> {
        self.position(name)
            .map(|idx| self.styles[idx].clone())
            .ok_or_else(|| RestyleError::UnknownStyle {
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }

    /// Style names in display order.
    pub fn names(&self) -> Vec<&str> {
        self.styles.iter().map(|s| s.name.as_str()).collect()
    }

    /// All styles in display order.
    pub fn entries(&self) -> &[StyleDirective] {
        &self.styles
    }
}

impl Default for StyleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
