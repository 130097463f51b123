//! Placeholder substitution for human-readable previews.

use std::borrow::Cow;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::schema::{PlaceholderResolutionMapping, SourceKind};

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{(\d+)\}\}").unwrap());

/// Inputs for [`substitute_template_text`]. Every source is optional.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstitutionInput<'a> {
    /// Template text containing `{{n}}` tokens.
    pub text: &'a str,
    /// Dummy values shown when no real value is available.
    pub sample_values: Option<&'a HashMap<u32, String>>,
    /// Where each placeholder's value comes from.
    pub mappings: Option<&'a PlaceholderResolutionMapping>,
    /// Per-row or per-session literal values.
    pub user_values: Option<&'a HashMap<u32, String>>,
}

impl<'a> SubstitutionInput<'a> {
    /// Start from template text alone.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            ..Default::default()
        }
    }

    pub fn with_sample_values(mut self, values: &'a HashMap<u32, String>) -> Self {
        self.sample_values = Some(values);
        self
    }

    pub fn with_mappings(mut self, mappings: &'a PlaceholderResolutionMapping) -> Self {
        self.mappings = Some(mappings);
        self
    }

    pub fn with_user_values(mut self, values: &'a HashMap<u32, String>) -> Self {
        self.user_values = Some(values);
        self
    }

    /// Resolve one placeholder, or `None` to leave the token as-is.
    fn resolve(&self, index: u32) -> Option<Cow<'a, str>> {
        let literal = |values: Option<&'a HashMap<u32, String>>| {
            values
                .and_then(|v| v.get(&index))
                .filter(|v| !v.trim().is_empty())
                .map(|v| Cow::Borrowed(v.as_str()))
        };

        literal(self.user_values)
            .or_else(|| literal(self.sample_values))
            .or_else(|| {
                let source = self.mappings?.get(&index)?;
                Some(Cow::Owned(match source.source {
                    SourceKind::Customer => format!("[customer.{}]", source.field()),
                    SourceKind::Transaction => format!("[transaction.{}]", source.field()),
                    SourceKind::Static | SourceKind::Unknown => "[user input]".to_string(),
                }))
            })
    }
}

/// Replace every `{{n}}` token in the text.
///
/// Priority per token: user value, then sample value (both only when
/// non-blank), then a bracketed hint from the resolution mapping, otherwise
/// the token is kept. Tokens with non-digit bodies never match. A single
/// pass: resolved values are not scanned again.
pub fn substitute_template_text(input: &SubstitutionInput<'_>) -> String {
    TOKEN
        .replace_all(input.text, |caps: &Captures<'_>| {
            caps[1]
                .parse::<u32>()
                .ok()
                .and_then(|index| input.resolve(index))
                .map(Cow::into_owned)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
