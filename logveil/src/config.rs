//! Deserializable redaction settings.
//!
//! Loading them (files, environment, flags) is left to the host; this type
//! only fixes the shape.

use serde::Deserialize;

use crate::{Redactor, ScopeFilter};

/// Settings for a [`Redactor`].
///
/// ```ignore
/// let config: RedactionConfig = serde_json::from_str(r#"{ "scope": ["app"] }"#)?;
/// let redactor = Redactor::from_config(&config);
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RedactionConfig {
    /// Module paths whose types are traversed. Absent means every type.
    pub scope: Option<Vec<String>>,
}

impl RedactionConfig {
    pub fn scope_filter(&self) -> ScopeFilter {
        match &self.scope {
            None => ScopeFilter::unrestricted(),
            Some(modules) => ScopeFilter::new(modules.iter().cloned()),
        }
    }

    /// Builds a redactor from these settings.
    pub fn build(&self) -> Redactor {
        Redactor::from_config(self)
    }
}
