//! A closed "any" value for loosely typed log fields.
//!
//! `Dynamic` covers the shapes that show up in free-form payloads: null,
//! booleans, numbers, text, lists and string-keyed maps. The extra
//! [`Dynamic::Secured`] variant marks a payload that must never be logged in
//! its original form, wherever it sits in the tree.
//!
//! Its type descriptor is always "might contain secured", so detection
//! inspects every `Dynamic` value it meets.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::{Concealable, RedactError, ScopeFilter, Securable, Walk, SECURED_PLACEHOLDER};

/// Loosely typed value with an explicit secured marker.
///
/// Serializes untagged: `Dynamic::Text("a".into())` becomes `"a"`, and a
/// secured payload serializes as its (concealed, after redaction) content.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Dynamic {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    List(Vec<Dynamic>),
    Map(BTreeMap<String, Dynamic>),
    /// A payload concealed as a unit during redaction.
    Secured(Box<Dynamic>),
}

impl Dynamic {
    /// Wraps `value` as wholly secured.
    pub fn secured(value: impl Into<Dynamic>) -> Self {
        Self::Secured(Box::new(value.into()))
    }

    pub fn is_secured(&self) -> bool {
        matches!(self, Self::Secured(_))
    }
}

impl Securable for Dynamic {
    fn analyze() -> bool {
        true
    }

    fn has_populated_secured(&self, scope: &ScopeFilter) -> bool {
        match self {
            Self::Secured(inner) => !inner.is_concealed(),
            Self::List(items) => items.iter().any(|item| item.has_populated_secured(scope)),
            Self::Map(entries) => entries
                .values()
                .any(|value| value.has_populated_secured(scope)),
            _ => false,
        }
    }

    fn hide_secured(&mut self, walk: &mut Walk<'_>) -> Result<(), RedactError> {
        match self {
            Self::Secured(inner) => walk.conceal("<secured>", inner.as_mut()),
            Self::List(items) => {
                for (index, item) in items.iter_mut().enumerate() {
                    walk.element(index, item)?;
                }
                Ok(())
            }
            Self::Map(entries) => {
                for value in entries.values_mut() {
                    walk.map_value(value)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl Concealable for Dynamic {
    #[allow(clippy::float_cmp)]
    fn is_concealed(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(value) => !*value,
            Self::Int(value) => *value == 0,
            Self::UInt(value) => *value == 0,
            Self::Float(value) => *value == 0.0,
            Self::Text(value) => value.is_empty() || value == SECURED_PLACEHOLDER,
            Self::List(items) => items.is_empty(),
            Self::Map(entries) => entries.is_empty(),
            Self::Secured(inner) => inner.is_concealed(),
        }
    }

    fn conceal(&mut self) {
        match self {
            Self::Null => {}
            Self::Bool(value) => *value = false,
            Self::Int(value) => *value = 0,
            Self::UInt(value) => *value = 0,
            Self::Float(value) => *value = 0.0,
            Self::Text(value) => value.conceal(),
            Self::List(items) => items.clear(),
            Self::Map(entries) => entries.clear(),
            Self::Secured(inner) => inner.conceal(),
        }
    }
}

impl From<JsonValue> for Dynamic {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(value) => Self::Bool(value),
            JsonValue::Number(number) => {
                if let Some(value) = number.as_i64() {
                    Self::Int(value)
                } else if let Some(value) = number.as_u64() {
                    Self::UInt(value)
                } else {
                    number.as_f64().map_or(Self::Null, Self::Float)
                }
            }
            JsonValue::String(value) => Self::Text(value),
            JsonValue::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            JsonValue::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Dynamic {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Dynamic {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Dynamic {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Dynamic {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for Dynamic {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<f64> for Dynamic {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Vec<Dynamic>> for Dynamic {
    fn from(items: Vec<Dynamic>) -> Self {
        Self::List(items)
    }
}

impl From<BTreeMap<String, Dynamic>> for Dynamic {
    fn from(entries: BTreeMap<String, Dynamic>) -> Self {
        Self::Map(entries)
    }
}

impl<K: Into<String>> FromIterator<(K, Dynamic)> for Dynamic {
    fn from_iter<I: IntoIterator<Item = (K, Dynamic)>>(iter: I) -> Self {
        Self::Map(iter.into_iter().map(|(key, value)| (key.into(), value)).collect())
    }
}
