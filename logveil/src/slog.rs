//! Adapters for emitting redacted values through `slog`.
//!
//! This module connects the attachment boundary ([`attach`]) with `slog`:
//!
//! - [`Veiled`] owns a field value plus a [`Redactor`] and implements
//!   `slog::Value`. Redaction runs when the record is serialized, which for
//!   async drains may be on another thread.
//! - [`FieldValue`] implements `slog::Value` directly: scalars use the
//!   matching `emit_*` call, quoted composites and failures use `emit_str`.
//!
//! Logging never fails because of redaction; a failed field is emitted as the
//! `<redaction failed: ...>` marker.

use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{attach, FieldValue, Redactor, Securable};

/// A field value that is redacted when the log record is serialized.
///
/// ## Example
/// ```ignore
/// let redactor = Redactor::from_config(&config);
/// info!(logger, "login"; "session" => redactor.veil(session.clone()));
/// ```
#[derive(Clone, Debug)]
pub struct Veiled<T> {
    value: T,
    redactor: Redactor,
}

impl<T> Veiled<T> {
    pub fn new(value: T, redactor: Redactor) -> Self {
        Self { value, redactor }
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl Redactor {
    /// Wraps `value` so `slog` logs its redacted form.
    pub fn veil<T>(&self, value: T) -> Veiled<T> {
        Veiled::new(value, self.clone())
    }
}

impl<T> SlogValue for Veiled<T>
where
    T: Securable + Clone + serde::Serialize,
{
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let field = attach(&self.value, &self.redactor);
        SlogValue::serialize(&field, record, key, serializer)
    }
}

impl SlogValue for FieldValue {
    fn serialize(
        &self,
        _record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        match self {
            Self::Scalar(JsonValue::Bool(value)) => serializer.emit_bool(key, *value),
            Self::Scalar(JsonValue::Number(number)) => {
                if let Some(value) = number.as_i64() {
                    serializer.emit_i64(key, value)
                } else if let Some(value) = number.as_u64() {
                    serializer.emit_u64(key, value)
                } else if let Some(value) = number.as_f64() {
                    serializer.emit_f64(key, value)
                } else {
                    serializer.emit_str(key, &number.to_string())
                }
            }
            Self::Scalar(JsonValue::String(text)) | Self::Quoted(text) => {
                serializer.emit_str(key, text)
            }
            Self::Scalar(other) => serializer.emit_str(key, &other.to_string()),
            Self::Failed(message) => serializer.emit_str(key, &Self::failure_marker(message)),
        }
    }
}
