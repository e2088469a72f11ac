//! Deferred redaction at serialization time, and the attachment boundary.
//!
//! A log call site wraps its field in [`SecuredValue`]; nothing is inspected
//! until the encoder asks for the value. [`attach`] is the boundary used by
//! structured encoders: composite results are handed over as one quoted
//! string so a field never expands into raw nested output.

use std::any::Any;

use serde::{ser::Error as _, Serialize, Serializer};
use serde_json::Value as JsonValue;
use tracing::warn;

use crate::{Redactor, Securable};

/// A field value plus the redactor that will sanitize it when serialized.
#[derive(Debug)]
pub struct SecuredValue<'a, T> {
    value: &'a T,
    redactor: &'a Redactor,
}

impl<'a, T> SecuredValue<'a, T> {
    pub fn new(value: &'a T, redactor: &'a Redactor) -> Self {
        Self { value, redactor }
    }

    pub fn value(&self) -> &'a T {
        self.value
    }
}

impl<T> Serialize for SecuredValue<'_, T>
where
    T: Securable + Clone + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if T::PRIMITIVE {
            return self.value.serialize(serializer);
        }
        let safe = self.redactor.redact(self.value).map_err(S::Error::custom)?;
        safe.serialize(serializer)
    }
}

/// What an encoder receives for one field.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// A bool, number or string, emitted as is.
    Scalar(JsonValue),
    /// An object, array or `null`, re-encoded as one string literal.
    Quoted(String),
    /// Redaction failed; emitted as a marker string.
    Failed(String),
}

impl FieldValue {
    /// The marker string for a failed field.
    pub fn failure_marker(message: &str) -> String {
        format!("<redaction failed: {message}>")
    }

    /// Text form as an encoder that only understands strings would write it.
    pub fn render(&self) -> String {
        match self {
            Self::Scalar(JsonValue::String(text)) | Self::Quoted(text) => text.clone(),
            Self::Scalar(other) => other.to_string(),
            Self::Failed(message) => Self::failure_marker(message),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(value) => value.serialize(serializer),
            Self::Quoted(text) => serializer.serialize_str(text),
            Self::Failed(message) => serializer.serialize_str(&Self::failure_marker(message)),
        }
    }
}

/// Redacts `value` and prepares it for a structured encoder.
///
/// Byte buffers pass through as (lossy UTF-8) text. Integers wider than 64
/// bits keep their exact digits as a string.
///
/// Never fails: redaction or encoding errors become [`FieldValue::Failed`]
/// and a `warn!` diagnostic.
pub fn attach<T>(value: &T, redactor: &Redactor) -> FieldValue
where
    T: Securable + Clone + Serialize,
{
    if let Some(bytes) = as_bytes(value) {
        return FieldValue::Scalar(JsonValue::String(
            String::from_utf8_lossy(bytes).into_owned(),
        ));
    }

    let encoded = match serde_json::to_string(&SecuredValue::new(value, redactor)) {
        Ok(encoded) => encoded,
        Err(err) => return failed(&err),
    };

    if encoded.starts_with('{') || encoded.starts_with('[') || encoded == "null" {
        return FieldValue::Quoted(encoded);
    }
    match serde_json::from_str::<JsonValue>(&encoded) {
        Ok(JsonValue::Number(number)) if is_wide_integer(&number, &encoded) => {
            FieldValue::Scalar(JsonValue::String(encoded))
        }
        Ok(scalar) => FieldValue::Scalar(scalar),
        Err(err) => failed(&err),
    }
}

fn as_bytes<T: Securable>(value: &T) -> Option<&[u8]> {
    let value: &dyn Any = value;
    value.downcast_ref::<Vec<u8>>().map(Vec::as_slice)
}

/// An integer literal that only parsed as a float, i.e. wider than 64 bits.
fn is_wide_integer(number: &serde_json::Number, encoded: &str) -> bool {
    number.is_f64() && encoded.bytes().all(|b| b == b'-' || b.is_ascii_digit())
}

fn failed(err: &serde_json::Error) -> FieldValue {
    warn!(error = %err, "redaction failed at field attachment");
    FieldValue::Failed(err.to_string())
}
