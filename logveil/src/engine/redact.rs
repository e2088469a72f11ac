//! The redaction entry point.
//!
//! [`Redactor::redact`] runs the stages in order and stops as soon as the
//! original can be used as is:
//!
//! 1. primitive or out-of-scope type: borrow the original;
//! 2. cached descriptor and detection find nothing populated: borrow;
//! 3. otherwise clone and conceal the clone in place.
//!
//! Panics raised by user code along the way (a `Clone`, a hand-written
//! `Securable`) are caught and reported as [`RedactError`]s.

use std::{
    any::{type_name, Any},
    borrow::Cow,
    panic::{catch_unwind, AssertUnwindSafe},
};

use once_cell::sync::Lazy;

use crate::{
    has_populated_secured, might_contain_secured, RedactError, RedactionConfig, ScopeFilter,
    Securable, Walk,
};

static DEFAULT_REDACTOR: Lazy<Redactor> = Lazy::new(Redactor::default);

/// Produces log-safe views of values.
///
/// Cheap to clone and safe to share across threads. The default redactor
/// is unrestricted.
#[derive(Clone, Debug, Default)]
pub struct Redactor {
    scope: ScopeFilter,
}

impl Redactor {
    #[must_use]
    pub fn new(scope: ScopeFilter) -> Self {
        Self { scope }
    }

    pub fn from_config(config: &RedactionConfig) -> Self {
        Self::new(config.scope_filter())
    }

    pub fn scope(&self) -> &ScopeFilter {
        &self.scope
    }

    /// Returns `value` itself when nothing needs hiding, or a copy with every
    /// populated secured field concealed.
    ///
    /// The original is never modified. Redacting an already redacted value
    /// borrows it.
    pub fn redact<'v, T>(&self, value: &'v T) -> Result<Cow<'v, T>, RedactError>
    where
        T: Securable + Clone,
    {
        if T::PRIMITIVE || !self.scope.admits::<T>() {
            return Ok(Cow::Borrowed(value));
        }

        let type_name = type_name::<T>();
        let populated = catch_unwind(AssertUnwindSafe(|| {
            has_populated_secured(value, might_contain_secured::<T>(), &self.scope)
        }))
        .map_err(|payload| RedactError::Panic {
            type_name,
            message: panic_message(payload.as_ref()),
        })?;
        if !populated {
            return Ok(Cow::Borrowed(value));
        }

        let mut copy = catch_unwind(AssertUnwindSafe(|| value.clone())).map_err(|payload| {
            RedactError::Copy {
                type_name,
                reason: panic_message(payload.as_ref()),
            }
        })?;

        let walked = catch_unwind(AssertUnwindSafe(|| {
            let mut walk = Walk::new(&self.scope);
            copy.hide_secured(&mut walk)
        }));
        match walked {
            Ok(result) => result?,
            Err(payload) => {
                return Err(RedactError::Panic {
                    type_name,
                    message: panic_message(payload.as_ref()),
                })
            }
        }

        Ok(Cow::Owned(copy))
    }
}

/// Redacts `value` with an unrestricted, process-wide [`Redactor`].
pub fn redact<T>(value: &T) -> Result<Cow<'_, T>, RedactError>
where
    T: Securable + Clone,
{
    DEFAULT_REDACTOR.redact(value)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
