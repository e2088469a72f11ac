//! Visitor contract for structural redaction.
//!
//! [`Securable`] is what `#[derive(Securable)]` generates and what the std
//! impls below provide by hand. It replaces runtime reflection with three
//! per-type operations:
//!
//! | Method | Stage | Touches the value |
//! |--------|-------|-------------------|
//! | `analyze` | type descriptor | no |
//! | `has_populated_secured` | detection | read-only |
//! | `hide_secured` | walk | mutates a private copy |
//!
//! ## Std types
//!
//! - Primitives and text are opaque leaves (`PRIMITIVE = true`).
//! - `Option`, `Box`, `Arc` and `Result` defer to what they point at.
//!   `Arc` is copied on write, so shared storage is never touched.
//! - `Vec`, `VecDeque` and arrays walk their elements.
//! - `HashMap` and `BTreeMap` walk values only. Keys are never rewritten.
//! - Sets, time, network and path types, `serde_json::Value` and
//!   `PhantomData` are opaque.

use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    marker::PhantomData,
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr},
    path::PathBuf,
    sync::Arc,
    time::{Duration, SystemTime},
};

use crate::{detect, might_contain_secured, RedactError, ScopeFilter, Walk};

/// A type the redaction engine can analyze, inspect and walk.
///
/// Derive it with `#[derive(Securable)]`. Every method has a default that
/// describes an opaque leaf: never secured, nothing to detect, nothing to
/// walk.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Securable`",
    label = "this type cannot be walked for secured fields",
    note = "add `#[derive(Securable)]` to the type definition",
    note = "for a foreign type, mark the field `#[securable(opaque)]` or `#[hide]`"
)]
pub trait Securable: 'static {
    /// Text, numbers, `bool` and `char`. Attached to log lines unredacted.
    const PRIMITIVE: bool = false;

    /// Module path used by [`ScopeFilter`]. `None` for built-in types.
    fn scope_path() -> Option<&'static str> {
        None
    }

    /// Structural analysis: can this type ever carry a secured field?
    ///
    /// Uncached. Call [`might_contain_secured`] instead.
    fn analyze() -> bool {
        false
    }

    /// Whether a secured field below this value is populated.
    fn has_populated_secured(&self, _scope: &ScopeFilter) -> bool {
        false
    }

    /// Conceals every populated secured field below this value.
    fn hide_secured(&mut self, _walk: &mut Walk<'_>) -> Result<(), RedactError> {
        Ok(())
    }
}

// =============================================================================
// Opaque leaves
// =============================================================================

macro_rules! impl_securable_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Securable for $ty {
                const PRIMITIVE: bool = true;
            }
        )*
    };
}

impl_securable_primitive!(
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    &'static str,
    Cow<'static, str>,
    (),
);

macro_rules! impl_securable_opaque {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Securable for $ty {}
        )*
    };
}

impl_securable_opaque!(
    Duration,
    SystemTime,
    IpAddr,
    Ipv4Addr,
    Ipv6Addr,
    SocketAddr,
    PathBuf,
    serde_json::Value,
);

impl<T: 'static, S: 'static> Securable for HashSet<T, S> {}

impl<T: 'static> Securable for BTreeSet<T> {}

impl<T: ?Sized + 'static> Securable for PhantomData<T> {}

// =============================================================================
// Pointers
// =============================================================================

impl<T: Securable> Securable for Option<T> {
    fn analyze() -> bool {
        might_contain_secured::<T>()
    }

    fn has_populated_secured(&self, scope: &ScopeFilter) -> bool {
        self.as_ref().is_some_and(|value| detect(value, scope))
    }

    fn hide_secured(&mut self, walk: &mut Walk<'_>) -> Result<(), RedactError> {
        match self {
            Some(value) => walk.inner(value),
            None => Ok(()),
        }
    }
}

impl<T: Securable> Securable for Box<T> {
    fn analyze() -> bool {
        might_contain_secured::<T>()
    }

    fn has_populated_secured(&self, scope: &ScopeFilter) -> bool {
        detect(&**self, scope)
    }

    fn hide_secured(&mut self, walk: &mut Walk<'_>) -> Result<(), RedactError> {
        walk.inner(&mut **self)
    }
}

impl<T: Securable + Clone> Securable for Arc<T> {
    fn analyze() -> bool {
        might_contain_secured::<T>()
    }

    fn has_populated_secured(&self, scope: &ScopeFilter) -> bool {
        detect(&**self, scope)
    }

    // Called only once detection has found a populated field below, so
    // unsharing here always precedes a change.
    fn hide_secured(&mut self, walk: &mut Walk<'_>) -> Result<(), RedactError> {
        Arc::make_mut(self).hide_secured(walk)
    }
}

impl<T: Securable, E: Securable> Securable for Result<T, E> {
    fn analyze() -> bool {
        might_contain_secured::<T>() || might_contain_secured::<E>()
    }

    fn has_populated_secured(&self, scope: &ScopeFilter) -> bool {
        match self {
            Ok(value) => detect(value, scope),
            Err(err) => detect(err, scope),
        }
    }

    fn hide_secured(&mut self, walk: &mut Walk<'_>) -> Result<(), RedactError> {
        match self {
            Ok(value) => walk.inner(value),
            Err(err) => walk.inner(err),
        }
    }
}

// =============================================================================
// Sequences
// =============================================================================

macro_rules! impl_securable_sequence {
    ($($ty:ident),* $(,)?) => {
        $(
            impl<T: Securable> Securable for $ty<T> {
                fn analyze() -> bool {
                    might_contain_secured::<T>()
                }

                fn has_populated_secured(&self, scope: &ScopeFilter) -> bool {
                    self.iter().any(|element| detect(element, scope))
                }

                fn hide_secured(&mut self, walk: &mut Walk<'_>) -> Result<(), RedactError> {
                    for (index, element) in self.iter_mut().enumerate() {
                        walk.element(index, element)?;
                    }
                    Ok(())
                }
            }
        )*
    };
}

impl_securable_sequence!(Vec, VecDeque);

impl<T: Securable, const N: usize> Securable for [T; N] {
    fn analyze() -> bool {
        might_contain_secured::<T>()
    }

    fn has_populated_secured(&self, scope: &ScopeFilter) -> bool {
        self.iter().any(|element| detect(element, scope))
    }

    fn hide_secured(&mut self, walk: &mut Walk<'_>) -> Result<(), RedactError> {
        for (index, element) in self.iter_mut().enumerate() {
            walk.element(index, element)?;
        }
        Ok(())
    }
}

// =============================================================================
// Maps (values only)
// =============================================================================

impl<K: 'static, V: Securable, S: 'static> Securable for HashMap<K, V, S> {
    fn analyze() -> bool {
        might_contain_secured::<V>()
    }

    fn has_populated_secured(&self, scope: &ScopeFilter) -> bool {
        self.values().any(|value| detect(value, scope))
    }

    fn hide_secured(&mut self, walk: &mut Walk<'_>) -> Result<(), RedactError> {
        for value in self.values_mut() {
            walk.map_value(value)?;
        }
        Ok(())
    }
}

impl<K: 'static, V: Securable> Securable for BTreeMap<K, V> {
    fn analyze() -> bool {
        might_contain_secured::<V>()
    }

    fn has_populated_secured(&self, scope: &ScopeFilter) -> bool {
        self.values().any(|value| detect(value, scope))
    }

    fn hide_secured(&mut self, walk: &mut Walk<'_>) -> Result<(), RedactError> {
        for value in self.values_mut() {
            walk.map_value(value)?;
        }
        Ok(())
    }
}
