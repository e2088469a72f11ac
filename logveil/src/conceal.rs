//! Leaf contract: how a secured field is replaced.
//!
//! A field tagged `#[hide]` is never inspected below its own level. Its type
//! implements [`Concealable`], which answers two questions: is the value
//! already harmless, and how is it made harmless.
//!
//! | Kind | Concealed form |
//! |------|----------------|
//! | Text (`String`, `Cow<str>`, `Box<str>`) | [`SECURED_PLACEHOLDER`], empty text stays empty |
//! | Numbers, `bool`, `char` | zero value |
//! | `Option<text>` | `Some(placeholder)` |
//! | Any other `Option` | `None` |
//! | Collections and maps | emptied |
//! | Arrays | every element set to its zero value |
//! | `#[securable(concealable)]` types | `Default::default()` |

use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    sync::Arc,
};

/// Replacement for secured text. Stable across versions.
pub const SECURED_PLACEHOLDER: &str = "<hidden>";

/// A type that can stand behind `#[hide]`.
///
/// `conceal` must leave the value in a state where `is_concealed` returns
/// `true`; otherwise redaction fails with [`RedactError::Mutation`](crate::RedactError::Mutation).
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be concealed",
    label = "this type cannot sit behind `#[hide]`",
    note = "derive `Securable` with `#[securable(concealable)]` on the type definition",
    note = "or implement `logveil::Concealable` by hand"
)]
pub trait Concealable {
    /// Whether this is text, concealed with the placeholder.
    const TEXTUAL: bool = false;

    /// Whether the value is already zero, empty, or the placeholder.
    fn is_concealed(&self) -> bool;

    /// Replaces the value with its concealed form.
    fn conceal(&mut self);
}

fn is_placeholder_or_empty(text: &str) -> bool {
    text.is_empty() || text == SECURED_PLACEHOLDER
}

// =============================================================================
// Text
// =============================================================================

impl Concealable for String {
    const TEXTUAL: bool = true;

    fn is_concealed(&self) -> bool {
        is_placeholder_or_empty(self)
    }

    fn conceal(&mut self) {
        if !self.is_concealed() {
            SECURED_PLACEHOLDER.clone_into(self);
        }
    }
}

impl Concealable for Cow<'static, str> {
    const TEXTUAL: bool = true;

    fn is_concealed(&self) -> bool {
        is_placeholder_or_empty(self)
    }

    fn conceal(&mut self) {
        if !self.is_concealed() {
            *self = Cow::Borrowed(SECURED_PLACEHOLDER);
        }
    }
}

impl Concealable for Box<str> {
    const TEXTUAL: bool = true;

    fn is_concealed(&self) -> bool {
        is_placeholder_or_empty(self)
    }

    fn conceal(&mut self) {
        if !self.is_concealed() {
            *self = SECURED_PLACEHOLDER.into();
        }
    }
}

// =============================================================================
// Scalars
// =============================================================================

macro_rules! impl_concealable_zero {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Concealable for $ty {
                #[allow(clippy::float_cmp)]
                fn is_concealed(&self) -> bool {
                    *self == <$ty>::default()
                }

                fn conceal(&mut self) {
                    *self = <$ty>::default();
                }
            }
        )*
    };
}

impl_concealable_zero!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl Concealable for () {
    fn is_concealed(&self) -> bool {
        true
    }

    fn conceal(&mut self) {}
}

// =============================================================================
// Pointers
// =============================================================================

impl<T: Concealable> Concealable for Option<T> {
    fn is_concealed(&self) -> bool {
        match self {
            None => true,
            Some(value) => T::TEXTUAL && value.is_concealed(),
        }
    }

    fn conceal(&mut self) {
        if T::TEXTUAL {
            if let Some(value) = self {
                value.conceal();
            }
        } else {
            *self = None;
        }
    }
}

impl<T: Concealable> Concealable for Box<T> {
    const TEXTUAL: bool = T::TEXTUAL;

    fn is_concealed(&self) -> bool {
        (**self).is_concealed()
    }

    fn conceal(&mut self) {
        (**self).conceal();
    }
}

impl<T: Concealable + Clone> Concealable for Arc<T> {
    const TEXTUAL: bool = T::TEXTUAL;

    fn is_concealed(&self) -> bool {
        (**self).is_concealed()
    }

    fn conceal(&mut self) {
        if !self.is_concealed() {
            Arc::make_mut(self).conceal();
        }
    }
}

/// Arrays are not text: every element goes to its zero value, so an array of
/// strings becomes an array of empty strings.
impl<T: Concealable + Default, const N: usize> Concealable for [T; N] {
    fn is_concealed(&self) -> bool {
        self.iter().all(Concealable::is_concealed)
    }

    fn conceal(&mut self) {
        self.iter_mut().for_each(|element| *element = T::default());
    }
}

// =============================================================================
// Collections (emptied as a whole)
// =============================================================================

macro_rules! impl_concealable_clear {
    ($($ty:ident < $($param:ident),+ >),* $(,)?) => {
        $(
            impl<$($param),+> Concealable for $ty<$($param),+> {
                fn is_concealed(&self) -> bool {
                    self.is_empty()
                }

                fn conceal(&mut self) {
                    self.clear();
                }
            }
        )*
    };
}

impl_concealable_clear!(
    Vec<T>,
    VecDeque<T>,
    BTreeMap<K, V>,
    BTreeSet<T>,
    HashMap<K, V, S>,
    HashSet<T, S>,
);
