//! Structural redaction of secured fields right before values reach a log line.
//!
//! Mark fields with `#[hide]` and derive [`Securable`]. When a value is
//! attached to a structured log line, the engine decides whether anything
//! needs hiding and, only then, logs a copy with every populated secured
//! field replaced:
//!
//! - text becomes [`SECURED_PLACEHOLDER`] (`"<hidden>"`), empty text stays
//!   empty;
//! - every other secured field becomes its zero or empty value;
//! - a secured aggregate is concealed as a unit, its children are never
//!   inspected.
//!
//! The caller's value is never modified. Values with nothing to hide are
//! logged by reference, without a copy.
//!
//! Three stages do the work:
//! - **Type descriptor**: a per-type, cached answer to "could this type ever
//!   carry a secured field?" ([`might_contain_secured`]).
//! - **Detection**: a read-only check for populated secured fields
//!   ([`detect`]).
//! - **Walk**: in-place concealment of a private copy ([`Walk`]).
//!
//! [`Redactor`] ties the stages together and applies a [`ScopeFilter`] that
//! limits traversal to application-owned modules. [`SecuredValue`] and
//! [`attach`] defer redaction to serialization time; the `slog` feature adds
//! `slog::Value` adapters.
//!
//! ```ignore
//! use logveil::{redact, Securable, SECURED_PLACEHOLDER};
//!
//! #[derive(Clone, Securable)]
//! struct Login {
//!     user: String,
//!     #[hide]
//!     password: String,
//! }
//!
//! let login = Login { user: "ana".into(), password: "hunter2".into() };
//! let safe = redact(&login)?;
//! assert_eq!(safe.password, SECURED_PLACEHOLDER);
//! assert_eq!(login.password, "hunter2");
//! ```
//!
//! What this crate does not do: pick what gets logged, format log lines, or
//! load its configuration from files or the environment.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use logveil_derive::Securable;

#[allow(unused_extern_crates)]
extern crate self as logveil;

// Module declarations
mod conceal;
mod config;
mod dynamic;
mod engine;
mod error;
mod scope;
#[cfg(feature = "slog")]
pub mod slog;
mod value;

// Re-exports
pub use conceal::{Concealable, SECURED_PLACEHOLDER};
pub use config::RedactionConfig;
pub use dynamic::Dynamic;
pub use engine::{
    cached_descriptor, descriptor_count, detect, has_populated_secured, might_contain_secured,
    redact, Redactor, Securable, Walk,
};
pub use error::RedactError;
pub use scope::ScopeFilter;
pub use value::{attach, FieldValue, SecuredValue};
