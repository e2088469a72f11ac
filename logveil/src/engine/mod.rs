//! The redaction engine.
//!
//! - [`descriptor`]: per-type "might contain secured" memo.
//! - [`detect`]: read-only check for populated secured fields.
//! - [`walk`]: in-place concealment of a private copy.
//! - [`redact`]: the [`Redactor`] entry point tying the stages together.

mod descriptor;
mod detect;
mod redact;
mod securable;
mod walk;

pub use descriptor::{cached_descriptor, descriptor_count, might_contain_secured};
pub use detect::{detect, has_populated_secured};
pub use redact::{redact, Redactor};
pub use securable::Securable;
pub use walk::Walk;
