//! In-place concealment over a private copy.
//!
//! Generated `hide_secured` bodies and the container impls call back into
//! [`Walk`] for every child. The walk applies the detection gate before each
//! descent and keeps the current path for error messages.

use std::{any::type_name, fmt::Write as _};

use crate::{detect, Concealable, RedactError, ScopeFilter, Securable};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Segment {
    Field(&'static str),
    Index(usize),
    MapValue,
}

/// Traversal state threaded through `Securable::hide_secured`.
#[derive(Debug)]
pub struct Walk<'r> {
    scope: &'r ScopeFilter,
    path: Vec<Segment>,
}

impl<'r> Walk<'r> {
    pub(crate) fn new(scope: &'r ScopeFilter) -> Self {
        Self {
            scope,
            path: Vec::new(),
        }
    }

    pub fn scope(&self) -> &'r ScopeFilter {
        self.scope
    }

    /// Nesting depth below the value passed to `redact`.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Descends into a visible field.
    pub fn field<T: Securable>(
        &mut self,
        name: &'static str,
        value: &mut T,
    ) -> Result<(), RedactError> {
        self.descend(Some(Segment::Field(name)), value)
    }

    /// Descends into a sequence element.
    pub fn element<T: Securable>(&mut self, index: usize, value: &mut T) -> Result<(), RedactError> {
        self.descend(Some(Segment::Index(index)), value)
    }

    /// Descends into a map value. Keys are never visited.
    pub fn map_value<T: Securable>(&mut self, value: &mut T) -> Result<(), RedactError> {
        self.descend(Some(Segment::MapValue), value)
    }

    /// Descends through a pointer or wrapper without adding a path segment.
    pub fn inner<T: Securable>(&mut self, value: &mut T) -> Result<(), RedactError> {
        self.descend(None, value)
    }

    /// Conceals a secured field as a unit.
    ///
    /// Values that are already concealed are left alone, which keeps
    /// redaction idempotent and empty text empty.
    pub fn conceal<T: Concealable>(
        &mut self,
        name: &'static str,
        value: &mut T,
    ) -> Result<(), RedactError> {
        if value.is_concealed() {
            return Ok(());
        }
        value.conceal();
        if value.is_concealed() {
            return Ok(());
        }

        self.path.push(Segment::Field(name));
        let path = self.render_path();
        self.path.pop();
        Err(RedactError::Mutation {
            path,
            type_name: type_name::<T>(),
        })
    }

    fn descend<T: Securable>(
        &mut self,
        segment: Option<Segment>,
        value: &mut T,
    ) -> Result<(), RedactError> {
        if !detect(value, self.scope) {
            return Ok(());
        }

        let pushed = match segment {
            Some(segment) => {
                self.path.push(segment);
                true
            }
            None => false,
        };
        let result = value.hide_secured(self);
        if pushed {
            self.path.pop();
        }
        result
    }

    /// Renders the current path as `accounts[..].password` or `items[2].token`.
    fn render_path(&self) -> String {
        if self.path.is_empty() {
            return "<root>".to_string();
        }
        let mut rendered = String::new();
        for segment in &self.path {
            match segment {
                Segment::Field(name) => {
                    if !rendered.is_empty() {
                        rendered.push('.');
                    }
                    rendered.push_str(name);
                }
                Segment::Index(index) => {
                    let _ = write!(rendered, "[{index}]");
                }
                Segment::MapValue => rendered.push_str("[..]"),
            }
        }
        rendered
    }
}
