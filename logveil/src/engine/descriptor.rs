//! Type descriptor cache.
//!
//! A descriptor answers "could a value of this type ever carry a secured
//! field?". It is computed once per type through [`Securable::analyze`] and
//! kept for the life of the process.
//!
//! While a type is being analyzed on a thread, a recursive occurrence of the
//! same type resolves to `false`. A verdict computed on top of such a
//! provisional answer for an enclosing type is returned but not stored: only
//! the outermost type of the cycle is cached, and everything inside it is
//! analyzed again once that entry exists.

use std::{
    any::{type_name, TypeId},
    cell::RefCell,
};

use dashmap::DashMap;
use once_cell::sync::Lazy;
use tracing::trace;

use crate::Securable;

static DESCRIPTORS: Lazy<DashMap<TypeId, bool>> = Lazy::new(DashMap::new);

#[derive(Default)]
struct Analysis {
    /// Types being analyzed on this thread, outermost first.
    stack: Vec<TypeId>,
    /// Shallowest stack depth a recursive occurrence resolved against.
    cycle_floor: Option<usize>,
}

thread_local! {
    static ANALYSIS: RefCell<Analysis> = RefCell::new(Analysis::default());
}

/// Pops the in-progress marker even if `analyze` unwinds.
struct InProgress {
    depth: usize,
}

impl InProgress {
    /// Marks `id` as being analyzed. `None` if it already is, in which case
    /// the caller answers provisionally.
    fn enter(id: TypeId) -> Option<Self> {
        ANALYSIS.with(|analysis| {
            let mut analysis = analysis.borrow_mut();
            if let Some(depth) = analysis.stack.iter().position(|entered| *entered == id) {
                let floor = analysis.cycle_floor.map_or(depth, |floor| floor.min(depth));
                analysis.cycle_floor = Some(floor);
                return None;
            }
            analysis.stack.push(id);
            Some(Self {
                depth: analysis.stack.len() - 1,
            })
        })
    }

    /// Whether the verdict computed under this marker is final, i.e. it does
    /// not rest on a provisional answer for an enclosing type.
    fn is_settled(&self) -> bool {
        ANALYSIS.with(|analysis| {
            !analysis
                .borrow()
                .cycle_floor
                .is_some_and(|floor| floor < self.depth)
        })
    }
}

impl Drop for InProgress {
    fn drop(&mut self) {
        ANALYSIS.with(|analysis| {
            let mut analysis = analysis.borrow_mut();
            analysis.stack.truncate(self.depth);
            if analysis.cycle_floor.is_some_and(|floor| floor >= self.depth) {
                analysis.cycle_floor = None;
            }
        });
    }
}

/// Whether `T` might contain a secured field, ignoring scope.
///
/// Memoized per type. Concurrent first calls may each run the analysis; the
/// first result stored wins and every caller returns the stored value.
pub fn might_contain_secured<T: Securable>() -> bool {
    let id = TypeId::of::<T>();
    if let Some(cached) = cached_descriptor::<T>() {
        return cached;
    }

    let Some(guard) = InProgress::enter(id) else {
        return false;
    };
    let verdict = T::analyze();
    let settled = guard.is_settled();
    drop(guard);

    if !settled {
        trace!(
            type_name = type_name::<T>(),
            might_contain_secured = verdict,
            "type descriptor depends on an enclosing analysis, not cached"
        );
        return verdict;
    }

    let stored = *DESCRIPTORS.entry(id).or_insert(verdict);
    trace!(
        type_name = type_name::<T>(),
        might_contain_secured = stored,
        "computed type descriptor"
    );
    stored
}

/// The cached descriptor for `T`, if it has been computed.
pub fn cached_descriptor<T: Securable>() -> Option<bool> {
    DESCRIPTORS
        .get(&TypeId::of::<T>())
        .map(|descriptor| *descriptor)
}

/// Number of types with a cached descriptor.
pub fn descriptor_count() -> usize {
    DESCRIPTORS.len()
}
