//! Scope filtering: which types the engine is allowed to traverse.
//!
//! Derived types report their `module_path!()`. Built-in containers and
//! primitives report nothing and always pass, so a `Vec<app::User>` is
//! admitted or not based on `app::User` alone.

use std::sync::Arc;

use crate::Securable;

/// A set of module paths considered application-owned.
///
/// A module path is admitted when it equals a configured entry or lies below
/// one (`entry::...`). Matching works on whole path segments: `app` admits
/// `app::billing` but not `application`.
///
/// The default filter is unrestricted. A filter built from an empty list
/// admits only types without a module path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScopeFilter {
    modules: Option<Arc<[String]>>,
}

impl ScopeFilter {
    /// A filter that admits every type.
    #[must_use]
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// A filter restricted to the given module paths.
    ///
    /// Trailing `::` separators are ignored.
    pub fn new<I, S>(modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let modules = modules
            .into_iter()
            .map(|module| {
                let module: String = module.into();
                module.trim_end_matches("::").to_string()
            })
            .collect();
        Self {
            modules: Some(modules),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.modules.is_none()
    }

    /// Configured module paths, `None` when unrestricted.
    pub fn modules(&self) -> Option<&[String]> {
        self.modules.as_deref()
    }

    /// Whether values of `T` may be analyzed, detected and walked.
    pub fn admits<T: Securable>(&self) -> bool {
        self.admits_path(T::scope_path())
    }

    /// Whether a type reporting `path` is admitted.
    pub fn admits_path(&self, path: Option<&str>) -> bool {
        let (Some(modules), Some(path)) = (&self.modules, path) else {
            return true;
        };
        modules.iter().any(|module| {
            !module.is_empty()
                && path
                    .strip_prefix(module.as_str())
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ScopeFilter;

    #[test]
    fn unrestricted_admits_everything() {
        let scope = ScopeFilter::unrestricted();
        assert!(scope.is_unrestricted());
        assert!(scope.admits_path(Some("anything::at::all")));
        assert!(scope.admits_path(None));
    }

    #[test]
    fn exact_and_descendant_paths_are_admitted() {
        let scope = ScopeFilter::new(["app::billing"]);
        assert!(scope.admits_path(Some("app::billing")));
        assert!(scope.admits_path(Some("app::billing::invoices")));
        assert!(!scope.admits_path(Some("app")));
        assert!(!scope.admits_path(Some("app::shipping")));
    }

    #[test]
    fn prefixes_match_whole_segments_only() {
        let scope = ScopeFilter::new(["app"]);
        assert!(scope.admits_path(Some("app::models")));
        assert!(!scope.admits_path(Some("application::models")));
        assert!(!scope.admits_path(Some("apple")));
    }

    #[test]
    fn trailing_separator_is_ignored() {
        let scope = ScopeFilter::new(["app::"]);
        assert_eq!(scope.modules(), Some(&["app".to_string()][..]));
        assert!(scope.admits_path(Some("app::models")));
    }

    #[test]
    fn empty_list_admits_only_built_in_types() {
        let scope = ScopeFilter::new(Vec::<String>::new());
        assert!(!scope.is_unrestricted());
        assert!(scope.admits_path(None));
        assert!(!scope.admits_path(Some("app::models")));
    }

    #[test]
    fn empty_entry_admits_nothing_extra() {
        let scope = ScopeFilter::new([""]);
        assert!(!scope.admits_path(Some("app")));
    }
}
