//! Value-level detection.

use crate::{might_contain_secured, ScopeFilter, Securable};

/// Whether `value` holds a populated secured field right now.
///
/// Returns `false` without touching the value when `maybe` is `false`.
/// Otherwise stops at the first secured field that is not concealed.
pub fn has_populated_secured<T: Securable>(value: &T, maybe: bool, scope: &ScopeFilter) -> bool {
    maybe && value.has_populated_secured(scope)
}

/// Scope check, cached descriptor and detection in one call.
///
/// This is the gate in front of every level of the walk.
pub fn detect<T: Securable>(value: &T, scope: &ScopeFilter) -> bool {
    scope.admits::<T>() && has_populated_secured(value, might_contain_secured::<T>(), scope)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::{detect, has_populated_secured};
    use crate::{ScopeFilter, Securable};

    static PROBED: AtomicUsize = AtomicUsize::new(0);

    #[derive(Clone)]
    struct Probe;

    impl Securable for Probe {
        fn analyze() -> bool {
            true
        }

        fn has_populated_secured(&self, _scope: &ScopeFilter) -> bool {
            PROBED.fetch_add(1, Ordering::SeqCst);
            true
        }
    }

    #[derive(Clone, Securable)]
    struct Credentials {
        user: String,
        #[hide]
        password: String,
    }

    #[test]
    fn not_maybe_never_touches_value() {
        let before = PROBED.load(Ordering::SeqCst);
        assert!(!has_populated_secured(&Probe, false, &ScopeFilter::unrestricted()));
        assert_eq!(PROBED.load(Ordering::SeqCst), before);
    }

    #[test]
    fn populated_secret_is_detected() {
        let scope = ScopeFilter::unrestricted();
        let creds = Credentials {
            user: "ana".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(detect(&creds, &scope));
    }

    #[test]
    fn empty_or_placeholder_secret_is_not_populated() {
        let scope = ScopeFilter::unrestricted();
        let empty = Credentials {
            user: "ana".to_string(),
            password: String::new(),
        };
        assert!(!detect(&empty, &scope));

        let hidden = Credentials {
            user: "ana".to_string(),
            password: crate::SECURED_PLACEHOLDER.to_string(),
        };
        assert!(!detect(&hidden, &scope));
    }

    #[test]
    fn out_of_scope_type_is_not_detected() {
        let scope = ScopeFilter::new(["somewhere::else"]);
        let creds = Credentials {
            user: "ana".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(!detect(&creds, &scope));
        assert!(detect(&Some(creds), &ScopeFilter::unrestricted()));
    }
}
