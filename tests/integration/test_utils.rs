//! Shared test utilities for integration tests
//!
//! Mock repositories with fixed trust behavior, revision fixtures, and serialized access
//! to process environment variables.

use branch_build_strategies::listener::TaskListener;
use branch_build_strategies::scm::{
    ChangeRequestRevision, CheckoutStrategy, Head, Revision, ScmSource, TrustError,
};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Mutex;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Run `f` with the given variables set (`Some`) or removed (`None`), restoring the
/// previous values afterwards even if `f` panics.
pub fn with_env_vars<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    let saved: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
        .collect();
    for (key, value) in vars {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }

    let result = panic::catch_unwind(AssertUnwindSafe(f));

    for (key, value) in saved {
        match value {
            Some(value) => std::env::set_var(&key, value),
            None => std::env::remove_var(&key),
        }
    }

    match result {
        Ok(value) => value,
        Err(payload) => panic::resume_unwind(payload),
    }
}

/// Trusts every revision.
pub struct TrustedSource;

impl ScmSource for TrustedSource {
    fn id(&self) -> &str {
        "trusted"
    }

    fn trusted_revision(
        &self,
        revision: &Revision,
        _listener: &dyn TaskListener,
    ) -> Result<Revision, TrustError> {
        Ok(revision.clone())
    }
}

/// Only trusts the target side of change requests.
pub struct UntrustedSource;

impl ScmSource for UntrustedSource {
    fn id(&self) -> &str {
        "untrusted"
    }

    fn trusted_revision(
        &self,
        revision: &Revision,
        listener: &dyn TaskListener,
    ) -> Result<Revision, TrustError> {
        match revision.as_change_request() {
            Some(cr) => {
                listener.info(&format!("Loading trusted files from target {}", cr.target));
                Ok((*cr.target).clone())
            }
            None => Ok(revision.clone()),
        }
    }
}

/// Cannot reach the repository.
pub struct FailingSource;

impl ScmSource for FailingSource {
    fn id(&self) -> &str {
        "failing"
    }

    fn trusted_revision(
        &self,
        _revision: &Revision,
        _listener: &dyn TaskListener,
    ) -> Result<Revision, TrustError> {
        Err(TrustError::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "repository unreachable",
        )))
    }
}

/// Change request revision on top of `master` at `target_hash`.
pub fn cr_revision(
    head: &Head,
    target_hash: &str,
    pull_hash: &str,
    checkout: CheckoutStrategy,
) -> Revision {
    let master = Head::branch("master");
    ChangeRequestRevision::new(head, Revision::plain(&master, target_hash), pull_hash, checkout)
        .into()
}
