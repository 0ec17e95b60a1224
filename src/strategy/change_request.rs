//! Builds change requests, optionally ignoring target-only updates and untrusted content.

use super::{BranchBuildStrategy, BuildContext};
use crate::scm::Revision;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeRequestBuildStrategy {
    /// Skip merge revisions whose only difference from the last build is the target.
    #[serde(default)]
    ignore_target_only_changes: bool,
    /// Skip revisions that differ from what the source considers trusted.
    #[serde(default)]
    ignore_untrusted_changes: bool,
}

impl ChangeRequestBuildStrategy {
    pub fn new(ignore_target_only_changes: bool, ignore_untrusted_changes: bool) -> Self {
        Self {
            ignore_target_only_changes,
            ignore_untrusted_changes,
        }
    }

    pub fn ignores_target_only_changes(&self) -> bool {
        self.ignore_target_only_changes
    }

    pub fn ignores_untrusted_changes(&self) -> bool {
        self.ignore_untrusted_changes
    }

    fn is_target_only_change(ctx: &BuildContext<'_>) -> bool {
        let current = ctx.current().as_change_request();
        let last_built = ctx.last_built().and_then(Revision::as_change_request);
        match (current, last_built) {
            (Some(current), Some(last_built)) => {
                current.is_merge() && current.equivalent(last_built)
            }
            _ => false,
        }
    }

    fn is_trusted(ctx: &BuildContext<'_>) -> bool {
        match ctx.source().trusted_revision(ctx.current(), ctx.listener()) {
            Ok(trusted) => trusted == *ctx.current(),
            Err(e) => {
                let message = format!(
                    "Could not determine trust status for revision {} of {}, assuming untrusted: {}",
                    ctx.current(),
                    ctx.head(),
                    e
                );
                ctx.listener().warn(&message);
                tracing::warn!(
                    revision = %ctx.current(),
                    head = %ctx.head(),
                    error = %e,
                    "Could not determine trust status, assuming untrusted"
                );
                false
            }
        }
    }
}

impl BranchBuildStrategy for ChangeRequestBuildStrategy {
    fn is_automatic_build(&self, ctx: &BuildContext<'_>) -> bool {
        if !ctx.head().is_change_request() {
            return false;
        }
        if self.ignore_target_only_changes && Self::is_target_only_change(ctx) {
            return false;
        }
        if self.ignore_untrusted_changes && !Self::is_trusted(ctx) {
            return false;
        }
        true
    }
}

impl fmt::Display for ChangeRequestBuildStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ChangeRequestBuildStrategy{{ignoreTargetOnlyChanges={}, ignoreUntrustedChanges={}}}",
            self.ignore_target_only_changes, self.ignore_untrusted_changes
        )
    }
}
