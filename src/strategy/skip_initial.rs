//! Suppress the build that would otherwise fire when a scan first discovers a head.
//!
//! Two variants exist. [`SkipInitialBuildStrategy`] only looks at revisions: it builds
//! when the previous scan saw a different revision. [`IndexingCauseSkipStrategy`] also
//! looks at the trigger: it skips a head never seen before only when branch indexing
//! triggered the evaluation.

use super::{BranchBuildStrategy, BuildContext};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Builds only when a previously seen revision exists and the head has moved since.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkipInitialBuildStrategy {}

impl SkipInitialBuildStrategy {
    pub fn new() -> Self {
        Self {}
    }
}

impl BranchBuildStrategy for SkipInitialBuildStrategy {
    fn is_automatic_build(&self, ctx: &BuildContext<'_>) -> bool {
        let last_seen = ctx.last_seen();
        tracing::info!(
            last_seen = ?last_seen.map(ToString::to_string),
            current = %ctx.current(),
            "Checking for first branch indexing"
        );
        matches!(last_seen, Some(seen) if seen != ctx.current())
    }
}

impl fmt::Display for SkipInitialBuildStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SkipInitialBuildStrategy{{}}")
    }
}

/// Skips unseen heads found by branch indexing, and heads that have not moved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexingCauseSkipStrategy {}

impl IndexingCauseSkipStrategy {
    pub fn new() -> Self {
        Self {}
    }
}

impl BranchBuildStrategy for IndexingCauseSkipStrategy {
    fn is_automatic_build(&self, ctx: &BuildContext<'_>) -> bool {
        let last_seen = ctx.last_seen();
        if last_seen.is_none() && ctx.causes().iter().any(|c| c.is_branch_indexing()) {
            return false;
        }
        last_seen != Some(ctx.current())
    }
}

impl fmt::Display for IndexingCauseSkipStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IndexingCauseSkipStrategy{{}}")
    }
}
