//! Blocks automatic builds when a person triggered the evaluation.

use super::{BranchBuildStrategy, BuildContext};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CauseBuildStrategy {}

impl CauseBuildStrategy {
    pub fn new() -> Self {
        Self {}
    }
}

impl BranchBuildStrategy for CauseBuildStrategy {
    fn is_automatic_build(&self, ctx: &BuildContext<'_>) -> bool {
        let listener = ctx.listener();
        for cause in ctx.causes() {
            listener.info(&format!("Cause: {}", cause));
            if cause.is_user_initiated() {
                listener.info(&format!("skip build because of [{}]", cause));
                return false;
            }
        }
        true
    }
}

impl fmt::Display for CauseBuildStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CauseBuildStrategy{{}}")
    }
}
