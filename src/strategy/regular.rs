//! Builds heads that are neither tags nor change requests.

use super::{BranchBuildStrategy, BuildContext};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegularBranchesStrategy {}

impl RegularBranchesStrategy {
    pub fn new() -> Self {
        Self {}
    }
}

impl BranchBuildStrategy for RegularBranchesStrategy {
    fn is_automatic_build(&self, ctx: &BuildContext<'_>) -> bool {
        let head = ctx.head();
        !head.is_change_request() && !head.is_tag()
    }
}

impl fmt::Display for RegularBranchesStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegularBranchesStrategy{{}}")
    }
}
