//! Builds regular branches whose name passes at least one filter.

use super::name_filter::NameFilter;
use super::{BranchBuildStrategy, BuildContext};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedBranchesStrategy {
    #[serde(default)]
    filters: Vec<NameFilter>,
}

impl NamedBranchesStrategy {
    pub fn new(filters: Vec<NameFilter>) -> Self {
        Self { filters }
    }

    pub fn filters(&self) -> &[NameFilter] {
        &self.filters
    }
}

impl BranchBuildStrategy for NamedBranchesStrategy {
    fn is_automatic_build(&self, ctx: &BuildContext<'_>) -> bool {
        let head = ctx.head();
        if head.is_change_request() || head.is_tag() {
            return false;
        }
        let name = head.name();
        self.filters.iter().any(|filter| filter.is_match(name))
    }
}

impl fmt::Display for NamedBranchesStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NamedBranchesStrategy{{filters=[")?;
        for (i, filter) in self.filters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", filter)?;
        }
        write!(f, "]}}")
    }
}
