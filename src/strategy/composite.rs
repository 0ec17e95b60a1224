//! ALL / ANY / NONE combinators over ordered sub-strategies.
//!
//! Sub-strategies run in order and evaluation stops as soon as the result is known.
//! An empty list never triggers a build.

use super::{BranchBuildStrategy, BuildContext, BuildStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

fn fmt_list(f: &mut fmt::Formatter<'_>, name: &str, strategies: &[BuildStrategy]) -> fmt::Result {
    write!(f, "{}{{strategies=[", name)?;
    for (i, strategy) in strategies.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", strategy)?;
    }
    write!(f, "]}}")
}

/// Builds when every sub-strategy agrees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AllBranchesStrategy {
    #[serde(default)]
    strategies: Vec<BuildStrategy>,
}

impl AllBranchesStrategy {
    pub fn new(strategies: Vec<BuildStrategy>) -> Self {
        Self { strategies }
    }

    pub fn strategies(&self) -> &[BuildStrategy] {
        &self.strategies
    }
}

impl BranchBuildStrategy for AllBranchesStrategy {
    fn is_automatic_build(&self, ctx: &BuildContext<'_>) -> bool {
        if self.strategies.is_empty() {
            return false;
        }
        for (index, strategy) in self.strategies.iter().enumerate() {
            if !strategy.is_automatic_build(ctx) {
                tracing::debug!(index, strategy = strategy.symbol(), "All: sub-strategy declined");
                return false;
            }
        }
        true
    }
}

impl fmt::Display for AllBranchesStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_list(f, "AllBranchesStrategy", &self.strategies)
    }
}

/// Builds when at least one sub-strategy agrees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnyBranchesStrategy {
    #[serde(default)]
    strategies: Vec<BuildStrategy>,
}

impl AnyBranchesStrategy {
    pub fn new(strategies: Vec<BuildStrategy>) -> Self {
        Self { strategies }
    }

    pub fn strategies(&self) -> &[BuildStrategy] {
        &self.strategies
    }
}

impl BranchBuildStrategy for AnyBranchesStrategy {
    fn is_automatic_build(&self, ctx: &BuildContext<'_>) -> bool {
        for (index, strategy) in self.strategies.iter().enumerate() {
            if strategy.is_automatic_build(ctx) {
                tracing::debug!(index, strategy = strategy.symbol(), "Any: sub-strategy accepted");
                return true;
            }
        }
        false
    }
}

impl fmt::Display for AnyBranchesStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_list(f, "AnyBranchesStrategy", &self.strategies)
    }
}

/// Builds when no sub-strategy agrees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoneBranchesStrategy {
    #[serde(default)]
    strategies: Vec<BuildStrategy>,
}

impl NoneBranchesStrategy {
    pub fn new(strategies: Vec<BuildStrategy>) -> Self {
        Self { strategies }
    }

    pub fn strategies(&self) -> &[BuildStrategy] {
        &self.strategies
    }
}

impl BranchBuildStrategy for NoneBranchesStrategy {
    fn is_automatic_build(&self, ctx: &BuildContext<'_>) -> bool {
        if self.strategies.is_empty() {
            return false;
        }
        for (index, strategy) in self.strategies.iter().enumerate() {
            if strategy.is_automatic_build(ctx) {
                tracing::debug!(index, strategy = strategy.symbol(), "None: sub-strategy accepted");
                return false;
            }
        }
        true
    }
}

impl fmt::Display for NoneBranchesStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_list(f, "NoneBranchesStrategy", &self.strategies)
    }
}
