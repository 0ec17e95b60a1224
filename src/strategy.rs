//! Build Strategies
//!
//! A build strategy looks at a head discovered by a multi-branch scan, the revisions
//! seen and built for it so far, and what triggered the scan, and answers one question:
//! should this head be built automatically right now?
//!
//! [`BranchBuildStrategy`] is the evaluation seam. [`BuildStrategy`] is the closed set of
//! built-in strategies (plus [`CustomStrategy`] for host-provided predicates) and is what
//! configuration files deserialize into. Composites nest further `BuildStrategy` values.

use crate::listener::{TaskListener, TracingListener};
use crate::scm::{Cause, Head, Revision, ScmSource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

mod cause;
mod change_request;
mod composite;
mod name_filter;
mod named;
mod regular;
mod skip_initial;
mod tag;

pub use cause::CauseBuildStrategy;
pub use change_request::ChangeRequestBuildStrategy;
pub use composite::{AllBranchesStrategy, AnyBranchesStrategy, NoneBranchesStrategy};
pub use name_filter::{
    ExactNameFilter, FormValidation, NameFilter, RegexNameFilter, WildcardsNameFilter,
};
pub use named::NamedBranchesStrategy;
pub use regular::RegularBranchesStrategy;
pub use skip_initial::{IndexingCauseSkipStrategy, SkipInitialBuildStrategy};
pub use tag::{TagBuildStrategy, TimeUnit};

static TRACING_LISTENER: TracingListener = TracingListener;

/// Everything a strategy may look at for one head in one scan.
#[derive(Clone, Copy)]
pub struct BuildContext<'a> {
    source: &'a dyn ScmSource,
    head: &'a Head,
    current: &'a Revision,
    last_built: Option<&'a Revision>,
    last_seen: Option<&'a Revision>,
    causes: &'a [Cause],
    listener: &'a dyn TaskListener,
    now: DateTime<Utc>,
}

impl<'a> BuildContext<'a> {
    /// Context with no history, no causes, a tracing listener and the current time.
    pub fn new(source: &'a dyn ScmSource, head: &'a Head, current: &'a Revision) -> Self {
        Self {
            source,
            head,
            current,
            last_built: None,
            last_seen: None,
            causes: &[],
            listener: &TRACING_LISTENER,
            now: Utc::now(),
        }
    }

    pub fn with_last_built(mut self, revision: Option<&'a Revision>) -> Self {
        self.last_built = revision;
        self
    }

    pub fn with_last_seen(mut self, revision: Option<&'a Revision>) -> Self {
        self.last_seen = revision;
        self
    }

    pub fn with_causes(mut self, causes: &'a [Cause]) -> Self {
        self.causes = causes;
        self
    }

    pub fn with_listener(mut self, listener: &'a dyn TaskListener) -> Self {
        self.listener = listener;
        self
    }

    /// Evaluate as if the clock read `now`.
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn source(&self) -> &'a dyn ScmSource {
        self.source
    }

    pub fn head(&self) -> &'a Head {
        self.head
    }

    pub fn current(&self) -> &'a Revision {
        self.current
    }

    /// Revision of the most recent build of this head, if any.
    pub fn last_built(&self) -> Option<&'a Revision> {
        self.last_built
    }

    /// Revision found by the previous scan, if any.
    pub fn last_seen(&self) -> Option<&'a Revision> {
        self.last_seen
    }

    pub fn causes(&self) -> &'a [Cause] {
        self.causes
    }

    pub fn listener(&self) -> &'a dyn TaskListener {
        self.listener
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

impl fmt::Debug for BuildContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildContext")
            .field("source", &self.source.id())
            .field("head", &self.head)
            .field("current", &self.current)
            .field("last_built", &self.last_built)
            .field("last_seen", &self.last_seen)
            .field("causes", &self.causes)
            .field("now", &self.now)
            .finish()
    }
}

/// Decides whether a head gets an automatic build.
pub trait BranchBuildStrategy: Send + Sync {
    fn is_automatic_build(&self, ctx: &BuildContext<'_>) -> bool;
}

impl<F> BranchBuildStrategy for F
where
    F: Fn(&BuildContext<'_>) -> bool + Send + Sync,
{
    fn is_automatic_build(&self, ctx: &BuildContext<'_>) -> bool {
        self(ctx)
    }
}

/// A host-provided strategy, identified by name. Equal only to clones of itself.
#[derive(Clone)]
pub struct CustomStrategy {
    name: String,
    inner: Arc<dyn BranchBuildStrategy>,
}

impl CustomStrategy {
    pub fn new(name: impl Into<String>, strategy: impl BranchBuildStrategy + 'static) -> Self {
        Self {
            name: name.into(),
            inner: Arc::new(strategy),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn addr(&self) -> usize {
        Arc::as_ptr(&self.inner) as *const () as usize
    }
}

impl fmt::Debug for CustomStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomStrategy")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for CustomStrategy {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.addr() == other.addr()
    }
}

impl Eq for CustomStrategy {}

impl Hash for CustomStrategy {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.addr().hash(state);
    }
}

impl BranchBuildStrategy for CustomStrategy {
    fn is_automatic_build(&self, ctx: &BuildContext<'_>) -> bool {
        self.inner.is_automatic_build(ctx)
    }
}

/// Every strategy that can appear in configuration, tagged by its symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BuildStrategy {
    #[serde(rename = "buildAllBranches")]
    AllOf(AllBranchesStrategy),
    #[serde(rename = "buildAnyBranches")]
    AnyOf(AnyBranchesStrategy),
    #[serde(rename = "buildNoneBranches")]
    NoneOf(NoneBranchesStrategy),
    #[serde(rename = "buildNamedBranches")]
    Named(NamedBranchesStrategy),
    #[serde(rename = "buildRegularBranches")]
    Regular(RegularBranchesStrategy),
    #[serde(rename = "buildChangeRequests")]
    ChangeRequests(ChangeRequestBuildStrategy),
    #[serde(rename = "buildTags")]
    Tags(TagBuildStrategy),
    #[serde(rename = "skipUserCause")]
    Cause(CauseBuildStrategy),
    #[serde(rename = "skipInitialBuildOnFirstBranchIndexing")]
    SkipInitialBuild(SkipInitialBuildStrategy),
    #[serde(rename = "skipInitialBuildOnIndexingCause")]
    SkipOnIndexingCause(IndexingCauseSkipStrategy),
    #[serde(skip)]
    Custom(CustomStrategy),
}

impl BuildStrategy {
    /// Stable configuration name.
    pub fn symbol(&self) -> &'static str {
        match self {
            BuildStrategy::AllOf(_) => "buildAllBranches",
            BuildStrategy::AnyOf(_) => "buildAnyBranches",
            BuildStrategy::NoneOf(_) => "buildNoneBranches",
            BuildStrategy::Named(_) => "buildNamedBranches",
            BuildStrategy::Regular(_) => "buildRegularBranches",
            BuildStrategy::ChangeRequests(_) => "buildChangeRequests",
            BuildStrategy::Tags(_) => "buildTags",
            BuildStrategy::Cause(_) => "skipUserCause",
            BuildStrategy::SkipInitialBuild(_) => "skipInitialBuildOnFirstBranchIndexing",
            BuildStrategy::SkipOnIndexingCause(_) => "skipInitialBuildOnIndexingCause",
            BuildStrategy::Custom(_) => "custom",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BuildStrategy::AllOf(_) => "All strategies match",
            BuildStrategy::AnyOf(_) => "Any strategies match",
            BuildStrategy::NoneOf(_) => "None of these strategies match",
            BuildStrategy::Named(_) => "Named branches",
            BuildStrategy::Regular(_) => "Regular branches",
            BuildStrategy::ChangeRequests(_) => "Change requests",
            BuildStrategy::Tags(_) => "Tags",
            BuildStrategy::Cause(_) => "Skip builds triggered by users",
            BuildStrategy::SkipInitialBuild(_) => "Skip initial build on first branch indexing",
            BuildStrategy::SkipOnIndexingCause(_) => {
                "Skip initial build when triggered by branch indexing"
            }
            BuildStrategy::Custom(_) => "Custom strategy",
        }
    }

    /// Sub-strategies of a composite, empty for leaves.
    pub fn children(&self) -> &[BuildStrategy] {
        match self {
            BuildStrategy::AllOf(s) => s.strategies(),
            BuildStrategy::AnyOf(s) => s.strategies(),
            BuildStrategy::NoneOf(s) => s.strategies(),
            _ => &[],
        }
    }

    pub fn custom(name: impl Into<String>, strategy: impl BranchBuildStrategy + 'static) -> Self {
        BuildStrategy::Custom(CustomStrategy::new(name, strategy))
    }

    /// Wrap a closure as a custom strategy.
    pub fn from_fn<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&BuildContext<'_>) -> bool + Send + Sync + 'static,
    {
        BuildStrategy::custom(name, predicate)
    }

    fn inner(&self) -> &dyn BranchBuildStrategy {
        match self {
            BuildStrategy::AllOf(s) => s,
            BuildStrategy::AnyOf(s) => s,
            BuildStrategy::NoneOf(s) => s,
            BuildStrategy::Named(s) => s,
            BuildStrategy::Regular(s) => s,
            BuildStrategy::ChangeRequests(s) => s,
            BuildStrategy::Tags(s) => s,
            BuildStrategy::Cause(s) => s,
            BuildStrategy::SkipInitialBuild(s) => s,
            BuildStrategy::SkipOnIndexingCause(s) => s,
            BuildStrategy::Custom(s) => s,
        }
    }
}

impl BranchBuildStrategy for BuildStrategy {
    fn is_automatic_build(&self, ctx: &BuildContext<'_>) -> bool {
        let decision = self.inner().is_automatic_build(ctx);
        tracing::debug!(
            strategy = self.symbol(),
            head = %ctx.head(),
            revision = %ctx.current(),
            decision,
            "Evaluated build strategy"
        );
        decision
    }
}

impl fmt::Display for BuildStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildStrategy::AllOf(s) => s.fmt(f),
            BuildStrategy::AnyOf(s) => s.fmt(f),
            BuildStrategy::NoneOf(s) => s.fmt(f),
            BuildStrategy::Named(s) => s.fmt(f),
            BuildStrategy::Regular(s) => s.fmt(f),
            BuildStrategy::ChangeRequests(s) => s.fmt(f),
            BuildStrategy::Tags(s) => s.fmt(f),
            BuildStrategy::Cause(s) => s.fmt(f),
            BuildStrategy::SkipInitialBuild(s) => s.fmt(f),
            BuildStrategy::SkipOnIndexingCause(s) => s.fmt(f),
            BuildStrategy::Custom(s) => write!(f, "CustomStrategy{{name={}}}", s.name),
        }
    }
}

macro_rules! impl_from_strategy {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for BuildStrategy {
                fn from(strategy: $ty) -> Self {
                    BuildStrategy::$variant(strategy)
                }
            }
        )*
    };
}

impl_from_strategy!(
    AllOf(AllBranchesStrategy),
    AnyOf(AnyBranchesStrategy),
    NoneOf(NoneBranchesStrategy),
    Named(NamedBranchesStrategy),
    Regular(RegularBranchesStrategy),
    ChangeRequests(ChangeRequestBuildStrategy),
    Tags(TagBuildStrategy),
    Cause(CauseBuildStrategy),
    SkipInitialBuild(SkipInitialBuildStrategy),
    SkipOnIndexingCause(IndexingCauseSkipStrategy),
    Custom(CustomStrategy),
);
