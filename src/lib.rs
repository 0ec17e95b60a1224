//! Branch Build Strategies: deciding which discovered heads build automatically
//!
//! A multi-branch scan discovers branches, tags and change requests. For each head it
//! asks the configured [`strategy::BuildStrategy`] whether the head should be built
//! now, given the revision found, the revisions seen and built before, and the causes
//! of the scan. Strategies compose with ALL, ANY and NONE.

pub mod cli;
pub mod config;
pub mod error;
pub mod listener;
pub mod logging;
pub mod scm;
pub mod strategy;

pub use error::StrategyError;
pub use listener::{RecordingListener, TaskListener, TracingListener};
pub use scm::{Cause, ChangeRequestRevision, CheckoutStrategy, Head, Revision, ScmSource};
pub use strategy::{BranchBuildStrategy, BuildContext, BuildStrategy};
