//! Source Control Model
//!
//! The minimal view of heads, revisions and trigger causes that strategies need to
//! reach a decision. The scanner that produces these values lives in the host.

use crate::listener::TaskListener;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Where a change request's content comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeRequestOrigin {
    /// Same repository as the target.
    Local,
    /// A fork owned by someone else.
    Fork(String),
}

/// A named line of development.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Head {
    Branch {
        name: String,
    },
    Tag {
        name: String,
        /// When the tag was created.
        timestamp: DateTime<Utc>,
    },
    ChangeRequest {
        name: String,
        id: String,
        /// The head the change request wants to merge into.
        target: Box<Head>,
        origin: ChangeRequestOrigin,
    },
}

impl Head {
    pub fn branch(name: impl Into<String>) -> Self {
        Head::Branch { name: name.into() }
    }

    pub fn tag(name: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Head::Tag {
            name: name.into(),
            timestamp,
        }
    }

    /// A change request named `CR-<id>` from the same repository.
    pub fn change_request(id: impl Into<String>, target: Head) -> Self {
        let id = id.into();
        Head::ChangeRequest {
            name: format!("CR-{}", id),
            id,
            target: Box::new(target),
            origin: ChangeRequestOrigin::Local,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Head::Branch { name } | Head::Tag { name, .. } | Head::ChangeRequest { name, .. } => {
                name
            }
        }
    }

    pub fn is_change_request(&self) -> bool {
        matches!(self, Head::ChangeRequest { .. })
    }

    pub fn is_tag(&self) -> bool {
        matches!(self, Head::Tag { .. })
    }

    /// Creation time for tags, `None` for everything else.
    pub fn tag_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Head::Tag { timestamp, .. } => Some(*timestamp),
            _ => None,
        }
    }

    /// Target head for change requests.
    pub fn target(&self) -> Option<&Head> {
        match self {
            Head::ChangeRequest { target, .. } => Some(target),
            _ => None,
        }
    }
}

impl fmt::Display for Head {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Head::Branch { name } => write!(f, "branch {}", name),
            Head::Tag { name, .. } => write!(f, "tag {}", name),
            Head::ChangeRequest { name, target, .. } => {
                write!(f, "change request {} (target {})", name, target.name())
            }
        }
    }
}

/// How a change request is checked out for building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutStrategy {
    /// Build the change request's own head.
    Head,
    /// Build the result of merging it into the target.
    Merge,
}

/// Revision of a change request: origin-side content plus the target it is built against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeRequestRevision {
    /// Name of the change request head.
    pub head: String,
    /// Target revision the change would be merged onto.
    pub target: Box<Revision>,
    /// Origin-side commit.
    pub pull_hash: String,
    pub checkout: CheckoutStrategy,
}

impl ChangeRequestRevision {
    pub fn new(
        head: &Head,
        target: Revision,
        pull_hash: impl Into<String>,
        checkout: CheckoutStrategy,
    ) -> Self {
        Self {
            head: head.name().to_string(),
            target: Box::new(target),
            pull_hash: pull_hash.into(),
            checkout,
        }
    }

    pub fn is_merge(&self) -> bool {
        self.checkout == CheckoutStrategy::Merge
    }

    /// True iff both revisions would build the same thing apart from the target state:
    /// same change request, same origin-side content.
    pub fn equivalent(&self, other: &ChangeRequestRevision) -> bool {
        self.head == other.head && self.pull_hash == other.pull_hash
    }
}

/// Content state at a head. Compared for equality only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Revision {
    Plain { head: String, hash: String },
    ChangeRequest(ChangeRequestRevision),
}

impl Revision {
    pub fn plain(head: &Head, hash: impl Into<String>) -> Self {
        Revision::Plain {
            head: head.name().to_string(),
            hash: hash.into(),
        }
    }

    pub fn as_change_request(&self) -> Option<&ChangeRequestRevision> {
        match self {
            Revision::ChangeRequest(revision) => Some(revision),
            Revision::Plain { .. } => None,
        }
    }
}

impl From<ChangeRequestRevision> for Revision {
    fn from(revision: ChangeRequestRevision) -> Self {
        Revision::ChangeRequest(revision)
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Revision::Plain { head, hash } => write!(f, "{}:{}", head, hash),
            Revision::ChangeRequest(cr) => match cr.checkout {
                CheckoutStrategy::Merge => {
                    write!(f, "{}:{}+{}", cr.head, cr.pull_hash, cr.target)
                }
                CheckoutStrategy::Head => write!(f, "{}:{}", cr.head, cr.pull_hash),
            },
        }
    }
}

/// What triggered the current evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cause {
    /// A person asked for it.
    UserId { user_id: String },
    /// A multi-branch scan found the head.
    BranchIndexing,
    Other(String),
}

impl Cause {
    pub fn is_user_initiated(&self) -> bool {
        matches!(self, Cause::UserId { .. })
    }

    pub fn is_branch_indexing(&self) -> bool {
        matches!(self, Cause::BranchIndexing)
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cause::UserId { user_id } => write!(f, "Started by user {}", user_id),
            Cause::BranchIndexing => write!(f, "Branch indexing"),
            Cause::Other(description) => write!(f, "{}", description),
        }
    }
}

/// Failure to work out whether a revision is trusted.
#[derive(Debug, Error)]
pub enum TrustError {
    #[error("I/O error while checking trust: {0}")]
    Io(#[from] std::io::Error),

    #[error("Interrupted while checking trust: {0}")]
    Interrupted(String),
}

/// The repository a head was discovered in.
pub trait ScmSource: Send + Sync {
    fn id(&self) -> &str;

    /// The revision that may safely be built in place of `revision`. Equal to
    /// `revision` when its author is trusted.
    fn trusted_revision(
        &self,
        revision: &Revision,
        listener: &dyn TaskListener,
    ) -> Result<Revision, TrustError>;
}
