//! Integration tests for the change-request strategy

use branch_build_strategies::listener::RecordingListener;
use branch_build_strategies::scm::{CheckoutStrategy, Head, Revision, ScmSource};
use branch_build_strategies::strategy::{
    BranchBuildStrategy, BuildContext, ChangeRequestBuildStrategy,
};

use crate::integration::{cr_revision, FailingSource, TrustedSource, UntrustedSource};

fn cr_head() -> Head {
    Head::change_request("1", Head::branch("master"))
}

fn evaluate(
    strategy: &ChangeRequestBuildStrategy,
    source: &dyn ScmSource,
    current: &Revision,
    last_built: Option<&Revision>,
) -> bool {
    let head = cr_head();
    let ctx = BuildContext::new(source, &head, current).with_last_built(last_built);
    strategy.is_automatic_build(&ctx)
}

#[test]
fn test_plain_change_request_builds() {
    let head = cr_head();
    let current = cr_revision(&head, "dummy", "dummy", CheckoutStrategy::Merge);
    let strategy = ChangeRequestBuildStrategy::default();
    assert!(evaluate(&strategy, &TrustedSource, &current, None));
    assert!(evaluate(&strategy, &UntrustedSource, &current, None));
}

#[test]
fn test_target_only_change_is_ignored() {
    let head = cr_head();
    let strategy = ChangeRequestBuildStrategy::new(true, false);
    let current = cr_revision(&head, "dummy", "dummy", CheckoutStrategy::Merge);

    let target_moved = cr_revision(&head, "old-dummy", "dummy", CheckoutStrategy::Merge);
    assert!(!evaluate(&strategy, &TrustedSource, &current, Some(&target_moved)));

    let origin_moved = cr_revision(&head, "dummy", "old-dummy", CheckoutStrategy::Merge);
    assert!(evaluate(&strategy, &TrustedSource, &current, Some(&origin_moved)));

    // Never built before.
    assert!(evaluate(&strategy, &TrustedSource, &current, None));
}

#[test]
fn test_target_only_change_needs_merge_checkout() {
    let head = cr_head();
    let strategy = ChangeRequestBuildStrategy::new(true, false);
    let current = cr_revision(&head, "dummy", "dummy", CheckoutStrategy::Head);
    let last_built = cr_revision(&head, "old-dummy", "dummy", CheckoutStrategy::Head);
    assert!(evaluate(&strategy, &TrustedSource, &current, Some(&last_built)));
}

#[test]
fn test_untrusted_changes_are_ignored() {
    let head = cr_head();
    let strategy = ChangeRequestBuildStrategy::new(false, true);
    let current = cr_revision(&head, "dummy", "dummy", CheckoutStrategy::Merge);

    assert!(evaluate(&strategy, &TrustedSource, &current, None));
    assert!(!evaluate(&strategy, &UntrustedSource, &current, None));
}

#[test]
fn test_trust_failure_is_reported_and_blocks() {
    let head = cr_head();
    let current = cr_revision(&head, "dummy", "dummy", CheckoutStrategy::Merge);
    let listener = RecordingListener::new();
    let ctx = BuildContext::new(&FailingSource, &head, &current).with_listener(&listener);

    assert!(!ChangeRequestBuildStrategy::new(false, true).is_automatic_build(&ctx));
    let lines = listener.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("WARNING: Could not determine trust status"));
    assert!(lines[0].contains("repository unreachable"));
}

#[test]
fn test_branches_and_tags_are_not_change_requests() {
    let strategy = ChangeRequestBuildStrategy::new(true, true);
    let head = Head::branch("master");
    let revision = Revision::plain(&head, "dummy");
    let ctx = BuildContext::new(&TrustedSource, &head, &revision);
    assert!(!strategy.is_automatic_build(&ctx));
}

#[test]
fn test_flags_deserialize_with_defaults() {
    let strategy: ChangeRequestBuildStrategy =
        toml::from_str("ignore_target_only_changes = true").unwrap();
    assert!(strategy.ignores_target_only_changes());
    assert!(!strategy.ignores_untrusted_changes());
}
