//! Integration tests for the user-cause strategy

use branch_build_strategies::listener::RecordingListener;
use branch_build_strategies::scm::{Cause, Head, Revision};
use branch_build_strategies::strategy::{
    AllBranchesStrategy, BranchBuildStrategy, BuildContext, BuildStrategy, CauseBuildStrategy,
    RegularBranchesStrategy,
};

use crate::integration::TrustedSource;

fn evaluate(strategy: &BuildStrategy, causes: &[Cause], listener: &RecordingListener) -> bool {
    let head = Head::branch("master");
    let revision = Revision::plain(&head, "dummy");
    let ctx = BuildContext::new(&TrustedSource, &head, &revision)
        .with_causes(causes)
        .with_listener(listener);
    strategy.is_automatic_build(&ctx)
}

#[test]
fn test_user_cause_skips_build() {
    let listener = RecordingListener::new();
    let causes = [Cause::UserId {
        user_id: "bob".to_string(),
    }];
    assert!(!evaluate(&CauseBuildStrategy::new().into(), &causes, &listener));
    assert!(listener.contains("skip build because of [Started by user bob]"));
}

#[test]
fn test_indexing_cause_builds() {
    let listener = RecordingListener::new();
    let causes = [Cause::BranchIndexing, Cause::Other("Webhook".to_string())];
    assert!(evaluate(&CauseBuildStrategy::new().into(), &causes, &listener));
    assert_eq!(
        listener.lines(),
        vec!["Cause: Branch indexing".to_string(), "Cause: Webhook".to_string()]
    );
}

#[test]
fn test_combined_with_regular_branches() {
    let strategy: BuildStrategy = AllBranchesStrategy::new(vec![
        RegularBranchesStrategy::new().into(),
        CauseBuildStrategy::new().into(),
    ])
    .into();
    let listener = RecordingListener::new();
    assert!(evaluate(&strategy, &[Cause::BranchIndexing], &listener));
    assert!(!evaluate(
        &strategy,
        &[Cause::UserId {
            user_id: "carol".to_string()
        }],
        &listener
    ));
}
