//! Integration tests for the skip-initial-build strategies across successive scans

use branch_build_strategies::scm::{Cause, Head, Revision};
use branch_build_strategies::strategy::{
    BranchBuildStrategy, BuildContext, BuildStrategy, IndexingCauseSkipStrategy,
    SkipInitialBuildStrategy,
};

use crate::integration::TrustedSource;

struct Scan<'a> {
    head: &'a Head,
    current: Revision,
    last_seen: Option<Revision>,
    causes: Vec<Cause>,
}

impl Scan<'_> {
    fn evaluate(&self, strategy: &BuildStrategy) -> bool {
        let ctx = BuildContext::new(&TrustedSource, self.head, &self.current)
            .with_last_seen(self.last_seen.as_ref())
            .with_causes(&self.causes);
        strategy.is_automatic_build(&ctx)
    }
}

#[test]
fn test_first_indexing_is_skipped_then_changes_build() {
    let head = Head::branch("feature/x");
    let strategies: [BuildStrategy; 2] = [
        SkipInitialBuildStrategy::new().into(),
        IndexingCauseSkipStrategy::new().into(),
    ];

    let first = Scan {
        head: &head,
        current: Revision::plain(&head, "a1"),
        last_seen: None,
        causes: vec![Cause::BranchIndexing],
    };
    let second = Scan {
        head: &head,
        current: Revision::plain(&head, "b2"),
        last_seen: Some(Revision::plain(&head, "a1")),
        causes: vec![Cause::BranchIndexing],
    };
    let unchanged = Scan {
        head: &head,
        current: Revision::plain(&head, "b2"),
        last_seen: Some(Revision::plain(&head, "b2")),
        causes: vec![Cause::BranchIndexing],
    };

    for strategy in &strategies {
        assert!(!first.evaluate(strategy), "{} built on first scan", strategy);
        assert!(second.evaluate(strategy), "{} skipped a change", strategy);
        assert!(!unchanged.evaluate(strategy), "{} rebuilt unchanged head", strategy);
    }
}

#[test]
fn test_variants_differ_for_events() {
    let head = Head::branch("feature/y");
    let event = Scan {
        head: &head,
        current: Revision::plain(&head, "c3"),
        last_seen: None,
        causes: vec![Cause::Other("Push event".to_string())],
    };
    assert!(!event.evaluate(&SkipInitialBuildStrategy::new().into()));
    assert!(event.evaluate(&IndexingCauseSkipStrategy::new().into()));
}
