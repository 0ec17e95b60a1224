//! Integration tests for the tag strategy, evaluated against a fixed clock

use branch_build_strategies::scm::{Head, Revision};
use branch_build_strategies::strategy::{
    BranchBuildStrategy, BuildContext, BuildStrategy, TagBuildStrategy, TimeUnit,
};
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::integration::TrustedSource;

fn clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn builds_tag_created(strategy: &TagBuildStrategy, created: DateTime<Utc>) -> bool {
    let head = Head::tag("v1.0", created);
    let revision = Revision::plain(&head, "dummy");
    let ctx = BuildContext::new(&TrustedSource, &head, &revision).at(clock());
    strategy.is_automatic_build(&ctx)
}

#[test]
fn test_window_one_to_three_days() {
    let strategy = TagBuildStrategy::from_days(Some("1"), Some("3"));
    assert!(!builds_tag_created(&strategy, clock()));
    assert!(builds_tag_created(&strategy, clock() - Duration::days(2)));
    assert!(!builds_tag_created(&strategy, clock() - Duration::days(4)));
}

#[test]
fn test_bounds_are_inclusive() {
    let strategy = TagBuildStrategy::from_days(Some("1"), Some("3"));
    assert!(builds_tag_created(&strategy, clock() - Duration::days(1)));
    assert!(builds_tag_created(&strategy, clock() - Duration::days(3)));
    assert!(!builds_tag_created(
        &strategy,
        clock() - Duration::days(3) - Duration::milliseconds(1)
    ));
}

#[test]
fn test_inverted_window_never_builds() {
    let strategy = TagBuildStrategy::from_days(Some("3"), Some("1"));
    for days in 0..5 {
        assert!(!builds_tag_created(&strategy, clock() - Duration::days(days)));
    }
}

#[test]
fn test_tags_from_the_future_only_pass_without_minimum() {
    let future = clock() + Duration::hours(1);
    assert!(builds_tag_created(&TagBuildStrategy::default(), future));
    assert!(builds_tag_created(
        &TagBuildStrategy::new(TimeUnit::Hours, None, Some(1)),
        future
    ));
    assert!(!builds_tag_created(
        &TagBuildStrategy::new(TimeUnit::Minutes, Some(0), None),
        future
    ));
}

#[test]
fn test_sub_day_bounds() {
    let strategy = TagBuildStrategy::new(TimeUnit::Hours, Some(2), Some(6));
    assert!(!builds_tag_created(&strategy, clock() - Duration::hours(1)));
    assert!(builds_tag_created(&strategy, clock() - Duration::hours(4)));
    assert!(!builds_tag_created(&strategy, clock() - Duration::hours(7)));
}

#[test]
fn test_config_round_trip_keeps_days() {
    let strategy: BuildStrategy = TagBuildStrategy::from_days(Some("1"), Some("3")).into();
    let text = toml::to_string(&strategy).unwrap();
    assert!(text.contains("buildTags"));
    let parsed: BuildStrategy = toml::from_str(&text).unwrap();
    assert_eq!(parsed, strategy);
}
