//! Name filter properties

use branch_build_strategies::strategy::{ExactNameFilter, RegexNameFilter, WildcardsNameFilter};
use proptest::prelude::*;

/// Test that a lone `*` include matches every single-line name
#[test]
fn test_star_matches_everything_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&("[^\n\r]{0,40}", any::<bool>()), |(name, case_sensitive)| {
            let filter = WildcardsNameFilter::new(Some("*"), None, case_sensitive).unwrap();
            prop_assert!(filter.is_match(&name));
            Ok(())
        })
        .unwrap();
}

/// Test that case-insensitive exact matching does not depend on argument order
#[test]
fn test_exact_case_insensitive_symmetry_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&("[a-zA-Z]{0,6}", "[a-zA-Z]{0,6}"), |(a, b)| {
            let forward = ExactNameFilter::new(a.clone(), false).is_match(&b);
            let backward = ExactNameFilter::new(b.clone(), false).is_match(&a);
            prop_assert_eq!(forward, backward);
            prop_assert_eq!(forward, a.eq_ignore_ascii_case(&b));
            Ok(())
        })
        .unwrap();
}

proptest! {
    /// An escaped literal regex matches exactly its own text.
    #[test]
    fn escaped_regex_matches_itself(name in "[^\n\r]{1,30}", suffix in "[a-z]{1,3}") {
        let filter = RegexNameFilter::new(Some(&regex::escape(&name)), true).unwrap();
        prop_assert!(filter.is_match(&name));
        let longer = format!("{}{}", name, suffix);
        prop_assert!(!filter.is_match(&longer));
    }

    /// A glob without `*` is a literal name, and excluding it wins over including it.
    #[test]
    fn literal_glob_matches_only_itself(name in "[a-z0-9/_.-]{1,20}", other in "[a-z0-9/_.-]{1,20}") {
        let filter = WildcardsNameFilter::new(Some(&name), None, true).unwrap();
        prop_assert!(filter.is_match(&name));
        prop_assert_eq!(filter.is_match(&other), name == other);

        let excluded = WildcardsNameFilter::new(Some("*"), Some(&name), true).unwrap();
        prop_assert!(!excluded.is_match(&name));
    }
}
