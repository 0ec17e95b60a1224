//! Builds tags, optionally only within an age window.

use super::{BranchBuildStrategy, BuildContext};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Units accepted when configuring age bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    fn millis_per_unit(self) -> i64 {
        match self {
            TimeUnit::Milliseconds => 1,
            TimeUnit::Seconds => 1_000,
            TimeUnit::Minutes => 60_000,
            TimeUnit::Hours => 3_600_000,
            TimeUnit::Days => 86_400_000,
        }
    }

    pub fn to_millis(self, value: i64) -> i64 {
        value.saturating_mul(self.millis_per_unit())
    }

    /// Whole units in `millis`, rounded down.
    pub fn from_millis(self, millis: i64) -> i64 {
        millis / self.millis_per_unit()
    }
}

/// Day count as written in configuration: `1` or `"1"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum DaysValue {
    Days(i64),
    Text(String),
}

impl DaysValue {
    fn to_days(&self) -> Option<i64> {
        match self {
            DaysValue::Days(days) => Some(*days),
            DaysValue::Text(text) => text.trim().parse().ok(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct TagStrategyForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    at_least_days: Option<DaysValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    at_most_days: Option<DaysValue>,
}

/// Tag strategy with optional minimum and maximum tag age, held in milliseconds.
///
/// Serialized as whole days, so bounds finer than a day are rounded down on output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "TagStrategyForm", into = "TagStrategyForm")]
pub struct TagBuildStrategy {
    at_least_millis: Option<i64>,
    at_most_millis: Option<i64>,
}

impl TagBuildStrategy {
    /// `None` or a negative value disables that bound.
    pub fn new(unit: TimeUnit, at_least: Option<i64>, at_most: Option<i64>) -> Self {
        let normalize = |value: Option<i64>| value.filter(|v| *v >= 0).map(|v| unit.to_millis(v));
        Self {
            at_least_millis: normalize(at_least),
            at_most_millis: normalize(at_most),
        }
    }

    /// Bounds from day counts as typed into a form. Blank or unparsable text disables the bound.
    pub fn from_days(at_least_days: Option<&str>, at_most_days: Option<&str>) -> Self {
        let parse = |value: Option<&str>| value.and_then(|v| v.trim().parse::<i64>().ok());
        Self::new(TimeUnit::Days, parse(at_least_days), parse(at_most_days))
    }

    pub fn at_least_millis(&self) -> Option<i64> {
        self.at_least_millis
    }

    pub fn at_most_millis(&self) -> Option<i64> {
        self.at_most_millis
    }

    pub fn at_least(&self, unit: TimeUnit) -> Option<i64> {
        self.at_least_millis.map(|ms| unit.from_millis(ms))
    }

    pub fn at_most(&self, unit: TimeUnit) -> Option<i64> {
        self.at_most_millis.map(|ms| unit.from_millis(ms))
    }

    /// Minimum age in days for form binding; empty when unset.
    pub fn at_least_days(&self) -> String {
        self.at_least(TimeUnit::Days)
            .map(|days| days.to_string())
            .unwrap_or_default()
    }

    /// Maximum age in days for form binding; empty when unset.
    pub fn at_most_days(&self) -> String {
        self.at_most(TimeUnit::Days)
            .map(|days| days.to_string())
            .unwrap_or_default()
    }

    /// A minimum above the maximum can never be satisfied.
    pub fn is_degenerate(&self) -> bool {
        matches!(
            (self.at_least_millis, self.at_most_millis),
            (Some(at_least), Some(at_most)) if at_least > at_most
        )
    }
}

impl BranchBuildStrategy for TagBuildStrategy {
    fn is_automatic_build(&self, ctx: &BuildContext<'_>) -> bool {
        let Some(created) = ctx.head().tag_timestamp() else {
            return false;
        };
        if self.at_least_millis.is_none() && self.at_most_millis.is_none() {
            return true;
        }
        if self.is_degenerate() {
            return false;
        }
        let tag_age = (ctx.now() - created).num_milliseconds();
        if matches!(self.at_most_millis, Some(at_most) if tag_age > at_most) {
            return false;
        }
        if matches!(self.at_least_millis, Some(at_least) if tag_age < at_least) {
            return false;
        }
        true
    }
}

impl From<TagStrategyForm> for TagBuildStrategy {
    fn from(form: TagStrategyForm) -> Self {
        TagBuildStrategy::new(
            TimeUnit::Days,
            form.at_least_days.as_ref().and_then(DaysValue::to_days),
            form.at_most_days.as_ref().and_then(DaysValue::to_days),
        )
    }
}

impl From<TagBuildStrategy> for TagStrategyForm {
    fn from(strategy: TagBuildStrategy) -> Self {
        TagStrategyForm {
            at_least_days: strategy.at_least(TimeUnit::Days).map(DaysValue::Days),
            at_most_days: strategy.at_most(TimeUnit::Days).map(DaysValue::Days),
        }
    }
}

fn describe_millis(millis: Option<i64>) -> String {
    let Some(millis) = millis else {
        return "n/a".to_string();
    };
    let (value, unit) = if millis >= TimeUnit::Days.millis_per_unit() {
        (TimeUnit::Days.from_millis(millis), "day")
    } else if millis >= TimeUnit::Hours.millis_per_unit() {
        (TimeUnit::Hours.from_millis(millis), "hr")
    } else if millis >= TimeUnit::Minutes.millis_per_unit() {
        (TimeUnit::Minutes.from_millis(millis), "min")
    } else if millis >= TimeUnit::Seconds.millis_per_unit() {
        (TimeUnit::Seconds.from_millis(millis), "sec")
    } else {
        (millis, "ms")
    };
    if value == 1 || unit != "day" {
        format!("{} {}", value, unit)
    } else {
        format!("{} days", value)
    }
}

impl fmt::Display for TagBuildStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TagBuildStrategy{{atLeast={}, atMost={}}}",
            describe_millis(self.at_least_millis),
            describe_millis(self.at_most_millis)
        )
    }
}
