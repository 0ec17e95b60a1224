//! Branch name filters: exact names, regular expressions and wildcard globs.
//!
//! Matchers are compiled when a filter is built (or deserialized), so a bad pattern is
//! a configuration error and matching itself cannot fail.

use crate::error::StrategyError;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

const MATCH_ALL_REGEX: &str = "^.*$";
const MATCH_ALL_GLOB: &str = "*";

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Compile `pattern` so that it has to match the whole name.
fn compile_full_match(pattern: &str, case_sensitive: bool) -> Result<Regex, StrategyError> {
    RegexBuilder::new(&format!("^(?:{})$", pattern))
        .case_insensitive(!case_sensitive)
        .build()
        .map_err(|e| StrategyError::invalid_regex(pattern, &e))
}

/// Translate space separated `*` globs into one alternation.
fn glob_pattern(globs: &str) -> String {
    globs
        .split(' ')
        .filter(|glob| !glob.is_empty())
        .map(|glob| {
            glob.split('*')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(".*")
        })
        .collect::<Vec<_>>()
        .join("|")
}

/// Result of validating user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValidation {
    Ok,
    Error(String),
}

impl FormValidation {
    pub fn is_ok(&self) -> bool {
        matches!(self, FormValidation::Ok)
    }
}

/// A single name filter, tagged by kind in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NameFilter {
    Exact(ExactNameFilter),
    Regex(RegexNameFilter),
    Wildcards(WildcardsNameFilter),
}

impl NameFilter {
    pub fn is_match(&self, name: &str) -> bool {
        match self {
            NameFilter::Exact(filter) => filter.is_match(name),
            NameFilter::Regex(filter) => filter.is_match(name),
            NameFilter::Wildcards(filter) => filter.is_match(name),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            NameFilter::Exact(_) => "exact",
            NameFilter::Regex(_) => "regex",
            NameFilter::Wildcards(_) => "wildcards",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            NameFilter::Exact(_) => "Match name",
            NameFilter::Regex(_) => "Regular expression",
            NameFilter::Wildcards(_) => "Wildcards include/exclude",
        }
    }
}

impl fmt::Display for NameFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameFilter::Exact(filter) => filter.fmt(f),
            NameFilter::Regex(filter) => filter.fmt(f),
            NameFilter::Wildcards(filter) => filter.fmt(f),
        }
    }
}

impl From<ExactNameFilter> for NameFilter {
    fn from(filter: ExactNameFilter) -> Self {
        NameFilter::Exact(filter)
    }
}

impl From<RegexNameFilter> for NameFilter {
    fn from(filter: RegexNameFilter) -> Self {
        NameFilter::Regex(filter)
    }
}

impl From<WildcardsNameFilter> for NameFilter {
    fn from(filter: WildcardsNameFilter) -> Self {
        NameFilter::Wildcards(filter)
    }
}

/// Matches one literal name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExactNameFilter {
    #[serde(default)]
    name: String,
    #[serde(default)]
    case_sensitive: bool,
}

impl ExactNameFilter {
    pub fn new(name: impl Into<String>, case_sensitive: bool) -> Self {
        Self {
            name: name.into(),
            case_sensitive,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn is_match(&self, name: &str) -> bool {
        if self.case_sensitive {
            self.name == name
        } else {
            self.name
                .chars()
                .flat_map(char::to_lowercase)
                .eq(name.chars().flat_map(char::to_lowercase))
        }
    }
}

impl fmt::Display for ExactNameFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExactNameFilter{{name='{}', caseSensitive={}}}",
            self.name, self.case_sensitive
        )
    }
}

#[derive(Serialize, Deserialize)]
struct RegexFilterForm {
    #[serde(default)]
    regex: Option<String>,
    #[serde(default)]
    case_sensitive: bool,
}

/// Matches names against a regular expression covering the whole name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RegexFilterForm", into = "RegexFilterForm")]
pub struct RegexNameFilter {
    regex: String,
    case_sensitive: bool,
    pattern: Regex,
}

impl RegexNameFilter {
    /// A blank `regex` matches everything.
    pub fn new(regex: Option<&str>, case_sensitive: bool) -> Result<Self, StrategyError> {
        let regex = match regex {
            Some(r) if !is_blank(r) => r.to_string(),
            _ => MATCH_ALL_REGEX.to_string(),
        };
        let pattern = compile_full_match(&regex, case_sensitive)?;
        Ok(Self {
            regex,
            case_sensitive,
            pattern,
        })
    }

    /// Validation hook for user-entered expressions.
    pub fn check_regex(value: &str) -> FormValidation {
        match Regex::new(value) {
            Ok(_) => FormValidation::Ok,
            Err(e) => FormValidation::Error(e.to_string()),
        }
    }

    pub fn regex(&self) -> &str {
        &self.regex
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }
}

impl TryFrom<RegexFilterForm> for RegexNameFilter {
    type Error = StrategyError;

    fn try_from(form: RegexFilterForm) -> Result<Self, Self::Error> {
        RegexNameFilter::new(form.regex.as_deref(), form.case_sensitive)
    }
}

impl From<RegexNameFilter> for RegexFilterForm {
    fn from(filter: RegexNameFilter) -> Self {
        Self {
            regex: Some(filter.regex),
            case_sensitive: filter.case_sensitive,
        }
    }
}

impl PartialEq for RegexNameFilter {
    fn eq(&self, other: &Self) -> bool {
        self.regex == other.regex && self.case_sensitive == other.case_sensitive
    }
}

impl Eq for RegexNameFilter {}

impl Hash for RegexNameFilter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.regex.hash(state);
        self.case_sensitive.hash(state);
    }
}

impl fmt::Display for RegexNameFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RegexNameFilter{{regex=/{}/, caseSensitive={}}}",
            self.regex, self.case_sensitive
        )
    }
}

#[derive(Serialize, Deserialize)]
struct WildcardsFilterForm {
    #[serde(default)]
    includes: Option<String>,
    #[serde(default)]
    excludes: Option<String>,
    #[serde(default)]
    case_sensitive: bool,
}

/// Include/exclude lists of `*` globs separated by spaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "WildcardsFilterForm", into = "WildcardsFilterForm")]
pub struct WildcardsNameFilter {
    includes: String,
    excludes: String,
    case_sensitive: bool,
    include_pattern: Regex,
    /// `None` when `excludes` is blank.
    exclude_pattern: Option<Regex>,
}

impl WildcardsNameFilter {
    /// Blank `includes` means `*`; blank `excludes` excludes nothing.
    pub fn new(
        includes: Option<&str>,
        excludes: Option<&str>,
        case_sensitive: bool,
    ) -> Result<Self, StrategyError> {
        let includes = match includes {
            Some(i) if !is_blank(i) => i.to_string(),
            _ => MATCH_ALL_GLOB.to_string(),
        };
        let excludes = match excludes {
            Some(e) if !is_blank(e) => e.to_string(),
            _ => String::new(),
        };
        let include_pattern = compile_full_match(&glob_pattern(&includes), case_sensitive)?;
        let exclude_pattern = if is_blank(&excludes) {
            None
        } else {
            Some(compile_full_match(&glob_pattern(&excludes), case_sensitive)?)
        };
        Ok(Self {
            includes,
            excludes,
            case_sensitive,
            include_pattern,
            exclude_pattern,
        })
    }

    pub fn includes(&self) -> &str {
        &self.includes
    }

    pub fn excludes(&self) -> &str {
        &self.excludes
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn is_match(&self, name: &str) -> bool {
        if !self.include_pattern.is_match(name) {
            return false;
        }
        match &self.exclude_pattern {
            Some(exclude) => !exclude.is_match(name),
            None => true,
        }
    }
}

impl TryFrom<WildcardsFilterForm> for WildcardsNameFilter {
    type Error = StrategyError;

    fn try_from(form: WildcardsFilterForm) -> Result<Self, Self::Error> {
        WildcardsNameFilter::new(
            form.includes.as_deref(),
            form.excludes.as_deref(),
            form.case_sensitive,
        )
    }
}

impl From<WildcardsNameFilter> for WildcardsFilterForm {
    fn from(filter: WildcardsNameFilter) -> Self {
        Self {
            includes: Some(filter.includes),
            excludes: Some(filter.excludes),
            case_sensitive: filter.case_sensitive,
        }
    }
}

impl PartialEq for WildcardsNameFilter {
    fn eq(&self, other: &Self) -> bool {
        self.includes == other.includes
            && self.excludes == other.excludes
            && self.case_sensitive == other.case_sensitive
    }
}

impl Eq for WildcardsNameFilter {}

impl Hash for WildcardsNameFilter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.includes.hash(state);
        self.excludes.hash(state);
        self.case_sensitive.hash(state);
    }
}

impl fmt::Display for WildcardsNameFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WildcardsNameFilter{{includes='{}', excludes='{}', caseSensitive={}}}",
            self.includes, self.excludes, self.case_sensitive
        )
    }
}
