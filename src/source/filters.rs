//! Specialized filters built on [`Filtered`].
//!
//! Each constructor is infallible. Date text and author patterns are parsed
//! when the source is invoked, after the wrapped source has produced its
//! commits, and a failure there is returned instead of any commits.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use regex::Regex;

use crate::error::{CommitError, Result};
use crate::models::Commit;
use crate::source::{CommitSource, Filtered, Predicate, filtered};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Keeps commits authored at or after midnight UTC of a `YYYY-MM-DD` date.
#[derive(Debug, Clone)]
pub struct DateCutoff {
    date: String,
}

impl DateCutoff {
    pub fn new(date: impl Into<String>) -> Self {
        Self { date: date.into() }
    }

    pub fn start(&self) -> Result<DateTime<Utc>> {
        let invalid = |source: Option<chrono::ParseError>| CommitError::DateFormat {
            input: self.date.clone(),
            source,
        };
        if !is_iso_date_shape(&self.date) {
            return Err(invalid(None));
        }
        let day = NaiveDate::parse_from_str(&self.date, DATE_FORMAT).map_err(|e| invalid(Some(e)))?;
        Ok(day.and_time(NaiveTime::MIN).and_utc())
    }
}

/// Literal `YYYY-MM-DD`: ASCII digits with dashes at 4 and 7. chrono alone
/// would accept padding spaces and a signed year.
fn is_iso_date_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

impl Predicate for DateCutoff {
    fn compile(&self) -> Result<Box<dyn Fn(&Commit) -> bool + '_>> {
        let start = self.start()?;
        Ok(Box::new(move |c: &Commit| c.date.with_timezone(&Utc) >= start))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorField {
    Name,
    Email,
}

/// Drops commits whose author name or email matches any of the patterns.
///
/// Patterns use regex search semantics, case-sensitive. Commits without an
/// author are always kept.
#[derive(Debug, Clone)]
pub struct AuthorPatterns {
    field: AuthorField,
    patterns: Vec<String>,
}

impl AuthorPatterns {
    pub fn new(field: AuthorField, patterns: Vec<String>) -> Self {
        Self { field, patterns }
    }

    fn regexes(&self) -> Result<Vec<Regex>> {
        self.patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| CommitError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect()
    }
}

impl Predicate for AuthorPatterns {
    fn compile(&self) -> Result<Box<dyn Fn(&Commit) -> bool + '_>> {
        let regexes = self.regexes()?;
        let field = self.field;
        Ok(Box::new(move |c: &Commit| {
            let Some(author) = &c.author else {
                return true;
            };
            let value = match field {
                AuthorField::Name => &author.name,
                AuthorField::Email => &author.email,
            };
            !regexes.iter().any(|re| re.is_match(value))
        }))
    }
}

/// Keeps commits with at most `n` parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxParents(pub usize);

impl Predicate for MaxParents {
    fn compile(&self) -> Result<Box<dyn Fn(&Commit) -> bool + '_>> {
        let max = self.0;
        Ok(Box::new(move |c: &Commit| c.num_parents <= max))
    }
}

pub fn since<S: CommitSource>(date: impl Into<String>, source: S) -> Filtered<S, DateCutoff> {
    filtered(DateCutoff::new(date), source)
}

pub fn not_authored_by_names<S: CommitSource>(
    patterns: Vec<String>,
    source: S,
) -> Filtered<S, AuthorPatterns> {
    filtered(AuthorPatterns::new(AuthorField::Name, patterns), source)
}

pub fn not_authored_by_emails<S: CommitSource>(
    patterns: Vec<String>,
    source: S,
) -> Filtered<S, AuthorPatterns> {
    filtered(AuthorPatterns::new(AuthorField::Email, patterns), source)
}

pub fn with_max_parents<S: CommitSource>(n: usize, source: S) -> Filtered<S, MaxParents> {
    filtered(MaxParents(n), source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::from_fn;
    use crate::source::tests::{commit, hashes};
    use chrono::FixedOffset;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn dated(hash: &str, rfc3339: &str) -> Commit {
        Commit {
            date: DateTime::<FixedOffset>::parse_from_rfc3339(rfc3339).unwrap(),
            ..commit(hash)
        }
    }

    fn with_parents(hash: &str, num_parents: usize) -> Commit {
        Commit {
            num_parents,
            ..commit(hash)
        }
    }

    #[test]
    fn since_is_inclusive_at_midnight_utc() {
        let source = from_fn(|| {
            Ok(vec![
                dated("before", "2020-01-01T00:00:00Z"),
                dated("since", "2020-01-02T00:00:00Z"),
                dated("after", "2020-01-03T00:00:00Z"),
            ])
        });
        let out = since("2020-01-02", source).commits().unwrap();
        assert_eq!(hashes(&out), vec!["since", "after"]);
    }

    #[test]
    fn since_compares_instants_across_offsets() {
        // 2020-01-02T01:00+02:00 is 2020-01-01T23:00Z.
        let source = from_fn(|| {
            Ok(vec![
                dated("east", "2020-01-02T01:00:00+02:00"),
                dated("west", "2020-01-01T19:00:00-05:00"),
            ])
        });
        let out = since("2020-01-02", source).commits().unwrap();
        assert_eq!(hashes(&out), vec!["west"]);
    }

    #[rstest]
    #[case("2020/01/02")]
    #[case("2020-1-2")]
    #[case("2020-13-01")]
    #[case("yesterday")]
    #[case("")]
    #[case("2020- 1-02")]
    #[case("+2020-1-02")]
    #[case("2020-01- 2")]
    #[case(" 2020-1-02")]
    #[case("2020-01-0x")]
    fn since_rejects_malformed_dates(#[case] date: &str) {
        let err = since(date, from_fn(|| Ok(vec![commit("a")])))
            .commits()
            .unwrap_err();
        assert!(matches!(err, CommitError::DateFormat { ref input, .. } if input == date));
    }

    #[test]
    fn date_cutoff_starts_at_midnight_utc() {
        let start = DateCutoff::new("2020-02-29").start().unwrap();
        assert_eq!(start.to_rfc3339(), "2020-02-29T00:00:00+00:00");
    }

    #[test]
    fn since_reports_source_error_before_date_error() {
        let failing = from_fn(|| Err(CommitError::NoHead(git2::Error::from_str("unborn"))));
        let err = since("not a date", failing).commits().unwrap_err();
        assert!(matches!(err, CommitError::NoHead(_)));
    }

    #[test]
    fn max_parents_keeps_order() {
        let source = from_fn(|| {
            Ok(vec![
                with_parents("one", 1),
                with_parents("two", 2),
                with_parents("three", 3),
            ])
        });
        let out = with_max_parents(2, source).commits().unwrap();
        assert_eq!(
            out.iter().map(|c| c.num_parents).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn max_parents_zero_keeps_only_roots() {
        let source = from_fn(|| Ok(vec![with_parents("root", 0), with_parents("child", 1)]));
        let out = with_max_parents(0, source).commits().unwrap();
        assert_eq!(hashes(&out), vec!["root"]);
    }

    #[test]
    fn names_filter_removes_matches_anywhere_in_sequence() {
        let source = from_fn(|| Ok(vec![commit("x"), commit("a"), commit("b"), commit("x")]));
        let out = not_authored_by_names(vec!["name-x".to_string()], source)
            .commits()
            .unwrap();
        assert_eq!(hashes(&out), vec!["a", "b"]);
    }

    #[test]
    fn emails_filter_uses_any_pattern() {
        let source = from_fn(|| Ok(vec![commit("a"), commit("b"), commit("c")]));
        let patterns = vec!["^a@".to_string(), "^c@".to_string()];
        let out = not_authored_by_emails(patterns, source).commits().unwrap();
        assert_eq!(hashes(&out), vec!["b"]);
    }

    #[rstest]
    #[case("bot", vec!["a"])]
    #[case("^dependabot$", vec!["a", "dependabot[bot]", "renovate-bot"])]
    #[case("Bot", vec!["a", "dependabot[bot]", "renovate-bot"])]
    #[case("ren.vate", vec!["a", "dependabot[bot]"])]
    fn name_patterns_use_case_sensitive_search(#[case] pattern: &str, #[case] expected: Vec<&str>) {
        let named = |name: &str| {
            let mut c = commit(name);
            if let Some(author) = c.author.as_mut() {
                author.name = name.to_string();
            }
            c
        };
        let commits = vec![named("a"), named("dependabot[bot]"), named("renovate-bot")];
        let source = from_fn(move || Ok(commits.clone()));
        let out = not_authored_by_names(vec![pattern.to_string()], source)
            .commits()
            .unwrap();
        assert_eq!(hashes(&out), expected);
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let source = from_fn(|| Ok(vec![commit("a")]));
        let err = not_authored_by_names(vec!["ok".to_string(), "(".to_string()], source)
            .commits()
            .unwrap_err();
        assert!(matches!(err, CommitError::InvalidPattern { ref pattern, .. } if pattern == "("));
    }

    #[test]
    fn commits_without_author_survive_author_filters() {
        let source = from_fn(|| {
            Ok(vec![Commit {
                author: None,
                ..commit("anon")
            }])
        });
        let out = not_authored_by_emails(vec![".*".to_string()], source)
            .commits()
            .unwrap();
        assert_eq!(hashes(&out), vec!["anon"]);
    }

    #[test]
    fn empty_pattern_list_keeps_everything() {
        let source = from_fn(|| Ok(vec![commit("a"), commit("b")]));
        let out = not_authored_by_names(Vec::new(), source).commits().unwrap();
        assert_eq!(hashes(&out), vec!["a", "b"]);
    }
}
