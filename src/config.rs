//! Declarative pipeline options.
//!
//! `PipelineConfig` describes which filters wrap a base source. The binary
//! fills it from command-line flags; library callers can also deserialize
//! it from their own configuration files.

use serde::{Deserialize, Serialize};

use crate::source::{
    CommitSource, not_authored_by_emails, not_authored_by_names, since, with_max_parents,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PipelineConfig {
    /// Earliest author date to keep, `YYYY-MM-DD`.
    pub since: Option<String>,
    pub ignore_author_names: Vec<String>,
    pub ignore_author_emails: Vec<String>,
    /// Highest parent count to keep; `Some(1)` drops merges.
    pub max_parents: Option<usize>,
}

impl PipelineConfig {
    /// Wraps `source` in the configured filters.
    ///
    /// Order from the inside out: date cutoff, author names, author emails,
    /// parent count. Unset options add no layer.
    pub fn apply<'a, S>(&self, source: S) -> Box<dyn CommitSource + 'a>
    where
        S: CommitSource + 'a,
    {
        let mut source: Box<dyn CommitSource + 'a> = Box::new(source);

        if let Some(date) = &self.since {
            source = Box::new(since(date.clone(), source));
        }
        if !self.ignore_author_names.is_empty() {
            source = Box::new(not_authored_by_names(self.ignore_author_names.clone(), source));
        }
        if !self.ignore_author_emails.is_empty() {
            source = Box::new(not_authored_by_emails(self.ignore_author_emails.clone(), source));
        }
        if let Some(n) = self.max_parents {
            source = Box::new(with_max_parents(n, source));
        }

        tracing::debug!(config = ?self, "Built commit pipeline");
        source
    }
}
