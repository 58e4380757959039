//! Deferred commit sources and the filter combinator.
//!
//! A [`CommitSource`] produces an ordered `Vec<Commit>` when asked and does
//! no work before that. Pipelines are built by wrapping one source in
//! another:
//!
//! ```no_run
//! use commit_source::git::{FileSystem, in_repository};
//! use commit_source::source::{CommitSource, not_authored_by_names, since, with_max_parents};
//!
//! let history = in_repository(FileSystem::new("."));
//! let recent = since("2024-01-01", history);
//! let human = not_authored_by_names(vec!["^dependabot".to_string()], recent);
//! let source = with_max_parents(1, human);
//! let commits = source.commits()?;
//! # Ok::<(), commit_source::CommitError>(())
//! ```
//!
//! - `filters`: date cutoff, author exclusion, parent-count ceiling
//! - `fake`: a single synthetic commit read from a stream

pub mod fake;
pub mod filters;

pub use fake::{FAKE_HASH, FakeCommit, fake_commit};
pub use filters::{
    AuthorField, AuthorPatterns, DateCutoff, MaxParents, not_authored_by_emails,
    not_authored_by_names, since, with_max_parents,
};

use crate::error::Result;
use crate::models::Commit;

/// A re-runnable computation producing commits in a fixed order.
pub trait CommitSource {
    fn commits(&self) -> Result<Vec<Commit>>;
}

impl<S: CommitSource + ?Sized> CommitSource for &S {
    fn commits(&self) -> Result<Vec<Commit>> {
        (**self).commits()
    }
}

impl<S: CommitSource + ?Sized> CommitSource for Box<S> {
    fn commits(&self) -> Result<Vec<Commit>> {
        (**self).commits()
    }
}

/// Source backed by a closure.
#[derive(Clone)]
pub struct FromFn<F>(F);

pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: Fn() -> Result<Vec<Commit>>,
{
    FromFn(f)
}

impl<F> CommitSource for FromFn<F>
where
    F: Fn() -> Result<Vec<Commit>>,
{
    fn commits(&self) -> Result<Vec<Commit>> {
        (self.0)()
    }
}

/// Retention test applied by [`Filtered`].
///
/// `compile` runs once per invocation, after the wrapped source succeeded,
/// so argument errors (bad dates, bad patterns) never mask a source error.
pub trait Predicate {
    fn compile(&self) -> Result<Box<dyn Fn(&Commit) -> bool + '_>>;
}

impl<F> Predicate for F
where
    F: Fn(&Commit) -> bool,
{
    fn compile(&self) -> Result<Box<dyn Fn(&Commit) -> bool + '_>> {
        Ok(Box::new(self))
    }
}

/// Keeps the commits of `source` that satisfy `predicate`, in order.
#[derive(Debug, Clone)]
pub struct Filtered<S, P> {
    source: S,
    predicate: P,
}

pub fn filtered<S, P>(predicate: P, source: S) -> Filtered<S, P>
where
    S: CommitSource,
    P: Predicate,
{
    Filtered { source, predicate }
}

impl<S, P> CommitSource for Filtered<S, P>
where
    S: CommitSource,
    P: Predicate,
{
    fn commits(&self) -> Result<Vec<Commit>> {
        let commits = self.source.commits()?;
        let keep = self.predicate.compile()?;

        let total = commits.len();
        let kept: Vec<Commit> = commits.into_iter().filter(|c| keep(c)).collect();
        tracing::trace!("Filter kept {} of {} commits", kept.len(), total);

        Ok(kept)
    }
}
