//! Base commit source: walks a repository's history from HEAD.
//!
//! Nothing is cached. Every call to `commits()` asks the provider for a
//! fresh handle and walks the whole reachable graph again, newest first.

use git2::Sort;
use std::time::Instant;

use crate::error::{CommitError, Result};
use crate::git::repository::{RepositoryProvider, commit_from_git};
use crate::models::Commit;
use crate::source::CommitSource;

/// Source over the real history of whatever `provider` opens.
#[derive(Debug, Clone)]
pub struct InRepository<P> {
    provider: P,
}

pub fn in_repository<P: RepositoryProvider>(provider: P) -> InRepository<P> {
    InRepository { provider }
}

impl<P: RepositoryProvider> CommitSource for InRepository<P> {
    fn commits(&self) -> Result<Vec<Commit>> {
        let repo = self.provider.open()?;
        tracing::debug!("Opened repository at {}", repo.path().display());

        let head = repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .map_err(CommitError::NoHead)?;

        let start = Instant::now();
        let mut revwalk = repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;
        revwalk.push(head.id())?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = repo.find_commit(oid?)?;
            commits.push(commit_from_git(&commit)?);
        }

        tracing::debug!("Walked {} commits in {:?}", commits.len(), start.elapsed());
        Ok(commits)
    }
}
