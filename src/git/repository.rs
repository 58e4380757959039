use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use git2::Repository;
use std::path::{Path, PathBuf};

use crate::error::{CommitError, Result};
use crate::models::{Author, Commit};

/// Hands out a repository handle each time history is read.
pub trait RepositoryProvider {
    fn open(&self) -> Result<Repository>;
}

impl<F> RepositoryProvider for F
where
    F: Fn() -> Result<Repository>,
{
    fn open(&self) -> Result<Repository> {
        self()
    }
}

/// Opens the repository at a fixed directory. Parent directories are not
/// searched.
#[derive(Debug, Clone)]
pub struct FileSystem {
    path: PathBuf,
}

impl FileSystem {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl RepositoryProvider for FileSystem {
    fn open(&self) -> Result<Repository> {
        Repository::open(&self.path).map_err(|source| CommitError::RepositoryOpen {
            path: self.path.to_string_lossy().to_string(),
            source,
        })
    }
}

pub fn commit_from_git(commit: &git2::Commit) -> Result<Commit> {
    let author = commit.author();
    Ok(Commit {
        hash: commit.id().to_string(),
        message: String::from_utf8_lossy(commit.message_bytes()).to_string(),
        date: signature_time(&author.when())?,
        num_parents: commit.parent_count(),
        author: Some(Author {
            name: String::from_utf8_lossy(author.name_bytes()).to_string(),
            email: String::from_utf8_lossy(author.email_bytes()).to_string(),
        }),
    })
}

/// Converts a git timestamp, keeping the author's recorded offset.
///
/// An offset chrono cannot represent falls back to UTC. A timestamp outside
/// chrono's range is a walk error rather than a clamped date.
pub fn signature_time(time: &git2::Time) -> Result<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60).unwrap_or_else(|| Utc.fix());
    let utc = Utc.timestamp_opt(time.seconds(), 0).single().ok_or_else(|| {
        CommitError::LogTraversal(git2::Error::from_str(&format!(
            "timestamp {} is out of range",
            time.seconds()
        )))
    })?;
    Ok(utc.with_timezone(&offset))
}
