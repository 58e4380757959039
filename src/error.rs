//! Error types for commit sources.
//!
//! Every producer returns `Result<_, CommitError>`. Filters forward the
//! wrapped producer's error untouched, so the variant a caller sees always
//! names the step that actually failed:
//! - `RepositoryOpen`: the provider could not hand out a repository
//! - `NoHead`: HEAD does not resolve (unborn branch, empty repository)
//! - `LogTraversal`: the history walk itself failed
//! - `DateFormat`, `InvalidPattern`: filter arguments rejected at invocation
//! - `StreamRead`: the synthetic source could not read its input
//! - `ShortHash`: a short id was requested for a hash under 7 characters

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Failed to open repository at {path}: {source}")]
    RepositoryOpen {
        path: String,
        #[source]
        source: git2::Error,
    },

    #[error("Repository has no HEAD: {0}")]
    NoHead(#[source] git2::Error),

    #[error("Failed to walk history: {0}")]
    LogTraversal(#[from] git2::Error),

    #[error("Invalid date {input:?}, expected YYYY-MM-DD")]
    DateFormat {
        input: String,
        #[source]
        source: Option<chrono::ParseError>,
    },

    #[error("Invalid author pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to read commit message: {0}")]
    StreamRead(#[from] std::io::Error),

    #[error("Hash {hash:?} is shorter than {len} characters")]
    ShortHash { hash: String, len: usize },
}

pub type Result<T> = std::result::Result<T, CommitError>;
