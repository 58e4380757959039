use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{CommitError, Result};

/// Number of leading hash characters that make up a short id.
pub const SHORT_ID_LEN: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub email: String,
}

/// One revision as seen by the validation stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub hash: String,
    pub message: String,
    pub date: DateTime<FixedOffset>,
    pub num_parents: usize,
    /// `None` for synthetic commits.
    pub author: Option<Author>,
}

impl Commit {
    pub fn id(&self) -> &str {
        &self.hash
    }

    /// First [`SHORT_ID_LEN`] characters of the hash.
    ///
    /// Fails with [`CommitError::ShortHash`] instead of truncating when the
    /// hash has fewer than [`SHORT_ID_LEN`] characters.
    pub fn short_id(&self) -> Result<&str> {
        self.hash
            .get(..SHORT_ID_LEN)
            .ok_or_else(|| CommitError::ShortHash {
                hash: self.hash.clone(),
                len: SHORT_ID_LEN,
            })
    }

    /// Text before the first line break.
    pub fn subject(&self) -> &str {
        self.message.split('\n').next().unwrap_or("")
    }

    /// Everything after the first blank line, paragraph breaks included.
    pub fn body(&self) -> &str {
        self.message
            .split_once("\n\n")
            .map(|(_, body)| body)
            .unwrap_or("")
    }

    pub fn is_merge(&self) -> bool {
        self.num_parents > 1
    }
}
