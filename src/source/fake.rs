//! Synthetic source for validating a message that is not committed yet.

use chrono::Utc;
use std::io::Read;
use std::sync::Mutex;

use crate::error::Result;
use crate::models::Commit;
use crate::source::CommitSource;

/// Hash given to synthetic commits. Exactly [`SHORT_ID_LEN`] characters, so
/// its short id is the whole sentinel.
///
/// [`SHORT_ID_LEN`]: crate::models::SHORT_ID_LEN
pub const FAKE_HASH: &str = "fakesha";

/// Produces one commit whose message is everything read from `reader`.
///
/// The stream is drained on each invocation, so a second call on a
/// consumed stream yields a commit with an empty message. The binary
/// invokes its stdin source once, so this never shows up there.
pub struct FakeCommit<R> {
    reader: Mutex<R>,
}

pub fn fake_commit<R: Read>(reader: R) -> FakeCommit<R> {
    FakeCommit {
        reader: Mutex::new(reader),
    }
}

impl<R: Read> CommitSource for FakeCommit<R> {
    fn commits(&self) -> Result<Vec<Commit>> {
        let mut bytes = Vec::new();
        {
            let mut reader = self
                .reader
                .lock()
                .map_err(|_| std::io::Error::other("Lock poisoned"))?;
            reader.read_to_end(&mut bytes)?;
        }

        Ok(vec![Commit {
            hash: FAKE_HASH.to_string(),
            message: String::from_utf8_lossy(&bytes).to_string(),
            date: Utc::now().fixed_offset(),
            num_parents: 0,
            author: None,
        }])
    }
}
