//! Commit records handed to the validation stage.
//!
//! - `commit`: Commit, Author and the derived message accessors

pub mod commit;

pub use commit::*;
