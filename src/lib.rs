//! Commit sources for message validation.
//!
//! Collects a repository's history lazily and narrows it through composable
//! filters before the commits reach a message checker.
//!
//! - `models`: Commit and Author records
//! - `git`: repository providers and the base history source
//! - `source`: the `CommitSource` trait, filter combinators, synthetic source
//! - `config`: declarative filter options
//! - `error`: `CommitError` and the crate `Result` alias

pub mod config;
pub mod error;
pub mod git;
pub mod models;
pub mod source;

pub use config::PipelineConfig;
pub use error::{CommitError, Result};
pub use models::{Author, Commit, SHORT_ID_LEN};
pub use source::CommitSource;
