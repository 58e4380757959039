pub mod history;
pub mod repository;

pub use history::{InRepository, in_repository};
pub use repository::{FileSystem, RepositoryProvider};
