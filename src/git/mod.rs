pub mod repo;

pub use repo::{GitRepo, UNKNOWN_BRANCH};
