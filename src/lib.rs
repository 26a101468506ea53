//! Digest of recent commit activity across a set of git repositories.
//!
//! Repositories are resolved from an explicit list, a root directory or the
//! current directory, scanned one after another, and rendered as plain
//! terminal text, lite markup for chat tools, or JSON.

pub mod aggregate;
pub mod capability;
pub mod cli;
pub mod config;
pub mod digest;
pub mod error;
pub mod git;
pub mod model;
pub mod notify;
pub mod render;
pub mod resolve;
pub mod util;
