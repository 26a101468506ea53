use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DigestError>;

#[derive(Error, Debug)]
pub enum DigestError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Required tool '{0}' was not found on PATH")]
    MissingTool(String),
    #[error("Path does not exist or is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("Notification error: {0}")]
    Notify(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Git discover error: {0}")]
    GitDiscover(#[from] Box<gix::discover::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
}

// gix errors are large; keep the enum small by boxing them on the way in
impl From<gix::discover::Error> for DigestError {
    fn from(err: gix::discover::Error) -> Self {
        DigestError::GitDiscover(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for DigestError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        DigestError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for DigestError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        DigestError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for DigestError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        DigestError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for DigestError {
    fn from(err: gix::object::commit::Error) -> Self {
        DigestError::Commit(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for DigestError {
    fn from(err: gix::objs::decode::Error) -> Self {
        DigestError::ObjectDecode(Box::new(err))
    }
}
