use thiserror::Error;

/// Errors shared by every codepad crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommonError {
    #[error("Unknown fragment: {0}")]
    UnknownFragment(String),
}
