//! Error types for dictionary building and stream substitution.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A key or value is empty or contains something other than `[a-zA-Z0-9]`.
    #[error("invalid {param} {value:?}: must be one or more ASCII alphanumeric characters")]
    InvalidArgument { param: &'static str, value: String },

    /// A stream handle was not supplied.
    #[error("{param} must not be null")]
    NullArgument { param: &'static str },

    #[error("key {key:?} is already in the translation map")]
    DuplicateKey { key: String },

    /// Errors from the underlying reader or writer, passed through as-is.
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_argument<S: Into<String>>(param: &'static str, value: S) -> Self {
        Error::InvalidArgument {
            param,
            value: value.into(),
        }
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }
}
