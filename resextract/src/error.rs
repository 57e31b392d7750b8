//! All error types for the resextract crate.
//!
//! [`Error`] is returned from every fallible pipeline operation. Some variants
//! are fatal for a run (configuration, input root, write) while others only
//! cost the run a single locale (see [`Error::is_recoverable`]).

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("cannot read input root `{}`: {source}", path.display())]
    InputRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot list locale directory `{locale}`: {source}")]
    LocaleList {
        locale: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse `{}`: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("cannot write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Creates a new configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }

    /// Whether the error was caused by the supplied configuration rather than
    /// the environment.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }

    /// Whether the run can continue with the remaining locales.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::LocaleList { .. } | Error::Parse { .. })
    }
}

/// Failure to turn one resource file into entries.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed document: {0}")]
    Malformed(String),
}

impl ParseError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        ParseError::Malformed(message.into())
    }
}
