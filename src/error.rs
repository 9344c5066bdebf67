// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// Errors produced while configuring, discovering, or loading language
/// packages. Resolution misses are deliberately absent: `I18n::resolve`
/// degrades to the caller's default text instead of failing.
#[derive(Debug, Clone)]
pub enum Error {
    /// The discovery pattern is empty or not a valid glob.
    Config(String),

    /// Filesystem (or custom discoverer) enumeration failed as a whole.
    Discovery(String),

    /// Discovery finished without a single usable package.
    NoLanguages,

    /// A package file could not be read, or its first line carries no
    /// parsable identity label.
    InvalidPackage(String),

    /// The catalog decoder rejected a package body.
    Load { language: String, reason: String },

    /// The requested tag is not in the set of discovered languages.
    UnknownLanguage(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Discovery(e) => write!(f, "Discovery error: {}", e),
            Error::NoLanguages => write!(f, "No language packages found"),
            Error::InvalidPackage(e) => write!(f, "Invalid package: {}", e),
            Error::Load { language, reason } => {
                write!(f, "Failed to load language {}: {}", language, reason)
            }
            Error::UnknownLanguage(tag) => write!(f, "Unknown language: {}", tag),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::InvalidPackage(err.to_string())
    }
}

impl From<glob::PatternError> for Error {
    fn from(err: glob::PatternError) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
