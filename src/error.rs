//! Error types for this crate.
use thiserror::Error;

/// Any kind of error that can happen when normalizing a single record. These never stop a run,
/// they are turned into diagnostics by the stage which encountered them.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Error)]
pub enum ParseError {
    #[error("unknown currency code '{0}'")]
    UnknownCurrency(String),
    #[error("invalid price '{0}'")]
    InvalidPrice(String),
    #[error("invalid quantity '{0}'")]
    InvalidQuantity(String),
    #[error("unknown title code '{0}'")]
    UnknownTitle(String),
}

/// Failure to load a whole dataset from disk.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("could not open '{path}': {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("could not read CSV from '{path}': {source}")]
    Csv {
        path: std::path::PathBuf,
        source: csv::Error,
    },
}

/// Invalid configuration found in the environment.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {name}, expected a positive number of seconds")]
    InvalidTimeout { name: &'static str, value: String },
}
