//! Error types for reference loading and URL construction.

use std::path::PathBuf;

/// Failure while reading one of the reference tables.
///
/// Every variant names the table file so a degraded load can be diagnosed
/// from the log line alone.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A header column the loader needs is not present.
    #[error("column '{column}' not found in {}", path.display())]
    MissingColumn { path: PathBuf, column: String },
}

/// The configured map service root cannot be used to build URLs.
#[derive(Debug, thiserror::Error)]
pub enum UrlError {
    #[error("invalid base url '{url}': {source}")]
    Parse {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("base url '{0}' cannot carry path segments")]
    NotABase(String),
}
