// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dataset loading errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a dataset load attempt.
///
/// Individual malformed rows never surface here; they are dropped during
/// aggregation.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The resource could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV text could not be decoded.
    #[error("failed to parse {resource}: {source}")]
    Csv {
        resource: &'static str,
        #[source]
        source: csv::Error,
    },

    /// A column the loader cannot work without is absent from the header.
    #[error("{resource} is missing required column '{column}'")]
    MissingColumn {
        resource: &'static str,
        column: &'static str,
    },

    /// The background load task died before reporting a result.
    #[error("dataset load task aborted: {reason}")]
    Aborted { reason: String },
}
