//! Error kinds raised by the amalgamation pipeline
//!
//! I/O failures travel as plain `anyhow` errors with path context. The
//! variants here are the failures callers may want to tell apart, and can be
//! recovered with `anyhow::Error::downcast_ref`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmalgamateError {
    /// Malformed invocation, raised before any file is touched.
    #[error("usage error: {0}")]
    Usage(String),

    /// The include graph has no valid linear order.
    #[error("cyclic include detected: {}", format_edges(.edges))]
    CycleDetected {
        /// Every (provider, dependent) edge the computed order violates.
        edges: Vec<(String, String)>,
    },

    /// A quoted include names a file that was not collected.
    #[error("'{included_by}' includes '{reference}', which is not part of the merge")]
    MissingFile {
        reference: String,
        included_by: String,
    },
}

fn format_edges(edges: &[(String, String)]) -> String {
    edges
        .iter()
        .map(|(provider, dependent)| format!("{provider} -> {dependent}"))
        .collect::<Vec<_>>()
        .join(", ")
}
