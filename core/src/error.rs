//! Error types surfaced at the crate boundary.
//!
//! Parse failures stay inside the builder (logged, file skipped); only
//! startup problems and caller errors reach external collaborators.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexiconError {
    /// No trie artifact exists on any of the configured search paths.
    /// Fatal at engine construction.
    #[error("trie artifact not found; searched {searched:?} (run the build_lexicon tool first)")]
    ArtifactMissing { searched: Vec<PathBuf> },

    /// A source dump could not be parsed. The builder logs this and moves
    /// on to the next file.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// `beam_width` or `max_candidates` outside their documented ranges.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// jsonl serialization failure while emitting the lexicon dump.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Trie artifact could not be encoded or decoded.
    #[error("trie artifact codec error: {0}")]
    Artifact(#[from] bincode::Error),
}
