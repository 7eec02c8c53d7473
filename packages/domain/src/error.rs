//! Unified error for one render request.
use thiserror::Error;

/// Top-level error covering script compilation, synthesis, and persistence.
///
/// Every variant is terminal for the current request: the orchestrator
/// surfaces it as a single error event and ends the stream. No retry, no
/// partial recovery, no partial master file.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// Empty script, malformed character table, or a missing clone reference.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The compiler produced zero usable segments.
    #[error("no segments compiled from script")]
    NoSegments,
    /// The external synthesis collaborator failed.
    #[error("synthesis: {0}")]
    Synthesis(String),
    /// Writing the master track to storage failed.
    #[error("persistence: {0}")]
    Persistence(String),
}
