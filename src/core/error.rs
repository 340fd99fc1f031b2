use thiserror::Error;

/// Errors the matching engine can return
///
/// Missing or odd candidate fields are never errors; they score 0 for the
/// affected dimension.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Invalid candidate batch: {0}")]
    InvalidCandidateBatch(String),

    #[error("Malformed query: {0}")]
    MalformedQuery(String),
}
