use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A search that is expected to match something came back empty.
    #[error("No results: {0}")]
    NoResults(String),

    /// Input rejected before any query runs: a blank search term, or a
    /// record that breaks a column limit.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
