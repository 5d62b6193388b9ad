use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A backing store (order records, media objects) did not respond.
    #[error("Store unavailable: {store}: {message}")]
    StoreUnavailable {
        store: &'static str,
        message: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}
