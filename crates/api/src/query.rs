//! Shared query parameter types for API handlers.

use serde::Deserialize;
use vitrine_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use vitrine_core::types::DbId;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Clamped `(limit, offset)` ready to bind into a query.
    pub fn resolve(&self) -> (i64, i64) {
        (
            clamp_limit(self.limit, DEFAULT_LIMIT, MAX_LIMIT),
            clamp_offset(self.offset),
        )
    }
}

/// Query parameters for `GET /admin/posts`.
#[derive(Debug, Deserialize)]
pub struct PostListParams {
    pub author_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PostListParams {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            limit: self.limit,
            offset: self.offset,
        }
    }
}
