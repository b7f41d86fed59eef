//! Shared pagination query parameters.

use serde::Deserialize;
use validator::Validate;

pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Offset-based pagination, bounded to keep result sets predictable.
#[derive(Debug, Deserialize, Validate)]
pub struct Pagination {
    #[serde(default)]
    #[validate(range(min = 0))]
    pub skip: i64,

    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: i64,
}

pub(crate) fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}
