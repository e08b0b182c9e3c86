//! Pagination utilities for service layer
//!
//! Provides a simple `Pagination` struct and helpers to normalize inputs.

/// Pagination parameters
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub limit: u32,
}

impl Pagination {
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 100;

    /// Build from optional query values, falling back to page 1 / limit 10.
    pub fn from_query(page: Option<u32>, limit: Option<u32>) -> Self {
        Self { page: page.unwrap_or(1), limit: limit.unwrap_or(Self::DEFAULT_LIMIT) }
    }

    /// Clamp to sane bounds and convert to an `(offset, limit)` pair.
    pub fn normalize(self) -> (u64, u64) {
        let page = self.page.max(1) as u64;
        let limit = self.limit.clamp(1, Self::MAX_LIMIT) as u64;
        ((page - 1) * limit, limit)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, limit: Self::DEFAULT_LIMIT } }
}
