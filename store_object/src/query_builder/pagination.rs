//! LIMIT clause forms.
//!
//! MySQL takes `LIMIT offset, count` for reads; UPDATE only accepts a row count.

/// Pagination configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// `LIMIT offset, limit`
    Page { limit: u64, offset: u64 },
    /// `LIMIT limit`
    RowCount(u64),
}

impl Pagination {
    pub fn page(limit: u64, offset: u64) -> Self {
        Self::Page { limit, offset }
    }

    pub fn row_count(limit: u64) -> Self {
        Self::RowCount(limit)
    }

    pub fn to_sql(&self) -> String {
        match self {
            Pagination::Page { limit, offset } => format!("LIMIT {}, {}", offset, limit),
            Pagination::RowCount(limit) => format!("LIMIT {}", limit),
        }
    }
}
