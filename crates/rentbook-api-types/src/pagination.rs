use std::fmt;

use serde::{Deserialize, Serialize};

/// One page of a list endpoint together with the size of the whole result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// Returned by `Paginated::validate` when a page claims more items than the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationError {
    pub items: usize,
    pub total: u64,
}

impl fmt::Display for PaginationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "page holds {} items but reports a total of {}",
            self.items, self.total
        )
    }
}

impl std::error::Error for PaginationError {}

impl<T> Paginated<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    /// Checks `items.len() <= total`.
    pub fn validate(self) -> Result<Self, PaginationError> {
        let items = self.items.len();
        if u64::try_from(items).map_or(true, |len| len > self.total) {
            return Err(PaginationError {
                items,
                total: self.total,
            });
        }
        Ok(self)
    }
}

/// Response of the dedicated count endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Total {
    pub total: u64,
}
