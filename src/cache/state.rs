use std::fmt;
use std::sync::Arc;

use time::OffsetDateTime;

use crate::infra::transport::ApiError;

/// Lifecycle of a cached query: `Idle -> Loading -> {Success, Error}`, and
/// back to `Loading` on every refetch. An entry never returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryStatus {
    Idle,
    Loading,
    Success,
    Error,
}

impl fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// What a subscriber sees for its current key.
#[derive(Debug)]
pub struct QueryState<T> {
    pub status: QueryStatus,
    pub data: Option<Arc<T>>,
    pub error: Option<ApiError>,
    pub last_fetched_at: Option<OffsetDateTime>,
    /// The entry was invalidated and a refetch is due.
    pub is_stale: bool,
    /// `data` belongs to the key this subscription showed before its
    /// current one; it stands in while the current key loads.
    pub is_placeholder: bool,
}

impl<T> QueryState<T> {
    pub fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            last_fetched_at: None,
            is_stale: false,
            is_placeholder: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading
    }

    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Error
    }
}

impl<T> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        Self {
            status: self.status,
            data: self.data.clone(),
            error: self.error.clone(),
            last_fetched_at: self.last_fetched_at,
            is_stale: self.is_stale,
            is_placeholder: self.is_placeholder,
        }
    }
}
