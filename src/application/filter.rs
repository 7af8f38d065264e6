//! Typed list filters and their fetch preconditions.

use rentbook_api_types::{
    BillFilter, ContractFilter, HouseFilter, RoomFilter, SchedulerBillFilter, SchedulerFilter,
    TenantFilter,
};
use serde::Serialize;

/// A list filter. Every field is optional; `page` and `page_size` select
/// the page and play no part in counts.
pub trait Filter: Serialize + Clone + Send + Sync + 'static {
    /// Whether every field the endpoint requires is present. A filter that
    /// cannot fetch is a normal state, not an error.
    fn can_fetch(&self) -> bool {
        true
    }

    /// The same filter with the pagination fields cleared.
    #[must_use]
    fn without_pagination(&self) -> Self;
}

fn present(value: Option<&str>) -> bool {
    value.is_some_and(|value| !value.trim().is_empty())
}

macro_rules! paged_filter {
    ($($filter:ty),+ $(,)?) => {
        $(
            impl Filter for $filter {
                fn without_pagination(&self) -> Self {
                    Self {
                        page: None,
                        page_size: None,
                        ..self.clone()
                    }
                }
            }
        )+
    };
}

paged_filter!(HouseFilter, RoomFilter, SchedulerFilter, BillFilter, ContractFilter);

/// Tenants are listed per room.
impl Filter for TenantFilter {
    fn can_fetch(&self) -> bool {
        present(self.room.as_deref())
    }

    fn without_pagination(&self) -> Self {
        Self {
            page: None,
            page_size: None,
            ..self.clone()
        }
    }
}

/// Generated bills are listed per scheduler.
impl Filter for SchedulerBillFilter {
    fn can_fetch(&self) -> bool {
        present(self.scheduler.as_deref())
    }

    fn without_pagination(&self) -> Self {
        Self {
            page: None,
            page_size: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenant_filter_requires_a_room() {
        assert!(!TenantFilter::default().can_fetch());
        let blank = TenantFilter {
            room: Some("  ".into()),
            ..Default::default()
        };
        assert!(!blank.can_fetch());
        let scoped = TenantFilter {
            room: Some("r1".into()),
            ..Default::default()
        };
        assert!(scoped.can_fetch());
    }

    #[test]
    fn scheduler_bills_require_a_scheduler() {
        assert!(!SchedulerBillFilter::default().can_fetch());
        let scoped = SchedulerBillFilter {
            scheduler: Some("s1".into()),
            page: Some(2),
            page_size: None,
        };
        assert!(scoped.can_fetch());
    }

    #[test]
    fn without_pagination_keeps_other_fields() {
        let filter = RoomFilter {
            house: Some("h1".into()),
            page: Some(3),
            page_size: Some(20),
            ..Default::default()
        };
        let stripped = filter.without_pagination();
        assert_eq!(stripped.house.as_deref(), Some("h1"));
        assert_eq!(stripped.page, None);
        assert_eq!(stripped.page_size, None);
        assert!(HouseFilter::default().can_fetch());
    }
}
