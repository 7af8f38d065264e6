use rentbook_api_types::{
    Bill, Deleted, Paginated, Scheduler, SchedulerBillFilter, SchedulerCreate, SchedulerFilter,
    SchedulerPatch, Total, Update,
};

use crate::application::filter::Filter;
use crate::infra::transport::{ApiError, Transport};

use super::Endpoint;

const BASE: &str = "scheduler";
const BILLS: &str = "scheduler/bill";
const TOTAL: &str = "scheduler/total";

/// Recurring billing schedules and the bills they generated.
#[derive(Debug, Clone)]
pub struct SchedulerService {
    endpoint: Endpoint,
}

impl SchedulerService {
    pub fn new(transport: Transport) -> Self {
        Self {
            endpoint: Endpoint::new(transport, BASE),
        }
    }

    pub async fn list(&self, filter: &SchedulerFilter) -> Result<Paginated<Scheduler>, ApiError> {
        self.endpoint.list(filter).await
    }

    pub async fn total(&self, filter: &SchedulerFilter) -> Result<Total, ApiError> {
        self.endpoint.total(TOTAL, filter).await
    }

    /// Bills generated by one scheduler. The filter must name it.
    pub async fn bills(&self, filter: &SchedulerBillFilter) -> Result<Paginated<Bill>, ApiError> {
        if !filter.can_fetch() {
            return Err(ApiError::precondition(format!(
                "{BILLS}: a scheduler id is required"
            )));
        }
        self.endpoint.page(BILLS, filter).await
    }

    pub async fn get(&self, id: &str) -> Result<Scheduler, ApiError> {
        self.endpoint.detail(id).await
    }

    /// Schedulers are created by POSTing to the collection itself.
    pub async fn create(&self, input: &SchedulerCreate) -> Result<Scheduler, ApiError> {
        self.endpoint.create(BASE, input).await
    }

    pub async fn update(&self, update: Update<SchedulerPatch>) -> Result<Scheduler, ApiError> {
        self.endpoint.update(update).await
    }

    pub async fn delete(&self, id: &str) -> Result<Deleted<Scheduler>, ApiError> {
        self.endpoint.delete(id).await
    }
}
