use rentbook_api_types::{Bill, BillCreate, BillFilter, Paginated, Total};

use crate::infra::transport::{ApiError, Transport};

use super::Endpoint;

const BASE: &str = "billing";
const CREATE: &str = "billing/create";
const TOTAL: &str = "billing/paging";

#[derive(Debug, Clone)]
pub struct BillingService {
    endpoint: Endpoint,
}

impl BillingService {
    pub fn new(transport: Transport) -> Self {
        Self {
            endpoint: Endpoint::new(transport, BASE),
        }
    }

    pub async fn list(&self, filter: &BillFilter) -> Result<Paginated<Bill>, ApiError> {
        self.endpoint.list(filter).await
    }

    pub async fn total(&self, filter: &BillFilter) -> Result<Total, ApiError> {
        self.endpoint.total(TOTAL, filter).await
    }

    pub async fn create(&self, input: &BillCreate) -> Result<Bill, ApiError> {
        self.endpoint.create(CREATE, input).await
    }
}
