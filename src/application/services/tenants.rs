use rentbook_api_types::{
    Deleted, Paginated, Tenant, TenantCreate, TenantFilter, TenantPatch, Total, Update,
};

use crate::infra::transport::{ApiError, Transport};

use super::{Endpoint, record_path};

const BASE: &str = "tenant";
const CREATE: &str = "tenant/create";
const TOTAL: &str = "tenant/total";

#[derive(Debug, Clone)]
pub struct TenantService {
    endpoint: Endpoint,
}

impl TenantService {
    pub fn new(transport: Transport) -> Self {
        Self {
            endpoint: Endpoint::new(transport, BASE),
        }
    }

    pub async fn list(&self, filter: &TenantFilter) -> Result<Paginated<Tenant>, ApiError> {
        self.endpoint.list(filter).await
    }

    pub async fn total(&self, filter: &TenantFilter) -> Result<Total, ApiError> {
        self.endpoint.total(TOTAL, filter).await
    }

    pub async fn get(&self, id: &str) -> Result<Tenant, ApiError> {
        self.endpoint.detail(id).await
    }

    pub async fn create(&self, input: &TenantCreate) -> Result<Tenant, ApiError> {
        self.endpoint.create(CREATE, input).await
    }

    pub async fn update(&self, update: Update<TenantPatch>) -> Result<Tenant, ApiError> {
        self.endpoint.update(update).await
    }

    /// Flip a tenant between active and moved out.
    pub async fn toggle_status(&self, id: &str) -> Result<Tenant, ApiError> {
        let path = format!("{}/toggle-status", record_path(BASE, id)?);
        self.endpoint.transport().patch(&path, None::<&()>).await
    }

    pub async fn delete(&self, id: &str) -> Result<Deleted<Tenant>, ApiError> {
        self.endpoint.delete(id).await
    }
}
