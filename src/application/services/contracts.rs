use rentbook_api_types::{
    Contract, ContractCreate, ContractFilter, ContractPatch, Deleted, Paginated, Update,
};

use crate::infra::transport::{ApiError, Transport};

use super::Endpoint;

const BASE: &str = "contracts";
const CREATE: &str = "contracts/create";

#[derive(Debug, Clone)]
pub struct ContractService {
    endpoint: Endpoint,
}

impl ContractService {
    pub fn new(transport: Transport) -> Self {
        Self {
            endpoint: Endpoint::new(transport, BASE),
        }
    }

    pub async fn list(&self, filter: &ContractFilter) -> Result<Paginated<Contract>, ApiError> {
        self.endpoint.list(filter).await
    }

    pub async fn get(&self, id: &str) -> Result<Contract, ApiError> {
        self.endpoint.detail(id).await
    }

    pub async fn create(&self, input: &ContractCreate) -> Result<Contract, ApiError> {
        self.endpoint.create(CREATE, input).await
    }

    pub async fn update(&self, update: Update<ContractPatch>) -> Result<Contract, ApiError> {
        self.endpoint.update(update).await
    }

    pub async fn delete(&self, id: &str) -> Result<Deleted<Contract>, ApiError> {
        self.endpoint.delete(id).await
    }
}
