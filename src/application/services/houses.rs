use rentbook_api_types::{Deleted, House, HouseCreate, HouseFilter, HousePatch, Paginated, Update};

use crate::infra::transport::{ApiError, Transport};

use super::Endpoint;

const BASE: &str = "houses";
const CREATE: &str = "houses/create";

#[derive(Debug, Clone)]
pub struct HouseService {
    endpoint: Endpoint,
}

impl HouseService {
    pub fn new(transport: Transport) -> Self {
        Self {
            endpoint: Endpoint::new(transport, BASE),
        }
    }

    pub async fn list(&self, filter: &HouseFilter) -> Result<Paginated<House>, ApiError> {
        self.endpoint.list(filter).await
    }

    pub async fn get(&self, id: &str) -> Result<House, ApiError> {
        self.endpoint.detail(id).await
    }

    pub async fn create(&self, input: &HouseCreate) -> Result<House, ApiError> {
        self.endpoint.create(CREATE, input).await
    }

    pub async fn update(&self, update: Update<HousePatch>) -> Result<House, ApiError> {
        self.endpoint.update(update).await
    }

    pub async fn delete(&self, id: &str) -> Result<Deleted<House>, ApiError> {
        self.endpoint.delete(id).await
    }
}
