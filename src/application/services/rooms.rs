use rentbook_api_types::{Deleted, Paginated, Room, RoomCreate, RoomFilter, RoomPatch, Update};

use crate::infra::transport::{ApiError, Transport};

use super::Endpoint;

const BASE: &str = "rooms";
const CREATE: &str = "rooms/create";

#[derive(Debug, Clone)]
pub struct RoomService {
    endpoint: Endpoint,
}

impl RoomService {
    pub fn new(transport: Transport) -> Self {
        Self {
            endpoint: Endpoint::new(transport, BASE),
        }
    }

    pub async fn list(&self, filter: &RoomFilter) -> Result<Paginated<Room>, ApiError> {
        self.endpoint.list(filter).await
    }

    pub async fn get(&self, id: &str) -> Result<Room, ApiError> {
        self.endpoint.detail(id).await
    }

    pub async fn create(&self, input: &RoomCreate) -> Result<Room, ApiError> {
        self.endpoint.create(CREATE, input).await
    }

    pub async fn update(&self, update: Update<RoomPatch>) -> Result<Room, ApiError> {
        self.endpoint.update(update).await
    }

    pub async fn delete(&self, id: &str) -> Result<Deleted<Room>, ApiError> {
        self.endpoint.delete(id).await
    }
}
