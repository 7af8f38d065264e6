//! REST resource services.
//!
//! Each method maps one typed request to exactly one transport call and
//! surfaces failures unchanged; nothing here retries.

mod billing;
mod contracts;
mod houses;
mod rooms;
mod scheduler;
mod telegram;
mod tenants;

use rentbook_api_types::{Deleted, Paginated, Total, Update};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::application::filter::Filter;
use crate::infra::transport::{ApiError, Transport};

pub use billing::BillingService;
pub use contracts::ContractService;
pub use houses::HouseService;
pub use rooms::RoomService;
pub use scheduler::SchedulerService;
pub use telegram::TelegramService;
pub use tenants::TenantService;

/// `base/id`, rejecting a blank id before anything goes on the wire.
pub(crate) fn record_path(base: &str, id: &str) -> Result<String, ApiError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::precondition(format!(
            "{base}: a record id is required"
        )));
    }
    Ok(format!("{base}/{id}"))
}

/// Shared plumbing for one REST resource rooted at `base`.
#[derive(Debug, Clone)]
pub(crate) struct Endpoint {
    transport: Transport,
    base: &'static str,
}

impl Endpoint {
    pub(crate) fn new(transport: Transport, base: &'static str) -> Self {
        Self { transport, base }
    }

    pub(crate) fn transport(&self) -> &Transport {
        &self.transport
    }

    pub(crate) async fn page<T, F>(&self, path: &str, filter: &F) -> Result<Paginated<T>, ApiError>
    where
        T: DeserializeOwned,
        F: Filter,
    {
        let page: Paginated<T> = self.transport.get(path, Some(filter)).await?;
        page.validate()
            .map_err(|err| ApiError::decode(format!("{path}: {err}")))
    }

    pub(crate) async fn list<T, F>(&self, filter: &F) -> Result<Paginated<T>, ApiError>
    where
        T: DeserializeOwned,
        F: Filter,
    {
        self.page(self.base, filter).await
    }

    /// Counts never depend on the page shown, so pagination is not sent.
    pub(crate) async fn total<F: Filter>(&self, path: &str, filter: &F) -> Result<Total, ApiError> {
        self.transport
            .get(path, Some(&filter.without_pagination()))
            .await
    }

    pub(crate) async fn detail<T: DeserializeOwned>(&self, id: &str) -> Result<T, ApiError> {
        let path = record_path(self.base, id)?;
        self.transport.get(&path, None::<&()>).await
    }

    pub(crate) async fn create<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        self.transport.post(path, body).await
    }

    /// PATCH `base/id` with the patch alone as body.
    pub(crate) async fn update<T, P>(&self, update: Update<P>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        P: Serialize,
    {
        let (id, patch) = update.into_parts();
        let path = record_path(self.base, &id)?;
        self.transport.patch(&path, Some(&patch)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, id: &str) -> Result<Deleted<T>, ApiError> {
        let path = record_path(self.base, id)?;
        self.transport.delete(&path).await
    }
}
