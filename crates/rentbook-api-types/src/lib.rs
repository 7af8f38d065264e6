//! Request and response shapes shared by the rentbook client crates.
//!
//! Field names follow the API's camelCase JSON. Record identifiers are
//! accepted as either `id` or `_id`.

mod auth;
mod billing;
mod common;
mod contracts;
mod houses;
mod pagination;
mod rooms;
mod scheduler;
mod tenants;

pub use auth::{Profile, TelegramAuthRequest, TelegramAuthResponse, TelegramLoginCode};
pub use billing::{Bill, BillCreate, BillFilter, BillStatus};
pub use common::{Deleted, Update};
pub use contracts::{Contract, ContractCreate, ContractFilter, ContractPatch, ContractStatus};
pub use houses::{House, HouseCreate, HouseFilter, HousePatch};
pub use pagination::{PaginationError, Paginated, Total};
pub use rooms::{Room, RoomCreate, RoomFilter, RoomPatch, RoomStatus};
pub use scheduler::{Scheduler, SchedulerBillFilter, SchedulerCreate, SchedulerFilter, SchedulerPatch};
pub use tenants::{Tenant, TenantCreate, TenantFilter, TenantPatch};
