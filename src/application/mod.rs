pub mod auth;
pub mod context;
pub mod filter;
pub mod i18n;
pub mod mutation;
pub mod notify;
pub mod profile;
pub mod queries;
pub mod services;

pub use context::{AppContext, AppContextBuilder, ContextError, CookieSettings};
pub use filter::Filter;
pub use mutation::{MessageKey, Mutation};
pub use notify::{MemoryNotifier, Notification, Notifier, TracingNotifier};
pub use profile::ProfileStore;
