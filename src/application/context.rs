//! The process-scoped bundle every data-access call goes through.

use std::num::NonZeroU64;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::application::i18n::{Localizer, MessageCatalog};
use crate::application::notify::{Notifier, TracingNotifier};
use crate::application::profile::ProfileStore;
use crate::application::services::{
    BillingService, ContractService, HouseService, RoomService, SchedulerService,
    TelegramService, TenantService,
};
use crate::cache::{CacheConfig, QueryCache};
use crate::config::Settings;
use crate::infra::error::InfraError;
use crate::infra::session::{FileSessionStore, MemorySessionStore, SessionStore};
use crate::infra::transport::{ApiError, Transport};

const DEFAULT_COOKIE_NAME: &str = "rentbook_session";
const DEFAULT_MAX_AGE_SECS: u64 = 7 * 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum ContextError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Infra(#[from] InfraError),
}

/// Name and lifetime of the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieSettings {
    pub name: String,
    pub max_age_seconds: u64,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_COOKIE_NAME.to_string(),
            max_age_seconds: DEFAULT_MAX_AGE_SECS,
        }
    }
}

impl CookieSettings {
    /// Cookie holding the serialized profile next to the token.
    pub fn profile_name(&self) -> String {
        format!("{}_profile", self.name)
    }
}

struct Inner {
    transport: Transport,
    cache: QueryCache,
    profile: ProfileStore,
    session: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
    localizer: Arc<dyn Localizer>,
    cookie: CookieSettings,
}

/// Transport, cache, profile, session storage, notifier and localizer.
/// Clones share all of them.
#[derive(Clone)]
pub struct AppContext {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("transport", &self.inner.transport)
            .field("cache", &self.inner.cache)
            .field("cookie", &self.inner.cookie)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    pub fn builder(transport: Transport) -> AppContextBuilder {
        AppContextBuilder {
            transport,
            cache: None,
            session: None,
            notifier: None,
            localizer: None,
            cookie: CookieSettings::default(),
        }
    }

    /// Wire a context from loaded settings. The notifier is left to the
    /// caller because only the front end knows how to show messages.
    pub async fn from_settings(
        settings: &Settings,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ContextError> {
        let transport = Transport::new(settings.api.base_url.as_str(), settings.api.timeout)?;
        let session: Arc<dyn SessionStore> = match &settings.session.store_path {
            Some(path) => Arc::new(FileSessionStore::new(path)),
            None => Arc::new(MemorySessionStore::new()),
        };
        let localizer = match &settings.locale.catalog_path {
            Some(path) => MessageCatalog::load(path).await?,
            None => MessageCatalog::builtin(),
        };
        info!(
            base_url = %settings.api.base_url,
            persistent_session = settings.session.store_path.is_some(),
            "application context ready"
        );

        Ok(Self::builder(transport)
            .cache(QueryCache::new(CacheConfig::from(&settings.cache)))
            .session_store(session)
            .notifier(notifier)
            .localizer(Arc::new(localizer))
            .cookie(
                settings.session.cookie_name.clone(),
                settings.session.max_age_seconds,
            )
            .build())
    }

    pub fn transport(&self) -> &Transport {
        &self.inner.transport
    }

    pub fn cache(&self) -> &QueryCache {
        &self.inner.cache
    }

    pub fn profile(&self) -> &ProfileStore {
        &self.inner.profile
    }

    pub fn session(&self) -> &dyn SessionStore {
        self.inner.session.as_ref()
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.inner.notifier.as_ref()
    }

    pub fn localizer(&self) -> &dyn Localizer {
        self.inner.localizer.as_ref()
    }

    pub fn cookie(&self) -> &CookieSettings {
        &self.inner.cookie
    }

    pub fn houses(&self) -> HouseService {
        HouseService::new(self.inner.transport.clone())
    }

    pub fn rooms(&self) -> RoomService {
        RoomService::new(self.inner.transport.clone())
    }

    pub fn tenants(&self) -> TenantService {
        TenantService::new(self.inner.transport.clone())
    }

    pub fn schedulers(&self) -> SchedulerService {
        SchedulerService::new(self.inner.transport.clone())
    }

    pub fn billing(&self) -> BillingService {
        BillingService::new(self.inner.transport.clone())
    }

    pub fn contracts(&self) -> ContractService {
        ContractService::new(self.inner.transport.clone())
    }

    pub fn telegram(&self) -> TelegramService {
        TelegramService::new(self.inner.transport.clone())
    }
}

pub struct AppContextBuilder {
    transport: Transport,
    cache: Option<QueryCache>,
    session: Option<Arc<dyn SessionStore>>,
    notifier: Option<Arc<dyn Notifier>>,
    localizer: Option<Arc<dyn Localizer>>,
    cookie: CookieSettings,
}

impl AppContextBuilder {
    #[must_use]
    pub fn cache(mut self, cache: QueryCache) -> Self {
        self.cache = Some(cache);
        self
    }

    #[must_use]
    pub fn session_store(mut self, session: Arc<dyn SessionStore>) -> Self {
        self.session = Some(session);
        self
    }

    #[must_use]
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    #[must_use]
    pub fn localizer(mut self, localizer: Arc<dyn Localizer>) -> Self {
        self.localizer = Some(localizer);
        self
    }

    #[must_use]
    pub fn cookie(mut self, name: impl Into<String>, max_age_seconds: NonZeroU64) -> Self {
        self.cookie = CookieSettings {
            name: name.into(),
            max_age_seconds: max_age_seconds.get(),
        };
        self
    }

    pub fn build(self) -> AppContext {
        AppContext {
            inner: Arc::new(Inner {
                transport: self.transport,
                cache: self.cache.unwrap_or_default(),
                profile: ProfileStore::new(),
                session: self
                    .session
                    .unwrap_or_else(|| Arc::new(MemorySessionStore::new())),
                notifier: self.notifier.unwrap_or_else(|| Arc::new(TracingNotifier)),
                localizer: self
                    .localizer
                    .unwrap_or_else(|| Arc::new(MessageCatalog::builtin())),
                cookie: self.cookie,
            }),
        }
    }
}
