//! Named-cookie session storage.
//!
//! The session token survives between process runs the way a browser cookie
//! survives between page loads: a name, a value and an absolute expiry.
//! Expired cookies read as absent and are dropped on read.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::debug;

use super::error::InfraError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCookie {
    pub value: String,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}

impl SessionCookie {
    pub fn new(value: impl Into<String>, max_age_seconds: u64) -> Self {
        let max_age = Duration::seconds(i64::try_from(max_age_seconds).unwrap_or(i64::MAX));
        let expires_at = OffsetDateTime::now_utc()
            .checked_add(max_age)
            .unwrap_or(OffsetDateTime::now_utc() + Duration::days(365 * 100));
        Self {
            value: value.into(),
            expires_at,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= OffsetDateTime::now_utc()
    }
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, name: &str) -> Result<Option<String>, InfraError>;
    async fn set(&self, name: &str, value: &str, max_age_seconds: u64) -> Result<(), InfraError>;
    async fn remove(&self, name: &str) -> Result<(), InfraError>;
}

/// Process-local cookie jar.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    cookies: DashMap<String, SessionCookie>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, name: &str) -> Result<Option<String>, InfraError> {
        let expired = match self.cookies.get(name) {
            Some(cookie) if !cookie.is_expired() => return Ok(Some(cookie.value.clone())),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.cookies.remove(name);
        }
        Ok(None)
    }

    async fn set(&self, name: &str, value: &str, max_age_seconds: u64) -> Result<(), InfraError> {
        self.cookies
            .insert(name.to_string(), SessionCookie::new(value, max_age_seconds));
        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<(), InfraError> {
        self.cookies.remove(name);
        Ok(())
    }
}

/// Cookie jar persisted as a JSON object in a single file.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeMap<String, SessionCookie>, InfraError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(err.into()),
        };
        if bytes.is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_slice(&bytes).map_err(|e| {
            InfraError::session(format!("corrupt session file {}: {e}", self.path.display()))
        })
    }

    async fn store(&self, cookies: &BTreeMap<String, SessionCookie>) -> Result<(), InfraError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let data = serde_json::to_vec_pretty(cookies)
            .map_err(|e| InfraError::session(format!("failed to encode session file: {e}")))?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, data).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, name: &str) -> Result<Option<String>, InfraError> {
        let _guard = self.write_lock.lock().await;
        let mut cookies = self.load().await?;
        match cookies.get(name) {
            Some(cookie) if !cookie.is_expired() => Ok(Some(cookie.value.clone())),
            Some(_) => {
                debug!(cookie = name, path = %self.path.display(), "dropping expired session cookie");
                cookies.remove(name);
                self.store(&cookies).await?;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, name: &str, value: &str, max_age_seconds: u64) -> Result<(), InfraError> {
        let _guard = self.write_lock.lock().await;
        let mut cookies = self.load().await?;
        cookies.insert(name.to_string(), SessionCookie::new(value, max_age_seconds));
        self.store(&cookies).await
    }

    async fn remove(&self, name: &str) -> Result<(), InfraError> {
        let _guard = self.write_lock.lock().await;
        let mut cookies = self.load().await?;
        if cookies.remove(name).is_some() {
            self.store(&cookies).await?;
        }
        Ok(())
    }
}
