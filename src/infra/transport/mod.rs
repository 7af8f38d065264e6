//! HTTP transport shared by every resource service.

pub mod error;
pub mod query;

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Client, Method, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::cache::lock::{self, Site};

pub use error::{ApiError, ErrorKind};
pub use query::query_pairs;

const SOURCE: &str = "infra::transport";

/// Thin REST client: base URL, bearer token, JSON in and out.
///
/// Cloning is cheap; clones share the connection pool and the token slot.
#[derive(Clone, Debug)]
pub struct Transport {
    client: Client,
    base: Url,
    token: Arc<RwLock<Option<String>>>,
}

impl Transport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base,
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("rentbook/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Replaces the session token sent as `Authorization: Bearer ...`.
    pub fn set_token(&self, token: Option<String>) {
        *lock::write(&self.token, Site::new(SOURCE, "set_token")) = token;
    }

    pub fn has_token(&self) -> bool {
        lock::read(&self.token, Site::new(SOURCE, "has_token")).is_some()
    }

    fn auth_header(&self) -> Result<Option<HeaderValue>, ApiError> {
        let token = lock::read(&self.token, Site::new(SOURCE, "auth_header")).clone();
        token
            .map(|token| {
                HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|e| ApiError::invalid_request(format!("invalid session token: {e}")))
            })
            .transpose()
    }

    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }

    pub async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let mut url = self.url(path)?;
        if let Some(filter) = query {
            let pairs = query_pairs(filter);
            if !pairs.is_empty() {
                let mut qp = url.query_pairs_mut();
                for (name, value) in &pairs {
                    qp.append_pair(name, value);
                }
            }
        }
        self.send(Method::GET, url, None::<&()>).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        self.send(Method::POST, url, Some(body)).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        self.send(Method::PATCH, url, body).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path)?;
        self.send(Method::DELETE, url, None::<&()>).await
    }

    async fn send<T, B>(&self, method: Method, url: Url, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let started = Instant::now();
        let path = url.path().to_string();
        let mut req = self.client.request(method.clone(), url);
        if let Some(value) = self.auth_header()? {
            req = req.header(AUTHORIZATION, value);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(|err| {
            warn!(%method, path = %path, error = %err, "request failed without response");
            ApiError::from(err)
        })?;
        let status = resp.status();
        debug!(
            %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "api response"
        );
        Self::handle(resp).await
    }

    async fn handle<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), &bytes));
        }
        let body: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
        serde_json::from_slice(body)
            .map_err(|e| ApiError::decode(format!("failed to parse body: {e}")))
    }
}
