use rentbook_api_types::{TelegramAuthRequest, TelegramAuthResponse, TelegramLoginCode};
use serde_json::{Map, Value};

use crate::infra::transport::{ApiError, Transport};

const GENERATE: &str = "auth/telegram/generate";
const AUTHENTICATE: &str = "auth/telegram/auth";

/// The Telegram login exchange. The server owns the protocol; this side
/// only asks for a code and later trades it for a session.
#[derive(Debug, Clone)]
pub struct TelegramService {
    transport: Transport,
}

impl TelegramService {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub async fn generate(&self) -> Result<TelegramLoginCode, ApiError> {
        self.transport
            .post(GENERATE, &Value::Object(Map::new()))
            .await
    }

    pub async fn authenticate(&self, code: &str) -> Result<TelegramAuthResponse, ApiError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(ApiError::precondition("a login code is required"));
        }
        let request = TelegramAuthRequest {
            code: code.to_string(),
        };
        self.transport.post(AUTHENTICATE, &request).await
    }
}
