use std::time::Duration;

use crate::protocol::{parse_reply, InboundMessage, OutboundMessage};

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Base URL of the local authentication service.
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Bound on the whole round trip, so the session state machine always
    /// reaches a terminal state even when the service hangs.
    pub request_timeout: Duration,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/".to_string(),
            connect_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("invalid service url: {0}")]
    InvalidUrl(String),
    #[error("failed to encode message: {0}")]
    Encode(String),
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("malformed reply: {0}")]
    MalformedReply(String),
}

/// One round trip to the local authentication service.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    async fn exchange(&self, message: &OutboundMessage) -> Result<InboundMessage, ServiceError>;
}

/// Real proxy: one GET per message with the JSON-encoded message in the
/// `msg` query parameter, the wire format the local service expects.
/// The hop is trusted loopback, so no TLS or retry is applied.
#[derive(Debug, Clone)]
pub struct HttpAuthService {
    client: reqwest::Client,
    endpoint: reqwest::Url,
}

impl HttpAuthService {
    pub fn new(settings: &ServiceSettings) -> Result<Self, ServiceError> {
        let endpoint = reqwest::Url::parse(&settings.base_url)
            .map_err(|err| ServiceError::InvalidUrl(err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ServiceError::Network(err.to_string()))?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait::async_trait]
impl AuthService for HttpAuthService {
    async fn exchange(&self, message: &OutboundMessage) -> Result<InboundMessage, ServiceError> {
        let encoded =
            serde_json::to_string(message).map_err(|err| ServiceError::Encode(err.to_string()))?;

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("msg", encoded.as_str())])
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await.map_err(map_reqwest_error)?;
        parse_reply(&body).map_err(|err| ServiceError::MalformedReply(err.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::Timeout;
    }
    ServiceError::Network(err.to_string())
}
