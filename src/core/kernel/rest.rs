use crate::core::config::ConfigError;
use crate::core::errors::ExchangeError;
use crate::core::kernel::params::HeaderSet;
use async_trait::async_trait;
use reqwest::{Client, Method};
use std::time::Duration;
use tracing::{debug, instrument, trace};

/// Transport status codes, numbered after libcurl's `CURLcode`.
pub mod transport_code {
    pub const SUCCESS: i32 = 0;
    pub const FAILED: i32 = 2;
    pub const URL_MALFORMAT: i32 = 3;
    pub const COULDNT_CONNECT: i32 = 7;
    pub const OPERATION_TIMEDOUT: i32 = 28;
    pub const TOO_MANY_REDIRECTS: i32 = 47;
    pub const RECV_ERROR: i32 = 56;
}

/// A numeric code and its human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub code: i32,
    pub message: String,
}

impl Status {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Everything the transport learned from one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResult {
    pub transport: Status,
    pub http: Status,
    pub body: String,
}

impl TransportResult {
    /// An HTTP exchange that completed, whatever its status code.
    pub fn completed(
        http_code: u16,
        http_message: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            transport: Status::new(transport_code::SUCCESS, "No error"),
            http: Status::new(i32::from(http_code), http_message),
            body: body.into(),
        }
    }

    /// No HTTP response was obtained.
    pub fn failed(code: i32, message: impl Into<String>) -> Self {
        Self {
            transport: Status::new(code, message),
            http: Status::new(-1, "No header data"),
            body: String::new(),
        }
    }

    pub fn is_transport_success(&self) -> bool {
        self.transport.code == transport_code::SUCCESS
    }
}

/// One outgoing request.
///
/// For `GET` the payload is appended to the URL as the query string; for
/// other methods it is sent as the form-encoded body.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderSet,
    pub payload: String,
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn target_url(&self) -> String {
        if self.method == Method::GET && !self.payload.is_empty() {
            format!("{}?{}", self.url, self.payload)
        } else {
            self.url.clone()
        }
    }

    pub fn body(&self) -> Option<&str> {
        (self.method != Method::GET && !self.payload.is_empty()).then_some(self.payload.as_str())
    }
}

/// Performs exactly one HTTP exchange. Never retries.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn perform(&self, request: HttpRequest) -> TransportResult;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn perform(&self, request: HttpRequest) -> TransportResult {
        (**self).perform(request).await
    }
}

/// Implementation of `Transport` using reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, ExchangeError> {
        let client = Client::builder().build().map_err(|e| {
            ConfigError::InvalidConfiguration(format!("Failed to build HTTP client: {}", e))
        })?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn classify_error(error: &reqwest::Error) -> i32 {
        if error.is_timeout() {
            transport_code::OPERATION_TIMEDOUT
        } else if error.is_connect() {
            transport_code::COULDNT_CONNECT
        } else if error.is_builder() {
            transport_code::URL_MALFORMAT
        } else if error.is_redirect() {
            transport_code::TOO_MANY_REDIRECTS
        } else if error.is_body() || error.is_decode() {
            transport_code::RECV_ERROR
        } else {
            transport_code::FAILED
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn perform(&self, request: HttpRequest) -> TransportResult {
        let url = request.target_url();
        debug!("Sending {} {}", request.method, request.url);

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .timeout(request.timeout);
        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body() {
            builder = builder.body(body.to_string());
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => return TransportResult::failed(Self::classify_error(&e), e.to_string()),
        };

        let status = response.status();
        match response.text().await {
            Ok(body) => {
                trace!("Response body: {}", body);
                TransportResult::completed(
                    status.as_u16(),
                    status.canonical_reason().unwrap_or_default(),
                    body,
                )
            }
            Err(e) => TransportResult::failed(Self::classify_error(&e), e.to_string()),
        }
    }
}
