use crate::core::config::ClientConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{HeaderSet, HttpRequest, ParamSet, Signer, Transport};
use crate::exchanges::binance::classifier::classify;
use reqwest::Method;
use std::sync::Arc;
use tracing::{debug, instrument};

pub mod endpoints {
    pub const PING: &str = "/api/v3/ping";
    pub const TIME: &str = "/api/v3/time";
    pub const TICKER_PRICE: &str = "/api/v3/ticker/price";
    pub const ACCOUNT: &str = "/api/v3/account";
    pub const ORDER: &str = "/api/v3/order";
    pub const OPEN_ORDERS: &str = "/api/v3/openOrders";
    pub const ALL_ORDERS: &str = "/api/v3/allOrders";
    pub const MY_TRADES: &str = "/api/v3/myTrades";
}

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Sends one request per call: build headers, sign if needed, send, classify.
///
/// Returns the raw body of a 200 response; mapping it is up to the caller.
pub struct BinanceRestClient<T: Transport> {
    transport: T,
    config: ClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl<T: Transport> std::fmt::Debug for BinanceRestClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceRestClient")
            .field("config", &self.config)
            .field("has_signer", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

impl<T: Transport> BinanceRestClient<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self {
            transport,
            config,
            signer: None,
        }
    }

    /// Set the signer for authenticated requests
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn can_sign(&self) -> bool {
        self.signer.is_some()
    }

    fn base_headers(&self) -> HeaderSet {
        let mut headers = HeaderSet::new();
        headers
            .add("Content-Type", FORM_CONTENT_TYPE)
            .add("Accept", "application/json")
            .add("User-Agent", self.config.user_agent.as_str());
        headers
    }

    /// Unsigned request to a public endpoint.
    #[instrument(skip(self, params))]
    pub async fn public(
        &self,
        method: Method,
        endpoint: &str,
        params: ParamSet,
    ) -> Result<String, ExchangeError> {
        let headers = self.base_headers();
        self.send(method, endpoint, headers, params.into_string()).await
    }

    /// Signed request; the parameter set is consumed by the signer.
    #[instrument(skip(self, params))]
    pub async fn signed(
        &self,
        method: Method,
        endpoint: &str,
        params: ParamSet,
    ) -> Result<String, ExchangeError> {
        let signer = self
            .signer
            .as_ref()
            .ok_or(ExchangeError::AuthenticationRequired)?;
        let signed = signer.sign_now(params)?;

        let mut headers = self.base_headers();
        headers.extend(signed.headers);
        self.send(method, endpoint, headers, signed.query.as_str().to_string()).await
    }

    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        headers: HeaderSet,
        payload: String,
    ) -> Result<String, ExchangeError> {
        let request = HttpRequest {
            method,
            url: format!("{}{}", self.config.base_url(), endpoint),
            headers,
            payload,
            timeout: self.config.timeout(),
        };
        debug!(url = %request.url, "dispatching request");

        let result = self.transport.perform(request).await;
        classify(result)
    }
}
