use crate::core::config::{ClientConfig, ExchangeConfig};
use crate::core::errors::ExchangeError;
use crate::core::kernel::Transport;
use crate::core::traits::ExchangeConnector;
use crate::exchanges::binance::rest::BinanceRestClient;
use crate::exchanges::binance::signer::BinanceSigner;
use std::sync::Arc;

mod account;
mod market_data;
mod trading;

/// Binance spot client.
///
/// Holds the transport, the connection settings and the signer built from the
/// credentials. Every operation builds its own parameter set, so one instance
/// can serve concurrent calls.
#[derive(Debug)]
pub struct BinanceConnector<T: Transport> {
    rest: BinanceRestClient<T>,
}

impl<T: Transport> BinanceConnector<T> {
    /// Create a connector over the given transport.
    ///
    /// Authenticated operations are available only if the config has both keys;
    /// otherwise they fail with `AuthenticationRequired` without touching the network.
    pub fn new(transport: T, config: ExchangeConfig) -> Result<Self, ExchangeError> {
        config.client.validate()?;

        let mut rest = BinanceRestClient::new(transport, config.client.clone());
        if config.has_credentials() {
            let signer = Arc::new(BinanceSigner::new(
                config.credentials,
                config.client.recv_window,
            ));
            rest = rest.with_signer(signer);
        }

        Ok(Self { rest })
    }

    /// Check if authentication is available
    pub fn can_authenticate(&self) -> bool {
        self.rest.can_sign()
    }

    pub fn config(&self) -> &ClientConfig {
        self.rest.config()
    }

    pub fn base_url(&self) -> String {
        self.rest.config().base_url()
    }
}

impl<T: Transport> ExchangeConnector for BinanceConnector<T> {}
