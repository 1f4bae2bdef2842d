use crate::core::{
    errors::ExchangeError,
    types::{Amount, Balance, Commission, Order},
};
use async_trait::async_trait;

/// Public endpoints; no credentials needed.
#[async_trait]
pub trait MarketDataSource {
    /// Confirm the exchange is reachable
    async fn ping(&self) -> Result<(), ExchangeError>;

    /// Exchange server time in milliseconds since epoch
    async fn server_time(&self) -> Result<u64, ExchangeError>;

    /// Server time minus local time, in milliseconds
    async fn clock_skew(&self) -> Result<i64, ExchangeError>;

    /// Latest price for a symbol
    async fn price_of(&self, symbol: &str) -> Result<Amount, ExchangeError>;
}

#[async_trait]
pub trait OrderPlacer {
    /// Submit a LIMIT/GTC order; the returned order carries the exchange-assigned fields
    async fn place_limit_order(&self, order: &Order) -> Result<Order, ExchangeError>;

    async fn cancel_order(&self, symbol: &str, order_id: u64) -> Result<Order, ExchangeError>;
}

#[async_trait]
pub trait AccountInfo {
    async fn account_balance(&self) -> Result<Balance, ExchangeError>;

    async fn open_orders(&self, symbol: &str) -> Result<Vec<Order>, ExchangeError>;

    async fn order_status(&self, symbol: &str, order_id: u64) -> Result<Order, ExchangeError>;

    async fn all_orders(&self, symbol: &str) -> Result<Vec<Order>, ExchangeError>;

    /// Fees for one order, summed per asset across its fills
    async fn order_commission(
        &self,
        symbol: &str,
        order_id: u64,
    ) -> Result<Commission, ExchangeError>;
}

// Composite trait for callers that need the full surface
pub trait ExchangeConnector: MarketDataSource + OrderPlacer + AccountInfo {}
