use super::BinanceConnector;
use crate::core::{
    errors::ExchangeError,
    kernel::{ParamSet, Transport},
    traits::AccountInfo,
    types::{Balance, Commission, Order},
};
use crate::exchanges::binance::conversions::{
    parse_balance_list, parse_commission_list, parse_order, parse_order_list,
};
use crate::exchanges::binance::rest::endpoints;
use async_trait::async_trait;
use reqwest::Method;
use tracing::instrument;

/// AccountInfo trait implementation for Binance
#[async_trait]
impl<T: Transport> AccountInfo for BinanceConnector<T> {
    #[instrument(skip(self), fields(exchange = "binance"))]
    async fn account_balance(&self) -> Result<Balance, ExchangeError> {
        let omit_zero = self.config().omit_zero_balances;
        let mut params = ParamSet::new();
        if omit_zero {
            params.add("omitZeroBalances", true);
        }

        let body = self
            .rest
            .signed(Method::GET, endpoints::ACCOUNT, params)
            .await?;
        parse_balance_list(&body, omit_zero)
    }

    #[instrument(skip(self), fields(exchange = "binance"))]
    async fn open_orders(&self, symbol: &str) -> Result<Vec<Order>, ExchangeError> {
        let params = ParamSet::new().with("symbol", symbol);
        let body = self
            .rest
            .signed(Method::GET, endpoints::OPEN_ORDERS, params)
            .await?;
        parse_order_list(&body)
    }

    #[instrument(skip(self), fields(exchange = "binance"))]
    async fn order_status(&self, symbol: &str, order_id: u64) -> Result<Order, ExchangeError> {
        let params = ParamSet::new()
            .with("symbol", symbol)
            .with("orderId", order_id);
        let body = self
            .rest
            .signed(Method::GET, endpoints::ORDER, params)
            .await?;
        parse_order(&body)
    }

    #[instrument(skip(self), fields(exchange = "binance"))]
    async fn all_orders(&self, symbol: &str) -> Result<Vec<Order>, ExchangeError> {
        let params = ParamSet::new().with("symbol", symbol);
        let body = self
            .rest
            .signed(Method::GET, endpoints::ALL_ORDERS, params)
            .await?;
        parse_order_list(&body)
    }

    #[instrument(skip(self), fields(exchange = "binance"))]
    async fn order_commission(
        &self,
        symbol: &str,
        order_id: u64,
    ) -> Result<Commission, ExchangeError> {
        let params = ParamSet::new()
            .with("symbol", symbol)
            .with("orderId", order_id);
        let body = self
            .rest
            .signed(Method::GET, endpoints::MY_TRADES, params)
            .await?;
        parse_commission_list(&body)
    }
}
