use super::BinanceConnector;
use crate::core::{
    errors::ExchangeError,
    kernel::{get_timestamp, ParamSet, Transport},
    traits::MarketDataSource,
    types::Amount,
};
use crate::exchanges::binance::conversions::{parse_price, parse_server_time};
use crate::exchanges::binance::rest::endpoints;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Method;
use std::time::{Duration, Instant};
use tracing::instrument;

/// Format used by [`BinanceConnector::server_datetime`].
pub const DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

#[async_trait]
impl<T: Transport> MarketDataSource for BinanceConnector<T> {
    #[instrument(skip(self), fields(exchange = "binance"))]
    async fn ping(&self) -> Result<(), ExchangeError> {
        self.rest
            .public(Method::GET, endpoints::PING, ParamSet::new())
            .await
            .map(|_| ())
    }

    #[instrument(skip(self), fields(exchange = "binance"))]
    async fn server_time(&self) -> Result<u64, ExchangeError> {
        let body = self
            .rest
            .public(Method::GET, endpoints::TIME, ParamSet::new())
            .await?;
        parse_server_time(&body)
    }

    #[instrument(skip(self), fields(exchange = "binance"))]
    async fn clock_skew(&self) -> Result<i64, ExchangeError> {
        let local = get_timestamp()?;
        let server = self.server_time().await?;
        Ok(server as i64 - local as i64)
    }

    #[instrument(skip(self), fields(exchange = "binance"))]
    async fn price_of(&self, symbol: &str) -> Result<Amount, ExchangeError> {
        let params = ParamSet::new().with("symbol", symbol);
        let body = self
            .rest
            .public(Method::GET, endpoints::TICKER_PRICE, params)
            .await?;
        parse_price(&body)
    }
}

impl<T: Transport> BinanceConnector<T> {
    /// Server time rendered as `dd.mm.YYYY HH:MM:SS` (UTC).
    #[instrument(skip(self), fields(exchange = "binance"))]
    pub async fn server_datetime(&self) -> Result<String, ExchangeError> {
        let millis = self.server_time().await?;
        Ok(format_millis(millis))
    }

    /// Round trip of one ping.
    #[instrument(skip(self), fields(exchange = "binance"))]
    pub async fn ping_latency(&self) -> Result<Duration, ExchangeError> {
        let started = Instant::now();
        self.ping().await?;
        Ok(started.elapsed())
    }
}

fn format_millis(millis: u64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis as i64)
        .unwrap_or_default()
        .format(DATETIME_FORMAT)
        .to_string()
}
