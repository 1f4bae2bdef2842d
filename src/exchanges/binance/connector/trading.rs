use super::BinanceConnector;
use crate::core::{
    errors::ExchangeError,
    kernel::{ParamSet, Transport},
    traits::OrderPlacer,
    types::{Order, Side},
};
use crate::exchanges::binance::conversions::{parse_created_order, parse_order};
use crate::exchanges::binance::rest::endpoints;
use async_trait::async_trait;
use reqwest::Method;
use tracing::{info, instrument};

fn validate_limit_order(order: &Order) -> Result<(), ExchangeError> {
    if order.symbol.is_empty() {
        return Err(ExchangeError::InvalidParameters(
            "order symbol is empty".to_string(),
        ));
    }
    if order.side == Side::None {
        return Err(ExchangeError::InvalidParameters(
            "order side must be BUY or SELL".to_string(),
        ));
    }
    if !order.quantity.is_positive() {
        return Err(ExchangeError::InvalidParameters(format!(
            "order quantity must be positive, got {}",
            order.quantity
        )));
    }
    if !order.price.is_positive() {
        return Err(ExchangeError::InvalidParameters(format!(
            "limit price must be positive, got {}",
            order.price
        )));
    }
    Ok(())
}

#[async_trait]
impl<T: Transport> OrderPlacer for BinanceConnector<T> {
    #[instrument(
        skip(self, order),
        fields(exchange = "binance", symbol = %order.symbol, side = %order.side)
    )]
    async fn place_limit_order(&self, order: &Order) -> Result<Order, ExchangeError> {
        validate_limit_order(order)?;

        let params = ParamSet::new()
            .with("symbol", &order.symbol)
            .with("side", order.side)
            .with("type", "LIMIT")
            .with("timeInForce", "GTC")
            .with("quantity", order.quantity)
            .with("price", order.price)
            .with("newOrderRespType", "RESULT");

        let body = self
            .rest
            .signed(Method::POST, endpoints::ORDER, params)
            .await?;
        let created = parse_created_order(&body, order)?;
        info!(order_id = created.order_id, status = %created.status, "order placed");
        Ok(created)
    }

    #[instrument(skip(self), fields(exchange = "binance"))]
    async fn cancel_order(&self, symbol: &str, order_id: u64) -> Result<Order, ExchangeError> {
        let params = ParamSet::new()
            .with("symbol", symbol)
            .with("orderId", order_id);

        let body = self
            .rest
            .signed(Method::DELETE, endpoints::ORDER, params)
            .await?;
        parse_order(&body)
    }
}
