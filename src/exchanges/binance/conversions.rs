//! Mapping from response bodies to domain types.
//!
//! Missing fields fall back to defaults (empty symbol, zero, `NONE`) because
//! each endpoint returns a slightly different shape. A body that is not JSON,
//! or not the expected overall shape, is a `MalformedResponse`.

use super::types as binance_types;
use crate::core::errors::ExchangeError;
use crate::core::types::{
    conversion, Amount, Balance, BalanceEntry, Commission, Order, OrderStatus, Side, WireEnum,
};
use serde::de::DeserializeOwned;

fn parse_body<T: DeserializeOwned>(body: &str, what: &str) -> Result<T, ExchangeError> {
    serde_json::from_str(body)
        .map_err(|e| ExchangeError::MalformedResponse(format!("Failed to parse {}: {}", what, e)))
}

/// Convert a raw order into the domain order.
///
/// `time` (query responses) wins over `transactTime` (creation and cancel
/// responses); with neither present the timestamp is 0.
pub fn convert_order(raw: binance_types::BinanceOrder) -> Order {
    Order {
        symbol: raw.symbol.unwrap_or_default(),
        order_id: raw.order_id.unwrap_or_default(),
        price: conversion::string_to_amount(raw.price.as_deref()),
        quantity: conversion::string_to_amount(raw.orig_qty.as_deref()),
        side: raw.side.as_deref().map_or(Side::None, Side::from_wire),
        status: raw
            .status
            .as_deref()
            .map_or(OrderStatus::None, OrderStatus::from_wire),
        timestamp: raw.time.or(raw.transact_time).unwrap_or(0),
    }
}

pub fn parse_order(body: &str) -> Result<Order, ExchangeError> {
    parse_body::<binance_types::BinanceOrder>(body, "order").map(convert_order)
}

/// Map an order-creation response over the caller's placeholder.
///
/// Id, status and timestamp always come from the response; symbol, side,
/// price and quantity keep the caller's values when the response omits them.
pub fn parse_created_order(body: &str, placeholder: &Order) -> Result<Order, ExchangeError> {
    let raw: binance_types::BinanceOrder = parse_body(body, "created order")?;
    Ok(Order {
        symbol: raw.symbol.clone().unwrap_or_else(|| placeholder.symbol.clone()),
        price: raw
            .price
            .as_deref()
            .map_or(placeholder.price, |p| conversion::string_to_amount(Some(p))),
        quantity: raw
            .orig_qty
            .as_deref()
            .map_or(placeholder.quantity, |q| conversion::string_to_amount(Some(q))),
        side: raw.side.as_deref().map_or(placeholder.side, Side::from_wire),
        ..convert_order(raw)
    })
}

pub fn parse_order_list(body: &str) -> Result<Vec<Order>, ExchangeError> {
    let raw: Vec<binance_types::BinanceOrder> = parse_body(body, "order list")?;
    Ok(raw.into_iter().map(convert_order).collect())
}

/// Build a balance from an account response; entries without an asset name are skipped.
pub fn parse_balance_list(body: &str, omit_zero: bool) -> Result<Balance, ExchangeError> {
    let account: binance_types::BinanceAccountInfo = parse_body(body, "account")?;

    let mut balance = Balance::default();
    for raw in account.balances {
        let Some(asset) = raw.asset.filter(|a| !a.is_empty()) else {
            continue;
        };
        let entry = BalanceEntry {
            free: conversion::string_to_amount(raw.free.as_deref()),
            locked: conversion::string_to_amount(raw.locked.as_deref()),
        };
        if omit_zero && entry.is_zero() {
            continue;
        }
        balance.set(asset, entry);
    }
    Ok(balance)
}

/// Sum commissions per asset over a list of trades.
///
/// A total that no longer fits an `Amount` makes the whole body malformed.
pub fn parse_commission_list(body: &str) -> Result<Commission, ExchangeError> {
    let trades: Vec<binance_types::BinanceTrade> = parse_body(body, "trade list")?;

    let mut commission = Commission::default();
    for trade in trades {
        if let (Some(asset), Some(amount)) = (trade.commission_asset, trade.commission) {
            commission
                .add(asset, conversion::string_to_amount(Some(&amount)))
                .map_err(|e| ExchangeError::MalformedResponse(e.to_string()))?;
        }
    }
    Ok(commission)
}

pub fn parse_server_time(body: &str) -> Result<u64, ExchangeError> {
    parse_body::<binance_types::BinanceServerTime>(body, "server time").map(|t| t.server_time)
}

pub fn parse_price(body: &str) -> Result<Amount, ExchangeError> {
    parse_body::<binance_types::BinanceTickerPrice>(body, "ticker price")
        .map(|t| conversion::string_to_amount(t.price.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(s: &str) -> Amount {
        s.parse().unwrap()
    }

    #[test]
    fn test_order_uses_transact_time_fallback() {
        let body = r#"{"symbol":"VETUSDT","orderId":5,"price":"0.02700000","origQty":"423.00000000","side":"BUY","status":"NEW","transactTime":1700000000000}"#;
        let order = parse_order(body).unwrap();

        assert_eq!(order.symbol, "VETUSDT");
        assert_eq!(order.order_id, 5);
        assert_eq!(order.price, amount("0.027"));
        assert_eq!(order.quantity, amount("423"));
        assert_eq!(order.side, Side::Buy);
        assert_eq!(order.status, OrderStatus::New);
        assert_eq!(order.timestamp, 1_700_000_000_000);
    }

    #[test]
    fn test_order_time_takes_priority() {
        let body = r#"{"symbol":"VETUSDT","orderId":5,"time":1,"transactTime":2}"#;
        assert_eq!(parse_order(body).unwrap().timestamp, 1);
    }

    #[test]
    fn test_order_missing_fields_default() {
        let order = parse_order(r#"{"side":"HOLD","status":"EXPIRED"}"#).unwrap();

        assert_eq!(order.symbol, "");
        assert_eq!(order.order_id, 0);
        assert_eq!(order.price, Amount::ZERO);
        assert_eq!(order.side, Side::None);
        assert_eq!(order.side.as_wire(), "NONE");
        assert_eq!(order.status, OrderStatus::None);
        assert_eq!(order.timestamp, 0);
    }

    #[test]
    fn test_unparseable_body_is_malformed() {
        assert!(matches!(
            parse_order("<html>"),
            Err(ExchangeError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_order_list(r#"{"symbol":"VETUSDT"}"#),
            Err(ExchangeError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_created_order_overwrites_server_fields() {
        let placeholder = Order::limit("VETUSDT", Side::Buy, amount("0.027"), amount("423"));
        let body = r#"{"symbol":"VETUSDT","orderId":99,"status":"NEW","transactTime":1700000000000}"#;
        let created = parse_created_order(body, &placeholder).unwrap();

        assert_eq!(created.order_id, 99);
        assert_eq!(created.status, OrderStatus::New);
        assert_eq!(created.timestamp, 1_700_000_000_000);
        assert_eq!(created.price, placeholder.price);
        assert_eq!(created.quantity, placeholder.quantity);
        assert_eq!(created.side, Side::Buy);
    }

    #[test]
    fn test_order_list() {
        let body = r#"[
            {"symbol":"VETUSDT","orderId":1,"side":"BUY","status":"FILLED","time":10},
            {"symbol":"VETUSDT","orderId":2,"side":"SELL","status":"CANCELED","time":20}
        ]"#;
        let orders = parse_order_list(body).unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].status, OrderStatus::Filled);
        assert_eq!(orders[1].side, Side::Sell);
        assert!(parse_order_list("[]").unwrap().is_empty());
    }

    #[test]
    fn test_commission_sums_fills() {
        let body = r#"[
            {"orderId":7,"commissionAsset":"USDT","commission":"0.10000000"},
            {"orderId":7,"commissionAsset":"USDT","commission":"0.05000000"}
        ]"#;
        let commission = parse_commission_list(body).unwrap();

        assert_eq!(commission.get("USDT"), amount("0.15"));
        assert_eq!(commission.get("USDT").to_string(), "0.15000000");
    }

    #[test]
    fn test_commission_overflow_is_malformed() {
        let body = r#"[
            {"commissionAsset":"BNB","commission":"700000000000000000000"},
            {"commissionAsset":"BNB","commission":"700000000000000000000"}
        ]"#;

        assert!(matches!(
            parse_commission_list(body),
            Err(ExchangeError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_commission_skips_incomplete_trades() {
        let body = r#"[
            {"commissionAsset":"BNB"},
            {"commission":"1.00000000"},
            {"commissionAsset":"BNB","commission":"0.00100000"}
        ]"#;
        let commission = parse_commission_list(body).unwrap();

        assert_eq!(commission.assets(), vec!["BNB"]);
        assert_eq!(commission.get("BNB"), amount("0.001"));
    }

    #[test]
    fn test_balance_list() {
        let body = r#"{"balances":[
            {"asset":"BTC","free":"0.50000000","locked":"0.10000000"},
            {"asset":"ETH","free":"0.00000000","locked":"0.00000000"},
            {"free":"1.00000000"}
        ]}"#;

        let balance = parse_balance_list(body, false).unwrap();
        assert_eq!(balance.assets(), vec!["BTC", "ETH"]);
        assert_eq!(balance.get("BTC").locked, amount("0.1"));

        let non_zero = parse_balance_list(body, true).unwrap();
        assert_eq!(non_zero.assets(), vec!["BTC"]);
    }

    #[test]
    fn test_server_time_and_price() {
        assert_eq!(
            parse_server_time(r#"{"serverTime":1499827319559}"#).unwrap(),
            1_499_827_319_559
        );
        assert_eq!(
            parse_price(r#"{"symbol":"VETUSDT","price":"0.02712000"}"#).unwrap(),
            amount("0.02712")
        );
        assert!(parse_price("").is_err());
    }
}
