pub mod core;
pub mod exchanges;

pub use core::{
    config::{ClientConfig, Credentials, ExchangeConfig},
    errors::{ErrorKind, ErrorRecord, ExchangeError},
    traits::{AccountInfo, ExchangeConnector, MarketDataSource, OrderPlacer},
    types::*,
};
pub use exchanges::binance::{build_connector, BinanceConnector};
