pub mod builder;
pub mod classifier;
pub mod connector;
pub mod conversions;
pub mod rest;
pub mod signer;
pub mod types;

// Re-export main types for easier importing
pub use builder::build_connector;
pub use classifier::classify;
pub use connector::BinanceConnector;
pub use rest::{endpoints, BinanceRestClient};
pub use signer::{BinanceSigner, API_KEY_HEADER};
