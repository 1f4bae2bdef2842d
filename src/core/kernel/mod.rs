/// `SpotX` Kernel - exchange-agnostic request plumbing
///
/// The kernel holds everything a signed REST call needs that does not depend
/// on a particular exchange's field names or error bodies.
///
/// # Architecture
///
/// ## Parameters
/// - `ParamSet`: ordered `key=value&...` accumulator; the exact string that is signed
/// - `HeaderSet`: ordered header lines
/// - `ParamValue`: canonical rendering of booleans, integers, amounts and enums
///
/// ## Authentication
/// - `Signer`: consumes a `ParamSet` and yields a `SignedRequest`
/// - `hmac_sha256_hex`: HMAC-SHA256 digest helper
///
/// ## Transport
/// - `Transport`: one HTTP exchange, reported as a `TransportResult`
/// - `ReqwestTransport`: reqwest-backed implementation
///
/// # Example
///
/// ```rust,no_run
/// use spotx::core::kernel::*;
/// use reqwest::Method;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = ReqwestTransport::new()?;
/// let params = ParamSet::new().with("symbol", "BTCUSDT");
///
/// let mut headers = HeaderSet::new();
/// headers.add("Accept", "application/json");
///
/// let result = transport
///     .perform(HttpRequest {
///         method: Method::GET,
///         url: "https://api.binance.com:443/api/v3/ticker/price".to_string(),
///         headers,
///         payload: params.into_string(),
///         timeout: Duration::from_millis(5000),
///     })
///     .await;
/// println!("{} {}", result.http.code, result.body);
/// # Ok(())
/// # }
/// ```
pub mod params;
pub mod rest;
pub mod signer;

// Re-export key types for convenience
pub use params::{HeaderSet, ParamSet, ParamValue};
pub use rest::{transport_code, HttpRequest, ReqwestTransport, Status, Transport, TransportResult};
pub use signer::{
    get_timestamp, hmac_sha256_hex, SignatureResult, SignedQuery, SignedRequest, Signer,
};
