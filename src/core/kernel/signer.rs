use crate::core::errors::ExchangeError;
use crate::core::kernel::params::{HeaderSet, ParamSet};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

/// Result type for signing operations
pub type SignatureResult = Result<SignedRequest, ExchangeError>;

/// Parameter string that already carries its signature.
///
/// Only a [`Signer`] can produce one, and it cannot be extended afterwards,
/// so a signed request is always sent exactly as it was signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedQuery(String);

impl SignedQuery {
    pub(crate) fn new(serialized: String) -> Self {
        Self(serialized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Output of a signer: extra header lines plus the final parameter string.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub headers: HeaderSet,
    pub query: SignedQuery,
}

/// Signer trait for request authentication
///
/// Signing consumes the parameter set; it is the last step before the
/// request goes to the transport.
pub trait Signer: Send + Sync {
    /// Sign `params` as of `timestamp` (milliseconds since epoch).
    fn sign_request(&self, params: ParamSet, timestamp: u64) -> SignatureResult;

    /// Sign with the current wall-clock time.
    fn sign_now(&self, params: ParamSet) -> SignatureResult {
        self.sign_request(params, get_timestamp()?)
    }
}

/// Hex-encoded HMAC-SHA256 of `message` keyed by `secret`.
pub fn hmac_sha256_hex(secret: &str, message: &str) -> Result<String, ExchangeError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ExchangeError::InvalidParameters(format!("Invalid secret key: {}", e)))?;
    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn get_timestamp() -> Result<u64, ExchangeError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .map_err(|e| ExchangeError::InvalidParameters(format!("System time error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hmac_known_vector() {
        // Example from the Binance spot API documentation for SIGNED endpoints.
        let secret = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";
        let query = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1\
                     &recvWindow=5000&timestamp=1499827319559";

        assert_eq!(
            hmac_sha256_hex(secret, query).unwrap(),
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn test_hmac_empty_message() {
        let signature = hmac_sha256_hex("secret", "").unwrap();
        assert_eq!(signature.len(), 64);
    }

    #[test]
    fn test_timestamp_is_recent() {
        // 2023-11-14, well before any machine running this
        assert!(get_timestamp().unwrap() > 1_700_000_000_000);
    }
}
