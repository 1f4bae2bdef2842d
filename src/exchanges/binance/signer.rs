use crate::core::config::Credentials;
use crate::core::kernel::{
    hmac_sha256_hex, HeaderSet, ParamSet, SignatureResult, SignedQuery, SignedRequest, Signer,
};

pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// HMAC-SHA256 signer for SIGNED endpoints.
///
/// Appends `recvWindow`, `timestamp` and finally `signature`, where the
/// signature covers every parameter before it in insertion order. The API key
/// travels as a header, never in the query.
#[derive(Debug, Clone)]
pub struct BinanceSigner {
    credentials: Credentials,
    recv_window: u64,
}

impl BinanceSigner {
    pub fn new(credentials: Credentials, recv_window: u64) -> Self {
        Self {
            credentials,
            recv_window,
        }
    }
}

impl Signer for BinanceSigner {
    fn sign_request(&self, mut params: ParamSet, timestamp: u64) -> SignatureResult {
        params.add("recvWindow", self.recv_window);
        params.add("timestamp", timestamp);

        let signature = hmac_sha256_hex(self.credentials.secret_key(), params.as_str())?;
        params.add("signature", signature);

        let mut headers = HeaderSet::new();
        headers.add(API_KEY_HEADER, self.credentials.api_key());

        Ok(SignedRequest {
            headers,
            query: SignedQuery::new(params.into_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC_API_KEY: &str = "vmPUZE6mv9SD5VNHk4HlWFsOr6aKE2zvsw0MuIgwCIPy6utIco14y7Ju91duEh8A";

    fn doc_signer() -> BinanceSigner {
        BinanceSigner::new(
            Credentials::new(
                DOC_API_KEY.to_string(),
                "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j".to_string(),
            ),
            5000,
        )
    }

    fn doc_params() -> ParamSet {
        ParamSet::new()
            .with("symbol", "LTCBTC")
            .with("side", "BUY")
            .with("type", "LIMIT")
            .with("timeInForce", "GTC")
            .with("quantity", 1_u32)
            .with("price", "0.1")
    }

    #[test]
    fn test_sign_known_vector() {
        let signed = doc_signer()
            .sign_request(doc_params(), 1_499_827_319_559)
            .unwrap();

        assert_eq!(
            signed.query.as_str(),
            "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1\
             &recvWindow=5000&timestamp=1499827319559\
             &signature=c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn test_api_key_goes_in_header_only() {
        let signed = doc_signer().sign_request(ParamSet::new(), 1).unwrap();

        assert_eq!(signed.headers.get(API_KEY_HEADER), Some(DOC_API_KEY));
        assert!(!signed.query.as_str().contains(DOC_API_KEY));
        assert!(signed
            .query
            .as_str()
            .starts_with("recvWindow=5000&timestamp=1&signature="));
    }

    #[test]
    fn test_signature_deterministic_per_timestamp() {
        let signer = doc_signer();
        let a = signer.sign_request(doc_params(), 1000).unwrap();
        let b = signer.sign_request(doc_params(), 1000).unwrap();
        let c = signer.sign_request(doc_params(), 1001).unwrap();

        assert_eq!(a.query, b.query);
        assert_ne!(a.query, c.query);
    }

    #[test]
    fn test_signature_is_last_field() {
        let signed = doc_signer().sign_now(doc_params()).unwrap();
        let query = signed.query.as_str();
        let (before, signature) = query.rsplit_once("&signature=").unwrap();

        assert_eq!(signature.len(), 64);
        assert!(before.contains("&recvWindow=5000&timestamp="));
        assert_eq!(query.matches("signature=").count(), 1);
    }
}
