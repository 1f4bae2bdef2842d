use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::ReqwestTransport;
use crate::exchanges::binance::connector::BinanceConnector;

/// Create a Binance connector backed by reqwest
pub fn build_connector(
    config: ExchangeConfig,
) -> Result<BinanceConnector<ReqwestTransport>, ExchangeError> {
    let transport = ReqwestTransport::new()?;
    BinanceConnector::new(transport, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ClientConfig;

    #[test]
    fn test_build_connector_without_credentials() {
        let connector = build_connector(ExchangeConfig::read_only()).unwrap();
        assert!(!connector.can_authenticate());
        assert_eq!(connector.base_url(), "https://api.binance.com:443");
    }

    #[test]
    fn test_build_connector_with_credentials() {
        let config = ExchangeConfig::new("test_key".to_string(), "test_secret".to_string());
        let connector = build_connector(config).unwrap();
        assert!(connector.can_authenticate());
    }

    #[test]
    fn test_build_connector_rejects_invalid_config() {
        let config = ExchangeConfig::read_only()
            .with_client(ClientConfig::default().with_timeout_ms(0));
        assert!(matches!(
            build_connector(config),
            Err(ExchangeError::Config(_))
        ));
    }
}
