use crate::core::errors::ExchangeError;
use crate::core::kernel::TransportResult;
use crate::exchanges::binance::types::BinanceApiError;
use tracing::warn;

/// Sort one transport result into success or one of the three failure kinds.
///
/// Order of checks: transport status, then HTTP 200, then a `{code, msg}`
/// body, then the bare HTTP status. A 200 body is passed through untouched;
/// whether it parses is the mapper's concern.
pub fn classify(result: TransportResult) -> Result<String, ExchangeError> {
    if !result.is_transport_success() {
        warn!(
            kind = "Transport",
            code = result.transport.code,
            "{}",
            result.transport.message
        );
        return Err(ExchangeError::Transport {
            code: result.transport.code,
            message: result.transport.message,
        });
    }

    if result.http.code == 200 {
        return Ok(result.body);
    }

    if let Ok(api_error) = serde_json::from_str::<BinanceApiError>(&result.body) {
        warn!(
            kind = "ExchangeBusiness",
            code = api_error.code,
            http = result.http.code,
            "{}",
            api_error.msg
        );
        return Err(ExchangeError::ExchangeBusiness {
            code: api_error.code,
            message: api_error.msg,
        });
    }

    warn!(
        kind = "HttpServer",
        code = result.http.code,
        "{}",
        result.http.message
    );
    Err(ExchangeError::HttpServer {
        code: result.http.code,
        message: result.http.message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ErrorKind;
    use crate::core::kernel::transport_code;

    #[test]
    fn test_transport_failure_ignores_body() {
        let mut result =
            TransportResult::failed(transport_code::COULDNT_CONNECT, "Couldn't connect");
        result.http.code = 404;
        result.body = r#"{"code":-1121,"msg":"Invalid symbol."}"#.to_string();

        let err = classify(result).unwrap_err();
        let record = err.record().unwrap();
        assert_eq!(record.kind, ErrorKind::Transport);
        assert_eq!(record.code, transport_code::COULDNT_CONNECT);
        assert_eq!(record.message, "Couldn't connect");
    }

    #[test]
    fn test_ok_passes_body_through() {
        let body = classify(TransportResult::completed(200, "OK", "not json")).unwrap();
        assert_eq!(body, "not json");
    }

    #[test]
    fn test_business_error_body() {
        let result = TransportResult::completed(
            404,
            "Not Found",
            r#"{"code":-1121,"msg":"Invalid symbol."}"#,
        );

        match classify(result).unwrap_err() {
            ExchangeError::ExchangeBusiness { code, message } => {
                assert_eq!(code, -1121);
                assert_eq!(message, "Invalid symbol.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_html_body_is_http_server_error() {
        let result = TransportResult::completed(502, "Bad Gateway", "<html>Bad Gateway</html>");

        match classify(result).unwrap_err() {
            ExchangeError::HttpServer { code, message } => {
                assert_eq!(code, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_json_without_code_and_msg_is_http_server_error() {
        let result = TransportResult::completed(503, "Service Unavailable", r#"{"error":"busy"}"#);
        let err = classify(result).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::HttpServer));
    }
}
