//! Integration tests for the exchange-rate lookup against a stub HTTP service.

mod common;

use std::time::Duration;
use tagprice::conversion::{convert, Currency, CurrencyApiClient, RateService};
use tagprice::RateError;

use common::*;

fn client(url: &str) -> CurrencyApiClient {
    CurrencyApiClient::new("test-key", url, Duration::from_secs(5)).expect("client should build")
}

#[tokio::test]
async fn test_conversion_multiplies_by_rate() -> anyhow::Result<()> {
    let (url, request) = serve_once(200, r#"{"data":{"KRW":{"value":1300.5}}}"#).await;

    let conversion = convert(&client(&url), 10.0, Currency::Usd).await?;
    assert_eq!(conversion.rate, 1300.5);
    assert_eq!(conversion.converted, 13005.0);
    assert_eq!(conversion.whole_won(), 13005);
    assert_eq!(conversion.base, Currency::Usd);

    let request_line = request.await?;
    assert!(request_line.starts_with("GET /v3/latest?"), "got: {}", request_line);
    assert!(request_line.contains("apikey=test-key"));
    assert!(request_line.contains("currencies=KRW"));
    assert!(request_line.contains("base_currency=USD"));

    Ok(())
}

#[tokio::test]
async fn test_converted_amount_is_rounded_to_cents() -> anyhow::Result<()> {
    let (url, _request) = serve_once(200, r#"{"data":{"KRW":{"value":9.1234}}}"#).await;

    let conversion = convert(&client(&url), 3.0, Currency::Jpy).await?;
    assert_eq!(conversion.converted, 27.37);
    assert_eq!(conversion.whole_won(), 27);

    Ok(())
}

#[tokio::test]
async fn test_missing_rate_field_is_an_error() {
    let (url, _request) = serve_once(200, r#"{"data":{"USD":{"value":0.00075}}}"#).await;

    let result = convert(&client(&url), 10.0, Currency::Usd).await;
    assert!(
        matches!(result, Err(RateError::MissingRate)),
        "expected MissingRate, got: {:?}",
        result
    );
}

#[tokio::test]
async fn test_non_json_body_is_an_error() {
    let (url, _request) = serve_once(200, "<html>maintenance</html>").await;

    let result = client(&url).latest_rate(Currency::Eur).await;
    assert!(matches!(result, Err(RateError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let (url, _request) = serve_once(401, r#"{"message":"Invalid authentication credentials"}"#).await;

    match client(&url).latest_rate(Currency::Cad).await {
        Err(RateError::Status { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid authentication credentials");
        }
        other => panic!("expected a status error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_last_updated_is_parsed() -> anyhow::Result<()> {
    let (url, _request) = serve_once(
        200,
        r#"{"meta":{"last_updated_at":"2024-05-17T23:59:59Z"},"data":{"KRW":{"code":"KRW","value":905.3}}}"#,
    )
    .await;

    let quote = client(&url).latest_rate(Currency::Aud).await?;
    assert_eq!(quote.base, Currency::Aud);
    assert_eq!(quote.rate, 905.3);
    let updated = quote.last_updated.expect("timestamp should be parsed");
    assert_eq!(updated.year(), 2024);
    assert_eq!(updated.day(), 17);

    Ok(())
}

#[tokio::test]
async fn test_unreachable_service_is_an_error() {
    // Bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = convert(&client(&format!("http://{}", addr)), 1.0, Currency::Usd).await;
    assert!(matches!(result, Err(RateError::Http(_))));
}

#[test]
fn test_currency_codes_parse_case_insensitively() {
    assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
    assert_eq!(" Eur ".parse::<Currency>().unwrap(), Currency::Eur);
    assert_eq!("KRW".parse::<Currency>().unwrap(), Currency::Krw);
    for currency in Currency::ALL {
        assert_eq!(currency.code().parse::<Currency>().unwrap(), currency);
    }
}

#[test]
fn test_unknown_currency_is_rejected() {
    assert!("GBP".parse::<Currency>().is_err());
    assert!("".parse::<Currency>().is_err());
}
