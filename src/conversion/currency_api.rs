use std::time::Duration;
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::debug;
use crate::conversion::{Currency, RateQuote, RateService};
use crate::error::RateError;

/// Client for the currencyapi.com `latest` endpoint
pub struct CurrencyApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CurrencyApiClient {
    pub const DEFAULT_URL: &'static str = "https://api.currencyapi.com";

    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, timeout: Duration) -> Result<Self, RateError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn latest_url(&self) -> String {
        format!("{}/v3/latest", self.base_url)
    }
}

impl RateService for CurrencyApiClient {
    async fn latest_rate(&self, base: Currency) -> Result<RateQuote, RateError> {
        debug!(url = %self.latest_url(), base = %base, "requesting exchange rate");

        let response = self
            .client
            .get(self.latest_url())
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("currencies", "KRW"),
                ("base_currency", base.code()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(RateError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        parse_latest_response(base, &body)
    }
}

/// Pull the KRW rate out of a `latest` response body.
///
/// A missing or non-numeric `data.KRW.value` is an error, never a zero rate.
pub fn parse_latest_response(base: Currency, body: &str) -> Result<RateQuote, RateError> {
    let json: Value = serde_json::from_str(body)?;

    let rate = json
        .pointer("/data/KRW/value")
        .and_then(Value::as_f64)
        .ok_or(RateError::MissingRate)?;

    if !rate.is_finite() || rate <= 0.0 {
        return Err(RateError::InvalidRate(rate));
    }

    let last_updated = json
        .pointer("/meta/last_updated_at")
        .and_then(Value::as_str)
        .and_then(|s| OffsetDateTime::parse(s, &Rfc3339).ok());

    Ok(RateQuote {
        base,
        rate,
        last_updated,
    })
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| json.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.chars().take(200).collect())
}
