pub mod currency;
pub mod currency_api;

use std::future::Future;
use time::OffsetDateTime;
use tracing::info;
use crate::error::RateError;

pub use currency::{Currency, UnsupportedCurrency};
pub use currency_api::CurrencyApiClient;

/// Korean won per one unit of `base`
#[derive(Debug, Clone, PartialEq)]
pub struct RateQuote {
    pub base: Currency,
    pub rate: f64,
    pub last_updated: Option<OffsetDateTime>,
}

/// Source of live KRW exchange rates
pub trait RateService {
    fn latest_rate(&self, base: Currency) -> impl Future<Output = Result<RateQuote, RateError>>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub base: Currency,
    pub amount: f64,
    pub rate: f64,
    /// `amount * rate` rounded to two decimal places
    pub converted: f64,
    pub last_updated: Option<OffsetDateTime>,
}

impl Conversion {
    pub fn whole_won(&self) -> i64 {
        self.converted.round() as i64
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Convert `amount` of `from` into Korean won at the current rate
pub async fn convert<S>(service: &S, amount: f64, from: Currency) -> Result<Conversion, RateError>
where
    S: RateService,
{
    let quote = service.latest_rate(from).await?;
    let converted = round2(amount * quote.rate);
    info!(base = %from, amount, rate = quote.rate, converted, "converted price");

    Ok(Conversion {
        base: from,
        amount,
        rate: quote.rate,
        converted,
        last_updated: quote.last_updated,
    })
}

/// Render a won amount with thousands separators, e.g. `13,005`
pub fn format_won(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
