use once_cell::sync::Lazy;
use regex::Regex;
use crate::models::{PriceCandidate, RecognizedFragment};

// Decimal alternative first so "12.50" is not cut at "12"
static PRICE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+\.[0-9]+|[0-9]+").expect("price pattern is valid"));

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPrice {
    pub value: f64,
    pub has_decimal_point: bool,
    pub matched: String,
}

/// Extract the first number in `text`, treating commas as decimal points.
///
/// Currency symbols and other non-digit text are skipped, not stripped.
pub fn parse_price(text: &str) -> Option<ParsedPrice> {
    let clean = text.replace(',', ".");
    let matched = PRICE_RE.find(clean.trim())?.as_str();
    let value = matched.parse::<f64>().ok()?;

    Some(ParsedPrice {
        value,
        has_decimal_point: matched.contains('.'),
        matched: matched.to_string(),
    })
}

impl PriceCandidate {
    pub fn from_fragment(fragment: &RecognizedFragment) -> Option<Self> {
        let parsed = parse_price(&fragment.text)?;
        Some(Self {
            value: parsed.value,
            has_decimal_point: parsed.has_decimal_point,
            glyph_height: fragment.glyph_height(),
            source_text: fragment.text.clone(),
        })
    }
}
