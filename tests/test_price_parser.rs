//! Tests for pulling a numeric price out of raw OCR text.

mod common;

use tagprice::PriceCandidate;
use tagprice::detection::price::parse_price;

use common::*;

#[test]
fn test_comma_is_read_as_decimal_point() {
    let parsed = parse_price("12,50").expect("should parse");
    assert_eq!(parsed.value, 12.5);
    assert!(parsed.has_decimal_point);
}

#[test]
fn test_text_without_digits_has_no_price() {
    assert!(parse_price("no digits here").is_none());
    assert!(parse_price("").is_none());
    assert!(parse_price("   ").is_none());
}

#[test]
fn test_currency_symbol_is_skipped() {
    let parsed = parse_price("$45").expect("should parse");
    assert_eq!(parsed.value, 45.0);
    assert!(!parsed.has_decimal_point);
}

#[test]
fn test_only_first_number_is_used() {
    let parsed = parse_price("2 for 5.00").expect("should parse");
    assert_eq!(parsed.value, 2.0);
    assert!(!parsed.has_decimal_point);
}

#[test]
fn test_decimal_form_preferred_at_same_position() {
    let parsed = parse_price("Sale 19.99 each").expect("should parse");
    assert_eq!(parsed.matched, "19.99");
    assert_eq!(parsed.value, 19.99);
}

#[test]
fn test_thousands_comma_becomes_decimal() {
    // "1,234.56" normalizes to "1.234.56"; the first decimal run wins
    let parsed = parse_price("1,234.56").expect("should parse");
    assert_eq!(parsed.value, 1.234);
}

#[test]
fn test_trailing_point_without_digits_is_integer() {
    let parsed = parse_price("7.").expect("should parse");
    assert_eq!(parsed.value, 7.0);
    assert!(!parsed.has_decimal_point);
}

#[test]
fn test_candidate_carries_height_and_text() {
    let frag = fragment("€3,99", 42.0);
    let candidate = PriceCandidate::from_fragment(&frag).expect("should parse");
    assert_eq!(candidate.value, 3.99);
    assert!(candidate.has_decimal_point);
    assert_eq!(candidate.glyph_height, 42.0);
    assert_eq!(candidate.source_text, "€3,99");
}

#[test]
fn test_glyph_height_uses_vertical_extent_of_quad() {
    use tagprice::models::Point;

    // Slightly rotated line: top edge rises from y=12 to y=8
    let frag = RecognizedFragment::new(
        [
            Point::new(0.0, 12.0),
            Point::new(100.0, 8.0),
            Point::new(101.0, 40.0),
            Point::new(1.0, 44.0),
        ],
        "8.49",
        0.9,
    );
    assert_eq!(frag.glyph_height(), 36.0);
}
