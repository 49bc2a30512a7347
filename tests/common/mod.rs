#![allow(dead_code, unused_imports)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from tagprice for tests
pub use tagprice::{DetectionSource, PriceDetector, RecognitionError, RecognizedFragment, Region};
