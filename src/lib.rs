pub mod config;
pub mod conversion;
pub mod detection;
pub mod error;
pub mod models;
pub mod session;

pub use config::Config;
pub use conversion::{Conversion, Currency, CurrencyApiClient, RateQuote, RateService};
pub use detection::PriceDetector;
pub use detection::ocr::{OcrsRecognizer, TextRecognizer};
pub use error::{ConfigError, PriceError, RateError, RecognitionError, SessionError};
pub use models::{Detection, DetectionSource, PriceCandidate, RecognizedFragment, Region, SelectionResult};
pub use session::{Analysis, Session, SessionState};
