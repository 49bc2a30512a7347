//! Request-scoped state for one price-tag conversion.
//!
//! A `Session` moves between two screens: `Upload`, waiting for an image, and
//! `Result`, holding the detected price and, once requested, its conversion.
//! The caller owns the value and passes it into each step.

use image::DynamicImage;
use tracing::{info, info_span, warn};
use uuid::Uuid;
use crate::conversion::{self, Conversion, Currency, RateService};
use crate::detection::PriceDetector;
use crate::detection::ocr::TextRecognizer;
use crate::error::{PriceError, SessionError};
use crate::models::Detection;

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub detection: Detection,
    /// Price used for conversion: the detected one unless overridden
    pub price: f64,
    pub overridden: bool,
    pub conversion: Option<Conversion>,
}

impl Analysis {
    pub fn new(detection: Detection) -> Self {
        Self {
            price: detection.price(),
            detection,
            overridden: false,
            conversion: None,
        }
    }

    /// Replace the detected price with a user-entered one.
    ///
    /// The entry control is responsible for rejecting negative input.
    pub fn override_price(&mut self, price: f64) {
        self.price = price;
        self.overridden = true;
        self.conversion = None;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Upload,
    Result(Analysis),
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Upload => "upload",
            SessionState::Result(_) => "result",
        }
    }
}

#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: SessionState::Upload,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        match &self.state {
            SessionState::Result(analysis) => Some(analysis),
            SessionState::Upload => None,
        }
    }

    pub fn analysis_mut(&mut self) -> Option<&mut Analysis> {
        match &mut self.state {
            SessionState::Result(analysis) => Some(analysis),
            SessionState::Upload => None,
        }
    }

    /// Detect the price in an uploaded image and move to the result screen.
    ///
    /// When no price is found the session stays on the upload screen.
    pub fn analyze<R: TextRecognizer>(
        &mut self,
        detector: &PriceDetector<R>,
        img: &DynamicImage,
    ) -> Result<Detection, SessionError> {
        if !matches!(self.state, SessionState::Upload) {
            return Err(invalid_state("analyze an image", &self.state));
        }

        let _span = info_span!("analyze", session = %self.id).entered();
        let detection = detector.detect(img).inspect_err(|e: &PriceError| {
            warn!(error = %e, "price detection failed");
        })?;

        self.state = SessionState::Result(Analysis::new(detection.clone()));
        Ok(detection)
    }

    /// Convert the current price into won and remember the result.
    ///
    /// A rate failure leaves the detected price in place.
    pub async fn convert<S: RateService>(
        &mut self,
        service: &S,
        currency: Currency,
    ) -> Result<Conversion, SessionError> {
        let id = self.id;
        let analysis = match &mut self.state {
            SessionState::Result(analysis) => analysis,
            state @ SessionState::Upload => return Err(invalid_state("convert a price", state)),
        };

        let conversion = conversion::convert(service, analysis.price, currency)
            .await
            .inspect_err(|e| warn!(session = %id, error = %e, "rate lookup failed"))?;

        analysis.conversion = Some(conversion.clone());
        Ok(conversion)
    }

    /// Clear the analysis and return to the upload screen
    pub fn reset(&mut self) {
        info!(session = %self.id, "session reset");
        self.state = SessionState::Upload;
    }
}

fn invalid_state(action: &'static str, state: &SessionState) -> SessionError {
    SessionError::InvalidState {
        action,
        state: state.name(),
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
