use std::path::{Path, PathBuf};
use image::RgbImage;
use ocrs::{ImageSource, OcrEngine, OcrEngineParams, TextItem};
use rten::Model;
use tracing::debug;
use crate::error::RecognitionError;
use crate::models::{Point, RecognizedFragment};

/// `ocrs` reports no per-line confidence
const DEFAULT_CONFIDENCE: f32 = 0.9;

/// Turns an RGB image into positioned text fragments.
///
/// Implementations are called once per region crop and once more for the
/// full image, so they must handle repeated calls on arbitrary sizes.
pub trait TextRecognizer {
    fn recognize(&self, img: &RgbImage) -> Result<Vec<RecognizedFragment>, RecognitionError>;
}

impl<F> TextRecognizer for F
where
    F: Fn(&RgbImage) -> Result<Vec<RecognizedFragment>, RecognitionError>,
{
    fn recognize(&self, img: &RgbImage) -> Result<Vec<RecognizedFragment>, RecognitionError> {
        self(img)
    }
}

/// Default model location used by `ocrs-cli`
pub fn default_models_dir() -> Option<PathBuf> {
    let home_dir = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .ok()?;
    Some(Path::new(&home_dir).join(".cache/ocrs"))
}

/// Text recognizer backed by the `ocrs` engine
pub struct OcrsRecognizer {
    engine: OcrEngine,
}

impl OcrsRecognizer {
    /// Load the detection and recognition models from `models_dir`
    pub fn from_dir(models_dir: &Path) -> Result<Self, RecognitionError> {
        let detection_model_path = models_dir.join("text-detection.rten");
        let recognition_model_path = models_dir.join("text-recognition.rten");

        if !detection_model_path.exists() || !recognition_model_path.exists() {
            return Err(RecognitionError::ModelsNotFound {
                detection: detection_model_path.display().to_string(),
                recognition: recognition_model_path.display().to_string(),
            });
        }

        let detection_model = Model::load_file(&detection_model_path)
            .map_err(|e| RecognitionError::ModelLoad(e.to_string()))?;
        let recognition_model = Model::load_file(&recognition_model_path)
            .map_err(|e| RecognitionError::ModelLoad(e.to_string()))?;

        let engine = OcrEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            ..Default::default()
        })
        .map_err(|e| RecognitionError::Engine(e.to_string()))?;

        debug!(dir = %models_dir.display(), "OCR engine initialized");
        Ok(Self { engine })
    }
}

impl TextRecognizer for OcrsRecognizer {
    /// One fragment per recognized text line
    fn recognize(&self, img: &RgbImage) -> Result<Vec<RecognizedFragment>, RecognitionError> {
        let img_source = ImageSource::from_bytes(img.as_raw(), img.dimensions())
            .map_err(|e| RecognitionError::InvalidImage(e.to_string()))?;
        let ocr_input = self
            .engine
            .prepare_input(img_source)
            .map_err(|e| RecognitionError::Engine(e.to_string()))?;

        let word_rects = self
            .engine
            .detect_words(&ocr_input)
            .map_err(|e| RecognitionError::Engine(e.to_string()))?;
        let line_rects = self.engine.find_text_lines(&ocr_input, &word_rects);
        let lines = self
            .engine
            .recognize_text(&ocr_input, &line_rects)
            .map_err(|e| RecognitionError::Engine(e.to_string()))?;

        let fragments = lines
            .iter()
            .flatten()
            .filter_map(|line| {
                let text = line.to_string().trim().to_string();
                if text.is_empty() {
                    return None;
                }
                let quad = line.rotated_rect().corners().map(|p| Point::new(p.x, p.y));
                Some(RecognizedFragment::new(quad, text, DEFAULT_CONFIDENCE))
            })
            .collect();

        Ok(fragments)
    }
}
